mod interface;
mod lock;
mod thread_random;

pub use interface::*;
pub use lock::*;
pub use thread_random::*;
