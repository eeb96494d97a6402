mod codec;
mod ksuid;

pub use codec::*;
