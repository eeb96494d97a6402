mod base62;
mod error;
mod generator;
mod id;
mod rand;
mod sequence;
#[cfg(feature = "serde")]
mod serde;
mod set;
mod time;
mod uint128;
mod value;

pub use crate::base62::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::sequence::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::set::*;
pub use crate::time::*;
pub use crate::uint128::*;
pub use crate::value::*;
