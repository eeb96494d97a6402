//! `#[serde(with = "...")]` helpers for [`Ksuid`](crate::Ksuid) fields.
//!
//! - [`as_base62`]: the 27-character string form.
//! - [`as_bytes`]: the raw 20-byte form.

mod ksuid;

pub use ksuid::*;
