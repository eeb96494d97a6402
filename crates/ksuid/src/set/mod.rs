//! Compressed sets of KSUIDs.
//!
//! A [`CompressedSet`] stores a sorted batch of IDs as a stream of tagged
//! records. The first record of every fragment is a full raw ID; each later
//! record is expressed relative to the previously decoded ID:
//!
//! | Tag bits | Record         | Count bits        | Body                           |
//! |----------|----------------|-------------------|--------------------------------|
//! | `00`     | raw            | `0`               | 20-byte ID                     |
//! | `01`     | time delta     | 1..=4 delta bytes | timestamp delta, 16-byte payload |
//! | `10`     | payload delta  | 1..=16 delta bytes| payload delta                  |
//! | `11`     | payload range  | 1..=8 length bytes| run length minus one           |
//!
//! All multi-byte values are big-endian and minimal-width. There is no
//! overall length prefix: a reader consumes records until the buffer ends,
//! which also means encoded fragments can be concatenated byte for byte.

mod compressed;
mod iter;
mod record;
#[cfg(test)]
mod tests;

pub use compressed::*;
pub use iter::*;
