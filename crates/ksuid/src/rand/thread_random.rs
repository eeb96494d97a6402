use crate::RandSource;
use rand::{Rng, rng};

/// The default payload source, backed by `rand::rng()`.
///
/// Draws come from the calling thread's own cryptographically secure RNG, so
/// concurrent generators never contend on a lock. Nothing is stored in the
/// value itself; it is a zero-sized handle and is freely `Send + Sync` even
/// though the thread-local RNG behind it is not.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<u128> for ThreadRandom {
    fn rand(&self) -> u128 {
        rng().random()
    }
}

impl RandSource<[u8; 16]> for ThreadRandom {
    fn rand(&self) -> [u8; 16] {
        rng().random()
    }
}
