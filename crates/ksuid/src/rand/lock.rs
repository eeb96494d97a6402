use crate::RandSource;
use rand::RngCore;

#[cfg(feature = "parking-lot")]
use parking_lot::Mutex;
#[cfg(not(feature = "parking-lot"))]
use std::sync::Mutex;

/// A `RandSource` that serializes access to a single shared RNG.
///
/// Use this when payloads must come from one specific stream, such as a
/// seeded RNG in tests, that is shared by several threads. Every draw of 16
/// payload bytes happens under the lock, so concurrent callers never
/// interleave partial reads.
///
/// # Example
/// ```
/// use ksuid::{LockRandom, RandSource};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let a = LockRandom::new(StdRng::seed_from_u64(7));
/// let b = LockRandom::new(StdRng::seed_from_u64(7));
/// let x: u128 = a.rand();
/// let y: u128 = b.rand();
/// assert_eq!(x, y);
/// ```
#[derive(Debug, Default)]
pub struct LockRandom<R> {
    rng: Mutex<R>,
}

impl<R: RngCore> LockRandom<R> {
    /// Wraps `rng` so it can be shared.
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Consumes the wrapper and returns the inner RNG.
    pub fn into_inner(self) -> R {
        #[cfg(feature = "parking-lot")]
        {
            self.rng.into_inner()
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            // The RNG holds no invariant a panicking holder could break.
            self.rng
                .into_inner()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
        }
    }

    fn fill(&self, buf: &mut [u8]) {
        #[cfg(feature = "parking-lot")]
        let mut rng = self.rng.lock();
        #[cfg(not(feature = "parking-lot"))]
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        rng.fill_bytes(buf);
    }
}

impl<R: RngCore> RandSource<[u8; 16]> for LockRandom<R> {
    fn rand(&self) -> [u8; 16] {
        let mut buf = [0; 16];
        self.fill(&mut buf);
        buf
    }
}

impl<R: RngCore> RandSource<u128> for LockRandom<R> {
    fn rand(&self) -> u128 {
        u128::from_be_bytes(RandSource::<[u8; 16]>::rand(self))
    }
}
