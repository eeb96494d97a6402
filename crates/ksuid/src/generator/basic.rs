#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Ksuid, RandSource, Sequence, SystemClock, ThreadRandom, TimeSource};

/// A caller-owned KSUID generator with an injectable clock and payload
/// source.
///
/// The generator itself holds no mutable state: every call reads the clock
/// once and draws one 128-bit payload, so it can be shared by reference
/// across threads whenever `T` and `R` are `Sync`. Payload sources that wrap
/// a single mutable stream must lock internally (see [`LockRandom`]).
///
/// ## Features
/// - ✅ Thread-safe (given a thread-safe clock and RNG)
/// - ✅ Probabilistically unique (no coordination required)
/// - ✅ Time-ordered to one-second resolution (not monotonic within a second)
///
/// ## See Also
/// - [`Sequence`] for gap-free, strictly increasing batches
///
/// [`LockRandom`]: crate::LockRandom
#[derive(Clone, Debug)]
pub struct KsuidGenerator<T = SystemClock, R = ThreadRandom>
where
    T: TimeSource<u32>,
    R: RandSource<u128>,
{
    time: T,
    rng: R,
}

impl Default for KsuidGenerator {
    fn default() -> Self {
        Self::new(SystemClock, ThreadRandom)
    }
}

impl<T, R> KsuidGenerator<T, R>
where
    T: TimeSource<u32>,
    R: RandSource<u128>,
{
    /// Creates a new [`KsuidGenerator`] with the provided time source and
    /// RNG.
    ///
    /// # Parameters
    /// - `time`: A [`TimeSource`] returning seconds since the KSUID epoch
    /// - `rng`: A [`RandSource`] used to fill the 16-byte payload
    ///
    /// # Example
    /// ```
    /// use ksuid::{KsuidGenerator, SystemClock, ThreadRandom};
    ///
    /// let generator = KsuidGenerator::new(SystemClock, ThreadRandom);
    /// let id = generator.next_id();
    /// assert!(!id.is_nil());
    /// ```
    pub const fn new(time: T, rng: R) -> Self {
        Self { time, rng }
    }

    /// Generates an ID stamped with the current time.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Ksuid {
        self.next_id_at(self.time.current_timestamp())
    }

    /// Generates an ID for an explicit timestamp (seconds since the KSUID
    /// epoch), drawing only the payload from the RNG.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id_at(&self, timestamp: u32) -> Ksuid {
        Ksuid::from_timestamp_and_rand(timestamp, &self.rng)
    }

    /// Starts a new [`Sequence`] seeded with a freshly generated ID.
    pub fn sequence(&self) -> Sequence {
        Sequence::new(self.next_id())
    }

    /// The clock this generator reads.
    pub const fn time(&self) -> &T {
        &self.time
    }

    /// The payload source this generator draws from.
    pub const fn rng(&self) -> &R {
        &self.rng
    }
}
