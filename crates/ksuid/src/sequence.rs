use crate::{Error, Ksuid, Result};

/// Number of IDs a single [`Sequence`] can produce.
pub const SEQUENCE_LEN: u32 = 1 << 16;

/// Derives up to 65536 ordered IDs from one seed.
///
/// Each draw returns the seed with its lowest 16 payload bits replaced by a
/// counter running from 0 to 65535, so the output is strictly increasing and
/// packs into a single payload-range record in a [`CompressedSet`].
///
/// Sequences are not checked against one another: two sequences only produce
/// disjoint IDs if their seeds differ outside the low 16 bits.
///
/// Once exhausted a sequence stays exhausted; create a new one for the next
/// batch. A sequence is deliberately not `Copy`: iterating it by value moves
/// it, and forking the counter takes an explicit `clone`.
///
/// ```compile_fail
/// use ksuid::{Ksuid, Sequence};
///
/// let seq = Sequence::new(Ksuid::NIL);
/// let _: Vec<Ksuid> = seq.take(3).collect();
/// let mut again = seq;
/// again.next_id();
/// ```
///
/// # Example
/// ```
/// use ksuid::{Ksuid, Sequence};
///
/// let mut seq = Sequence::new(Ksuid::new());
/// let a = seq.next_id().unwrap();
/// let b = seq.next_id().unwrap();
/// assert!(a < b);
/// ```
///
/// [`CompressedSet`]: crate::CompressedSet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence {
    seed: Ksuid,
    count: u32,
}

impl Sequence {
    /// Creates a sequence starting at counter 0.
    #[must_use]
    pub const fn new(seed: Ksuid) -> Self {
        Self { seed, count: 0 }
    }

    /// The seed this sequence derives from.
    #[must_use]
    pub const fn seed(&self) -> Ksuid {
        self.seed
    }

    /// Number of IDs still available.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        SEQUENCE_LEN - self.count
    }

    /// Produces the next ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SequenceExhausted`] once all 65536 IDs have been
    /// drawn.
    pub fn next_id(&mut self) -> Result<Ksuid> {
        let n = u16::try_from(self.count).map_err(|_| Error::SequenceExhausted)?;
        self.count += 1;
        Ok(self.seed.with_sequence_number(n))
    }

    /// Inclusive range of IDs this sequence can still produce.
    ///
    /// `min` is the next ID to be drawn, or the final ID once the sequence is
    /// exhausted; `max` is always the seed with counter 65535.
    #[must_use]
    pub fn bounds(&self) -> (Ksuid, Ksuid) {
        let last = u16::MAX;
        let next = u16::try_from(self.count).unwrap_or(last);
        (
            self.seed.with_sequence_number(next),
            self.seed.with_sequence_number(last),
        )
    }
}

impl Iterator for Sequence {
    type Item = Ksuid;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_id().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Sequence {}

impl core::iter::FusedIterator for Sequence {}
