use super::{CompressedSetIter, record::Record};
use crate::{Ksuid, Result, Uint128, is_sorted};
use std::borrow::Cow;
use std::fmt;

/// An immutable, compact encoding of a sorted batch of KSUIDs.
///
/// Built once from a slice of IDs, then read back with a forward iterator.
/// There is no random access and no removal; the only supported mutation is
/// appending another encoded fragment with [`CompressedSet::append`].
///
/// IDs generated close together in time, and especially runs produced by a
/// [`Sequence`], compress well: a full sequence of 65536 IDs fits in 24
/// bytes.
///
/// # Example
/// ```
/// use ksuid::{CompressedSet, Ksuid, Sequence};
///
/// let ids: Vec<Ksuid> = Sequence::new(Ksuid::new()).take(1000).collect();
/// let set = CompressedSet::compress(&ids);
/// assert!(set.len() <= 30);
///
/// let back = set.collect_ids().unwrap();
/// assert_eq!(back, ids);
/// ```
///
/// [`Sequence`]: crate::Sequence
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct CompressedSet(Vec<u8>);

impl CompressedSet {
    /// Compresses `ids`.
    ///
    /// Unsorted input is sorted (stably) into a scratch copy first. An ID
    /// equal to the one directly before it is dropped, so every distinct ID
    /// is stored exactly once.
    #[must_use]
    pub fn compress(ids: &[Ksuid]) -> Self {
        append_compressed(Vec::new(), ids)
    }

    /// Appends another fragment encoding `ids` to this set.
    ///
    /// The fragment starts with its own raw record, so iteration yields the
    /// existing IDs followed by the new ones; the two batches are not merged
    /// or re-sorted against each other.
    #[must_use]
    pub fn append(self, ids: &[Ksuid]) -> Self {
        append_compressed(self.0, ids)
    }

    /// Wraps an existing encoding without validating it.
    ///
    /// Malformed content is reported by the iterator.
    #[must_use]
    pub const fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the set and returns the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Size of the encoding in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set holds no IDs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the IDs in the order they were encoded.
    #[must_use]
    pub fn iter(&self) -> CompressedSetIter<'_> {
        CompressedSetIter::new(&self.0)
    }

    /// Decodes every ID into a vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSet`] at the first record that cannot be
    /// decoded.
    ///
    /// [`Error::MalformedSet`]: crate::Error::MalformedSet
    pub fn collect_ids(&self) -> Result<Vec<Ksuid>> {
        self.iter().collect()
    }
}

/// Appends the compressed encoding of `ids` to `set`.
///
/// `set` may already hold one or more fragments; the result iterates as those
/// fragments followed by `ids` in sorted order.
#[must_use]
pub fn append_compressed(mut set: Vec<u8>, ids: &[Ksuid]) -> CompressedSet {
    if ids.is_empty() {
        return CompressedSet(set);
    }

    let ids: Cow<'_, [Ksuid]> = if is_sorted(ids) {
        Cow::Borrowed(ids)
    } else {
        let mut sorted = ids.to_vec();
        sorted.sort();
        Cow::Owned(sorted)
    };
    let first = ids[0];

    Record::Raw(first).encode_into(&mut set);

    let mut timestamp = first.timestamp();
    let mut last = first;
    let mut last_value = first.payload_value();

    let mut i = 1;
    while i < ids.len() {
        let id = ids[i];
        i += 1;

        if id == last {
            continue;
        }

        let t = id.timestamp();
        let v = id.payload_value();

        if t != timestamp {
            Record::TimeDelta {
                delta: t - timestamp,
                payload: id.payload(),
            }
            .encode_into(&mut set);
            timestamp = t;
            last = id;
            last_value = v;
            continue;
        }

        let delta = v.wrapping_sub(last_value);
        if delta == Uint128::ONE {
            let run = range_length(&ids[i..], t, id);
            if run.extra != 0 {
                Record::PayloadRange(run.extra).encode_into(&mut set);
                i += run.consumed;
                last = run.end;
                last_value = run.end.payload_value();
                continue;
            }
        }

        Record::PayloadDelta(delta).encode_into(&mut set);
        last = id;
        last_value = v;
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(ids = ids.len(), bytes = set.len(), "compressed ksuid set");

    CompressedSet(set)
}

/// How far a `+1` run starting at some ID extends into the following IDs.
struct Run {
    /// IDs after the first that continue the run.
    extra: u64,
    /// Input positions covered, including skipped duplicates.
    consumed: usize,
    /// Last ID of the run.
    end: Ksuid,
}

fn range_length(ids: &[Ksuid], timestamp: u32, start: Ksuid) -> Run {
    let mut run = Run {
        extra: 0,
        consumed: 0,
        end: start,
    };
    let mut last_value = start.payload_value();

    for (i, &id) in ids.iter().enumerate() {
        if id == run.end {
            continue;
        }

        let v = id.payload_value();
        if id.timestamp() != timestamp || v.wrapping_sub(last_value) != Uint128::ONE {
            run.consumed = i;
            return run;
        }

        run.end = id;
        run.extra += 1;
        last_value = v;
    }

    run.consumed = ids.len();
    run
}

impl<'a> IntoIterator for &'a CompressedSet {
    type Item = Result<Ksuid>;
    type IntoIter = CompressedSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Ksuid> for CompressedSet {
    fn from_iter<I: IntoIterator<Item = Ksuid>>(iter: I) -> Self {
        let ids: Vec<Ksuid> = iter.into_iter().collect();
        Self::compress(&ids)
    }
}

impl AsRef<[u8]> for CompressedSet {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<CompressedSet> for Vec<u8> {
    fn from(set: CompressedSet) -> Self {
        set.0
    }
}

impl From<Vec<u8>> for CompressedSet {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for CompressedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            match item {
                Ok(id) => write!(f, "\"{id}\"")?,
                Err(e) => write!(f, "<{e}>")?,
            }
        }
        f.write_str("]")
    }
}

impl fmt::Debug for CompressedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressedSet")
            .field("bytes", &self.0.len())
            .field("ids", &format_args!("{self}"))
            .finish()
    }
}
