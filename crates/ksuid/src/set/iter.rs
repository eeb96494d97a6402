use super::record::Record;
use crate::{Error, Ksuid, MalformedReason, Result, Uint128};
use core::iter::FusedIterator;

/// Pull-based decoder over the IDs of a [`CompressedSet`].
///
/// Each call to `next` decodes at most one record; a payload-range record is
/// expanded lazily, one ID per call. Items are `Result`s because the
/// underlying bytes may come from storage or the network: a malformed or
/// truncated record yields a single [`Error::MalformedSet`], after which the
/// iterator is exhausted.
///
/// [`CompressedSet`]: crate::CompressedSet
#[derive(Clone, Debug)]
pub struct CompressedSetIter<'a> {
    content: &'a [u8],
    offset: usize,
    timestamp: u32,
    last_value: Uint128,
    remaining: u64,
    started: bool,
    failed: bool,
}

impl<'a> CompressedSetIter<'a> {
    /// Creates an iterator over raw compressed-set bytes.
    #[must_use]
    pub const fn new(content: &'a [u8]) -> Self {
        Self {
            content,
            offset: 0,
            timestamp: 0,
            last_value: Uint128::ZERO,
            remaining: 0,
            started: false,
            failed: false,
        }
    }

    /// Byte offset of the next record to decode.
    ///
    /// After an error this is the offset of the record that failed.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    fn emit(&self) -> Ksuid {
        Ksuid::from_components(self.timestamp, self.last_value.to_be_bytes())
    }

    fn apply(&mut self, record: Record) -> Result<Ksuid, MalformedReason> {
        match record {
            Record::Raw(id) => {
                self.timestamp = id.timestamp();
                self.last_value = id.payload_value();
                self.started = true;
                return Ok(id);
            }
            _ if !self.started => return Err(MalformedReason::MissingBase),
            Record::TimeDelta { delta, payload } => {
                self.timestamp = self
                    .timestamp
                    .checked_add(delta)
                    .ok_or(MalformedReason::Overflow)?;
                self.last_value = Uint128::from_be_bytes(payload);
            }
            Record::PayloadDelta(delta) => {
                self.last_value = self
                    .last_value
                    .checked_add(delta)
                    .ok_or(MalformedReason::Overflow)?;
            }
            Record::PayloadRange(extra) => {
                // The whole run must stay within the payload range.
                self.last_value
                    .checked_add(Uint128::from(extra))
                    .and_then(|v| v.checked_add(Uint128::ONE))
                    .ok_or(MalformedReason::Overflow)?;
                self.last_value = self.last_value.incr();
                self.remaining = extra;
            }
        }
        Ok(self.emit())
    }
}

impl Iterator for CompressedSetIter<'_> {
    type Item = Result<Ksuid>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining != 0 {
            self.remaining -= 1;
            self.last_value = self.last_value.incr();
            return Some(Ok(self.emit()));
        }

        if self.failed || self.offset >= self.content.len() {
            return None;
        }

        let start = self.offset;
        let decoded = Record::decode(&self.content[start..])
            .and_then(|(record, len)| self.apply(record).map(|id| (id, len)));

        match decoded {
            Ok((id, len)) => {
                self.offset += len;
                Some(Ok(id))
            }
            Err(reason) => {
                self.failed = true;
                self.remaining = 0;
                #[cfg(feature = "tracing")]
                tracing::warn!(offset = start, %reason, "malformed compressed ksuid set");
                Some(Err(Error::MalformedSet {
                    offset: start,
                    reason,
                }))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        if self.failed || self.offset >= self.content.len() {
            (pending, usize::try_from(self.remaining).ok())
        } else {
            (pending.saturating_add(1), None)
        }
    }
}

impl FusedIterator for CompressedSetIter<'_> {}
