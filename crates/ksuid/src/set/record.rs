use crate::{Ksuid, MalformedReason, Uint128};

/// Mask for extracting the record kind from a tag byte (bits 6-7).
#[rustfmt::skip]
const KIND_MASK: u8         = 0b1100_0000;

/// Mask for extracting the byte count from a tag byte (bits 0-5).
#[rustfmt::skip]
const COUNT_MASK: u8        = 0b0011_1111;

/// Raw record (00): a full 20-byte ID, count bits unused.
#[rustfmt::skip]
const TAG_RAW: u8           = 0b0000_0000;

/// Time delta record (01): timestamp delta plus a full payload.
#[rustfmt::skip]
const TAG_TIME_DELTA: u8    = 0b0100_0000;

/// Payload delta record (10): payload delta at the same timestamp.
#[rustfmt::skip]
const TAG_PAYLOAD_DELTA: u8 = 0b1000_0000;

/// Payload range record (11): a run of consecutive payloads.
#[rustfmt::skip]
const TAG_PAYLOAD_RANGE: u8 = 0b1100_0000;

/// One record of a compressed set.
///
/// The variants mirror the four tag kinds; the count bits of the tag are
/// derived from the value width when encoding and validated when decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Record {
    /// A full ID that resets the running timestamp and payload.
    Raw(Ksuid),
    /// A later timestamp with a fresh payload.
    TimeDelta {
        delta: u32,
        payload: [u8; Ksuid::PAYLOAD_LEN],
    },
    /// A larger payload at the running timestamp.
    PayloadDelta(Uint128),
    /// `running + 1` followed by this many further `+1` steps.
    PayloadRange(u64),
}

impl Record {
    /// Appends the wire form of this record to `out`.
    pub(crate) fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Self::Raw(id) => {
                out.push(TAG_RAW);
                out.extend_from_slice(id.as_bytes());
            }
            Self::TimeDelta { delta, payload } => {
                let n = min_len(u64::from(*delta));
                out.push(TAG_TIME_DELTA | n as u8);
                out.extend_from_slice(&delta.to_be_bytes()[4 - n..]);
                out.extend_from_slice(payload);
            }
            Self::PayloadDelta(delta) => {
                let n = delta.byte_len();
                out.push(TAG_PAYLOAD_DELTA | n as u8);
                out.extend_from_slice(&delta.to_be_bytes()[16 - n..]);
            }
            Self::PayloadRange(extra) => {
                let n = min_len(*extra);
                out.push(TAG_PAYLOAD_RANGE | n as u8);
                out.extend_from_slice(&extra.to_be_bytes()[8 - n..]);
            }
        }
    }

    /// Decodes the record starting at `buf[0]`.
    ///
    /// Returns the record and the number of bytes it occupies, tag included.
    pub(crate) fn decode(buf: &[u8]) -> Result<(Self, usize), MalformedReason> {
        let (&tag, body) = buf.split_first().ok_or(MalformedReason::Truncated {
            need: 1,
            have: 0,
        })?;
        let count = usize::from(tag & COUNT_MASK);

        let (record, len) = match tag & KIND_MASK {
            TAG_RAW => {
                if count != 0 {
                    return Err(MalformedReason::InvalidTag(tag));
                }
                let bytes = take(body, Ksuid::BYTE_LEN)?;
                let mut raw = [0; Ksuid::BYTE_LEN];
                raw.copy_from_slice(bytes);
                (Self::Raw(Ksuid::from_array(raw)), Ksuid::BYTE_LEN)
            }
            TAG_TIME_DELTA => {
                check_count(tag, count, 4)?;
                let bytes = take(body, count + Ksuid::PAYLOAD_LEN)?;
                let (delta, payload) = bytes.split_at(count);
                let mut p = [0; Ksuid::PAYLOAD_LEN];
                p.copy_from_slice(payload);
                let delta = be_u64(delta) as u32;
                (Self::TimeDelta { delta, payload: p }, count + Ksuid::PAYLOAD_LEN)
            }
            TAG_PAYLOAD_DELTA => {
                check_count(tag, count, 16)?;
                let bytes = take(body, count)?;
                let mut wide = [0; 16];
                wide[16 - count..].copy_from_slice(bytes);
                (Self::PayloadDelta(Uint128::from_be_bytes(wide)), count)
            }
            _ => {
                check_count(tag, count, 8)?;
                let bytes = take(body, count)?;
                (Self::PayloadRange(be_u64(bytes)), count)
            }
        };

        Ok((record, 1 + len))
    }
}

fn check_count(tag: u8, count: usize, max: usize) -> Result<(), MalformedReason> {
    if (1..=max).contains(&count) {
        Ok(())
    } else {
        Err(MalformedReason::InvalidTag(tag))
    }
}

fn take(body: &[u8], need: usize) -> Result<&[u8], MalformedReason> {
    body.get(..need).ok_or(MalformedReason::Truncated {
        need,
        have: body.len(),
    })
}

/// Minimal number of big-endian bytes for `v`, at least one.
fn min_len(v: u64) -> usize {
    let len = 8 - (v.leading_zeros() as usize / 8);
    len.max(1)
}

/// Reads up to eight big-endian bytes.
fn be_u64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0, |acc, &b| (acc << 8) | u64::from(b))
}
