use crate::{
    Error, RandSource, Result, ThreadRandom, Uint128, datetime_from_timestamp,
    timestamp_from_datetime,
};
use core::cmp::Ordering;
use core::fmt;
use std::time::SystemTime;

/// A K-Sortable Unique Identifier.
///
/// 20 bytes laid out as a 32-bit big-endian timestamp followed by a 128-bit
/// payload:
///
/// ```text
///  Byte Index:  0            3 4                   19
///               +-------------+----------------------+
///  Field:       | timestamp   | payload (128)        |
///               | (32, BE)    |                      |
///               +-------------+----------------------+
///               |<-- MSB -------- 20 bytes ---- LSB -->|
/// ```
///
/// The timestamp counts seconds since [`KSUID_EPOCH`]. Because the timestamp
/// leads and is big-endian, comparing two IDs byte by byte orders them by
/// creation time first and payload second. The derived [`Ord`] is exactly
/// that unsigned byte-wise comparison.
///
/// [`KSUID_EPOCH`]: crate::KSUID_EPOCH
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Ksuid([u8; BYTE_LEN]);

const BYTE_LEN: usize = 20;

impl Ksuid {
    /// Length of the binary representation.
    pub const BYTE_LEN: usize = BYTE_LEN;
    /// Length of the base62 text representation.
    pub const STRING_LEN: usize = 27;
    /// Length of the timestamp field.
    pub const TIMESTAMP_LEN: usize = 4;
    /// Length of the payload field.
    pub const PAYLOAD_LEN: usize = 16;

    /// The all-zero ID.
    pub const NIL: Self = Self([0; Self::BYTE_LEN]);
    /// The all-`0xFF` ID.
    pub const MAX: Self = Self([0xFF; Self::BYTE_LEN]);

    /// Wraps a raw 20-byte array.
    #[must_use]
    pub const fn from_array(bytes: [u8; Self::BYTE_LEN]) -> Self {
        Self(bytes)
    }

    /// Builds an ID from a timestamp (seconds since the KSUID epoch) and a
    /// 16-byte payload.
    #[must_use]
    pub const fn from_components(timestamp: u32, payload: [u8; Self::PAYLOAD_LEN]) -> Self {
        let ts = timestamp.to_be_bytes();
        let mut out = [0; Self::BYTE_LEN];
        let mut i = 0;
        while i < Self::TIMESTAMP_LEN {
            out[i] = ts[i];
            i += 1;
        }
        let mut j = 0;
        while j < Self::PAYLOAD_LEN {
            out[Self::TIMESTAMP_LEN + j] = payload[j];
            j += 1;
        }
        Self(out)
    }

    /// Builds an ID from a timestamp and a payload slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PayloadSize`] if `payload` is not exactly 16 bytes.
    pub fn from_parts(timestamp: u32, payload: &[u8]) -> Result<Self> {
        let payload: [u8; Self::PAYLOAD_LEN] = payload
            .try_into()
            .map_err(|_| Error::PayloadSize { len: payload.len() })?;
        Ok(Self::from_components(timestamp, payload))
    }

    /// Reads an ID from its 20-byte binary form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Size`] if `bytes` is not exactly 20 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bytes
            .try_into()
            .map(Self)
            .map_err(|_| Error::Size { len: bytes.len() })
    }

    /// Generates an ID stamped with the current wall-clock time, using the
    /// built-in [`ThreadRandom`] payload source.
    ///
    /// This convenience constructor keeps no state. For an injectable clock
    /// or payload source use [`KsuidGenerator`].
    ///
    /// [`KsuidGenerator`]: crate::KsuidGenerator
    #[must_use]
    pub fn new() -> Self {
        Self::from_datetime(crate::time::now())
    }

    /// Generates an ID for the given timestamp (seconds since the KSUID
    /// epoch) with a [`ThreadRandom`] payload.
    #[must_use]
    pub fn from_timestamp(timestamp: u32) -> Self {
        Self::from_timestamp_and_rand(timestamp, &ThreadRandom)
    }

    /// Generates an ID for the given timestamp with a payload drawn from
    /// `rng`.
    #[must_use]
    pub fn from_timestamp_and_rand<R>(timestamp: u32, rng: &R) -> Self
    where
        R: RandSource<u128> + ?Sized,
    {
        Self::from_components(timestamp, rng.rand().to_be_bytes())
    }

    /// Generates an ID for the given wall-clock time with a [`ThreadRandom`]
    /// payload.
    #[must_use]
    pub fn from_datetime(datetime: SystemTime) -> Self {
        Self::from_datetime_and_rand(datetime, &ThreadRandom)
    }

    /// Generates an ID for the given wall-clock time with a payload drawn
    /// from `rng`.
    #[must_use]
    pub fn from_datetime_and_rand<R>(datetime: SystemTime, rng: &R) -> Self
    where
        R: RandSource<u128> + ?Sized,
    {
        Self::from_timestamp_and_rand(timestamp_from_datetime(datetime), rng)
    }

    /// Seconds since the KSUID epoch.
    #[must_use]
    pub const fn timestamp(&self) -> u32 {
        let b = &self.0;
        u32::from_be_bytes([b[0], b[1], b[2], b[3]])
    }

    /// The timestamp as wall-clock time.
    #[must_use]
    pub fn time(&self) -> SystemTime {
        datetime_from_timestamp(self.timestamp())
    }

    /// The 16 payload bytes.
    #[must_use]
    pub const fn payload(&self) -> [u8; Self::PAYLOAD_LEN] {
        let mut out = [0; Self::PAYLOAD_LEN];
        let mut i = 0;
        while i < Self::PAYLOAD_LEN {
            out[i] = self.0[Self::TIMESTAMP_LEN + i];
            i += 1;
        }
        out
    }

    /// The payload read as a big-endian 128-bit integer.
    #[must_use]
    pub const fn payload_value(&self) -> Uint128 {
        Uint128::from_be_bytes(self.payload())
    }

    /// The binary representation.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::BYTE_LEN] {
        &self.0
    }

    /// Consumes the ID and returns its binary representation.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; Self::BYTE_LEN] {
        self.0
    }

    /// Returns `true` for [`Ksuid::NIL`].
    #[must_use]
    pub fn is_nil(&self) -> bool {
        *self == Self::NIL
    }

    /// The next ID in numeric order.
    ///
    /// The payload is incremented as a 128-bit integer. When it wraps from
    /// all-`0xFF` to zero the timestamp is incremented too, so
    /// `Ksuid::MAX.next() == Ksuid::NIL`.
    #[must_use]
    pub const fn next(&self) -> Self {
        let mut t = self.timestamp();
        let v = self.payload_value().incr();
        if v.hi() == 0 && v.lo() == 0 {
            t = t.wrapping_add(1);
        }
        Self::from_components(t, v.to_be_bytes())
    }

    /// The previous ID in numeric order.
    ///
    /// The payload is decremented as a 128-bit integer. When it wraps from
    /// zero to all-`0xFF` the timestamp is decremented too, so
    /// `Ksuid::NIL.prev() == Ksuid::MAX`.
    #[must_use]
    pub const fn prev(&self) -> Self {
        let mut t = self.timestamp();
        let u = self.payload_value();
        if u.hi() == 0 && u.lo() == 0 {
            t = t.wrapping_sub(1);
        }
        Self::from_components(t, u.decr().to_be_bytes())
    }

    /// Returns this ID with the lowest 16 payload bits replaced by `n`
    /// (big-endian).
    #[must_use]
    pub(crate) const fn with_sequence_number(self, n: u16) -> Self {
        let mut out = self.0;
        let n = n.to_be_bytes();
        out[Self::BYTE_LEN - 2] = n[0];
        out[Self::BYTE_LEN - 1] = n[1];
        Self(out)
    }
}

/// Compares two IDs as unsigned byte strings.
#[must_use]
pub fn compare(a: &Ksuid, b: &Ksuid) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

/// Sorts `ids` in ascending byte order.
///
/// The sort is stable, so equal IDs keep their relative order.
pub fn sort(ids: &mut [Ksuid]) {
    ids.sort();
}

/// Returns `true` if `ids` is in non-decreasing byte order.
#[must_use]
pub fn is_sorted(ids: &[Ksuid]) -> bool {
    ids.windows(2).all(|w| w[0] <= w[1])
}

impl AsRef<[u8]> for Ksuid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; Ksuid::BYTE_LEN]> for Ksuid {
    fn from(bytes: [u8; Ksuid::BYTE_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Ksuid> for [u8; Ksuid::BYTE_LEN] {
    fn from(id: Ksuid) -> Self {
        id.0
    }
}

impl TryFrom<&[u8]> for Ksuid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl fmt::Debug for Ksuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0; Self::STRING_LEN];
        let mut dbg = f.debug_struct("Ksuid");
        dbg.field("id", &format_args!("{}", self.encode_to_buf(&mut buf)));
        dbg.field("timestamp", &self.timestamp());
        dbg.field("payload", &self.payload_value());
        dbg.finish()
    }
}
