/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `ksuid` can produce.
///
/// None of these are transient: retrying the same call with the same input
/// yields the same error. [`Error::SequenceExhausted`] is the only variant
/// that signals an expected terminal state rather than bad input.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Binary input was not exactly 20 bytes.
    #[error("invalid length: expected 20 bytes, got {len}")]
    Size {
        /// Length of the rejected input.
        len: usize,
    },

    /// Text input was not exactly 27 characters.
    #[error("invalid string length: expected 27 characters, got {len}")]
    StringSize {
        /// Length of the rejected input.
        len: usize,
    },

    /// Text input decodes to a value that does not fit in 20 bytes.
    #[error("invalid string value: decoded value exceeds 20 bytes")]
    StringValue,

    /// Text input contains a byte outside the base62 alphabet.
    #[error("invalid base62 character {byte:#04x} at index {index}")]
    InvalidCharacter {
        /// The offending byte.
        byte: u8,
        /// Position of the byte in the input.
        index: usize,
    },

    /// An explicit payload was not exactly 16 bytes.
    #[error("invalid payload length: expected 16 bytes, got {len}")]
    PayloadSize {
        /// Length of the rejected payload.
        len: usize,
    },

    /// A decode buffer was too small to hold the next 32-bit digit group.
    #[error("destination buffer too short: needed at least {need} more bytes")]
    ShortBuffer {
        /// Number of bytes the decoder still had to write.
        need: usize,
    },

    /// A [`Sequence`](crate::Sequence) has produced all 65536 values.
    #[error("sequence exhausted")]
    SequenceExhausted,

    /// A compressed set contained a record that cannot be interpreted.
    #[error("malformed compressed set at byte {offset}: {reason}")]
    MalformedSet {
        /// Offset of the record's tag byte.
        offset: usize,
        /// What was wrong with the record.
        reason: MalformedReason,
    },
}

/// The specific defect found while decoding a compressed set record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum MalformedReason {
    /// The tag byte's count bits are out of range for its record kind.
    #[error("invalid tag byte {0:#010b}")]
    InvalidTag(u8),

    /// The buffer ended in the middle of a record.
    #[error("truncated record: needed {need} bytes, {have} available")]
    Truncated {
        /// Bytes the record requires after its tag.
        need: usize,
        /// Bytes remaining in the buffer.
        have: usize,
    },

    /// A delta or range record appeared before any raw record.
    #[error("delta record without a preceding raw record")]
    MissingBase,

    /// A delta or range pushed the running timestamp or payload past its
    /// maximum value.
    #[error("arithmetic overflow")]
    Overflow,
}
