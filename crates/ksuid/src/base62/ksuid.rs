use super::{ENCODED_LEN, decode_base62, encode_base62};
use crate::{Error, Ksuid, Result};
use core::fmt;
use core::str::FromStr;

impl Ksuid {
    /// Text form of [`Ksuid::NIL`].
    pub const NIL_STRING: &'static str = "000000000000000000000000000";
    /// Text form of [`Ksuid::MAX`].
    pub const MAX_STRING: &'static str = "aWgEPTl1tmebfsQzFP4bxwgy80V";

    /// Encodes this ID into a 27-character base62 [`String`].
    ///
    /// The output is left-padded with `'0'`, so comparing two encoded
    /// strings byte by byte gives the same order as comparing the IDs.
    ///
    /// # Example
    /// ```
    /// use ksuid::Ksuid;
    ///
    /// assert_eq!(Ksuid::NIL.encode(), "000000000000000000000000000");
    /// assert_eq!(Ksuid::MAX.encode(), "aWgEPTl1tmebfsQzFP4bxwgy80V");
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        let mut buf = [0; ENCODED_LEN];
        self.encode_to_buf(&mut buf).to_owned()
    }

    /// Encodes this ID into the provided buffer without heap allocation and
    /// returns the buffer as a `&str`.
    ///
    /// # Example
    /// ```
    /// use ksuid::Ksuid;
    ///
    /// let mut buf = [0_u8; Ksuid::STRING_LEN];
    /// let s = Ksuid::MAX.encode_to_buf(&mut buf);
    /// assert_eq!(s, "aWgEPTl1tmebfsQzFP4bxwgy80V");
    /// ```
    pub fn encode_to_buf<'a>(&self, buf: &'a mut [u8; ENCODED_LEN]) -> &'a str {
        encode_base62(self.as_bytes(), buf);
        // SAFETY: every byte written by `encode_base62` comes from the ASCII
        // base62 alphabet.
        unsafe { core::str::from_utf8_unchecked(buf) }
    }

    /// Appends the 27-character text form of this ID to `out`.
    pub fn append_encoded(&self, out: &mut String) {
        let mut buf = [0; ENCODED_LEN];
        out.push_str(self.encode_to_buf(&mut buf));
    }

    /// Decodes a 27-character base62 string.
    ///
    /// # Errors
    ///
    /// - [`Error::StringSize`] if `s` is not exactly 27 bytes long.
    /// - [`Error::InvalidCharacter`] if `s` contains a byte outside the
    ///   base62 alphabet.
    /// - [`Error::StringValue`] if the value does not fit in 20 bytes, i.e.
    ///   it sorts after [`Ksuid::MAX_STRING`].
    ///
    /// # Example
    /// ```
    /// use ksuid::{Error, Ksuid};
    ///
    /// let id = Ksuid::decode("0ujtsYcgvSTl8PAuAdqWYSMnLOv").unwrap();
    /// assert_eq!(id.encode(), "0ujtsYcgvSTl8PAuAdqWYSMnLOv");
    ///
    /// assert_eq!(Ksuid::decode("short"), Err(Error::StringSize { len: 5 }));
    /// ```
    pub fn decode(s: &str) -> Result<Self> {
        Self::decode_bytes(s.as_bytes())
    }

    /// Decodes 27 base62 ASCII bytes.
    ///
    /// # Errors
    ///
    /// Same as [`Ksuid::decode`].
    pub fn decode_bytes(s: &[u8]) -> Result<Self> {
        let src: &[u8; ENCODED_LEN] = s
            .try_into()
            .map_err(|_| Error::StringSize { len: s.len() })?;
        let mut dst = [0; Ksuid::BYTE_LEN];
        decode_base62(src, &mut dst).map_err(|e| match e {
            Error::ShortBuffer { .. } => Error::StringValue,
            other => other,
        })?;
        Ok(Self::from_array(dst))
    }
}

impl fmt::Display for Ksuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0; ENCODED_LEN];
        f.pad(self.encode_to_buf(&mut buf))
    }
}

impl FromStr for Ksuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<&str> for Ksuid {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl PartialEq<str> for Ksuid {
    fn eq(&self, other: &str) -> bool {
        Self::decode(other).is_ok_and(|id| id == *self)
    }
}

impl PartialEq<&str> for Ksuid {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<Ksuid> for &str {
    fn eq(&self, other: &Ksuid) -> bool {
        other == *self
    }
}

impl From<Ksuid> for String {
    fn from(id: Ksuid) -> Self {
        id.encode()
    }
}

impl From<&Ksuid> for String {
    fn from(id: &Ksuid) -> Self {
        id.encode()
    }
}
