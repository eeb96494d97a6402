use crate::{Error, Ksuid, Result};

/// A column value as handed over by a database driver.
///
/// Drivers store KSUIDs either as 20-byte binary columns or as 27-character
/// text columns; [`Ksuid::scan`] accepts both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value<'a> {
    /// SQL `NULL`.
    Null,
    /// A binary column.
    Bytes(&'a [u8]),
    /// A text column.
    Text(&'a str),
}

impl<'a> From<&'a [u8]> for Value<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl Ksuid {
    /// Reads a KSUID from a database column.
    ///
    /// The shape is chosen by length, regardless of whether the driver
    /// reported a binary or a text column:
    ///
    /// - `NULL` or empty: [`Ksuid::NIL`]
    /// - 20 bytes: the binary form
    /// - 27 bytes: the base62 string form
    ///
    /// # Errors
    ///
    /// Returns [`Error::Size`] for any other length, or the usual decode
    /// errors for a malformed 27-byte string.
    ///
    /// # Example
    /// ```
    /// use ksuid::{Ksuid, Value};
    ///
    /// let id = Ksuid::scan(Value::Text("0ujtsYcgvSTl8PAuAdqWYSMnLOv")).unwrap();
    /// assert_eq!(Ksuid::scan(Value::Bytes(id.as_bytes())).unwrap(), id);
    /// assert_eq!(Ksuid::scan(Value::Null).unwrap(), Ksuid::NIL);
    /// ```
    pub fn scan(value: Value<'_>) -> Result<Self> {
        let bytes = match value {
            Value::Null => return Ok(Self::NIL),
            Value::Bytes(b) => b,
            Value::Text(s) => s.as_bytes(),
        };

        match bytes.len() {
            0 => Ok(Self::NIL),
            Self::BYTE_LEN => Self::from_bytes(bytes),
            Self::STRING_LEN => Self::decode_bytes(bytes),
            len => Err(Error::Size { len }),
        }
    }

    /// The value to store in a database column.
    ///
    /// [`Ksuid::NIL`] maps to `NULL`; everything else to its base62 string.
    #[must_use]
    pub fn to_value(&self) -> Option<String> {
        if self.is_nil() {
            None
        } else {
            Some(self.encode())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const TEXT: &str = "0ujtsYcgvSTl8PAuAdqWYSMnLOv";

    fn known() -> Ksuid {
        Ksuid::decode(TEXT).unwrap()
    }

    #[test]
    fn scans_text_and_binary() {
        let id = known();
        assert_eq!(Ksuid::scan(Value::Text(TEXT)), Ok(id));
        assert_eq!(Ksuid::scan(Value::Bytes(TEXT.as_bytes())), Ok(id));
        assert_eq!(Ksuid::scan(Value::Bytes(id.as_bytes())), Ok(id));
    }

    #[test_case(Value::Null ; "null")]
    #[test_case(Value::Bytes(&[]) ; "empty bytes")]
    #[test_case(Value::Text("") ; "empty text")]
    fn scans_empty_as_nil(value: Value<'_>) {
        assert_eq!(Ksuid::scan(value), Ok(Ksuid::NIL));
    }

    #[test_case(Value::Bytes(&[1, 2, 3]), 3 ; "short bytes")]
    #[test_case(Value::Text("0ujtsYcgvSTl8PAuAdqWYSMnLO"), 26 ; "short text")]
    #[test_case(Value::Bytes(&[0; 21]), 21 ; "long bytes")]
    fn rejects_other_lengths(value: Value<'_>, len: usize) {
        assert_eq!(Ksuid::scan(value), Err(Error::Size { len }));
    }

    #[test]
    fn propagates_text_decode_errors() {
        assert_eq!(
            Ksuid::scan(Value::Text("zzzzzzzzzzzzzzzzzzzzzzzzzzz")),
            Err(Error::StringValue)
        );
        assert!(matches!(
            Ksuid::scan(Value::Text("0ujtsYcgvSTl8PAuAdqWYSMnLO!")),
            Err(Error::InvalidCharacter { byte: b'!', index: 26 })
        ));
    }

    #[test]
    fn option_converts_to_value() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some(TEXT)), Value::Text(TEXT));
    }

    #[test]
    fn nil_stores_as_null() {
        assert_eq!(Ksuid::NIL.to_value(), None);
        assert_eq!(known().to_value().as_deref(), Some(TEXT));
    }
}
