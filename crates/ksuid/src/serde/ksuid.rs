use serde::{Deserializer, Serializer};

/// Serializes a [`Ksuid`](crate::Ksuid) as its base62 string.
///
/// # Example
/// ```
/// use ksuid::{Ksuid, as_base62};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Event {
///     #[serde(with = "as_base62")]
///     id: Ksuid,
/// }
/// ```
pub mod as_base62 {
    use super::*;
    use crate::Ksuid;
    use core::fmt;
    use serde::de::{self, Visitor};

    pub fn serialize<S>(id: &Ksuid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut buf = [0; Ksuid::STRING_LEN];
        s.serialize_str(id.encode_to_buf(&mut buf))
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Ksuid, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Base62Visitor;

        impl Visitor<'_> for Base62Visitor {
            type Value = Ksuid;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 27 character base62 encoded KSUID")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ksuid::decode(v).map_err(de::Error::custom)
            }
        }

        d.deserialize_str(Base62Visitor)
    }
}

/// Serializes a [`Ksuid`](crate::Ksuid) as its 20 raw bytes.
///
/// Formats without a native byte type (JSON, for instance) see an array of
/// numbers; deserialization accepts either shape.
pub mod as_bytes {
    use super::*;
    use crate::{Error, Ksuid};
    use core::fmt;
    use serde::de::{self, SeqAccess, Visitor};

    pub fn serialize<S>(id: &Ksuid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_bytes(id.as_bytes())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Ksuid, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BytesVisitor;

        impl<'de> Visitor<'de> for BytesVisitor {
            type Value = Ksuid;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("20 bytes")
            }

            #[inline]
            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ksuid::from_bytes(v).map_err(de::Error::custom)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut bytes = [0; Ksuid::BYTE_LEN];
                let mut len = 0;
                while let Some(b) = seq.next_element::<u8>()? {
                    if len == Ksuid::BYTE_LEN {
                        return Err(de::Error::custom(Error::Size { len: len + 1 }));
                    }
                    bytes[len] = b;
                    len += 1;
                }
                if len != Ksuid::BYTE_LEN {
                    return Err(de::Error::custom(Error::Size { len }));
                }
                Ok(Ksuid::from_array(bytes))
            }
        }

        d.deserialize_bytes(BytesVisitor)
    }
}
