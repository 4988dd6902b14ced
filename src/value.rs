//! # Cache Values and Coercions
//!
//! This module defines the closed set of scalar types the cache accepts and
//! the named coercion strategies for reading them back.
//!
//! ## 🎯 Design Philosophy
//!
//! The cache is not a general object serializer. It stores exactly four
//! scalar shapes - text, raw bytes, integers and floats - and encodes all of
//! them as bytes on the wire, the same way a redis client would:
//!
//! | Variant | Wire encoding |
//! |---------|---------------|
//! | `Text` | UTF-8 bytes |
//! | `Bytes` | raw bytes, unmodified |
//! | `Int` | decimal text |
//! | `Float` | decimal text |
//!
//! Reading back is byte-oriented by default. When a caller knows what shape
//! it stored, it picks a [`Coercion`] by name instead of passing a callable.
//! The set of strategies is closed on purpose: anything richer than
//! text/integer decoding belongs at the call site, matching on
//! [`Retrieved::Bytes`].

use crate::error::{RecallError, RecallResult};

/// A scalar value accepted by the cache.
///
/// The four variants cover the full supported type set. Anything else is
/// unrepresentable by construction, so there is no "unsupported type" error
/// path to handle at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheValue {
    /// UTF-8 text, encoded as its bytes
    Text(String),

    /// An opaque byte sequence, stored unmodified
    Bytes(Vec<u8>),

    /// A signed integer, encoded as decimal text
    Int(i64),

    /// A floating-point number, encoded as decimal text
    Float(f64),
}

impl CacheValue {
    /// Encode the value into its wire form.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            CacheValue::Text(s) => s.clone().into_bytes(),
            CacheValue::Bytes(b) => b.clone(),
            CacheValue::Int(n) => n.to_string().into_bytes(),
            CacheValue::Float(x) => x.to_string().into_bytes(),
        }
    }

    /// Encode the value into its wire form, consuming it.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            CacheValue::Text(s) => s.into_bytes(),
            CacheValue::Bytes(b) => b,
            CacheValue::Int(n) => n.to_string().into_bytes(),
            CacheValue::Float(x) => x.to_string().into_bytes(),
        }
    }

    /// Get the variant name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            CacheValue::Text(_) => "text",
            CacheValue::Bytes(_) => "bytes",
            CacheValue::Int(_) => "int",
            CacheValue::Float(_) => "float",
        }
    }
}

impl From<&str> for CacheValue {
    fn from(value: &str) -> Self {
        CacheValue::Text(value.to_string())
    }
}

impl From<String> for CacheValue {
    fn from(value: String) -> Self {
        CacheValue::Text(value)
    }
}

impl From<Vec<u8>> for CacheValue {
    fn from(value: Vec<u8>) -> Self {
        CacheValue::Bytes(value)
    }
}

impl From<&[u8]> for CacheValue {
    fn from(value: &[u8]) -> Self {
        CacheValue::Bytes(value.to_vec())
    }
}

impl From<i64> for CacheValue {
    fn from(value: i64) -> Self {
        CacheValue::Int(value)
    }
}

impl From<f64> for CacheValue {
    fn from(value: f64) -> Self {
        CacheValue::Float(value)
    }
}

/// Named strategy for turning raw stored bytes back into a typed value.
///
/// Strategies are selected by value rather than passed as callables, so the
/// full set is visible here:
///
/// - [`Coercion::Identity`]: hand the raw bytes back unmodified
/// - [`Coercion::Text`]: decode as UTF-8 text
/// - [`Coercion::Integer`]: decode as UTF-8 text, then parse decimal
///
/// `Text` and `Integer` fail with [`RecallError::Format`] when the stored
/// bytes do not have the expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Return the raw bytes unmodified
    Identity,

    /// Decode the bytes as UTF-8 text
    Text,

    /// Parse the bytes as a decimal integer
    Integer,
}

impl Coercion {
    /// Apply this strategy to raw stored bytes.
    pub fn apply(&self, raw: Vec<u8>) -> RecallResult<Retrieved> {
        match self {
            Coercion::Identity => Ok(Retrieved::Bytes(raw)),
            Coercion::Text => decode_text(raw).map(Retrieved::Text),
            Coercion::Integer => parse_integer(&raw).map(Retrieved::Integer),
        }
    }
}

/// A value read back from the cache through a [`Coercion`].
///
/// The variant mirrors the strategy that produced it: `Identity` yields
/// `Bytes`, `Text` yields `Text`, `Integer` yields `Integer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retrieved {
    /// Raw bytes, as stored
    Bytes(Vec<u8>),

    /// UTF-8 decoded text
    Text(String),

    /// Parsed decimal integer
    Integer(i64),
}

impl Retrieved {
    /// The raw bytes, if this was an identity read
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Retrieved::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// The decoded text, if this was a text read
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Retrieved::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The parsed integer, if this was an integer read
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Retrieved::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

/// Decode raw stored bytes as UTF-8 text.
///
/// This is the decode-as-text coercion used by [`Coercion::Text`] and the
/// cache's `retrieve_text` convenience.
pub fn decode_text(raw: Vec<u8>) -> RecallResult<String> {
    String::from_utf8(raw)
        .map_err(|e| RecallError::format(format!("stored value is not valid UTF-8: {e}")))
}

/// Parse raw stored bytes as a decimal integer.
///
/// This is the parse-as-integer coercion used by [`Coercion::Integer`] and
/// the cache's `retrieve_int` convenience. Fails on non-UTF-8 content and on
/// text that is not a decimal integer.
pub fn parse_integer(raw: &[u8]) -> RecallResult<i64> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| RecallError::format(format!("stored value is not valid UTF-8: {e}")))?;
    text.parse::<i64>()
        .map_err(|_| RecallError::format(format!("stored value is not a decimal integer: '{text}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_encoding() {
        let value = CacheValue::from("foo");
        assert_eq!(value.to_bytes(), b"foo".to_vec());
        assert_eq!(value.into_bytes(), b"foo".to_vec());
    }

    #[test]
    fn test_bytes_encoding_is_identity() {
        let raw = vec![0u8, 159, 146, 150];
        let value = CacheValue::from(raw.clone());
        assert_eq!(value.into_bytes(), raw);
    }

    #[test]
    fn test_int_encoding_is_decimal_text() {
        assert_eq!(CacheValue::Int(42).into_bytes(), b"42".to_vec());
        assert_eq!(CacheValue::Int(-7).into_bytes(), b"-7".to_vec());
        assert_eq!(
            CacheValue::Int(i64::MAX).into_bytes(),
            i64::MAX.to_string().into_bytes()
        );
    }

    #[test]
    fn test_float_encoding_is_decimal_text() {
        assert_eq!(CacheValue::Float(1.5).into_bytes(), b"1.5".to_vec());
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(CacheValue::from("a"), CacheValue::Text("a".to_string()));
        assert_eq!(
            CacheValue::from("a".to_string()),
            CacheValue::Text("a".to_string())
        );
        assert_eq!(CacheValue::from(5i64), CacheValue::Int(5));
        assert_eq!(CacheValue::from(2.5f64), CacheValue::Float(2.5));
        assert_eq!(
            CacheValue::from(&b"xy"[..]),
            CacheValue::Bytes(vec![b'x', b'y'])
        );
    }

    #[test]
    fn test_type_names() {
        assert_eq!(CacheValue::from("a").type_name(), "text");
        assert_eq!(CacheValue::from(vec![1u8]).type_name(), "bytes");
        assert_eq!(CacheValue::Int(1).type_name(), "int");
        assert_eq!(CacheValue::Float(1.0).type_name(), "float");
    }

    #[test]
    fn test_identity_coercion_returns_raw_bytes() {
        let out = Coercion::Identity.apply(b"foo".to_vec()).unwrap();
        assert_eq!(out, Retrieved::Bytes(b"foo".to_vec()));
        assert_eq!(out.as_bytes(), Some(&b"foo"[..]));
    }

    #[test]
    fn test_text_coercion_decodes_utf8() {
        let out = Coercion::Text.apply(b"foo".to_vec()).unwrap();
        assert_eq!(out.as_text(), Some("foo"));
    }

    #[test]
    fn test_text_coercion_rejects_invalid_utf8() {
        let result = Coercion::Text.apply(vec![0xff, 0xfe]);
        match result.unwrap_err() {
            RecallError::Format(msg) => assert!(msg.contains("UTF-8")),
            other => panic!("expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn test_integer_coercion_round_trips_stored_ints() {
        for k in [0i64, 1, -1, 42, i64::MIN, i64::MAX] {
            let raw = CacheValue::Int(k).into_bytes();
            let out = Coercion::Integer.apply(raw).unwrap();
            assert_eq!(out.as_integer(), Some(k));
        }
    }

    #[test]
    fn test_integer_coercion_rejects_non_numeric_text() {
        let result = Coercion::Integer.apply(b"foo".to_vec());
        match result.unwrap_err() {
            RecallError::Format(msg) => assert!(msg.contains("decimal integer")),
            other => panic!("expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn test_named_coercion_helpers() {
        assert_eq!(decode_text(b"hi".to_vec()).unwrap(), "hi");
        assert_eq!(parse_integer(b"-12").unwrap(), -12);
        assert!(decode_text(vec![0xff]).is_err());
        assert!(parse_integer(b"1.5").is_err());
    }
}
