//! Immutable byte sequences and canonical input encoding.
//!
//! Every primitive in this crate consumes heterogeneous inputs (raw bytes,
//! hex strings, plain text, structured records) through a single funnel:
//! [`ByteInput`] classifies the input and [`encode`] resolves it to a
//! [`Bytes`] value.
//!
//! ## The hex/text ambiguity
//!
//! A string consisting only of hex digits (optionally `0x`-prefixed, even
//! digit count) is decoded **as hex**, not as literal text. Encoding the
//! string `"face"` therefore yields the two bytes `fa ce`, never the four
//! UTF-8 bytes of the word. This is a deliberate convenience for key,
//! signature, and cipher handling — and a standing hazard for arbitrary
//! document content. Callers that need literal text which may be all hex
//! digits must pass raw bytes instead.

use std::fmt;

use rand::RngCore;
use serde_json::Value;

use crate::canonical::to_canonical_json;
use crate::error::CoreError;

/// An immutable, cheaply cloneable byte sequence.
///
/// Equality is byte-exact. Slicing shares the underlying allocation.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytes(bytes::Bytes);

impl Bytes {
    /// The empty sequence.
    pub fn new() -> Self {
        Self(bytes::Bytes::new())
    }

    /// Copy a slice into a new sequence.
    pub fn copy_from_slice(data: &[u8]) -> Self {
        Self(bytes::Bytes::copy_from_slice(data))
    }

    /// Draw `len` bytes from the thread-local secure RNG.
    pub fn random(len: usize) -> Self {
        let mut buf = vec![0u8; len];
        rand::thread_rng().fill_bytes(&mut buf);
        Self(buf.into())
    }

    /// Decode a hex string, accepting an optional `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let decoded =
            hex::decode(raw).map_err(|e| CoreError::MalformedInput(format!("hex: {e}")))?;
        Ok(Self(decoded.into()))
    }

    /// Hex encoding with the `0x` prefix (the wire convention).
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    /// Hex encoding without any prefix.
    pub fn to_hex_raw(&self) -> String {
        hex::encode(&self.0)
    }

    /// Lossy UTF-8 view of the bytes.
    pub fn to_utf8_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }

    /// Byte length.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// A shared sub-sequence.
    ///
    /// Panics when the range is out of bounds, matching slice indexing.
    pub fn slice(&self, range: impl std::ops::RangeBounds<usize>) -> Self {
        Self(self.0.slice(range))
    }

    /// Concatenate sequences into a new one.
    pub fn concat<'a>(parts: impl IntoIterator<Item = &'a Bytes>) -> Self {
        let mut buf = Vec::new();
        for part in parts {
            buf.extend_from_slice(part.as_slice());
        }
        Self(buf.into())
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() <= 16 {
            write!(f, "Bytes(0x{})", hex::encode(&self.0))
        } else {
            write!(
                f,
                "Bytes(0x{}…, {} bytes)",
                hex::encode(&self.0[..16]),
                self.0.len()
            )
        }
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Self(v.into())
    }
}

impl From<&[u8]> for Bytes {
    fn from(v: &[u8]) -> Self {
        Self::copy_from_slice(v)
    }
}

impl<const N: usize> From<[u8; N]> for Bytes {
    fn from(v: [u8; N]) -> Self {
        Self::copy_from_slice(&v)
    }
}

impl From<bytes::Bytes> for Bytes {
    fn from(v: bytes::Bytes) -> Self {
        Self(v)
    }
}

/// Heterogeneous input to the canonical byte encoder.
///
/// A closed union: the classification is explicit, not runtime reflection.
#[derive(Debug, Clone)]
pub enum ByteInput {
    /// Already bytes; passed through untouched.
    Raw(Bytes),
    /// Text, resolved by classification: strings of only hex digits
    /// (optional `0x` prefix, even digit count) decode as hex, everything
    /// else is UTF-8. See the module docs for the ambiguity this creates.
    Text(String),
    /// A structured record, serialized with the canonical JSON encoder so
    /// that identical logical values always produce identical bytes.
    Record(Value),
}

impl ByteInput {
    /// Resolve the union to concrete bytes.
    pub fn into_bytes(self) -> Bytes {
        match self {
            ByteInput::Raw(b) => b,
            ByteInput::Text(s) => {
                if let Some(stripped) = as_hex_text(&s) {
                    // Cannot fail: classification guarantees even-count hex digits.
                    Bytes::from(hex::decode(stripped).expect("classified hex"))
                } else {
                    Bytes::from(s.into_bytes())
                }
            }
            ByteInput::Record(v) => Bytes::from(to_canonical_json(&v).into_bytes()),
        }
    }
}

/// Encode any supported input into canonical bytes.
///
/// This is the single conversion point the rest of the crate builds on;
/// the hex/text classification documented on [`ByteInput`] applies here.
pub fn encode(input: impl Into<ByteInput>) -> Bytes {
    input.into().into_bytes()
}

/// Classify a string as hex text, returning the digits without the prefix.
///
/// Odd digit counts are rejected: decoding them would silently drop the
/// trailing nibble, and no wire object ever has an odd-length encoding.
fn as_hex_text(s: &str) -> Option<&str> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    if !stripped.is_empty()
        && stripped.len() % 2 == 0
        && stripped.bytes().all(|b| b.is_ascii_hexdigit())
    {
        Some(stripped)
    } else {
        None
    }
}

impl From<Bytes> for ByteInput {
    fn from(b: Bytes) -> Self {
        ByteInput::Raw(b)
    }
}

impl From<&Bytes> for ByteInput {
    fn from(b: &Bytes) -> Self {
        ByteInput::Raw(b.clone())
    }
}

impl From<&str> for ByteInput {
    fn from(s: &str) -> Self {
        ByteInput::Text(s.to_owned())
    }
}

impl From<String> for ByteInput {
    fn from(s: String) -> Self {
        ByteInput::Text(s)
    }
}

impl From<&String> for ByteInput {
    fn from(s: &String) -> Self {
        ByteInput::Text(s.clone())
    }
}

impl From<Vec<u8>> for ByteInput {
    fn from(v: Vec<u8>) -> Self {
        ByteInput::Raw(v.into())
    }
}

impl From<&[u8]> for ByteInput {
    fn from(v: &[u8]) -> Self {
        ByteInput::Raw(v.into())
    }
}

impl<const N: usize> From<[u8; N]> for ByteInput {
    fn from(v: [u8; N]) -> Self {
        ByteInput::Raw(v.into())
    }
}

impl<const N: usize> From<&[u8; N]> for ByteInput {
    fn from(v: &[u8; N]) -> Self {
        ByteInput::Raw(Bytes::copy_from_slice(v))
    }
}

impl From<Value> for ByteInput {
    fn from(v: Value) -> Self {
        match v {
            Value::String(s) => ByteInput::Text(s),
            other => ByteInput::Record(other),
        }
    }
}

impl From<&Value> for ByteInput {
    fn from(v: &Value) -> Self {
        v.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_text_encodes_utf8() {
        let b = encode("This is a test message");
        assert_eq!(b.as_slice(), b"This is a test message");
    }

    #[test]
    fn test_hex_text_decodes_as_hex() {
        let b = encode("0xdeadbeef");
        assert_eq!(b.as_slice(), &[0xde, 0xad, 0xbe, 0xef]);

        // Without a prefix too: this is the documented ambiguity.
        let b = encode("face");
        assert_eq!(b.as_slice(), &[0xfa, 0xce]);
    }

    #[test]
    fn test_odd_length_hex_is_text() {
        let b = encode("abc");
        assert_eq!(b.as_slice(), b"abc");
    }

    #[test]
    fn test_bare_prefix_is_text() {
        let b = encode("0x");
        assert_eq!(b.as_slice(), b"0x");
    }

    #[test]
    fn test_record_is_key_order_independent() {
        let a = encode(&json!({"b": 2, "a": 1}));
        let b = encode(&json!({"a": 1, "b": 2}));
        assert_eq!(a, b);
        assert_eq!(a.as_slice(), br#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_raw_passthrough() {
        let raw = Bytes::from(vec![0u8, 1, 2, 255]);
        assert_eq!(encode(&raw), raw);
    }

    #[test]
    fn test_hex_roundtrip() {
        let b = Bytes::from(vec![0xab, 0xcd, 0x00, 0x42]);
        assert_eq!(b.to_hex(), "0xabcd0042");
        assert_eq!(b.to_hex_raw(), "abcd0042");
        assert_eq!(Bytes::from_hex("0xabcd0042").unwrap(), b);
        assert_eq!(Bytes::from_hex("abcd0042").unwrap(), b);
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Bytes::from_hex("0xzz").is_err());
        assert!(Bytes::from_hex("abc").is_err());
    }

    #[test]
    fn test_slice_and_concat() {
        let b = Bytes::from(vec![1u8, 2, 3, 4, 5]);
        assert_eq!(b.slice(0..2).as_slice(), &[1, 2]);
        assert_eq!(b.slice(2..).as_slice(), &[3, 4, 5]);

        let joined = Bytes::concat([&b.slice(0..2), &b.slice(2..)]);
        assert_eq!(joined, b);
    }

    #[test]
    fn test_random_length() {
        let b = Bytes::random(16);
        assert_eq!(b.len(), 16);
        // Two draws colliding would mean a broken RNG.
        assert_ne!(Bytes::random(16), b);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hex_strings_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..64)) {
                let b = Bytes::from(data);
                prop_assert_eq!(Bytes::from_hex(&b.to_hex()).unwrap(), b.clone());
                prop_assert_eq!(encode(b.to_hex()), b);
            }

            #[test]
            fn non_hex_text_is_utf8(s in "[ -~]*[g-zG-Z !?@,.][ -~]*") {
                let encoded = encode(s.as_str());
                prop_assert_eq!(encoded.as_slice(), s.as_bytes());
            }
        }
    }
}
