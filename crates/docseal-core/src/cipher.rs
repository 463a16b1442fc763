//! Password-based symmetric encryption: PBKDF2-SHA512 + AES-192-CBC.
//!
//! The wire layout is `iv(16) ∥ salt(8) ∥ ciphertext`, hex-encoded with a
//! `0x` prefix. IV and salt are drawn fresh for every encryption, so the
//! same plaintext never produces the same envelope twice.

use aes::Aes192;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use pbkdf2::pbkdf2_hmac;
use serde_json::Value;
use sha2::Sha512;

use crate::bytes::{encode, ByteInput, Bytes};
use crate::error::CoreError;

/// CBC initialization vector size in bytes.
pub const IV_SIZE: usize = 16;

/// Key-derivation salt size in bytes.
pub const SALT_SIZE: usize = 8;

/// Derived key size in bytes (AES-192).
pub const KEY_SIZE: usize = 24;

/// PBKDF2-HMAC-SHA512 iteration count.
pub const KDF_ROUNDS: u32 = 5000;

type Aes192CbcEnc = cbc::Encryptor<Aes192>;
type Aes192CbcDec = cbc::Decryptor<Aes192>;

/// A symmetric cipher envelope. The three fields are only meaningful
/// together; the envelope is never consumed partially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherEnvelope {
    /// CBC initialization vector (16 bytes).
    pub iv: Bytes,
    /// Key-derivation salt (8 bytes).
    pub salt: Bytes,
    /// PKCS#7-padded ciphertext.
    pub ciphertext: Bytes,
}

impl CipherEnvelope {
    /// The wire encoding: `iv ∥ salt ∥ ciphertext`.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::concat([&self.iv, &self.salt, &self.ciphertext])
    }

    /// Hex wire encoding with `0x` prefix.
    pub fn to_hex(&self) -> String {
        self.to_bytes().to_hex()
    }

    /// Parse the wire encoding (hex string or raw bytes).
    ///
    /// Anything of 24 bytes or less cannot contain a ciphertext and is
    /// rejected as [`CoreError::MalformedInput`].
    pub fn from_wire(wire: impl Into<ByteInput>) -> Result<Self, CoreError> {
        let bytes = encode(wire);
        if bytes.len() <= IV_SIZE + SALT_SIZE {
            return Err(CoreError::MalformedInput(format!(
                "cipher wire must exceed {} bytes, got {}",
                IV_SIZE + SALT_SIZE,
                bytes.len()
            )));
        }
        Ok(Self {
            iv: bytes.slice(..IV_SIZE),
            salt: bytes.slice(IV_SIZE..IV_SIZE + SALT_SIZE),
            ciphertext: bytes.slice(IV_SIZE + SALT_SIZE..),
        })
    }
}

/// Plaintext recovered by decryption.
///
/// Decryption opportunistically parses the recovered UTF-8 as JSON: content
/// that was a structured record round-trips as one, everything else comes
/// back as text. Note that this applies to *any* JSON-parsable text — the
/// string `"42"` decrypts to a JSON number. Callers must tolerate either
/// shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Plaintext {
    /// Recovered text parsed as JSON.
    Json(Value),
    /// Raw recovered text.
    Text(String),
}

impl Plaintext {
    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes).into_owned();
        match serde_json::from_str::<Value>(&text) {
            Ok(v) => Plaintext::Json(v),
            Err(_) => Plaintext::Text(text),
        }
    }

    /// The raw text, when the plaintext did not parse as JSON.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Plaintext::Text(s) => Some(s),
            Plaintext::Json(_) => None,
        }
    }

    /// Collapse into a JSON value; raw text becomes a JSON string.
    pub fn into_value(self) -> Value {
        match self {
            Plaintext::Json(v) => v,
            Plaintext::Text(s) => Value::String(s),
        }
    }
}

/// Derive the AES key from a passphrase and salt.
fn derive_key(secret: &Bytes, salt: &Bytes) -> [u8; KEY_SIZE] {
    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha512>(secret.as_slice(), salt.as_slice(), KDF_ROUNDS, &mut key);
    key
}

/// Encrypt a message under a passphrase with a fresh IV and salt.
pub fn encrypt(msg: impl Into<ByteInput>, secret: impl Into<ByteInput>) -> CipherEnvelope {
    let msg = encode(msg);
    let secret = encode(secret);

    let iv = Bytes::random(IV_SIZE);
    let salt = Bytes::random(SALT_SIZE);
    let key = derive_key(&secret, &salt);

    let iv_block: [u8; IV_SIZE] = iv.as_slice().try_into().expect("iv is 16 bytes");
    let ciphertext = Aes192CbcEnc::new(&key.into(), &iv_block.into())
        .encrypt_padded_vec_mut::<Pkcs7>(msg.as_slice());

    CipherEnvelope {
        iv,
        salt,
        ciphertext: ciphertext.into(),
    }
}

/// Decrypt an envelope, re-deriving the key from the embedded salt.
pub fn decrypt(
    envelope: &CipherEnvelope,
    secret: impl Into<ByteInput>,
) -> Result<Plaintext, CoreError> {
    let secret = encode(secret);
    let key = derive_key(&secret, &envelope.salt);

    let iv_block: [u8; IV_SIZE] = envelope
        .iv
        .as_slice()
        .try_into()
        .map_err(|_| CoreError::MalformedInput("iv must be 16 bytes".into()))?;

    let plaintext = Aes192CbcDec::new(&key.into(), &iv_block.into())
        .decrypt_padded_vec_mut::<Pkcs7>(envelope.ciphertext.as_slice())
        .map_err(|_| CoreError::DecryptionFailed("bad padding".into()))?;

    Ok(Plaintext::from_bytes(&plaintext))
}

/// Parse a wire string and decrypt it in one step.
pub fn decrypt_wire(
    wire: impl Into<ByteInput>,
    secret: impl Into<ByteInput>,
) -> Result<Plaintext, CoreError> {
    decrypt(&CipherEnvelope::from_wire(wire)?, secret)
}
