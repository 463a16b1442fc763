//! Hybrid public-key encryption (ECIES): ECDH + AES-CBC + HMAC-SHA256.
//!
//! Encrypt-then-MAC with a MAC key independent of the AES key: the AES key
//! is derived (via PBKDF2) from the ECDH shared secret, the MAC key is
//! `sha256(shared secret)`. Tampering with any envelope field fails closed
//! before a single block is deciphered, and the MAC comparison is constant
//! time, so there is no oracle on ciphertext validity.
//!
//! Wire layout, hex-encoded with `0x` prefix:
//! `iv(16) ∥ ephemeral_pub_key(33) ∥ mac(32) ∥ salt(8) ∥ ciphertext`.

use subtle::ConstantTimeEq;

use crate::bytes::{encode, ByteInput, Bytes};
use crate::cipher::{self, CipherEnvelope, Plaintext, IV_SIZE, SALT_SIZE};
use crate::error::CoreError;
use crate::hash::{hmac256, sha256};
use crate::keys::{shared_secret, KeyPair};

/// Compressed secp256k1 point size in bytes.
pub const EPH_PUB_KEY_SIZE: usize = 33;

/// HMAC-SHA256 tag size in bytes.
pub const MAC_SIZE: usize = 32;

/// Strict minimum wire size: full header plus at least one ciphertext byte.
pub const MIN_WIRE_SIZE: usize = IV_SIZE + EPH_PUB_KEY_SIZE + MAC_SIZE + SALT_SIZE + 1;

/// An ECIES envelope. Field order defines the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EciesEnvelope {
    /// CBC initialization vector (16 bytes).
    pub iv: Bytes,
    /// Compressed ephemeral public key (33 bytes).
    pub eph_pub_key: Bytes,
    /// HMAC-SHA256 over `iv ∥ eph_pub_key ∥ salt ∥ ciphertext` (32 bytes).
    pub mac: Bytes,
    /// Key-derivation salt (8 bytes).
    pub salt: Bytes,
    /// AES-192-CBC ciphertext.
    pub ciphertext: Bytes,
}

impl EciesEnvelope {
    /// The wire encoding: `iv ∥ eph_pub_key ∥ mac ∥ salt ∥ ciphertext`.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::concat([
            &self.iv,
            &self.eph_pub_key,
            &self.mac,
            &self.salt,
            &self.ciphertext,
        ])
    }

    /// Hex wire encoding with `0x` prefix.
    pub fn to_hex(&self) -> String {
        self.to_bytes().to_hex()
    }

    /// Parse the wire encoding (hex string or raw bytes).
    pub fn from_wire(wire: impl Into<ByteInput>) -> Result<Self, CoreError> {
        let bytes = encode(wire);
        if bytes.len() < MIN_WIRE_SIZE {
            return Err(CoreError::MalformedInput(format!(
                "incorrect message length: {} < {MIN_WIRE_SIZE}",
                bytes.len()
            )));
        }

        let mut at = 0;
        let mut take = |n: usize| {
            let part = bytes.slice(at..at + n);
            at += n;
            part
        };

        Ok(Self {
            iv: take(IV_SIZE),
            eph_pub_key: take(EPH_PUB_KEY_SIZE),
            mac: take(MAC_SIZE),
            salt: take(SALT_SIZE),
            ciphertext: bytes.slice(IV_SIZE + EPH_PUB_KEY_SIZE + MAC_SIZE + SALT_SIZE..),
        })
    }

    /// The MAC input: every field except the MAC itself, in wire order.
    fn mac_payload(&self) -> Bytes {
        Bytes::concat([&self.iv, &self.eph_pub_key, &self.salt, &self.ciphertext])
    }
}

/// Encrypt a message for the holder of `recipient_public`.
///
/// A one-shot ephemeral key pair is generated per call; its public half
/// travels in the envelope so the recipient can re-derive the secret.
pub fn encrypt(
    msg: impl Into<ByteInput>,
    recipient_public: impl Into<ByteInput>,
) -> Result<EciesEnvelope, CoreError> {
    let recipient = encode(recipient_public);

    let eph = KeyPair::generate();
    let secret = shared_secret(eph.private_key(), &recipient)?;

    let aes = cipher::encrypt(msg, &secret);

    let eph_pub = eph.public_key();
    let mac_key = sha256(&secret);
    let mac = hmac256(
        Bytes::concat([&aes.iv, &eph_pub, &aes.salt, &aes.ciphertext]),
        &mac_key,
    );

    Ok(EciesEnvelope {
        iv: aes.iv,
        eph_pub_key: eph_pub,
        mac,
        salt: aes.salt,
        ciphertext: aes.ciphertext,
    })
}

/// Decrypt an envelope with the recipient's private key.
///
/// The MAC is recomputed and compared in constant time strictly before any
/// decryption attempt; a mismatch is [`CoreError::BadMac`].
pub fn decrypt(
    envelope: &EciesEnvelope,
    recipient_private: impl Into<ByteInput>,
) -> Result<Plaintext, CoreError> {
    let secret = shared_secret(recipient_private, &envelope.eph_pub_key)?;

    let mac_key = sha256(&secret);
    let expected = hmac256(envelope.mac_payload(), &mac_key);
    if !bool::from(expected.as_slice().ct_eq(envelope.mac.as_slice())) {
        return Err(CoreError::BadMac);
    }

    let aes = CipherEnvelope {
        iv: envelope.iv.clone(),
        salt: envelope.salt.clone(),
        ciphertext: envelope.ciphertext.clone(),
    };
    cipher::decrypt(&aes, &secret)
}

/// Parse a wire string and decrypt it in one step.
pub fn decrypt_wire(
    wire: impl Into<ByteInput>,
    recipient_private: impl Into<ByteInput>,
) -> Result<Plaintext, CoreError> {
    decrypt(&EciesEnvelope::from_wire(wire)?, recipient_private)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roundtrip_text() {
        let keys = KeyPair::generate();
        let env = encrypt("This is a test message", keys.public_key()).unwrap();
        let decrypted = decrypt(&env, keys.private_key()).unwrap();
        assert_eq!(decrypted, Plaintext::Text("This is a test message".into()));
    }

    #[test]
    fn test_roundtrip_record_via_wire() {
        let keys = KeyPair::generate();
        let record = json!({"claim": "owns-domain", "domain": "example.org"});
        let wire = encrypt(&record, keys.public_key()).unwrap().to_hex();
        let decrypted = decrypt_wire(wire.as_str(), keys.private_key()).unwrap();
        assert_eq!(decrypted, Plaintext::Json(record));
    }

    #[test]
    fn test_roundtrip_with_hex_string_keys() {
        let keys = KeyPair::generate();
        let env = encrypt("msg", keys.public_key_hex()).unwrap();
        let decrypted = decrypt(&env, keys.private_key().to_hex()).unwrap();
        assert_eq!(decrypted, Plaintext::Text("msg".into()));
    }

    #[test]
    fn test_envelope_field_sizes() {
        let keys = KeyPair::generate();
        let env = encrypt("sized", keys.public_key()).unwrap();
        assert_eq!(env.iv.len(), IV_SIZE);
        assert_eq!(env.eph_pub_key.len(), EPH_PUB_KEY_SIZE);
        assert_eq!(env.mac.len(), MAC_SIZE);
        assert_eq!(env.salt.len(), SALT_SIZE);
        assert_eq!(env.to_bytes().len(), 89 + env.ciphertext.len());
    }

    #[test]
    fn test_wire_too_short_rejected() {
        // 89 bytes is header-only: no room for ciphertext.
        let short = Bytes::random(MIN_WIRE_SIZE - 1).to_hex();
        assert!(matches!(
            EciesEnvelope::from_wire(short.as_str()),
            Err(CoreError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_every_flipped_byte_fails_closed() {
        let keys = KeyPair::generate();
        let env = encrypt("tamper detection test", keys.public_key()).unwrap();
        let wire = env.to_bytes();

        let eph_range = IV_SIZE..IV_SIZE + EPH_PUB_KEY_SIZE;
        for i in 0..wire.len() {
            let mut tampered = wire.as_slice().to_vec();
            tampered[i] ^= 0x01;

            let result = decrypt_wire(tampered, keys.private_key());
            if eph_range.contains(&i) {
                // A flipped ephemeral key byte fails either at point
                // decoding or at the MAC check.
                assert!(result.is_err(), "flip at {i} succeeded");
            } else {
                assert!(
                    matches!(result, Err(CoreError::BadMac)),
                    "flip at {i} did not trip the mac"
                );
            }
        }
    }

    #[test]
    fn test_wrong_private_key_is_bad_mac() {
        let keys = KeyPair::generate();
        let other = KeyPair::generate();
        let env = encrypt("secret", keys.public_key()).unwrap();
        assert!(matches!(
            decrypt(&env, other.private_key()),
            Err(CoreError::BadMac)
        ));
    }

    #[test]
    fn test_encrypt_rejects_invalid_recipient() {
        assert!(matches!(
            encrypt("msg", [0u8; 33]),
            Err(CoreError::InvalidPublicKey)
        ));
    }
}
