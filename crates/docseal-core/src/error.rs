//! Error types for docseal core primitives.

use thiserror::Error;

/// Errors that can occur in the core cryptographic operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A wire string or buffer was too short or otherwise unparsable.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The ECIES MAC check failed. The ciphertext was never touched.
    #[error("bad mac")]
    BadMac,

    /// Private key is not a 32-byte scalar in [1, curve order).
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// Public key is not a valid SEC1 curve point encoding.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Symmetric decryption failed (wrong key material or corrupt padding).
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// ECDSA signing failed.
    #[error("signing failed: {0}")]
    SigningFailed(String),
}
