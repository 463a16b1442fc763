//! secp256k1 key operations: generation, ECDH, signing, verification.
//!
//! Public keys are always the 33-byte compressed SEC1 encoding. The ECDH
//! shared secret is the compressed encoding of the shared *point* — not the
//! bare x-coordinate — because the secret doubles as symmetric key material
//! and peers must derive the identical byte string.

use std::fmt;

use k256::{
    ecdsa::{
        signature::hazmat::{PrehashSigner, PrehashVerifier},
        Signature, SigningKey, VerifyingKey,
    },
    elliptic_curve::sec1::ToEncodedPoint,
    PublicKey, SecretKey,
};

use crate::bytes::{encode, ByteInput, Bytes};
use crate::error::CoreError;
use crate::hash::keccak256;

/// Domain separator prepended before hashing a message for signing.
///
/// The Ethereum personal-message convention: prefix plus the ASCII decimal
/// byte length of the message. Signatures made here cannot be replayed as
/// transaction or raw-digest signatures.
const SIGN_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// A secp256k1 key pair.
#[derive(Clone)]
pub struct KeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl KeyPair {
    /// Generate a key pair from a random scalar in `[1, n)`.
    pub fn generate() -> Self {
        let secret = SecretKey::random(&mut rand::thread_rng());
        let public = secret.public_key();
        Self { secret, public }
    }

    /// Build a key pair from an existing private key (raw or hex).
    ///
    /// The key must be exactly 32 bytes and lie strictly between 1 and the
    /// curve order; anything else is [`CoreError::InvalidPrivateKey`].
    pub fn from_private_key(private_key: impl Into<ByteInput>) -> Result<Self, CoreError> {
        let secret = parse_secret(&encode(private_key))?;
        let public = secret.public_key();
        Ok(Self { secret, public })
    }

    /// The 32-byte private scalar.
    pub fn private_key(&self) -> Bytes {
        Bytes::copy_from_slice(&self.secret.to_bytes())
    }

    /// The 33-byte compressed public key.
    pub fn public_key(&self) -> Bytes {
        Bytes::copy_from_slice(self.public.to_encoded_point(true).as_bytes())
    }

    /// Compressed public key as a `0x`-prefixed hex string.
    pub fn public_key_hex(&self) -> String {
        self.public_key().to_hex()
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the secret.
        write!(f, "KeyPair({})", self.public_key_hex())
    }
}

/// Derive the ECDH shared secret between a private key and a peer's public
/// key, as the 33-byte compressed encoding of the shared point.
pub fn shared_secret(
    private_key: impl Into<ByteInput>,
    other_public: impl Into<ByteInput>,
) -> Result<Bytes, CoreError> {
    let secret = parse_secret(&encode(private_key))?;
    let public = parse_public(&encode(other_public))?;

    let point = public.to_projective() * *secret.to_nonzero_scalar();
    let encoded = point.to_affine().to_encoded_point(true);
    Ok(Bytes::copy_from_slice(encoded.as_bytes()))
}

/// The domain-separated digest a signature commits to.
///
/// `keccak256(prefix ∥ ascii_decimal(len(msg)) ∥ msg)`.
pub fn sign_hash(message: impl Into<ByteInput>) -> Bytes {
    let msg = encode(message);
    let prefix = Bytes::from(format!("{SIGN_PREFIX}{}", msg.len()).into_bytes());
    keccak256(Bytes::concat([&prefix, &msg]))
}

/// Sign a message with a private key.
///
/// Deterministic (RFC 6979) ECDSA over [`sign_hash`], DER-encoded.
pub fn sign(
    message: impl Into<ByteInput>,
    private_key: impl Into<ByteInput>,
) -> Result<Bytes, CoreError> {
    let secret = parse_secret(&encode(private_key))?;
    let digest = sign_hash(message);

    let signing_key = SigningKey::from(&secret);
    let signature: Signature = signing_key
        .sign_prehash(digest.as_slice())
        .map_err(|e| CoreError::SigningFailed(e.to_string()))?;

    Ok(Bytes::copy_from_slice(signature.to_der().as_bytes()))
}

/// Verify a DER signature over a message against a public key.
///
/// Malformed signatures or keys are verification failures, never errors.
pub fn verify(
    signature: impl Into<ByteInput>,
    message: impl Into<ByteInput>,
    public_key: impl Into<ByteInput>,
) -> bool {
    let public = match parse_public(&encode(public_key)) {
        Ok(p) => p,
        Err(_) => return false,
    };
    let sig = match Signature::from_der(encode(signature).as_slice()) {
        Ok(s) => s,
        Err(_) => return false,
    };
    // Accept high-S signatures from foreign signers.
    let sig = sig.normalize_s().unwrap_or(sig);

    let digest = sign_hash(message);
    VerifyingKey::from(&public)
        .verify_prehash(digest.as_slice(), &sig)
        .is_ok()
}

fn parse_secret(bytes: &Bytes) -> Result<SecretKey, CoreError> {
    if bytes.len() != 32 {
        return Err(CoreError::InvalidPrivateKey);
    }
    SecretKey::from_slice(bytes.as_slice()).map_err(|_| CoreError::InvalidPrivateKey)
}

fn parse_public(bytes: &Bytes) -> Result<PublicKey, CoreError> {
    PublicKey::from_sec1_bytes(bytes.as_slice()).map_err(|_| CoreError::InvalidPublicKey)
}
