//! Digest and MAC primitives.
//!
//! Thin, pure wrappers over the RustCrypto hashes. All functions accept any
//! [`ByteInput`](crate::bytes::ByteInput) — the hex/text classification
//! documented there applies — and return fixed-size [`Bytes`].

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};
use sha3::{Keccak256, Sha3_256};

use crate::bytes::{encode, ByteInput, Bytes};

/// SHA-256 (32 bytes).
pub fn sha256(msg: impl Into<ByteInput>) -> Bytes {
    Bytes::from(Sha256::digest(encode(msg)).to_vec())
}

/// SHA-512 (64 bytes).
pub fn sha512(msg: impl Into<ByteInput>) -> Bytes {
    Bytes::from(Sha512::digest(encode(msg)).to_vec())
}

/// SHA3-256 (32 bytes).
pub fn sha3_256(msg: impl Into<ByteInput>) -> Bytes {
    Bytes::from(Sha3_256::digest(encode(msg)).to_vec())
}

/// Keccak-256 (32 bytes) — the pre-standard SHA3 variant used for signing.
pub fn keccak256(msg: impl Into<ByteInput>) -> Bytes {
    Bytes::from(Keccak256::digest(encode(msg)).to_vec())
}

/// HMAC-SHA256 over `msg` with `key` (32 bytes).
pub fn hmac256(msg: impl Into<ByteInput>, key: impl Into<ByteInput>) -> Bytes {
    let mut mac = Hmac::<Sha256>::new_from_slice(encode(key).as_slice())
        .expect("hmac accepts keys of any length");
    mac.update(encode(msg).as_slice());
    Bytes::from(mac.finalize().into_bytes().to_vec())
}
