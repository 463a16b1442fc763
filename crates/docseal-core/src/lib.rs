//! # docseal core
//!
//! Pure cryptographic primitives for docseal: canonical byte encoding,
//! hash functions, secp256k1 key operations, password-based AES, and ECIES
//! hybrid encryption.
//!
//! This crate contains no I/O and no shared mutable state. Every operation
//! is a stateless transform; the only side effect anywhere is drawing from
//! the secure random source for keys, IVs, and salts.
//!
//! ## Key Types
//!
//! - [`Bytes`] - Immutable byte sequence with hex/UTF-8 conversions
//! - [`ByteInput`] - Closed union of encoder inputs (raw / text / record)
//! - [`KeyPair`] - secp256k1 key pair (33-byte compressed public keys)
//! - [`CipherEnvelope`] - AES envelope: `iv ∥ salt ∥ ciphertext`
//! - [`EciesEnvelope`] - hybrid envelope with ephemeral key and MAC
//!
//! ## Input Classification
//!
//! All primitives accept heterogeneous inputs through [`ByteInput`]. Read
//! the [`bytes`] module docs before passing user-controlled strings: text
//! consisting only of hex digits is decoded as hex, by design.

pub mod bytes;
pub mod canonical;
pub mod cipher;
pub mod ecies;
pub mod error;
pub mod hash;
pub mod keys;

pub use bytes::{encode, ByteInput, Bytes};
pub use canonical::to_canonical_json;
pub use cipher::{CipherEnvelope, Plaintext};
pub use ecies::EciesEnvelope;
pub use error::CoreError;
pub use keys::KeyPair;
