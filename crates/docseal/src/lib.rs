//! # docseal
//!
//! Self-describing encrypted, signed, and multiply-certified documents.
//!
//! ## Overview
//!
//! docseal is a pure, stateless transform library:
//!
//! - **Build**: encrypt content to its owner with ECIES (secp256k1 ECDH +
//!   AES-192-CBC + HMAC-SHA256), index it with a plaintext search hash
//! - **Sign**: any number of parties attest to the document content
//! - **Certify**: further parties vouch for the document *and* its
//!   signatures; certification requires the document to validate
//! - **Validate**: check the identifier and every attestation
//!
//! Documents are immutable values — signing and certifying return new
//! documents with one more attestation, never mutate in place.
//!
//! ## Usage
//!
//! ```rust
//! use docseal::{build, certify, sign, validate, DocumentContent, KeyPair};
//! use serde_json::json;
//!
//! let owner = KeyPair::generate();
//!
//! let doc = build(DocumentContent {
//!     data: json!("test@email.com"),
//!     owner_pub_key: owner.public_key_hex(),
//!     doc_type: "attribute".into(),
//!     subtype: "email".into(),
//!     title: Some("My Email".into()),
//! })
//! .unwrap();
//!
//! let doc = sign(&doc, owner.private_key(), None).unwrap();
//! let doc = certify(&doc, owner.private_key(), None).unwrap();
//! assert!(validate(&doc));
//! ```
//!
//! ## Re-exports
//!
//! The primitive layer is available as [`core`](docseal_core) for direct
//! use: `docseal::core::{cipher, ecies, hash, keys}`.

pub mod document;
pub mod error;
pub mod oid;

// Re-export the primitives crate
pub use docseal_core as core;

// Re-export main types for convenience
pub use document::{
    build, certify, sign, validate, Attestation, Document, DocumentContent, DocumentMeta,
    SCHEMA_VERSION,
};
pub use error::DocumentError;
pub use oid::DocumentId;

// Re-export commonly used core types
pub use docseal_core::{
    encode, ByteInput, Bytes, CipherEnvelope, CoreError, EciesEnvelope, KeyPair, Plaintext,
};
