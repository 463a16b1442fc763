//! # docseal testkit
//!
//! Testing utilities for docseal.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: pinned primitive outputs for regression testing
//! - **Generators**: proptest strategies for property-based testing
//! - **Fixtures**: helper structs for setting up multi-party scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use docseal_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, actual) in verify_all_vectors() {
//!     assert!(matches, "{name} produced {actual}");
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use docseal_testkit::fixtures::TestFixture;
//! use serde_json::json;
//!
//! let fixture = TestFixture::new();
//! let doc = fixture.make_document(json!({"email": "test@email.com"}));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, seed_from_index, TestFixture};
pub use generators::{document_from_params, DocumentParams};
pub use vectors::{all_vectors, compute_vector, verify_all_vectors, GoldenVector, HashAlgo};
