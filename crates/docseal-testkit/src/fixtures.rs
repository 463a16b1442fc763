//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use docseal::{build, Document, DocumentContent, KeyPair};
use serde_json::Value;

/// A test fixture holding one party's key pair.
pub struct TestFixture {
    pub keypair: KeyPair,
}

impl TestFixture {
    /// Create a new fixture with a random key pair.
    pub fn new() -> Self {
        Self {
            keypair: KeyPair::generate(),
        }
    }

    /// Create with a deterministic key pair from a seed.
    ///
    /// The seed must be a valid private scalar; use [`seed_from_index`] for
    /// seeds that are valid by construction.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: KeyPair::from_private_key(seed)
                .expect("seed must be a valid private scalar"),
        }
    }

    /// The fixture's compressed public key, hex-encoded.
    pub fn public_key_hex(&self) -> String {
        self.keypair.public_key_hex()
    }

    /// Content owned by this fixture, ready to build.
    pub fn make_content(&self, data: Value) -> DocumentContent {
        DocumentContent {
            data,
            owner_pub_key: self.public_key_hex(),
            doc_type: "attribute".into(),
            subtype: "email".into(),
            title: Some("Test Document".into()),
        }
    }

    /// Build a document owned by this fixture.
    pub fn make_document(&self, data: Value) -> Document {
        build(self.make_content(data)).expect("fixture content builds")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A private-key seed that is a valid scalar for any index.
///
/// The top bytes stay zero, so the value is far below the curve order; the
/// low byte is offset by one so index 0 is not the zero scalar.
pub fn seed_from_index(index: u8) -> [u8; 32] {
    let mut seed = [0u8; 32];
    seed[31] = index.wrapping_add(1);
    seed
}

/// Create multiple deterministic fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| TestFixture::with_seed(seed_from_index(i as u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docseal::{sign, validate};
    use serde_json::json;

    #[test]
    fn test_fixture_builds_valid_documents() {
        let fixture = TestFixture::new();
        let doc = fixture.make_document(json!("hello"));
        assert!(validate(&doc));
    }

    #[test]
    fn test_fixture_can_sign_own_document() {
        let fixture = TestFixture::with_seed(seed_from_index(0));
        let doc = fixture.make_document(json!({"k": "v"}));
        let signed = sign(&doc, fixture.keypair.private_key(), None).unwrap();
        assert_eq!(signed.signers.len(), 1);
        assert!(validate(&signed));
    }

    #[test]
    fn test_multi_party() {
        let parties = multi_party_fixtures(3);

        // Each party has unique keys
        let pks: Vec<_> = parties.iter().map(|p| p.public_key_hex()).collect();
        assert_ne!(pks[0], pks[1]);
        assert_ne!(pks[1], pks[2]);
        assert_ne!(pks[0], pks[2]);
    }

    #[test]
    fn test_seeds_are_deterministic() {
        let a = TestFixture::with_seed(seed_from_index(5));
        let b = TestFixture::with_seed(seed_from_index(5));
        assert_eq!(a.public_key_hex(), b.public_key_hex());
    }
}
