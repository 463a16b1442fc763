//! Documents: encrypted records with layered signer and certifier
//! attestations.
//!
//! A document moves through a monotonic append lattice:
//! `Built → Signed(0..n) → Certified(0..m)`. No transition removes data;
//! "mutation" always produces a new value with one more list entry.
//!
//! Signer and certifier signatures deliberately cover different payloads:
//!
//! - a **signer** signs the document *without* `meta` and `signers` — each
//!   signer attests only to content that existed before any signature;
//! - a **certifier** signs the document *without* `meta` but *with* the
//!   signer list, vouching for the full set of signatures present at
//!   certification time. Appending a signer afterwards therefore breaks
//!   existing certifications, which is what makes certification meaningful.
//!
//! Payloads are canonicalized with the deterministic JSON encoder before
//! hashing, so independently assembled but logically identical documents
//! verify interchangeably.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use docseal_core::{ecies, hash, keys, to_canonical_json, ByteInput, KeyPair};

use crate::error::DocumentError;
use crate::oid::DocumentId;

/// Schema version stamped on freshly built documents.
pub const SCHEMA_VERSION: &str = "1.0";

/// Input for building a new document.
#[derive(Debug, Clone)]
pub struct DocumentContent {
    /// The payload to encrypt. Strings encrypt as text (hex classification
    /// applies), records encrypt as canonical JSON.
    pub data: Value,
    /// Compressed secp256k1 public key of the owner, hex-encoded. The
    /// document payload is encrypted to this key.
    pub owner_pub_key: String,
    /// Application-defined document type.
    pub doc_type: String,
    /// Application-defined subtype.
    pub subtype: String,
    /// Optional human-readable title.
    pub title: Option<String>,
}

/// One signer or certifier attestation. Append-only once added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attestation {
    /// Auxiliary data the attestor bound into their signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Compressed public key of the attestor, hex-encoded.
    pub pub_key: String,

    /// DER ECDSA signature, hex-encoded.
    pub signature: String,
}

/// Document metadata carrying the certifier list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Certifier attestations, in certification order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifiers: Vec<Attestation>,
}

/// An encrypted, signable, certifiable document.
///
/// Field names match the JSON wire form; `type` is mapped to `doc_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// ECIES envelope of the content data, hex-encoded.
    pub cipher: String,

    /// Build time, unix seconds.
    pub created_at: i64,

    /// Time-ordered 24-hex-character identifier.
    pub id: String,

    /// Compressed public key the cipher is addressed to, hex-encoded.
    pub owner_pub_key: String,

    /// Schema version of the document layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,

    /// SHA-256 of the plaintext content, hex-encoded. Unlike `cipher`, this
    /// is independent of the encryption randomness: the same plaintext
    /// always yields the same hash, so documents can be indexed by content
    /// without decryption.
    pub search_hash: String,

    /// Signer attestations, in signing order.
    #[serde(default)]
    pub signers: Vec<Attestation>,

    /// Application-defined subtype.
    pub subtype: String,

    /// Optional human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Application-defined document type.
    #[serde(rename = "type")]
    pub doc_type: String,

    /// Metadata (certifiers). Excluded from every signed payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<DocumentMeta>,
}

impl Document {
    /// The certifier list, empty when no `meta` is present.
    pub fn certifiers(&self) -> &[Attestation] {
        self.meta
            .as_ref()
            .map(|m| m.certifiers.as_slice())
            .unwrap_or(&[])
    }
}

/// Build a new document, encrypting `content.data` to the owner's key.
pub fn build(content: DocumentContent) -> Result<Document, DocumentError> {
    let cipher = ecies::encrypt(&content.data, content.owner_pub_key.as_str())?.to_hex();
    let search_hash = hash::sha256(&content.data).to_hex();

    Ok(Document {
        cipher,
        created_at: now_secs(),
        id: DocumentId::generate().to_hex(),
        owner_pub_key: content.owner_pub_key,
        schema_version: Some(SCHEMA_VERSION.to_owned()),
        search_hash,
        signers: Vec::new(),
        subtype: content.subtype,
        title: content.title,
        doc_type: content.doc_type,
        meta: None,
    })
}

/// Sign a document, returning a new document with one more signer.
///
/// The signature covers `[document minus {meta, signers}, aux?]`; the aux
/// value, when given, is stored on the attestation and bound into the
/// signature.
pub fn sign(
    document: &Document,
    private_key: impl Into<ByteInput>,
    aux: Option<Value>,
) -> Result<Document, DocumentError> {
    let pair = KeyPair::from_private_key(private_key)?;
    let payload = signable_payload(document, false, aux.as_ref());
    let signature = keys::sign(payload.as_str(), pair.private_key())?;

    let mut signed = document.clone();
    signed.signers.push(Attestation {
        data: aux,
        pub_key: pair.public_key_hex(),
        signature: signature.to_hex(),
    });
    Ok(signed)
}

/// Certify a document, returning a new document with one more certifier.
///
/// The document must currently validate — certification vouches for the
/// existing signatures, so certifying an invalid document is refused with
/// [`DocumentError::InvalidDocument`]. The signature covers
/// `[document minus {meta}, aux?]`, signer list included.
pub fn certify(
    document: &Document,
    private_key: impl Into<ByteInput>,
    aux: Option<Value>,
) -> Result<Document, DocumentError> {
    if !validate(document) {
        return Err(DocumentError::InvalidDocument);
    }

    let pair = KeyPair::from_private_key(private_key)?;
    let payload = signable_payload(document, true, aux.as_ref());
    let signature = keys::sign(payload.as_str(), pair.private_key())?;

    let mut certified = document.clone();
    certified
        .meta
        .get_or_insert_with(DocumentMeta::default)
        .certifiers
        .push(Attestation {
            data: aux,
            pub_key: pair.public_key_hex(),
            signature: signature.to_hex(),
        });
    Ok(certified)
}

/// Check a document: well-formed id, every signer and every certifier
/// signature verifies against its payload. Empty lists trivially pass.
///
/// Returns `bool` rather than an error so callers can batch-check many
/// documents without exception-driven control flow.
pub fn validate(document: &Document) -> bool {
    if !DocumentId::is_valid(&document.id) {
        tracing::warn!(id = %document.id, "document id is not well formed");
        return false;
    }

    for signer in &document.signers {
        let payload = signable_payload(document, false, signer.data.as_ref());
        if !keys::verify(
            signer.signature.as_str(),
            payload.as_str(),
            signer.pub_key.as_str(),
        ) {
            tracing::warn!(pub_key = %signer.pub_key, "signer signature failed verification");
            return false;
        }
    }

    for certifier in document.certifiers() {
        let payload = signable_payload(document, true, certifier.data.as_ref());
        if !keys::verify(
            certifier.signature.as_str(),
            payload.as_str(),
            certifier.pub_key.as_str(),
        ) {
            tracing::warn!(pub_key = %certifier.pub_key, "certifier signature failed verification");
            return false;
        }
    }

    true
}

/// Canonical JSON of the signed tuple `[stripped document, aux?]`.
///
/// `meta` is always stripped; `signers` only for signer payloads. The aux
/// value is omitted entirely when absent.
fn signable_payload(document: &Document, include_signers: bool, aux: Option<&Value>) -> String {
    let mut map = match serde_json::to_value(document) {
        Ok(Value::Object(map)) => map,
        _ => unreachable!("documents serialize to JSON objects"),
    };
    map.remove("meta");
    if !include_signers {
        map.remove("signers");
    }

    let mut tuple = vec![Value::Object(map)];
    if let Some(aux) = aux {
        tuple.push(aux.clone());
    }
    to_canonical_json(&Value::Array(tuple))
}

/// Current time in unix seconds.
fn now_secs() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn owner() -> KeyPair {
        KeyPair::from_private_key([0x42u8; 32]).unwrap()
    }

    fn test_content(keys: &KeyPair) -> DocumentContent {
        DocumentContent {
            data: json!("test@email.com"),
            owner_pub_key: keys.public_key_hex(),
            doc_type: "attribute".into(),
            subtype: "email".into(),
            title: Some("My Email".into()),
        }
    }

    #[test]
    fn test_build_produces_valid_document() {
        let keys = owner();
        let doc = build(test_content(&keys)).unwrap();

        assert!(doc.cipher.starts_with("0x"));
        assert!(DocumentId::is_valid(&doc.id));
        assert_eq!(doc.schema_version.as_deref(), Some(SCHEMA_VERSION));
        assert!(doc.signers.is_empty());
        assert!(doc.meta.is_none());
        assert!(validate(&doc));
    }

    #[test]
    fn test_search_hash_is_deterministic_while_cipher_is_not() {
        let keys = owner();
        let a = build(test_content(&keys)).unwrap();
        let b = build(test_content(&keys)).unwrap();

        assert_eq!(a.search_hash, b.search_hash);
        assert_ne!(a.cipher, b.cipher);
    }

    #[test]
    fn test_sign_appends_and_still_validates() {
        let keys = owner();
        let doc = build(test_content(&keys)).unwrap();
        let signed = sign(&doc, keys.private_key(), None).unwrap();

        assert_eq!(signed.signers.len(), 1);
        assert_eq!(signed.signers[0].pub_key, keys.public_key_hex());
        assert!(validate(&signed));

        // The original document is untouched.
        assert!(doc.signers.is_empty());
    }

    #[test]
    fn test_multiple_signers_stay_valid() {
        let keys = owner();
        let second = KeyPair::generate();

        let doc = build(test_content(&keys)).unwrap();
        let doc = sign(&doc, keys.private_key(), None).unwrap();
        let doc = sign(&doc, second.private_key(), Some(json!("witness"))).unwrap();

        assert_eq!(doc.signers.len(), 2);
        assert!(validate(&doc));
    }

    #[test]
    fn test_certify_appends_certifier() {
        let keys = owner();
        let doc = build(test_content(&keys)).unwrap();
        let signed = sign(&doc, keys.private_key(), Some(json!("hello world"))).unwrap();
        let certified = certify(&signed, keys.private_key(), None).unwrap();

        assert_eq!(certified.certifiers().len(), 1);
        assert!(validate(&certified));
    }

    #[test]
    fn test_certify_refuses_invalid_document() {
        let keys = owner();
        let doc = build(test_content(&keys)).unwrap();
        let mut signed = sign(&doc, keys.private_key(), None).unwrap();

        // Tamper with the signer record.
        signed.signers[0].pub_key = KeyPair::generate().public_key_hex();

        assert!(matches!(
            certify(&signed, keys.private_key(), None),
            Err(DocumentError::InvalidDocument)
        ));
    }

    #[test]
    fn test_signer_added_after_certification_breaks_it() {
        let keys = owner();
        let late = KeyPair::generate();

        let doc = build(test_content(&keys)).unwrap();
        let doc = sign(&doc, keys.private_key(), None).unwrap();
        let doc = certify(&doc, keys.private_key(), None).unwrap();
        assert!(validate(&doc));

        // Certifier signatures cover the signer list; a late signer
        // invalidates them while the signer signatures stay intact.
        let doc = sign(&doc, late.private_key(), None).unwrap();
        assert!(!validate(&doc));
    }

    #[test]
    fn test_tampered_fields_invalidate_signatures() {
        let keys = owner();
        let doc = build(test_content(&keys)).unwrap();
        let signed = sign(&doc, keys.private_key(), None).unwrap();

        let mut tampered = signed.clone();
        tampered.title = Some("Renamed".into());
        assert!(!validate(&tampered));

        let mut tampered = signed.clone();
        tampered.search_hash = hash::sha256("other data").to_hex();
        assert!(!validate(&tampered));

        let mut tampered = signed.clone();
        tampered.id = "not-an-id".into();
        assert!(!validate(&tampered));

        let mut tampered = signed;
        tampered.signers[0].data = Some(json!("injected"));
        assert!(!validate(&tampered));
    }

    #[test]
    fn test_aux_data_is_bound_into_signature() {
        let keys = owner();
        let doc = build(test_content(&keys)).unwrap();
        let signed = sign(&doc, keys.private_key(), Some(json!({"role": "notary"}))).unwrap();
        assert!(validate(&signed));

        let mut tampered = signed;
        tampered.signers[0].data = None;
        assert!(!validate(&tampered));
    }

    #[test]
    fn test_document_json_roundtrip() {
        let keys = owner();
        let doc = build(test_content(&keys)).unwrap();
        let doc = sign(&doc, keys.private_key(), None).unwrap();
        let doc = certify(&doc, keys.private_key(), None).unwrap();

        let encoded = serde_json::to_string(&doc).unwrap();
        assert!(encoded.contains("\"type\":\"attribute\""));

        let decoded: Document = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, doc);
        assert!(validate(&decoded));
    }

    #[test]
    fn test_validate_survives_field_reordering() {
        let keys = owner();
        let doc = build(test_content(&keys)).unwrap();
        let doc = sign(&doc, keys.private_key(), None).unwrap();

        // A document that went through a foreign system and came back with
        // fields in arbitrary order must still verify.
        let value = serde_json::to_value(&doc).unwrap();
        let reordered: Document = serde_json::from_value(value).unwrap();
        assert!(validate(&reordered));
    }
}
