//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::Value;

use docseal::{build, Document, DocumentContent, KeyPair};

/// Generate a private-key seed that is always a valid scalar.
///
/// The top eight bytes stay zero (far below the curve order) and the low
/// byte is forced odd so the scalar is never zero.
pub fn key_seed() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 24]>().prop_map(|tail| {
        let mut seed = [0u8; 32];
        seed[8..].copy_from_slice(&tail);
        seed[31] |= 1;
        seed
    })
}

/// Generate a deterministic key pair.
pub fn keypair() -> impl Strategy<Value = KeyPair> {
    key_seed().prop_map(|seed| {
        KeyPair::from_private_key(seed).expect("generated seed is a valid scalar")
    })
}

/// Generate plain text that survives the byte encoder unchanged: never
/// classified as hex, never parsable as JSON.
pub fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z !?.,@_-]{1,48}".prop_filter("must not be hex or JSON", |s| {
        docseal::encode(s.as_str()).as_slice() == s.as_bytes()
            && serde_json::from_str::<Value>(s).is_err()
    })
}

/// Generate an arbitrary passphrase.
pub fn passphrase() -> impl Strategy<Value = String> {
    "[ -~]{1,24}".prop_map(String::from)
}

/// Generate a flat JSON record.
pub fn record() -> impl Strategy<Value = Value> {
    proptest::collection::btree_map("[a-z_]{1,8}", "[ -~]{0,16}", 1..5)
        .prop_map(|m| Value::Object(m.into_iter().map(|(k, v)| (k, Value::from(v))).collect()))
}

/// Parameters for generating a document.
#[derive(Debug, Clone)]
pub struct DocumentParams {
    pub owner_seed: [u8; 32],
    pub data: Value,
    pub doc_type: String,
    pub subtype: String,
    pub title: Option<String>,
}

impl Arbitrary for DocumentParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            key_seed(),
            record(),
            "[a-z]{1,12}",
            "[a-z]{1,12}",
            proptest::option::of("[ -~]{1,24}"),
        )
            .prop_map(|(owner_seed, data, doc_type, subtype, title)| DocumentParams {
                owner_seed,
                data,
                doc_type,
                subtype,
                title,
            })
            .boxed()
    }
}

/// Build a document from parameters.
pub fn document_from_params(params: &DocumentParams) -> Document {
    let owner = KeyPair::from_private_key(params.owner_seed).expect("valid seed");
    build(DocumentContent {
        data: params.data.clone(),
        owner_pub_key: owner.public_key_hex(),
        doc_type: params.doc_type.clone(),
        subtype: params.subtype.clone(),
        title: params.title.clone(),
    })
    .expect("document builds")
}
