//! Error types for the document layer.

use docseal_core::CoreError;
use thiserror::Error;

/// Errors that can occur while building, signing, or certifying documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Certification was attempted on a document that fails validation.
    #[error("document is invalid")]
    InvalidDocument,

    /// The string is not a 24-hex-character document identifier.
    #[error("malformed document id: {0}")]
    MalformedId(String),

    /// A core cryptographic operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}
