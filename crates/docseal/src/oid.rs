//! Time-ordered 12-byte document identifiers.
//!
//! Layout: 4-byte big-endian unix seconds, 5 process-random bytes, 3-byte
//! counter. The string form is 24 hex characters. Identifiers sort by
//! creation time, which keeps document indexes roughly chronological.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngCore;

use crate::error::DocumentError;

/// Identifier size in bytes.
pub const DOCUMENT_ID_SIZE: usize = 12;

/// A 12-byte, time-ordered document identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId([u8; DOCUMENT_ID_SIZE]);

impl DocumentId {
    /// Generate a fresh identifier for the current instant.
    pub fn generate() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_secs() as u32;
        let (process, counter) = process_state();
        let count = counter.fetch_add(1, Ordering::Relaxed);

        let mut bytes = [0u8; DOCUMENT_ID_SIZE];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(process);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; DOCUMENT_ID_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; DOCUMENT_ID_SIZE] {
        &self.0
    }

    /// The 24-hex-character string form (no prefix, by convention).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse the string form.
    pub fn parse(s: &str) -> Result<Self, DocumentError> {
        if s.len() != DOCUMENT_ID_SIZE * 2 {
            return Err(DocumentError::MalformedId(s.to_owned()));
        }
        let decoded = hex::decode(s).map_err(|_| DocumentError::MalformedId(s.to_owned()))?;
        let mut bytes = [0u8; DOCUMENT_ID_SIZE];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// Whether a string is a well-formed identifier.
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    /// The creation time embedded in the identifier (unix seconds).
    pub fn timestamp(&self) -> i64 {
        let mut secs = [0u8; 4];
        secs.copy_from_slice(&self.0[..4]);
        i64::from(u32::from_be_bytes(secs))
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.to_hex())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Per-process random block and counter, initialized on first use.
fn process_state() -> &'static ([u8; 5], AtomicU32) {
    static STATE: OnceLock<([u8; 5], AtomicU32)> = OnceLock::new();
    STATE.get_or_init(|| {
        let mut rng = rand::thread_rng();
        let mut process = [0u8; 5];
        rng.fill_bytes(&mut process);
        // Counter starts at a random offset so ids do not reveal how many
        // documents a process has produced.
        (process, AtomicU32::new(rng.next_u32() & 0x00ff_ffff))
    })
}
