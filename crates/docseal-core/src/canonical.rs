//! Canonical JSON encoding for deterministic serialization.
//!
//! Signed and hashed payloads in docseal are JSON values. The canonical
//! form guarantees that the same logical value always produces identical
//! bytes, regardless of how the value was assembled:
//!
//! - Object keys are sorted lexicographically, recursively
//! - Compact separators, no whitespace
//! - Strings use standard JSON escaping
//! - Numbers render exactly as `serde_json` formats them
//!
//! Reproducibility is what makes search hashes and multi-party signatures
//! verifiable by independent implementations.

use serde_json::Value;

/// Encode a JSON value to its canonical string form.
pub fn to_canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

/// Recursively write a value in canonical form.
fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            // Sort explicitly rather than relying on the map's internal
            // ordering, which depends on serde_json feature flags.
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, val)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, val);
            }
            out.push('}');
        }
    }
}

/// Write a string with standard JSON escaping.
fn write_string(out: &mut String, s: &str) {
    // serde_json produces the exact escaping JSON requires.
    out.push_str(&serde_json::to_string(s).expect("string serialization is infallible"));
}
