//! Label Fingerprints - SHA-256 over Canonical JSON
//!
//! A fingerprint changes exactly when the rendered label changes, so
//! collaborators can skip re-saving or re-copying identical output.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

use crate::render::RenderedLabel;

/// Lowercase hex SHA-256 digest.
pub fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Serialize with object keys ordered, so the same label always yields
/// the same bytes regardless of field declaration order.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    to_string(&ordered(serde_json::to_value(value)?))
}

fn ordered(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(entries.into_iter().map(|(k, v)| (k, ordered(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(ordered).collect()),
        other => other,
    }
}

/// Fingerprint of all three representations of a rendered label.
pub fn fingerprint(rendered: &RenderedLabel) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(rendered)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rendered(plain: &str) -> RenderedLabel {
        RenderedLabel {
            storage_text: "Flour".into(),
            rich_markup: "<div class=\"label\"></div>".into(),
            plain_text: plain.into(),
        }
    }

    #[test]
    fn test_canonical_json_sorted() {
        let obj = json!({"z": 1, "a": 2, "m": {"y": 1, "b": 2}});
        assert_eq!(canonical_json(&obj).unwrap(), r#"{"a":2,"m":{"b":2,"y":1},"z":1}"#);
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = fingerprint(&rendered("Bread")).unwrap();
        assert_eq!(a, fingerprint(&rendered("Bread")).unwrap());
        assert_ne!(a, fingerprint(&rendered("Rolls")).unwrap());
        assert_eq!(a.len(), 64);
    }
}
