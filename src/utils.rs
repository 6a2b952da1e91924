//! Parameter-map normalization and timestamp rendering.
//!
//! Request parameters travel as JSON objects. This module provides the
//! canonical-key normalization applied to documents and search options
//! before they are merged into a request body, plus the [`Timestamp`]
//! wrapper that fixes the wire format of date/time values.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A JSON-object parameter map, keyed by canonical string keys.
pub type Params = Map<String, Value>;

/// Normalizes a parameter map to canonical string keys.
///
/// A leading `:` (symbol-style spelling, e.g. `":size"`) is stripped so both
/// spellings of a key collapse to the same canonical entry. When a map
/// carries both spellings, the plain one wins.
#[must_use]
pub fn normalize_keys(params: Params) -> Params {
    let mut normalized = Params::new();
    let mut prefixed: Vec<(String, Value)> = Vec::new();
    for (key, value) in params {
        match key.strip_prefix(':') {
            Some(stripped) => prefixed.push((stripped.to_string(), value)),
            None => {
                normalized.insert(key, value);
            }
        }
    }
    for (key, value) in prefixed {
        normalized.entry(key).or_insert(value);
    }
    normalized
}

/// Normalizes a document object to canonical string keys.
///
/// Same canonicalization as [`normalize_keys`]; documents and options share
/// one key form on the wire.
#[must_use]
pub fn stringify_keys(document: Params) -> Params {
    normalize_keys(document)
}

/// A date/time request-parameter value.
///
/// Serializes as RFC 3339 text with a numeric UTC offset
/// (`2018-01-01T01:01:01+00:00`), which is the form the API echoes back
/// for date fields. Use this wrapper instead of serializing a
/// [`DateTime<Utc>`] directly, whose default form ends in `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(pub DateTime<Utc>);

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_normalize_keys_strips_symbol_prefix() {
        let mut params = Params::new();
        params.insert(":size".to_string(), json!(10));
        params.insert("current".to_string(), json!(1));

        let normalized = normalize_keys(params);
        assert_eq!(normalized.get("size"), Some(&json!(10)));
        assert_eq!(normalized.get("current"), Some(&json!(1)));
        assert!(
            !normalized.contains_key(":size"),
            "symbol spelling must not survive normalization"
        );
    }

    #[test]
    fn test_normalize_keys_collapses_duplicate_spellings() {
        let mut params = Params::new();
        params.insert("size".to_string(), json!(10));
        params.insert(":size".to_string(), json!(20));

        let normalized = normalize_keys(params);
        assert_eq!(normalized.len(), 1);
        assert_eq!(
            normalized.get("size"),
            Some(&json!(10)),
            "plain spelling wins over symbol spelling"
        );
    }

    #[test]
    fn test_timestamp_serializes_rfc3339_with_numeric_offset() {
        let moment = Utc.with_ymd_and_hms(2018, 1, 1, 1, 1, 1).unwrap();
        let serialized = serde_json::to_string(&Timestamp(moment)).unwrap();
        assert_eq!(serialized, "\"2018-01-01T01:01:01+00:00\"");
    }

    #[test]
    fn test_timestamp_in_document_body() {
        let moment = Utc.with_ymd_and_hms(2018, 1, 1, 1, 1, 1).unwrap();
        let body = serde_json::to_string(&json!({
            "id": "doc-1",
            "created_at": Timestamp(moment),
        }))
        .unwrap();
        assert!(
            body.contains("2018-01-01T01:01:01+00:00"),
            "timestamp must render RFC 3339 in the body: {body}"
        );
    }
}
