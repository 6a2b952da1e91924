//! Document endpoints: list, fetch, index, update, destroy.
//!
//! Documents are JSON objects keyed by a required `id` field. Key
//! normalization and `id` validation happen locally, before any request
//! goes out.

use serde_json::{Map, Value};

use crate::client::Client;
use crate::error::Error;
use crate::utils::{normalize_keys, stringify_keys, Params};

/// Fields every document must carry before it may be indexed.
const REQUIRED_DOCUMENT_FIELDS: &[&str] = &["id"];

impl Client {
    /// Lists documents in an engine; `options` may carry pagination.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn list_documents(
        &self,
        engine_name: &str,
        options: Params,
    ) -> Result<Value, Error> {
        let params = normalize_keys(options);
        self.get(&format!("engines/{engine_name}/documents/list"), &params)
            .await
    }

    /// Retrieves documents by ID.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn get_documents(&self, engine_name: &str, ids: &[&str]) -> Result<Value, Error> {
        self.get(&format!("engines/{engine_name}/documents"), ids)
            .await
    }

    /// Indexes a batch of documents.
    ///
    /// Returns one status object per document; per-document processing
    /// errors appear in each status rather than failing the whole batch.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDocument`] before any network call when a document
    /// is missing its `id`; otherwise the same errors as
    /// [`execute`](Self::execute).
    pub async fn index_documents(
        &self,
        engine_name: &str,
        documents: Vec<Params>,
    ) -> Result<Value, Error> {
        let normalized: Vec<Params> = documents.into_iter().map(stringify_keys).collect();
        for document in &normalized {
            validate_required_fields(document)?;
        }
        self.post(&format!("engines/{engine_name}/documents"), &normalized)
            .await
    }

    /// Indexes a single document and unwraps its status.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDocument`] when the document is missing its `id`
    /// (local, no network call) or when the returned status reports
    /// processing errors; otherwise the same errors as
    /// [`execute`](Self::execute).
    pub async fn index_document(
        &self,
        engine_name: &str,
        document: Params,
    ) -> Result<Value, Error> {
        let response = self.index_documents(engine_name, vec![document]).await?;
        let mut status = match response {
            Value::Array(mut statuses) if !statuses.is_empty() => match statuses.remove(0) {
                Value::Object(status) => status,
                other => return Err(Error::client(format!("malformed document status: {other}"))),
            },
            other => {
                return Err(Error::client(format!(
                    "expected a one-element status batch, got: {other}"
                )))
            }
        };
        let processing_errors = document_status_errors(&status);
        if !processing_errors.is_empty() {
            return Err(Error::invalid_document(vec![processing_errors.join("; ")]));
        }
        status.remove("errors");
        Ok(Value::Object(status))
    }

    /// Applies partial updates to existing documents.
    ///
    /// The API reports per-document failures in the response statuses, so
    /// no local `id` validation happens here.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn update_documents(
        &self,
        engine_name: &str,
        documents: Vec<Params>,
    ) -> Result<Value, Error> {
        let normalized: Vec<Params> = documents.into_iter().map(stringify_keys).collect();
        self.patch(&format!("engines/{engine_name}/documents"), &normalized)
            .await
    }

    /// Destroys documents by ID.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn destroy_documents(&self, engine_name: &str, ids: &[&str]) -> Result<Value, Error> {
        self.delete(&format!("engines/{engine_name}/documents"), ids)
            .await
    }
}

/// Rejects a document whose required fields are absent or null.
fn validate_required_fields(document: &Params) -> Result<(), Error> {
    let missing: Vec<&str> = REQUIRED_DOCUMENT_FIELDS
        .iter()
        .copied()
        .filter(|field| matches!(document.get(*field), None | Some(Value::Null)))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::invalid_document(vec![format!(
            "missing required fields ({})",
            missing.join(", ")
        )]))
    }
}

/// Extracts the processing-error strings from one document status.
fn document_status_errors(status: &Map<String, Value>) -> Vec<String> {
    match status.get("errors") {
        Some(Value::Array(errors)) => errors
            .iter()
            .map(|entry| match entry {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            other => panic!("test document must be an object: {other}"),
        }
    }

    #[test]
    fn test_validate_rejects_missing_id() {
        let doc = document(json!({"url": "https://example.com"}));
        let error = validate_required_fields(&doc).unwrap_err();
        assert_eq!(error.to_string(), "Error: missing required fields (id)");
    }

    #[test]
    fn test_validate_rejects_null_id() {
        let doc = document(json!({"id": null, "url": "https://example.com"}));
        assert!(validate_required_fields(&doc).is_err());
    }

    #[test]
    fn test_validate_accepts_present_id() {
        let doc = document(json!({"id": "doc-1"}));
        assert!(validate_required_fields(&doc).is_ok());
    }

    #[test]
    fn test_document_status_errors_extracts_strings() {
        let status = document(json!({"id": "doc-1", "errors": ["too long", "bad field"]}));
        assert_eq!(document_status_errors(&status), ["too long", "bad field"]);
    }

    #[test]
    fn test_document_status_errors_empty_when_clean() {
        let status = document(json!({"id": "doc-1", "errors": []}));
        assert!(document_status_errors(&status).is_empty());
        let status = document(json!({"id": "doc-1"}));
        assert!(document_status_errors(&status).is_empty());
    }
}
