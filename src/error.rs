//! Error types for API requests.
//!
//! One closed set of error kinds, each carrying the ordered sequence of
//! human-readable error entries normalized out of the response envelope.
//! HTTP status codes map onto dedicated variants; everything the service
//! reports in an `"errors"` key ends up in the entry list, whatever shape
//! the body arrived in (string, object, or array of either).

use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by API calls and local validation.
#[derive(Debug, Error)]
pub enum Error {
    /// The service rejected the request as malformed (HTTP 400).
    #[error("{}", render_errors(.errors))]
    BadRequest {
        /// Normalized error entries from the response body.
        errors: Vec<String>,
    },

    /// The API key was missing or not accepted (HTTP 401).
    #[error("{}", render_errors(.errors))]
    InvalidCredentials {
        /// Normalized error entries from the response body.
        errors: Vec<String>,
    },

    /// The API key lacks permission for this operation (HTTP 403).
    #[error("{}", render_errors(.errors))]
    Forbidden {
        /// Normalized error entries from the response body.
        errors: Vec<String>,
    },

    /// The engine or document does not exist (HTTP 404).
    #[error("{}", render_errors(.errors))]
    NonExistentRecord {
        /// Normalized error entries from the response body.
        errors: Vec<String>,
    },

    /// A document failed local validation or server-side processing.
    ///
    /// Raised before any network call when a required field is missing,
    /// or after indexing when the per-document status reports errors.
    #[error("{}", render_errors(.errors))]
    InvalidDocument {
        /// Normalized error entries.
        errors: Vec<String>,
    },

    /// The request body exceeded the service's size limit (HTTP 413).
    #[error("{}", render_errors(.errors))]
    RequestEntityTooLarge {
        /// Normalized error entries from the response body.
        errors: Vec<String>,
    },

    /// Any other non-2xx response.
    ///
    /// Each entry is prefixed with `"(<status>) "`; when the body carries
    /// no `"errors"` key the canonical status reason stands in for it.
    #[error("{}", render_errors(.errors))]
    UnexpectedHttp {
        /// The raw HTTP status code.
        status: u16,
        /// Normalized, status-tagged error entries.
        errors: Vec<String>,
    },

    /// The overall per-call timeout expired.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL of the timed-out request.
        url: String,
    },

    /// Generic client error.
    ///
    /// Used when an envelope self-reports errors outside the request
    /// pipeline (see [`ResultResponse`](crate::ResultResponse)) and for
    /// local usage errors such as signing with a search-scoped key.
    #[error("{}", render_errors(.errors))]
    Client {
        /// Normalized error entries.
        errors: Vec<String>,
    },

    /// Network-level failure (DNS, connection refused, TLS, etc.)
    #[error("network error requesting {url}: {source}")]
    Transport {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The request params or response body could not be (de)serialized.
    #[error("malformed JSON in request or response: {source}")]
    Json {
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The configured endpoint is not a valid URL.
    #[error("invalid API endpoint: {endpoint}")]
    InvalidEndpoint {
        /// The rejected endpoint string.
        endpoint: String,
    },

    /// A required configuration field was not supplied.
    #[error("missing required configuration: {field}")]
    MissingConfiguration {
        /// Name of the missing field.
        field: &'static str,
    },
}

impl Error {
    /// Normalized error entries carried by this error, in response order.
    ///
    /// Empty for variants below the HTTP-status layer (transport, JSON,
    /// timeout, configuration).
    #[must_use]
    pub fn errors(&self) -> &[String] {
        match self {
            Self::BadRequest { errors }
            | Self::InvalidCredentials { errors }
            | Self::Forbidden { errors }
            | Self::NonExistentRecord { errors }
            | Self::InvalidDocument { errors }
            | Self::RequestEntityTooLarge { errors }
            | Self::UnexpectedHttp { errors, .. }
            | Self::Client { errors } => errors,
            _ => &[],
        }
    }

    /// Creates a 400 error from a response envelope.
    pub(crate) fn bad_request(envelope: &Value) -> Self {
        Self::BadRequest {
            errors: entries_from_envelope(envelope),
        }
    }

    /// Creates a 401 error from a response envelope.
    pub(crate) fn invalid_credentials(envelope: &Value) -> Self {
        Self::InvalidCredentials {
            errors: entries_from_envelope(envelope),
        }
    }

    /// Creates a 403 error from a response envelope.
    pub(crate) fn forbidden(envelope: &Value) -> Self {
        Self::Forbidden {
            errors: entries_from_envelope(envelope),
        }
    }

    /// Creates a 404 error from a response envelope.
    pub(crate) fn non_existent_record(envelope: &Value) -> Self {
        Self::NonExistentRecord {
            errors: entries_from_envelope(envelope),
        }
    }

    /// Creates a 413 error from a response envelope.
    pub(crate) fn request_entity_too_large(envelope: &Value) -> Self {
        Self::RequestEntityTooLarge {
            errors: entries_from_envelope(envelope),
        }
    }

    /// Creates the catch-all error for an unmapped status code.
    ///
    /// `reason` is the canonical status text; it substitutes for the
    /// body when the body carries no `"errors"` key, and when
    /// normalization yields no entries at all (e.g. an empty-array body),
    /// so the status is never dropped from the message.
    pub(crate) fn unexpected_http(status: u16, reason: &str, envelope: &Value) -> Self {
        let body_has_errors = matches!(envelope, Value::Object(map) if map.contains_key("errors"))
            || matches!(envelope, Value::Array(_) | Value::String(_));
        let mut entries = if body_has_errors {
            entries_from_envelope(envelope)
        } else {
            Vec::new()
        };
        if entries.is_empty() {
            entries = vec![reason.to_string()];
        }
        Self::UnexpectedHttp {
            status,
            errors: entries
                .into_iter()
                .map(|entry| format!("({status}) {entry}"))
                .collect(),
        }
    }

    /// Creates an invalid-document error with pre-normalized entries.
    pub(crate) fn invalid_document(errors: Vec<String>) -> Self {
        Self::InvalidDocument { errors }
    }

    /// Creates a generic client error with a single entry.
    pub(crate) fn client(entry: impl Into<String>) -> Self {
        Self::Client {
            errors: vec![entry.into()],
        }
    }

    /// Creates a generic client error from a self-reported error envelope.
    pub(crate) fn client_from_envelope(envelope: &Value) -> Self {
        Self::Client {
            errors: entries_from_envelope(envelope),
        }
    }

    /// Creates a timeout error.
    pub(crate) fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates a transport error from a reqwest error.
    pub(crate) fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}

/// Extracts the ordered error entries from a response envelope.
///
/// Array envelopes flatten one level: each element contributes its own
/// `"errors"` array, or itself when it is a bare string. An object uses
/// its `"errors"` value when present and is otherwise a single entry.
fn entries_from_envelope(envelope: &Value) -> Vec<String> {
    match envelope {
        Value::Array(elements) => elements.iter().flat_map(element_entries).collect(),
        other => element_entries(other),
    }
}

fn element_entries(element: &Value) -> Vec<String> {
    match element {
        Value::String(text) => vec![text.clone()],
        Value::Object(map) => match map.get("errors") {
            Some(Value::Array(errors)) => errors.iter().map(entry_text).collect(),
            Some(other) => vec![entry_text(other)],
            None => vec![entry_text(element)],
        },
        other => vec![entry_text(other)],
    }
}

/// Renders one entry: strings verbatim, anything else as compact JSON.
fn entry_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Renders the message for a list of entries.
///
/// One entry reads `Error: <entry>`; several read `Errors: ["a", "b"]`
/// with the response order preserved.
fn render_errors(errors: &[String]) -> String {
    match errors {
        [single] => format!("Error: {single}"),
        many => {
            let list = many
                .iter()
                .map(|entry| format!("{entry:?}"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Errors: [{list}]")
        }
    }
}
