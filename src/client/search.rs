//! Search endpoints: single and multi-query.

use serde_json::{json, Value};

use crate::client::Client;
use crate::error::Error;
use crate::utils::{normalize_keys, Params};

/// One query/options pair for [`Client::multi_search`].
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Free-text query.
    pub query: String,
    /// Search options merged around the query (filters, pagination, ...).
    pub options: Params,
}

impl SearchQuery {
    /// A query with no extra options.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            options: Params::new(),
        }
    }

    /// A query with search options.
    #[must_use]
    pub fn with_options(query: impl Into<String>, options: Params) -> Self {
        Self {
            query: query.into(),
            options,
        }
    }
}

impl Client {
    /// Searches an engine.
    ///
    /// `options` are key-normalized and merged with the query; the
    /// `query` argument wins over any `query` key in the options.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn search(
        &self,
        engine_name: &str,
        query: &str,
        options: Params,
    ) -> Result<Value, Error> {
        let params = merge_query(query, options);
        self.post(&format!("engines/{engine_name}/search"), &params)
            .await
    }

    /// Runs several searches in one request.
    ///
    /// Issues exactly one HTTP call whose body carries a `queries` list
    /// with one merged element per input pair.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn multi_search(
        &self,
        engine_name: &str,
        queries: &[SearchQuery],
    ) -> Result<Value, Error> {
        let merged: Vec<Params> = queries
            .iter()
            .map(|search| merge_query(&search.query, search.options.clone()))
            .collect();
        self.post(
            &format!("engines/{engine_name}/multi_search"),
            &json!({ "queries": merged }),
        )
        .await
    }
}

/// Normalizes option keys and merges the query on top.
pub(crate) fn merge_query(query: &str, options: Params) -> Params {
    let mut params = normalize_keys(options);
    params.insert("query".to_string(), Value::String(query.to_string()));
    params
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_query_inserts_query() {
        let merged = merge_query("cat videos", Params::new());
        assert_eq!(merged.get("query"), Some(&json!("cat videos")));
    }

    #[test]
    fn test_merge_query_normalizes_option_keys() {
        let mut options = Params::new();
        options.insert(":page".to_string(), json!({"size": 5}));
        let merged = merge_query("cats", options);
        assert_eq!(merged.get("page"), Some(&json!({"size": 5})));
        assert!(!merged.contains_key(":page"));
    }

    #[test]
    fn test_merge_query_argument_wins_over_options() {
        let mut options = Params::new();
        options.insert("query".to_string(), json!("stale"));
        let merged = merge_query("fresh", options);
        assert_eq!(merged.get("query"), Some(&json!("fresh")));
    }
}
