//! Enumerable wrapper over a decoded response envelope.
//!
//! Paginated endpoints answer with `{"results": [...], "meta": {...}}`;
//! everything else answers with a plain object or array. [`ResultResponse`]
//! gives both shapes one iteration surface while keeping the raw envelope
//! reachable for arbitrary field access.

use std::sync::OnceLock;

use serde_json::{Map, Value};

use crate::error::Error;

/// A decoded response envelope with `results`/`meta` conveniences.
///
/// Construction fails when the envelope is an object carrying an
/// `"errors"` key: errors and results are mutually exclusive shapes, and
/// the errors check runs before anything touches `results`.
#[derive(Debug)]
pub struct ResultResponse {
    raw: Value,
    meta: OnceLock<Map<String, Value>>,
}

/// One item yielded when iterating a [`ResultResponse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultItem<'a> {
    /// An element of the `results` list (or of a bare array envelope).
    Result(&'a Value),
    /// A key/value entry of an object envelope without `results`.
    Entry(&'a str, &'a Value),
}

impl ResultResponse {
    /// Wraps a decoded envelope.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] when the envelope is an object with an
    /// `"errors"` key, carrying the normalized error entries.
    pub fn new(raw: Value) -> Result<Self, Error> {
        if matches!(&raw, Value::Object(map) if map.contains_key("errors")) {
            return Err(Error::client_from_envelope(&raw));
        }
        Ok(Self {
            raw,
            meta: OnceLock::new(),
        })
    }

    /// The `"results"` value, when the envelope has one.
    #[must_use]
    pub fn results(&self) -> Option<&Value> {
        match &self.raw {
            Value::Object(map) => map.get("results"),
            _ => None,
        }
    }

    /// The `"meta"` object, or an empty map when absent.
    ///
    /// Computed once per instance; repeated calls return the same map.
    #[must_use]
    pub fn meta(&self) -> &Map<String, Value> {
        self.meta.get_or_init(|| match &self.raw {
            Value::Object(map) => match map.get("meta") {
                Some(Value::Object(meta)) => meta.clone(),
                _ => Map::new(),
            },
            _ => Map::new(),
        })
    }

    /// The raw decoded envelope.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Consumes the wrapper, returning the raw envelope.
    #[must_use]
    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// Iterates `results` when present, else the envelope's own entries.
    ///
    /// An array of results yields its elements; an object of results
    /// (the query-suggestion shape) yields its key/value entries.
    #[must_use]
    pub fn iter(&self) -> ResultIter<'_> {
        let inner = match self.results() {
            Some(Value::Array(items)) => ResultIterInner::Results(items.iter()),
            Some(Value::Object(map)) => ResultIterInner::Entries(map.iter()),
            Some(single) => ResultIterInner::Single(Some(single)),
            None => match &self.raw {
                Value::Object(map) => ResultIterInner::Entries(map.iter()),
                Value::Array(items) => ResultIterInner::Results(items.iter()),
                _ => ResultIterInner::Single(None),
            },
        };
        ResultIter { inner }
    }
}

impl<'a> IntoIterator for &'a ResultResponse {
    type Item = ResultItem<'a>;
    type IntoIter = ResultIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`ResultResponse`].
pub struct ResultIter<'a> {
    inner: ResultIterInner<'a>,
}

enum ResultIterInner<'a> {
    Results(std::slice::Iter<'a, Value>),
    Entries(serde_json::map::Iter<'a>),
    Single(Option<&'a Value>),
}

impl<'a> Iterator for ResultIter<'a> {
    type Item = ResultItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            ResultIterInner::Results(items) => items.next().map(ResultItem::Result),
            ResultIterInner::Entries(entries) => entries
                .next()
                .map(|(key, value)| ResultItem::Entry(key, value)),
            ResultIterInner::Single(value) => value.take().map(ResultItem::Result),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_iterates_results_when_present() {
        let response = ResultResponse::new(json!({
            "results": [{"id": "id-01"}]
        }))
        .unwrap();

        let ids: Vec<&str> = response
            .iter()
            .map(|item| match item {
                ResultItem::Result(value) => value["id"].as_str().unwrap(),
                ResultItem::Entry(..) => panic!("expected result items"),
            })
            .collect();
        assert_eq!(ids, ["id-01"]);
    }

    #[test]
    fn test_iterates_own_entries_without_results() {
        let response = ResultResponse::new(json!({
            "id": "engine-01",
            "name": "new-engine"
        }))
        .unwrap();

        let entries: Vec<(&str, &Value)> = response
            .iter()
            .map(|item| match item {
                ResultItem::Entry(key, value) => (key, value),
                ResultItem::Result(_) => panic!("expected entry items"),
            })
            .collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ("id", &json!("engine-01")));
        assert_eq!(entries[1], ("name", &json!("new-engine")));
    }

    #[test]
    fn test_iterates_object_results_as_entries() {
        // Query-suggestion responses nest results in an object.
        let response = ResultResponse::new(json!({
            "results": {"documents": [{"suggestion": "cat"}]},
            "meta": {}
        }))
        .unwrap();

        let entries: Vec<(&str, &Value)> = response
            .iter()
            .map(|item| match item {
                ResultItem::Entry(key, value) => (key, value),
                ResultItem::Result(_) => panic!("object results must yield entries"),
            })
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "documents");
        assert_eq!(entries[0].1, &json!([{"suggestion": "cat"}]));
    }

    #[test]
    fn test_iterates_array_envelope_elements() {
        let response = ResultResponse::new(json!([{"id": "a"}, {"id": "b"}])).unwrap();
        assert_eq!(response.iter().count(), 2);
        assert!(response.results().is_none());
    }

    #[test]
    fn test_construction_fails_on_error_envelope() {
        let result = ResultResponse::new(json!({"errors": ["engine exhausted"]}));
        match result {
            Err(Error::Client { errors }) => assert_eq!(errors, ["engine exhausted"]),
            other => panic!("expected Client error, got: {other:?}"),
        }
    }

    #[test]
    fn test_errors_check_precedes_results_extraction() {
        // Both keys present: the envelope is still a failure.
        let result = ResultResponse::new(json!({
            "errors": ["bad page"],
            "results": [{"id": "id-01"}]
        }));
        assert!(result.is_err(), "errors key must win over results");
    }

    #[test]
    fn test_meta_returns_value_when_present() {
        let response = ResultResponse::new(json!({
            "meta": {"page": {"current": 1}}
        }))
        .unwrap();
        assert!(response.meta().contains_key("page"));
    }

    #[test]
    fn test_meta_defaults_to_empty_map_and_is_memoized() {
        let response = ResultResponse::new(json!({"name": "engine-name"})).unwrap();
        let first = response.meta() as *const Map<String, Value>;
        assert!(response.meta().is_empty());
        let second = response.meta() as *const Map<String, Value>;
        assert_eq!(first, second, "meta must be computed at most once");
    }

    #[test]
    fn test_results_absent_yields_none() {
        let response = ResultResponse::new(json!({"id": "x"})).unwrap();
        assert!(response.results().is_none());
    }

    #[test]
    fn test_raw_preserves_envelope() {
        let envelope = json!({"results": [], "meta": {}});
        let response = ResultResponse::new(envelope.clone()).unwrap();
        assert_eq!(response.raw(), &envelope);
        assert_eq!(response.into_raw(), envelope);
    }
}
