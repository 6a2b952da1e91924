//! Engine management endpoints.
//!
//! Engines are the named search indexes managed by the service.

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::Client;
use crate::error::Error;
use crate::utils::Params;

/// Pagination window for listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    /// 1-based page number.
    pub current: u32,
    /// Page size.
    pub size: u32,
}

impl Client {
    /// Lists all engines, optionally paginated.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn list_engines(&self, page: Option<Page>) -> Result<Value, Error> {
        match page {
            Some(page) => self.get("engines", &json!({ "page": page })).await,
            None => self.get("engines", &json!({})).await,
        }
    }

    /// Retrieves one engine by name.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute);
    /// [`Error::NonExistentRecord`] when the engine does not exist.
    pub async fn get_engine(&self, engine_name: &str) -> Result<Value, Error> {
        self.get(&format!("engines/{engine_name}"), &json!({})).await
    }

    /// Creates an engine, optionally with an indexing language.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute);
    /// [`Error::BadRequest`] when the name is taken or invalid.
    pub async fn create_engine(
        &self,
        engine_name: &str,
        language: Option<&str>,
    ) -> Result<Value, Error> {
        let mut params = Params::new();
        params.insert("name".to_string(), json!(engine_name));
        if let Some(language) = language {
            params.insert("language".to_string(), json!(language));
        }
        self.post("engines", &params).await
    }

    /// Destroys an engine and everything in it.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn destroy_engine(&self, engine_name: &str) -> Result<Value, Error> {
        self.delete(&format!("engines/{engine_name}"), &json!({}))
            .await
    }
}
