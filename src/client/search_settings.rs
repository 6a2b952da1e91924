//! Search settings endpoints: per-field weight and boost configuration.

use serde_json::{json, Value};

use crate::client::Client;
use crate::error::Error;

impl Client {
    /// Shows the weights and boosts applied to an engine's search fields.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn show_settings(&self, engine_name: &str) -> Result<Value, Error> {
        self.get(&format!("engines/{engine_name}/search_settings"), &json!({}))
            .await
    }

    /// Replaces the engine's search settings.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn update_settings(
        &self,
        engine_name: &str,
        settings: &Value,
    ) -> Result<Value, Error> {
        self.put(&format!("engines/{engine_name}/search_settings"), settings)
            .await
    }

    /// Resets the engine's search settings to their defaults.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn reset_settings(&self, engine_name: &str) -> Result<Value, Error> {
        self.post(
            &format!("engines/{engine_name}/search_settings/reset"),
            &json!({}),
        )
        .await
    }
}
