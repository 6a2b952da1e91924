//! Query suggestion endpoint.

use serde_json::Value;

use crate::client::search::merge_query;
use crate::client::Client;
use crate::error::Error;
use crate::utils::Params;

impl Client {
    /// Requests query suggestions for a partial query.
    ///
    /// Same parameter shape as [`search`](Self::search), different
    /// endpoint; `options` typically restricts suggestion fields and size.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn query_suggestion(
        &self,
        engine_name: &str,
        query: &str,
        options: Params,
    ) -> Result<Value, Error> {
        let params = merge_query(query, options);
        self.post(&format!("engines/{engine_name}/query_suggestion"), &params)
            .await
    }
}
