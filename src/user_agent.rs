//! Shared client-identification strings for outgoing requests.
//!
//! Single source for the client name and User-Agent format so every request
//! the library sends is attributable to one client/version pair.

/// Client name reported in the `X-Swiftype-Client` header.
pub(crate) const CLIENT_NAME: &str = "swiftype-app-search-rust";

/// Default User-Agent for API requests (identifies the library and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{CLIENT_NAME}/{version}")
}
