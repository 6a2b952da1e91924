//! Client library for the Swiftype App Search hosted search API.
//!
//! Manage search engines, index and retrieve documents, run single and
//! multi-query searches, fetch query suggestions, and adjust per-field
//! search settings. Every operation funnels through one request pipeline
//! that handles authentication, JSON serialization, timeouts, and typed
//! error mapping.
//!
//! # Architecture
//!
//! - [`client`] - the [`Client`], its builder, and the request pipeline
//! - [`error`] - the closed set of typed errors with normalized entries
//! - [`response`] - [`ResultResponse`], the enumerable envelope wrapper
//! - [`signed_key`] - signed search key construction
//! - [`utils`] - parameter-key normalization and timestamp rendering
//!
//! # Example
//!
//! ```no_run
//! use swiftype_app_search::{Client, Params};
//!
//! # async fn example() -> Result<(), swiftype_app_search::Error> {
//! let client = Client::new("host-c5s2mj", "api-mu75psc5egt9ppzuycnc2mc3")?;
//! let results = client.search("my-engine", "cat videos", Params::new()).await?;
//! println!("{results}");
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod response;
pub mod signed_key;
pub mod utils;

mod user_agent;

// Re-export commonly used types
pub use client::{
    Client, ClientBuilder, Method, Page, RequestDescriptor, SearchQuery, DEBUG_ENV_VAR,
    DEFAULT_TIMEOUT_SECS,
};
pub use error::Error;
pub use response::{ResultItem, ResultIter, ResultResponse};
pub use signed_key::create_signed_search_key;
pub use utils::{normalize_keys, stringify_keys, Params, Timestamp};
