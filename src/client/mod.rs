//! API client and the request pipeline behind every endpoint method.
//!
//! [`Client`] holds the immutable configuration (endpoint, API key,
//! timeouts, debug flag) and a reqwest client built once from it. Every
//! endpoint method funnels through [`Client::execute`], which builds the
//! request, sends it, parses the JSON body, and maps the HTTP status to a
//! typed result or error.

mod documents;
mod engines;
mod query_suggestion;
mod search;
mod search_settings;

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::error::Error;
use crate::user_agent;

pub use engines::Page;
pub use search::SearchQuery;

/// Default open-connection and overall timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 15.0;

/// Environment variable that turns on wire-level debug logging when it is
/// set to `true` (consulted only by [`ClientBuilder::debug_from_env`]).
pub const DEBUG_ENV_VAR: &str = "AS_DEBUG";

/// HTTP verbs the pipeline supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
}

impl Method {
    /// The verb as an uppercase wire token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The last request the pipeline constructed, kept for introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// HTTP verb.
    pub method: Method,
    /// Absolute request URL.
    pub url: String,
    /// Serialized JSON body, when one was sent.
    pub body: Option<String>,
}

/// Builder for [`Client`].
///
/// Either an explicit `endpoint` or a `host_identifier` (from which the
/// hosted endpoint is synthesized) is required, plus an `api_key`.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    endpoint: Option<String>,
    host_identifier: Option<String>,
    api_key: Option<String>,
    open_timeout: Option<f64>,
    overall_timeout: Option<f64>,
    debug: bool,
}

impl ClientBuilder {
    /// Sets an explicit API endpoint, overriding host synthesis.
    ///
    /// The path must end where relative request paths expect to append,
    /// e.g. `https://localhost:3002/api/as/v1/`. No slash normalization
    /// is performed.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the account host identifier used to synthesize the endpoint.
    #[must_use]
    pub fn host_identifier(mut self, host_identifier: impl Into<String>) -> Self {
        self.host_identifier = Some(host_identifier.into());
        self
    }

    /// Sets the API key sent as the bearer credential.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the connection-open timeout in seconds (default 15).
    #[must_use]
    pub fn open_timeout(mut self, seconds: f64) -> Self {
        self.open_timeout = Some(seconds);
        self
    }

    /// Sets the overall per-call timeout in seconds (default 15).
    ///
    /// Exceeding it fails the call with [`Error::Timeout`] regardless of
    /// partial progress.
    #[must_use]
    pub fn overall_timeout(mut self, seconds: f64) -> Self {
        self.overall_timeout = Some(seconds);
        self
    }

    /// Enables or disables wire-level debug logging.
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the debug flag from the `AS_DEBUG` environment variable.
    #[must_use]
    pub fn debug_from_env(self) -> Self {
        let enabled = std::env::var(DEBUG_ENV_VAR).is_ok_and(|value| value == "true");
        self.debug(enabled)
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfiguration`] when the API key or both
    /// endpoint sources are absent, [`Error::InvalidEndpoint`] when the
    /// resolved endpoint is not a valid URL, and [`Error::Transport`]
    /// when the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<Client, Error> {
        let api_key = self
            .api_key
            .ok_or(Error::MissingConfiguration { field: "api_key" })?;
        let endpoint = match (self.endpoint, self.host_identifier) {
            (Some(endpoint), _) => endpoint,
            (None, Some(host)) => format!("https://{host}.api.swiftype.com/api/as/v1/"),
            (None, None) => {
                return Err(Error::MissingConfiguration {
                    field: "endpoint or host_identifier",
                })
            }
        };
        Url::parse(&endpoint).map_err(|_| Error::InvalidEndpoint {
            endpoint: endpoint.clone(),
        })?;

        let open_timeout = self.open_timeout.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let overall_timeout = self.overall_timeout.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs_f64(open_timeout))
            .timeout(Duration::from_secs_f64(overall_timeout))
            .user_agent(user_agent::default_user_agent())
            .gzip(true)
            .build()
            .map_err(|error| Error::transport(endpoint.clone(), error))?;

        Ok(Client {
            http,
            endpoint,
            api_key,
            debug: self.debug,
            last_request: Arc::new(Mutex::new(None)),
        })
    }
}

/// Client for the hosted search API.
///
/// Construct once and reuse; cloning is cheap and clones share the
/// underlying connection pool. All configuration is immutable after
/// construction, so a client may be used from many tasks concurrently.
///
/// # Example
///
/// ```no_run
/// use swiftype_app_search::Client;
///
/// # async fn example() -> Result<(), swiftype_app_search::Error> {
/// let client = Client::new("host-c5s2mj", "api-mu75psc5egt9ppzuycnc2mc3")?;
/// let engines = client.list_engines(None).await?;
/// println!("{engines}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    debug: bool,
    last_request: Arc<Mutex<Option<RequestDescriptor>>>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // api_key stays out of Debug output.
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client for a hosted account with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`ClientBuilder::build`].
    pub fn new(host_identifier: &str, api_key: &str) -> Result<Self, Error> {
        Self::builder()
            .host_identifier(host_identifier)
            .api_key(api_key)
            .build()
    }

    /// Starts a [`ClientBuilder`].
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// The configured base endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The last request the pipeline constructed, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<RequestDescriptor> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn get<P: Serialize + ?Sized>(&self, path: &str, params: &P) -> Result<Value, Error> {
        self.execute(Method::Get, path, params).await
    }

    /// Sends a POST request.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn post<P: Serialize + ?Sized>(&self, path: &str, params: &P) -> Result<Value, Error> {
        self.execute(Method::Post, path, params).await
    }

    /// Sends a PUT request.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn put<P: Serialize + ?Sized>(&self, path: &str, params: &P) -> Result<Value, Error> {
        self.execute(Method::Put, path, params).await
    }

    /// Sends a PATCH request.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn patch<P: Serialize + ?Sized>(&self, path: &str, params: &P) -> Result<Value, Error> {
        self.execute(Method::Patch, path, params).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`execute`](Self::execute).
    pub async fn delete<P: Serialize + ?Sized>(&self, path: &str, params: &P) -> Result<Value, Error> {
        self.execute(Method::Delete, path, params).await
    }

    /// Constructs and sends one API request, returning the parsed body.
    ///
    /// `path` is appended to the configured endpoint as-is. `params`
    /// serializes into the JSON request body; an empty object or array
    /// (or `()`) sends no body. An empty response body parses to `{}`.
    ///
    /// # Errors
    ///
    /// - [`Error::Timeout`] when the overall timeout expires.
    /// - [`Error::Transport`] for network-level failures.
    /// - [`Error::Json`] when params or the response body are not valid JSON.
    /// - The status-mapped variants for non-2xx responses: 400
    ///   [`Error::BadRequest`], 401 [`Error::InvalidCredentials`], 403
    ///   [`Error::Forbidden`], 404 [`Error::NonExistentRecord`], 413
    ///   [`Error::RequestEntityTooLarge`], anything else
    ///   [`Error::UnexpectedHttp`].
    #[instrument(level = "debug", skip(self, params), fields(method = %method, path = %path))]
    pub async fn execute<P: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        params: &P,
    ) -> Result<Value, Error> {
        let url = format!("{}{}", self.endpoint, path);
        let params_value = serde_json::to_value(params)?;
        let body = render_body(&params_value)?;

        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(RequestDescriptor {
                method,
                url: url.clone(),
                body: body.clone(),
            });
        }
        if self.debug {
            debug!(
                method = %method,
                url = %url,
                body = body.as_deref().unwrap_or(""),
                "sending request"
            );
        }

        let mut request = self
            .http
            .request(method.as_reqwest(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header("X-Swiftype-Client", user_agent::CLIENT_NAME)
            .header("X-Swiftype-Client-Version", env!("CARGO_PKG_VERSION"));
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|error| classify_send_error(&url, error))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|error| classify_send_error(&url, error))?;

        if self.debug {
            debug!(status = status.as_u16(), body = %text, "received response");
        }

        let envelope = parse_body(&text)?;
        if status.is_success() {
            return Ok(envelope);
        }
        Err(match status.as_u16() {
            400 => Error::bad_request(&envelope),
            401 => Error::invalid_credentials(&envelope),
            403 => Error::forbidden(&envelope),
            404 => Error::non_existent_record(&envelope),
            413 => Error::request_entity_too_large(&envelope),
            code => Error::unexpected_http(
                code,
                status.canonical_reason().unwrap_or("Unknown"),
                &envelope,
            ),
        })
    }
}

/// Serializes params into a request body; empty params send no body.
fn render_body(params: &Value) -> Result<Option<String>, Error> {
    match params {
        Value::Null => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(None),
        Value::Array(items) if items.is_empty() => Ok(None),
        other => Ok(Some(serde_json::to_string(other)?)),
    }
}

/// Parses a response body; empty/whitespace bodies decode to `{}`.
fn parse_body(text: &str) -> Result<Value, Error> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Ok(Value::Object(serde_json::Map::new()))
    } else {
        Ok(serde_json::from_str(trimmed)?)
    }
}

fn classify_send_error(url: &str, error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::timeout(url)
    } else {
        Error::transport(url, error)
    }
}
