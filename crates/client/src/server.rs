//! HTTP transport to a running Jupyter server.
//!
//! The server extension registers its handlers relative to the Jupyter base
//! URL, so a request for `reprolab/api/status` against a server at
//! `http://localhost:8888/lab-base/` goes to
//! `http://localhost:8888/lab-base/reprolab/api/status`.
//!
//! When a token is configured it is sent as `Authorization: token <token>`,
//! the scheme Jupyter servers accept for API clients.

use std::time::Duration;

use async_trait::async_trait;
use protocol::{ApiError, ApiRequest, HttpMethod, Transport};
use reqwest::header::{HeaderMap, AUTHORIZATION, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode, Url};
use tracing::{debug, warn};

/// Base URL of a Jupyter server started with default options.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8888/";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Connection settings for [`ServerConnection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Absolute `http`/`https` URL of the Jupyter server, including any base path.
    pub base_url: String,

    /// Jupyter server token. `None` for servers running without auth.
    pub token: Option<String>,

    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

/// [`Transport`] implementation over `reqwest`.
#[derive(Debug, Clone)]
pub struct ServerConnection {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ServerConnection {
    /// Validates `settings` and builds the underlying HTTP client.
    ///
    /// # Errors
    ///
    /// [`ApiError::Configuration`] if the base URL is not an absolute
    /// `http`/`https` URL or the HTTP client cannot be constructed.
    pub fn new(settings: ServerSettings) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&settings.base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ApiError::Configuration {
            message: format!("could not build HTTP client: {e}"),
        })?;

        Ok(Self {
            client,
            base_url,
            token: settings.token.filter(|t| !t.is_empty()),
        })
    }

    /// The normalised base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a request path against the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Configuration {
                message: format!("invalid request path '{path}': {e}"),
            })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(raw).map_err(|e| ApiError::Configuration {
        message: format!("invalid server URL '{raw}': {e}"),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::Configuration {
            message: format!("server URL '{raw}' must use http or https"),
        });
    }

    // Url::join replaces the last segment unless the base ends with '/'.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
    }
}

/// Seconds-form `Retry-After`. HTTP-date values are ignored.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Picks the most useful message out of an error response body.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(serde_json::Value::String(message)) = fields.get("message") {
            return message.clone();
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("unknown status")
        .to_string()
}

#[async_trait]
impl Transport for ServerConnection {
    async fn send(&self, request: ApiRequest) -> Result<serde_json::Value, ApiError> {
        let url = self.url_for(&request.path)?;
        let endpoint = request.path;

        let mut builder = self.client.request(to_reqwest_method(request.method), url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("token {token}"));
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        debug!(%url, "Sending request to Jupyter server");

        let response = builder.send().await.map_err(|e| ApiError::Network {
            endpoint: endpoint.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        let retry_after = retry_after(response.headers());
        let text = response.text().await.map_err(|e| ApiError::Network {
            endpoint: endpoint.clone(),
            message: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Jupyter server rejected request");
            return Err(ApiError::Status {
                message: error_message(status, &text),
                endpoint,
                status: status.as_u16(),
                retry_after,
            });
        }

        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            endpoint,
            message: e.to_string(),
        })
    }
}
