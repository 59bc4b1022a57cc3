//! Endpoint catalogue and the outgoing request value handed to a [`Transport`].
//!
//! [`ApiRequest::new`] owns the request-construction rules:
//!
//! - the path is always [`API_NAMESPACE`] + `/` + the endpoint name;
//! - every request carries `Content-Type: application/json`;
//! - a body is attached only when a payload is given **and** the method is
//!   [`HttpMethod::Post`].
//!
//! [`Transport`]: crate::Transport

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{ApiError, RequestId};

/// Path prefix under which the server extension registers its handlers.
pub const API_NAMESPACE: &str = "reprolab/api";

/// Value of the `Content-Type` header sent with every request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

const CONTENT_TYPE_HEADER: &str = "Content-Type";

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// A handler exposed by the server extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Liveness check for the server extension.
    Status,
    /// Experiment start/end tracking.
    Experiment,
    /// Virtual environment creation and dependency freezing.
    Environment,
    /// Archive packaging.
    Archive,
    /// Zenodo-ready packaging.
    Zenodo,
}

impl Endpoint {
    /// Every endpoint, in declaration order.
    pub const ALL: [Endpoint; 5] = [
        Self::Status,
        Self::Experiment,
        Self::Environment,
        Self::Archive,
        Self::Zenodo,
    ];

    /// Literal endpoint name as registered by the server.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Experiment => "experiment",
            Self::Environment => "environment",
            Self::Archive => "archive",
            Self::Zenodo => "zenodo",
        }
    }

    /// The HTTP method the server expects for this endpoint.
    pub fn method(self) -> HttpMethod {
        match self {
            Self::Status => HttpMethod::Get,
            Self::Experiment | Self::Environment | Self::Archive | Self::Zenodo => HttpMethod::Post,
        }
    }

    /// Namespaced request path, e.g. `reprolab/api/archive`.
    pub fn path(self) -> String {
        format!("{API_NAMESPACE}/{}", self.as_str())
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Methods
// ---------------------------------------------------------------------------

/// HTTP methods used by the API. Defaults to [`HttpMethod::Get`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A fully constructed request, ready for a transport to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Correlation identifier for logs. Not sent on the wire.
    pub request_id: RequestId,

    /// Path relative to the server base URL, without a leading `/`.
    pub path: String,

    pub method: HttpMethod,

    /// Header name to value. Ordered so log output is stable.
    pub headers: BTreeMap<String, String>,

    /// Serialised JSON body, if any.
    pub body: Option<String>,
}

impl ApiRequest {
    /// Builds the request for `endpoint`.
    ///
    /// `payload` is serialised only for POST requests; for GET it is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Serialization`] if the payload cannot be encoded
    /// as JSON (e.g. a map with non-string keys).
    pub fn new<P>(endpoint: Endpoint, method: HttpMethod, payload: Option<&P>) -> Result<Self, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let path = endpoint.path();

        let body = match (payload, method) {
            (Some(payload), HttpMethod::Post) => {
                Some(serde_json::to_string(payload).map_err(|e| ApiError::Serialization {
                    endpoint: path.clone(),
                    message: e.to_string(),
                })?)
            }
            _ => None,
        };

        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE_HEADER.to_string(), JSON_CONTENT_TYPE.to_string());

        Ok(Self {
            request_id: RequestId::new_random(),
            path,
            method,
            headers,
            body,
        })
    }
}
