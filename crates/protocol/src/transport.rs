//! The transport port.
//!
//! A [`Transport`] performs the actual network call for an [`ApiRequest`] and
//! returns the parsed JSON body. Authentication, base URL resolution, and
//! timeouts are the transport's concern; the dispatcher never sees them.

use async_trait::async_trait;

use crate::{ApiError, ApiRequest};

/// Sends a request to the server extension and returns the parsed JSON body.
///
/// Implementations must:
///
/// - return [`ApiError::Network`] when no HTTP response was received;
/// - return [`ApiError::Status`] for any non-2xx response;
/// - return [`ApiError::Decode`] when a 2xx body is not valid JSON.
///
/// Implementations must not retry or inspect the envelope.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<serde_json::Value, ApiError>;
}
