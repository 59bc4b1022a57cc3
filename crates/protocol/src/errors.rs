//! Error and retry-policy types for the ReproLab API client.
//!
//! [`ApiError`] separates transport-level failures (connectivity, non-2xx
//! status, undecodable body) from application-level failures (a well-formed
//! envelope whose status is `"error"`). The dispatcher only ever produces the
//! former; application errors are returned as envelopes and become
//! [`ApiError::Application`] only when a caller opts in through
//! [`crate::ApiResponse::into_result`].
//!
//! [`RetryPolicy`] lets callers decide whether to re-issue a failed call. The
//! client itself never retries.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether an error condition is safe to retry and, if so, after what delay.
///
/// - `Retryable` errors: connection failures, timeouts, `429`, `502`, `503`, `504`.
/// - `NonRetryable` errors: every other status, undecodable responses, invalid
///   configuration, payload serialisation failures, error envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// The operation may be retried.
    Retryable {
        /// Minimum back-off before the next attempt, taken from a
        /// `Retry-After` response header. `None` means apply the caller's own
        /// back-off schedule.
        after: Option<Duration>,
    },
    /// The operation must not be retried.
    NonRetryable,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures surfaced by the API client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connection refused, DNS
    /// failure, timeout, reset).
    #[error("Request to {endpoint} failed: {message}")]
    Network { endpoint: String, message: String },

    /// The server answered with a non-2xx status.
    #[error("Request to {endpoint} returned HTTP {status}: {message}")]
    Status {
        endpoint: String,
        status: u16,
        /// The `message` field of a JSON error body, or the raw body text.
        message: String,
        /// Parsed `Retry-After` header, when the server sent one in seconds.
        retry_after: Option<Duration>,
    },

    /// The response body was not JSON, or was JSON but not an envelope.
    #[error("Invalid response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// The request payload could not be serialised as JSON.
    #[error("Could not serialise payload for {endpoint}: {message}")]
    Serialization { endpoint: String, message: String },

    /// The transport was configured with invalid settings.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The server returned an envelope with status `"error"`.
    #[error("Server reported an error: {message}")]
    Application { message: String },
}

impl ApiError {
    /// Classifies this error for callers that implement their own retry loop.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::Network { .. } => RetryPolicy::Retryable { after: None },
            Self::Status {
                status: 429 | 502 | 503 | 504,
                retry_after,
                ..
            } => RetryPolicy::Retryable {
                after: *retry_after,
            },
            _ => RetryPolicy::NonRetryable,
        }
    }

    /// The endpoint path the error relates to, where one applies.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Network { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Decode { endpoint, .. }
            | Self::Serialization { endpoint, .. } => Some(endpoint),
            Self::Configuration { .. } | Self::Application { .. } => None,
        }
    }
}
