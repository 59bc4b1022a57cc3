//! Core domain for the ReproLab API client.
//!
//! This crate contains the response envelope, the action payload records, the
//! endpoint catalogue, and the [`Transport`] port trait. Infrastructure crates
//! implement [`Transport`]; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Domain types + port definitions.** This crate has no I/O dependencies.
//! It defines *what* a request looks like; the `client` crate defines *how*
//! it reaches the Jupyter server.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`RequestId`) |
//! | [`types`] | Response envelope (`ApiResponse`, `ResponseStatus`) |
//! | [`payloads`] | Action payloads (`ExperimentData`, `ArchiveData`, etc.) |
//! | [`request`] | Endpoints, HTTP methods, and the outgoing [`ApiRequest`] |
//! | [`transport`] | The [`Transport`] port trait |
//! | [`errors`] | Error and retry-policy types |

pub mod errors;
pub mod identifiers;
pub mod payloads;
pub mod request;
pub mod transport;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{ApiError, RetryPolicy};
pub use identifiers::RequestId;
pub use payloads::{
    ArchiveData, EnvironmentAction, EnvironmentData, ExperimentAction, ExperimentData, ZenodoData,
};
pub use request::{ApiRequest, Endpoint, HttpMethod, API_NAMESPACE, JSON_CONTENT_TYPE};
pub use transport::Transport;
pub use types::{ApiResponse, ResponseStatus};
