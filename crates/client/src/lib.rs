//! ReproLab API client.
//!
//! [`ApiService`] turns typed action payloads into requests against the
//! `reprolab/api` handlers of the Jupyter server extension and hands them to
//! an injected [`protocol::Transport`]. [`ServerConnection`] is the
//! production transport: an HTTP connection to a running Jupyter server.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Base URL resolution, token authentication, and HTTP
//! status mapping live in [`server`]. The dispatcher in [`service`] depends
//! only on the transport trait, so tests swap in an in-memory transport.
//!
//! ```no_run
//! use client::{ApiService, ServerConnection, ServerSettings};
//! use protocol::ArchiveData;
//!
//! # async fn run() -> Result<(), protocol::ApiError> {
//! let connection = ServerConnection::new(ServerSettings::default())?;
//! let api = ApiService::new(connection);
//!
//! let response = api
//!     .create_archive(&ArchiveData {
//!         name: Some("exp1".to_string()),
//!         include_data: Some(true),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{}", response.message);
//! # Ok(())
//! # }
//! ```

pub mod server;
pub mod service;

pub use server::{ServerConnection, ServerSettings, DEFAULT_BASE_URL};
pub use service::ApiService;
