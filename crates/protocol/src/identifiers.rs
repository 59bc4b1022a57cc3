//! Newtype identifiers.
//!
//! Every outgoing request carries a [`RequestId`] so the log lines emitted
//! before a call and the error emitted after a failure can be correlated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies a single dispatch through the API client.
///
/// Generated fresh for every request; recorded on the request span. It is
/// never sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a new random request identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a [`RequestId`] from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
