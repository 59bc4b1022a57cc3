//! The uniform response envelope returned by every ReproLab endpoint.
//!
//! The server answers every call with the same shape:
//!
//! ```json
//! { "status": "success" | "error", "message": "...", "data": { ... }, "path": "..." }
//! ```
//!
//! `data` and `path` are optional. `data` is only meaningful when the status
//! is [`ResponseStatus::Success`].

use serde::{Deserialize, Serialize};

use crate::ApiError;

// ---------------------------------------------------------------------------
// Status tag
// ---------------------------------------------------------------------------

/// Outcome tag of an [`ApiResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The server performed the requested action.
    Success,
    /// The server understood the request but the action failed.
    Error,
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Response envelope, generic over the payload type.
///
/// The default payload type is [`serde_json::Value`], which is what the
/// operation wrappers in the `client` crate return. Callers that know the
/// shape of `data` can ask the dispatcher for a concrete `T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = serde_json::Value> {
    /// Outcome of the call.
    pub status: ResponseStatus,

    /// Human-readable message from the server. Empty if the server sent none.
    #[serde(default)]
    pub message: String,

    /// Endpoint-specific payload.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// File-system path of an artefact the server produced (e.g. an archive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Returns `true` if the server reported success.
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    /// Converts an error envelope into [`ApiError::Application`].
    ///
    /// Success envelopes are returned unchanged.
    pub fn into_result(self) -> Result<Self, ApiError> {
        match self.status {
            ResponseStatus::Success => Ok(self),
            ResponseStatus::Error => Err(ApiError::Application {
                message: self.message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_envelope_keeps_data_and_path() {
        let body = json!({
            "status": "success",
            "message": "Archive created",
            "data": { "files": 3 },
            "path": "archives/exp1.zip"
        });

        let response: ApiResponse = serde_json::from_value(body).unwrap();

        assert!(response.is_success());
        assert_eq!(response.message, "Archive created");
        assert_eq!(response.data, Some(json!({ "files": 3 })));
        assert_eq!(response.path.as_deref(), Some("archives/exp1.zip"));
    }

    #[test]
    fn error_envelope_without_optional_fields() {
        let body = json!({ "status": "error", "message": "No notebook open" });

        let response: ApiResponse = serde_json::from_value(body).unwrap();

        assert!(!response.is_success());
        assert_eq!(response.data, None);
        assert_eq!(response.path, None);
    }

    #[test]
    fn missing_message_defaults_to_empty() {
        let response: ApiResponse = serde_json::from_value(json!({ "status": "success" })).unwrap();
        assert_eq!(response.message, "");
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = serde_json::from_value::<ApiResponse>(json!({ "status": "pending" }));
        assert!(result.is_err());
    }

    #[test]
    fn typed_payload_decodes() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Frozen {
            packages: Vec<String>,
        }

        let body = json!({
            "status": "success",
            "message": "",
            "data": { "packages": ["numpy==2.0.0"] }
        });

        let response: ApiResponse<Frozen> = serde_json::from_value(body).unwrap();

        assert_eq!(
            response.data,
            Some(Frozen {
                packages: vec!["numpy==2.0.0".to_string()]
            })
        );
    }

    #[test]
    fn serialisation_omits_absent_fields() {
        let response: ApiResponse = ApiResponse {
            status: ResponseStatus::Success,
            message: "ok".to_string(),
            data: None,
            path: None,
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "status": "success", "message": "ok" })
        );
    }

    #[test]
    fn into_result_maps_error_envelope() {
        let response: ApiResponse = serde_json::from_value(json!({
            "status": "error",
            "message": "Git tag already exists"
        }))
        .unwrap();

        assert_eq!(
            response.into_result(),
            Err(ApiError::Application {
                message: "Git tag already exists".to_string()
            })
        );
    }

    #[test]
    fn into_result_passes_success_through() {
        let response: ApiResponse =
            serde_json::from_value(json!({ "status": "success", "message": "ok" })).unwrap();
        assert_eq!(response.clone().into_result(), Ok(response));
    }
}
