//! Request dispatcher and operation wrappers.

use std::sync::Arc;

use protocol::{
    ApiError, ApiRequest, ApiResponse, ArchiveData, Endpoint, EnvironmentData, ExperimentData,
    HttpMethod, Transport, ZenodoData,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, debug_span, error, Instrument};

/// Client for the ReproLab server extension.
///
/// Cheap to clone; clones share the same transport.
#[derive(Clone)]
pub struct ApiService {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiService").finish_non_exhaustive()
    }
}

impl ApiService {
    /// Creates a client that sends every request through `transport`.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Creates a client around an already shared transport.
    pub fn with_shared_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Dispatches one request and decodes the envelope.
    ///
    /// The body is attached only for [`HttpMethod::Post`] with `data` present.
    /// Error envelopes are returned as `Ok`; only transport, serialisation, and
    /// decode failures are `Err`. Failures are logged, then returned as-is.
    pub async fn make_request<T, P>(
        &self,
        endpoint: Endpoint,
        method: HttpMethod,
        data: Option<&P>,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize + Sync + ?Sized,
    {
        let request = ApiRequest::new(endpoint, method, data).inspect_err(|err| {
            error!(endpoint = %endpoint.path(), error = %err, "API request failed");
        })?;

        let path = request.path.clone();
        let span = debug_span!("reprolab_api", request_id = %request.request_id, path = %path);

        let result = async {
            debug!(method = %request.method, "Making request");
            debug!(headers = ?request.headers, "Request headers");

            let body = self.transport.send(request).await?;
            serde_json::from_value::<ApiResponse<T>>(body).map_err(|e| ApiError::Decode {
                endpoint: path.clone(),
                message: e.to_string(),
            })
        }
        .instrument(span)
        .await;

        if let Err(err) = &result {
            error!(endpoint = %path, error = %err, "API request failed");
        }
        result
    }

    /// Checks whether the server extension is running.
    pub async fn check_status(&self) -> Result<ApiResponse, ApiError> {
        self.make_request::<_, ()>(Endpoint::Status, HttpMethod::default(), None)
            .await
    }

    /// Starts or ends an experiment.
    pub async fn create_experiment(&self, data: &ExperimentData) -> Result<ApiResponse, ApiError> {
        self.make_request(Endpoint::Experiment, HttpMethod::Post, Some(data))
            .await
    }

    /// Creates a virtual environment or freezes its dependencies.
    pub async fn perform_environment_action(
        &self,
        data: &EnvironmentData,
    ) -> Result<ApiResponse, ApiError> {
        self.make_request(Endpoint::Environment, HttpMethod::Post, Some(data))
            .await
    }

    /// Creates an archive package.
    pub async fn create_archive(&self, data: &ArchiveData) -> Result<ApiResponse, ApiError> {
        self.make_request(Endpoint::Archive, HttpMethod::Post, Some(data))
            .await
    }

    /// Creates a Zenodo-ready package.
    pub async fn create_zenodo_package(&self, data: &ZenodoData) -> Result<ApiResponse, ApiError> {
        self.make_request(Endpoint::Zenodo, HttpMethod::Post, Some(data))
            .await
    }
}
