use std::time::Duration;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use client::{ApiService, ServerConnection, ServerSettings};
use protocol::{
    ApiError, ArchiveData, EnvironmentAction, EnvironmentData, ResponseStatus, RetryPolicy,
    ZenodoData,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

// Helper to start a backend on an ephemeral port; returns its base URL.
async fn spawn_backend(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Value {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| Value::String(v.to_string()))
        .unwrap_or(Value::Null)
}

// Echoes what the server received inside a success envelope.
async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": "received",
        "data": {
            "body": body,
            "content_type": header_value(&headers, header::CONTENT_TYPE),
            "authorization": header_value(&headers, header::AUTHORIZATION),
        }
    }))
}

async fn status(headers: HeaderMap) -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": "ReproLab server extension is running",
        "data": { "authorization": header_value(&headers, header::AUTHORIZATION) }
    }))
}

fn api(base_url: String, token: Option<&str>) -> ApiService {
    let connection = ServerConnection::new(ServerSettings {
        base_url,
        token: token.map(str::to_string),
        timeout: Some(Duration::from_secs(5)),
    })
    .unwrap();
    ApiService::new(connection)
}

#[tokio::test]
async fn test_archive_body_and_headers_reach_server() {
    let app = Router::new().route("/reprolab/api/archive", post(echo));
    let base = spawn_backend(app).await;

    let response = api(base, Some("secret"))
        .create_archive(&ArchiveData {
            name: Some("exp1".to_string()),
            include_data: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(response.status, ResponseStatus::Success);
    let data = response.data.unwrap();
    assert_eq!(data["body"], json!({ "name": "exp1", "include_data": true }));
    assert_eq!(data["content_type"], "application/json");
    assert_eq!(data["authorization"], "token secret");
}

#[tokio::test]
async fn test_status_is_get_without_token() {
    let app = Router::new().route("/reprolab/api/status", get(status));
    let base = spawn_backend(app).await;

    let response = api(base, None).check_status().await.unwrap();

    assert!(response.is_success());
    assert_eq!(response.message, "ReproLab server extension is running");
    assert_eq!(response.data.unwrap()["authorization"], Value::Null);
}

#[tokio::test]
async fn test_base_path_is_preserved() {
    let app = Router::new().route("/user/ada/reprolab/api/environment", post(echo));
    let base = spawn_backend(app).await;

    let response = api(format!("{base}user/ada"), None)
        .perform_environment_action(&EnvironmentData {
            action: EnvironmentAction::CreateEnvironment,
            venv_name: Some("venv-exp1".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(
        response.data.unwrap()["body"],
        json!({ "action": "create_environment", "venv_name": "venv-exp1" })
    );
}

#[tokio::test]
async fn test_error_envelope_with_ok_status_is_returned() {
    async fn refuse() -> Json<Value> {
        Json(json!({ "status": "error", "message": "Not a git repository" }))
    }
    let app = Router::new().route("/reprolab/api/zenodo", post(refuse));
    let base = spawn_backend(app).await;

    let response = api(base, None)
        .create_zenodo_package(&ZenodoData::default())
        .await
        .unwrap();

    assert_eq!(response.status, ResponseStatus::Error);
    assert_eq!(response.message, "Not a git repository");
}

#[tokio::test]
async fn test_non_success_status_maps_to_status_error() {
    async fn missing() -> impl IntoResponse {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "status": "error", "message": "Experiment not found" })),
        )
    }
    let app = Router::new().route("/reprolab/api/experiment", post(missing));
    let base = spawn_backend(app).await;

    let err = api(base, None)
        .create_experiment(&Default::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            endpoint: "reprolab/api/experiment".to_string(),
            status: 404,
            message: "Experiment not found".to_string(),
            retry_after: None,
        }
    );
    assert_eq!(err.retry_policy(), RetryPolicy::NonRetryable);
}

#[tokio::test]
async fn test_unavailable_carries_retry_after() {
    async fn busy() -> impl IntoResponse {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::RETRY_AFTER, "3")],
            "packaging in progress",
        )
    }
    let app = Router::new().route("/reprolab/api/archive", post(busy));
    let base = spawn_backend(app).await;

    let err = api(base, None)
        .create_archive(&ArchiveData::default())
        .await
        .unwrap_err();

    assert_eq!(
        err.retry_policy(),
        RetryPolicy::Retryable {
            after: Some(Duration::from_secs(3))
        }
    );
    assert!(err.to_string().contains("packaging in progress"));
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    async fn garbage() -> &'static str {
        "<html>not json</html>"
    }
    let app = Router::new().route("/reprolab/api/status", get(garbage));
    let base = spawn_backend(app).await;

    let err = api(base, None).check_status().await.unwrap_err();

    assert!(matches!(
        err,
        ApiError::Decode { ref endpoint, .. } if endpoint == "reprolab/api/status"
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind then drop to obtain a port nothing is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = api(format!("http://{addr}/"), None)
        .check_status()
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Network { .. }), "{err:?}");
    assert_eq!(err.retry_policy(), RetryPolicy::Retryable { after: None });
}
