use std::time::Duration;

use assert_matches::assert_matches;
use reqwest::Method;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_api::BackendClient;
use shared_config::AppConfig;
use shared_models::auth::Session;
use shared_models::error::AppError;

fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        backend_url: server.uri(),
        request_timeout: Duration::from_millis(500),
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn test_request_decodes_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/obras-sociales"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "nombre": "OSDE" }
        ])))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&config_for(&mock_server));
    let result: Value = client
        .request(Method::GET, "/api/obras-sociales", None, None)
        .await
        .unwrap();

    assert_eq!(result[0]["nombre"], "OSDE");
}

#[tokio::test]
async fn test_session_is_sent_as_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/obras-sociales"))
        .and(header("Authorization", "Bearer staff-token"))
        .and(body_json(json!({ "nombre": "Galeno" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 3, "nombre": "Galeno" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&config_for(&mock_server));
    let session = Session::new("staff-token");
    let created: Value = client
        .request(
            Method::POST,
            "/api/obras-sociales",
            Some(&session),
            Some(json!({ "nombre": "Galeno" })),
        )
        .await
        .unwrap();

    assert_eq!(created["id"], 3);
}

#[tokio::test]
async fn test_rejection_carries_backend_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Usuario o contraseña incorrectos"
        })))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&config_for(&mock_server));
    let result: Result<Value, AppError> = client
        .request(Method::POST, "/api/auth/login", None, Some(json!({})))
        .await;

    assert_matches!(
        result,
        Err(AppError::Rejected { status: 401, message: Some(ref msg) }) if msg == "Usuario o contraseña incorrectos"
    );
}

#[tokio::test]
async fn test_rejection_without_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/citas/7"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&config_for(&mock_server));
    let result = client
        .execute(Method::DELETE, "/api/citas/7", Some(&Session::new("t")), None)
        .await;

    assert_matches!(result, Err(AppError::Rejected { status: 500, message: None }));
}

#[tokio::test]
async fn test_execute_accepts_empty_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/citas/7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&config_for(&mock_server));
    let result = client
        .execute(Method::DELETE, "/api/citas/7", Some(&Session::new("t")), None)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/obras-sociales"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&config_for(&mock_server));
    let result: Result<Value, AppError> = client
        .request(Method::GET, "/api/obras-sociales", None, None)
        .await;

    assert_matches!(result, Err(AppError::Timeout(_)));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/citas"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(&config_for(&mock_server));
    let result: Result<Vec<Value>, AppError> = client
        .request(Method::GET, "/api/citas", Some(&Session::new("t")), None)
        .await;

    assert_matches!(result, Err(AppError::Decode(_)));
}
