use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::json;
use tower::util::ServiceExt;
use wiremock::matchers::{body_json, header as header_matcher, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use admin_cell::admin_routes;
use shared_utils::test_utils::{body_to_string, MockBackendResponses, TestConfig};

const COOKIE: &str = "consultorio_sesion=staff-token";

fn app(server: &MockServer) -> Router {
    let config = TestConfig::with_backend(server.uri()).to_app_config();
    admin_routes(Arc::new(config))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, COOKIE)
        .body(Body::empty())
        .unwrap()
}

fn post(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, COOKIE)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

async fn mount_lists(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/citas"))
        .and(header_matcher("Authorization", "Bearer staff-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::citas(Utc::now().date_naive())))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/obras-sociales"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::obras_sociales()))
        .mount(server)
        .await;
}

fn assert_redirect(response: &axum::response::Response, location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], location);
}

#[tokio::test]
async fn test_panel_without_session_goes_to_login() {
    let mock_server = MockServer::start().await;

    let response = app(&mock_server)
        .oneshot(Request::builder().uri("/panel-administrativo").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_redirect(&response, "/inicio-sesion-area-medica");
}

#[tokio::test]
async fn test_panel_lists_citas_with_metrics() {
    let mock_server = MockServer::start().await;
    mount_lists(&mock_server).await;

    let response = app(&mock_server).oneshot(get("/panel-administrativo")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_string(response.into_body()).await;
    assert!(body.contains("Total de citas <strong>3</strong>"));
    assert!(body.contains("Solicitadas <strong>1</strong>"));
    assert!(body.contains("Hoy <strong>1</strong>"));
    assert!(body.contains("Juan Pérez"));
    assert!(body.contains("/panel-administrativo/citas/2/confirmar"));
    // Confirmed citas offer no confirm action.
    assert!(!body.contains("/panel-administrativo/citas/1/confirmar"));
}

#[tokio::test]
async fn test_panel_filters_by_state_and_search() {
    let mock_server = MockServer::start().await;
    mount_lists(&mock_server).await;

    let response = app(&mock_server)
        .oneshot(get("/panel-administrativo?tab=citas&estado=CONFIRMADA&q=carlos"))
        .await
        .unwrap();

    let body = body_to_string(response.into_body()).await;
    assert!(body.contains("Carlos Gómez"));
    assert!(!body.contains("Juan Pérez"));
    assert!(!body.contains("María López"));
    // Metrics always cover every cita.
    assert!(body.contains("Total de citas <strong>3</strong>"));
}

#[tokio::test]
async fn test_refused_session_goes_to_login() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/citas"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/obras-sociales"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::obras_sociales()))
        .mount(&mock_server)
        .await;

    let response = app(&mock_server).oneshot(get("/panel-administrativo")).await.unwrap();

    assert_redirect(&response, "/inicio-sesion-area-medica");
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_confirm_returns_to_citas_tab() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/citas/2/confirmar"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = app(&mock_server)
        .oneshot(post("/panel-administrativo/citas/2/confirmar", ""))
        .await
        .unwrap();

    assert_redirect(&response, "/panel-administrativo?tab=citas");
}

#[tokio::test]
async fn test_failed_delete_shows_reason() {
    let mock_server = MockServer::start().await;
    mount_lists(&mock_server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/citas/3"))
        .respond_with(ResponseTemplate::new(409).set_body_json(MockBackendResponses::error_message("La cita ya fue atendida")))
        .mount(&mock_server)
        .await;

    let response = app(&mock_server)
        .oneshot(post("/panel-administrativo/citas/3/eliminar", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_string(response.into_body()).await;
    assert!(body.contains("La cita ya fue atendida"));
}

#[tokio::test]
async fn test_edit_link_fills_the_form() {
    let mock_server = MockServer::start().await;
    mount_lists(&mock_server).await;

    let response = app(&mock_server)
        .oneshot(get("/panel-administrativo?tab=obras&editar=3"))
        .await
        .unwrap();

    let body = body_to_string(response.into_body()).await;
    assert!(body.contains("Editar Obra Social"));
    assert!(body.contains("name=\"nombre\" value=\"Galeno\""));
    assert!(body.contains("Cancelar"));
}

#[tokio::test]
async fn test_saving_an_edited_obra_social_updates_it() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/obras-sociales/3"))
        .and(body_json(json!({ "nombre": "Galeno Oro" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = app(&mock_server)
        .oneshot(post("/panel-administrativo/obras-sociales", "id=3&nombre=Galeno+Oro"))
        .await
        .unwrap();

    assert_redirect(&response, "/panel-administrativo?tab=obras");
}

#[tokio::test]
async fn test_blank_obra_social_name_keeps_the_form() {
    let mock_server = MockServer::start().await;
    mount_lists(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/api/obras-sociales"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let response = app(&mock_server)
        .oneshot(post("/panel-administrativo/obras-sociales", "id=&nombre=+++"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_string(response.into_body()).await;
    assert!(body.contains("Ingrese el nombre de la obra social"));
    assert!(body.contains("Nueva Obra Social"));
}
