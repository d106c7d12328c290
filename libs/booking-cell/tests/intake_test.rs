use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_cell::services::intake::{REGISTER_CONNECTION_MESSAGE, REGISTER_FALLBACK};
use booking_cell::{register_error_message, PatientForm, PatientIntakeService};
use shared_models::error::AppError;
use shared_models::routes::Route;
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

fn valid_form() -> PatientForm {
    PatientForm {
        nombre: "Juan".to_string(),
        apellido: "Pérez".to_string(),
        email: "juan.perez@email.com".to_string(),
        telefono: "+54 11 1234-5678".to_string(),
        obra_social_id: "1".to_string(),
    }
}

#[tokio::test]
async fn test_obras_sociales_are_listed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/obras-sociales"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::obras_sociales()))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend(mock_server.uri()).to_app_config();
    let obras = PatientIntakeService::new(&config).load_obras_sociales().await.unwrap();

    let nombres: Vec<&str> = obras.iter().map(|obra| obra.nombre.as_str()).collect();
    assert_eq!(nombres, vec!["OSDE", "Swiss Medical", "Galeno"]);
}

#[tokio::test]
async fn test_register_goes_to_date_step() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/pacientes"))
        .and(body_json(json!({
            "nombre": "Juan",
            "apellido": "Pérez",
            "email": "juan.perez@email.com",
            "telefono": "+54 11 1234-5678",
            "obraSocialId": 1
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(MockBackendResponses::paciente_created(57)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend(mock_server.uri()).to_app_config();
    let route = PatientIntakeService::new(&config).register(&valid_form()).await.unwrap();

    assert_eq!(route, Route::ReservarFecha { paciente_id: 57 });
}

#[tokio::test]
async fn test_invalid_form_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/pacientes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(MockBackendResponses::paciente_created(1)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut form = valid_form();
    form.email = "juan.perez".to_string();

    let config = TestConfig::with_backend(mock_server.uri()).to_app_config();
    let result = PatientIntakeService::new(&config).register(&form).await;

    assert_matches!(result, Err(AppError::Validation(_)));
}

#[tokio::test]
async fn test_backend_message_is_shown_on_rejection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/pacientes"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(MockBackendResponses::error_message("El email ya está registrado")),
        )
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend(mock_server.uri()).to_app_config();
    let error = PatientIntakeService::new(&config)
        .register(&valid_form())
        .await
        .unwrap_err();

    assert_eq!(register_error_message(&error), "El email ya está registrado");
}

#[tokio::test]
async fn test_rejection_without_message_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/pacientes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend(mock_server.uri()).to_app_config();
    let error = PatientIntakeService::new(&config)
        .register(&valid_form())
        .await
        .unwrap_err();

    assert_eq!(register_error_message(&error), REGISTER_FALLBACK);
}

#[tokio::test]
async fn test_unreachable_backend_reads_as_connection_error() {
    let config = TestConfig::with_backend("http://127.0.0.1:9").to_app_config();
    let error = PatientIntakeService::new(&config)
        .register(&valid_form())
        .await
        .unwrap_err();

    assert_eq!(register_error_message(&error), REGISTER_CONNECTION_MESSAGE);
}
