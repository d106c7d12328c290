use reqwest::Method;
use tracing::{debug, warn};

use shared_api::BackendClient;
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_models::obra_social::ObraSocial;
use shared_models::routes::Route;

use crate::models::{PacienteCreated, PatientForm};

pub const REGISTER_FALLBACK: &str = "No se pudo registrar al paciente";
pub const REGISTER_CONNECTION_MESSAGE: &str = "Error de conexión con el servidor";
pub const OBRAS_FALLBACK: &str = "No se pudieron cargar las obras sociales";

/// First booking step: who the patient is and which obra social covers them.
pub struct PatientIntakeService {
    backend: BackendClient,
}

impl PatientIntakeService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    /// Options for the obra social selector. Public endpoint.
    pub async fn load_obras_sociales(&self) -> Result<Vec<ObraSocial>, AppError> {
        debug!("Loading obras sociales");

        let obras: Vec<ObraSocial> = self
            .backend
            .request(Method::GET, "/api/obras-sociales", None, None)
            .await?;

        debug!("Loaded {} obras sociales", obras.len());
        Ok(obras)
    }

    /// Registers the patient and returns the date-selection step for them.
    /// An invalid form is rejected before anything is sent.
    pub async fn register(&self, form: &PatientForm) -> Result<Route, AppError> {
        let payload = form.to_payload()?;
        debug!("Registering patient {}", payload.email);

        let body = serde_json::to_value(&payload).map_err(|e| AppError::Internal(e.to_string()))?;
        let created: PacienteCreated = self
            .backend
            .request(Method::POST, "/api/pacientes", None, Some(body))
            .await
            .map_err(|e| {
                warn!("Patient registration failed: {}", e);
                e
            })?;

        debug!("Patient registered with ID: {}", created.id);
        Ok(Route::ReservarFecha {
            paciente_id: created.id,
        })
    }
}

/// Inline message for a failed registration.
pub fn register_error_message(error: &AppError) -> String {
    if error.is_transport() {
        REGISTER_CONNECTION_MESSAGE.to_string()
    } else {
        error.user_message(REGISTER_FALLBACK)
    }
}
