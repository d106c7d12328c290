use reqwest::Method;
use tracing::{debug, info};

use shared_api::BackendClient;
use shared_config::AppConfig;
use shared_models::auth::Session;
use shared_models::error::AppError;
use shared_models::obra_social::{ObraSocial, ObraSocialPayload};

use crate::models::ObraSocialForm;

pub const OBRAS_FALLBACK: &str = "No se pudo guardar la obra social";

pub struct ObraSocialService {
    backend: BackendClient,
}

impl ObraSocialService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    pub async fn list(&self, session: &Session) -> Result<Vec<ObraSocial>, AppError> {
        debug!("Fetching obras sociales for the panel");
        self.backend
            .request(Method::GET, "/api/obras-sociales", Some(session), None)
            .await
    }

    pub async fn create(&self, session: &Session, payload: &ObraSocialPayload) -> Result<(), AppError> {
        let body = serde_json::to_value(payload).map_err(|e| AppError::Internal(e.to_string()))?;
        self.backend
            .execute(Method::POST, "/api/obras-sociales", Some(session), Some(body))
            .await?;

        info!("Obra social {} created", payload.nombre);
        Ok(())
    }

    pub async fn update(&self, session: &Session, id: i64, payload: &ObraSocialPayload) -> Result<(), AppError> {
        let body = serde_json::to_value(payload).map_err(|e| AppError::Internal(e.to_string()))?;
        let path = format!("/api/obras-sociales/{}", id);
        self.backend
            .execute(Method::PUT, &path, Some(session), Some(body))
            .await?;

        info!("Obra social {} renamed to {}", id, payload.nombre);
        Ok(())
    }

    pub async fn delete(&self, session: &Session, id: i64) -> Result<(), AppError> {
        let path = format!("/api/obras-sociales/{}", id);
        self.backend
            .execute(Method::DELETE, &path, Some(session), None)
            .await?;

        info!("Obra social {} deleted", id);
        Ok(())
    }

    /// Creates or updates depending on whether the form carries an id.
    /// A blank name is refused before anything is sent.
    pub async fn save(&self, session: &Session, form: &ObraSocialForm) -> Result<(), AppError> {
        let payload = form.to_payload()?;
        match form.id {
            Some(id) => self.update(session, id, &payload).await,
            None => self.create(session, &payload).await,
        }
    }
}
