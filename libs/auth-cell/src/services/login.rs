use reqwest::Method;
use tracing::{debug, info, warn};

use shared_api::BackendClient;
use shared_config::AppConfig;
use shared_models::auth::{LoginResponse, Session};
use shared_models::error::AppError;

use crate::models::LoginForm;

pub const LOGIN_FALLBACK: &str = "Error al iniciar sesión";

pub struct LoginService {
    backend: BackendClient,
}

impl LoginService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    /// Exchanges staff credentials for a `Session`.
    pub async fn login(&self, form: &LoginForm) -> Result<Session, AppError> {
        let request = form.to_request()?;
        debug!("Logging in staff user {}", request.usuario);

        let body = serde_json::to_value(&request).map_err(|e| AppError::Internal(e.to_string()))?;
        let response: LoginResponse = self
            .backend
            .request(Method::POST, "/api/auth/login", None, Some(body))
            .await
            .map_err(|e| {
                warn!("Login failed for {}: {}", request.usuario, e);
                e
            })?;

        if response.token.trim().is_empty() {
            return Err(AppError::Decode("login response without token".to_string()));
        }

        info!("Staff user {} logged in", request.usuario);
        Ok(Session::new(response.token))
    }
}

pub fn login_error_message(error: &AppError) -> String {
    error.user_message(LOGIN_FALLBACK)
}
