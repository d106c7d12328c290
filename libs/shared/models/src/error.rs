use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Shown for any failure to reach the backend at all.
pub const CONNECTION_MESSAGE: &str = "No se pudo conectar con el servidor";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Connection error: {0}")]
    Network(String),

    #[error("Backend did not answer in time: {0}")]
    Timeout(String),

    #[error("Backend rejected the request ({status})")]
    Rejected { status: u16, message: Option<String> },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Unexpected backend response: {0}")]
    Decode(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl AppError {
    /// Text shown inline next to the form that triggered the error.
    ///
    /// Rejections prefer the backend's own message and fall back to
    /// `fallback`; transport failures always read as a connection problem.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Network(_) | AppError::Timeout(_) => CONNECTION_MESSAGE.to_string(),
            AppError::Rejected { message: Some(msg), .. } if !msg.trim().is_empty() => msg.clone(),
            AppError::Rejected { .. } => fallback.to_string(),
            AppError::Auth(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Decode(_) | AppError::Internal(_) => fallback.to_string(),
        }
    }

    /// True when the backend refused the caller's credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AppError::Auth(_) | AppError::Rejected { status: 401 | 403, .. }
        )
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Network(_) | AppError::Timeout(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Network(_) | AppError::Decode(_) => StatusCode::BAD_GATEWAY,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Rejected { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!("Error: {}: {}", status, self);

        (status, self.user_message("Ocurrió un error inesperado")).into_response()
    }
}
