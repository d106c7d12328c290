use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;
use shared_models::routes::PANEL_PATH;

use crate::handlers;

/// Staff panel. Every handler reads the session cookie itself and sends
/// the browser to the login page when it is missing or refused.
pub fn admin_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(PANEL_PATH, get(handlers::panel_page))
        // Citas
        .route(
            &format!("{}/citas/{{id}}/confirmar", PANEL_PATH),
            post(handlers::confirm_cita),
        )
        .route(
            &format!("{}/citas/{{id}}/eliminar", PANEL_PATH),
            post(handlers::delete_cita),
        )
        // Obras sociales
        .route(
            &format!("{}/obras-sociales", PANEL_PATH),
            post(handlers::save_obra_social),
        )
        .route(
            &format!("{}/obras-sociales/{{id}}/eliminar", PANEL_PATH),
            post(handlers::delete_obra_social),
        )
        .with_state(state)
}
