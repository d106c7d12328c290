use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;
use shared_models::routes::{RESERVAR_CITA_PATH, RESERVAR_FECHA_PATH};

use crate::handlers;

/// Both public booking steps. No session is involved.
pub fn create_booking_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            RESERVAR_CITA_PATH,
            get(handlers::intake_page).post(handlers::submit_intake),
        )
        .route(
            RESERVAR_FECHA_PATH,
            get(handlers::date_page).post(handlers::confirm_booking),
        )
        .with_state(state)
}
