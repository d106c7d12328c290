use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;
use shared_models::routes::INICIO_SESION_PATH;

use crate::handlers;

pub const LOGOUT_PATH: &str = "/panel-administrativo/cerrar-sesion";

pub fn auth_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            INICIO_SESION_PATH,
            get(handlers::login_page).post(handlers::submit_login),
        )
        .route(LOGOUT_PATH, post(handlers::logout))
        .with_state(state)
}
