use std::sync::Arc;

use axum::{routing::get, Router};

use admin_cell::admin_routes;
use auth_cell::auth_routes;
use booking_cell::create_booking_router;
use shared_config::AppConfig;
use shared_models::routes::HOME_PATH;

use crate::home;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(HOME_PATH, get(home::home_page))
        .merge(create_booking_router(state.clone()))
        .merge(auth_routes(state.clone()))
        .merge(admin_routes(state))
        .fallback(home::not_found)
}
