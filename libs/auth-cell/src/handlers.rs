use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_models::routes::{HOME_PATH, PANEL_PATH};
use shared_utils::extractor::{expired_session_cookie, session_cookie, session_from_headers};

use crate::models::LoginForm;
use crate::services::{login_error_message, LoginService};
use crate::views;

/// Staff already holding a session go straight to the panel.
pub async fn login_page(headers: HeaderMap) -> Result<Response, AppError> {
    if session_from_headers(&headers).is_ok() {
        debug!("Session cookie present, skipping login form");
        return Ok(Redirect::to(PANEL_PATH).into_response());
    }

    Ok(views::render_login("", None)?.into_response())
}

#[axum::debug_handler]
pub async fn submit_login(
    State(state): State<Arc<AppConfig>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let service = LoginService::new(&state);

    match service.login(&form).await {
        Ok(session) => Ok((
            [(header::SET_COOKIE, session_cookie(&session))],
            Redirect::to(PANEL_PATH),
        )
            .into_response()),
        Err(e) => {
            let page: Html<String> = views::render_login(form.usuario.trim(), Some(login_error_message(&e)))?;
            Ok(page.into_response())
        }
    }
}

/// Drops the session cookie and returns to the landing page.
pub async fn logout() -> Response {
    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Redirect::to(HOME_PATH),
    )
        .into_response()
}
