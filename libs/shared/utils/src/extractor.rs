use axum::http::HeaderMap;
use headers::{Cookie, HeaderMapExt};

use shared_models::auth::Session;
use shared_models::error::AppError;

pub const SESSION_COOKIE: &str = "consultorio_sesion";

/// Builds the explicit `Session` a staff page needs from the request's
/// session cookie.
pub fn session_from_headers(headers: &HeaderMap) -> Result<Session, AppError> {
    let cookie = headers
        .typed_get::<Cookie>()
        .ok_or_else(|| AppError::Auth("Missing session cookie".to_string()))?;

    let token = cookie
        .get(SESSION_COOKIE)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Auth("Missing session cookie".to_string()))?;

    Ok(Session::new(token))
}

pub fn session_cookie(session: &Session) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict",
        SESSION_COOKIE,
        session.token()
    )
}

pub fn expired_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0", SESSION_COOKIE)
}
