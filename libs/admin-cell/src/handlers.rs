use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use futures::future;
use tracing::{debug, warn};

use calendar_cell::{Clock, SystemClock};
use shared_config::AppConfig;
use shared_models::auth::Session;
use shared_models::error::AppError;
use shared_models::routes::{INICIO_SESION_PATH, PANEL_PATH};
use shared_utils::extractor::{expired_session_cookie, session_from_headers};

use crate::models::{ObraSocialForm, PanelQuery, PanelTab};
use crate::services::{
    filter_citas, panel_metrics, AppointmentService, ObraSocialService, CITAS_FALLBACK, OBRAS_FALLBACK,
};
use crate::views::{self, PanelPage};

const OBRAS_LOAD_FALLBACK: &str = "No se pudieron cargar las obras sociales";

/// Back to the login page, dropping whatever session the browser had.
fn to_login() -> Response {
    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Redirect::to(INICIO_SESION_PATH),
    )
        .into_response()
}

fn panel_url(tab: PanelTab) -> String {
    match tab {
        PanelTab::Citas => format!("{}?tab=citas", PANEL_PATH),
        PanelTab::Obras => format!("{}?tab=obras", PANEL_PATH),
    }
}

/// Loads both lists and renders the panel. `form` overrides the obra
/// social form, e.g. to keep what was typed after a failed save.
async fn panel_response(
    state: &AppConfig,
    session: &Session,
    query: &PanelQuery,
    notice: Option<String>,
    form: Option<ObraSocialForm>,
) -> Result<Response, AppError> {
    let appointments = AppointmentService::new(state);
    let obras_service = ObraSocialService::new(state);

    let (citas, obras) = future::join(appointments.list(session), obras_service.list(session)).await;

    if [citas.as_ref().err(), obras.as_ref().err()]
        .into_iter()
        .flatten()
        .any(AppError::is_unauthorized)
    {
        warn!("Backend refused the staff session");
        return Ok(to_login());
    }

    let mut notice = notice;
    let citas = citas.unwrap_or_else(|e| {
        notice.get_or_insert_with(|| e.user_message(CITAS_FALLBACK));
        Vec::new()
    });
    let obras = obras.unwrap_or_else(|e| {
        notice.get_or_insert_with(|| e.user_message(OBRAS_LOAD_FALLBACK));
        Vec::new()
    });

    let form = form.unwrap_or_else(|| {
        query
            .editar
            .and_then(|id| obras.iter().find(|obra| obra.id == id))
            .map(ObraSocialForm::editing)
            .unwrap_or_default()
    });

    let today = SystemClock::from_config(state).today();
    let visible = filter_citas(&citas, query.estado, &query.q, today);

    let page = PanelPage {
        tab: query.tab,
        notice: notice.as_deref(),
        metrics: panel_metrics(&citas, today),
        filter: query.estado,
        search: &query.q,
        citas: &visible,
        obras: &obras,
        form: &form,
    };

    Ok(views::render_panel(&page)?.into_response())
}

/// Outcome of a panel action: back to the tab on success, to login when
/// the session was refused, or the panel again with the reason.
async fn after_action(
    state: &AppConfig,
    session: &Session,
    tab: PanelTab,
    result: Result<(), AppError>,
    fallback: &str,
    form: Option<ObraSocialForm>,
) -> Result<Response, AppError> {
    match result {
        Ok(()) => Ok(Redirect::to(&panel_url(tab)).into_response()),
        Err(e) if e.is_unauthorized() => Ok(to_login()),
        Err(e) => {
            let query = PanelQuery {
                tab,
                ..PanelQuery::default()
            };
            panel_response(state, session, &query, Some(e.user_message(fallback)), form).await
        }
    }
}

#[axum::debug_handler]
pub async fn panel_page(
    State(state): State<Arc<AppConfig>>,
    headers: HeaderMap,
    Query(query): Query<PanelQuery>,
) -> Result<Response, AppError> {
    let Ok(session) = session_from_headers(&headers) else {
        debug!("Panel requested without a session");
        return Ok(to_login());
    };

    panel_response(&state, &session, &query, None, None).await
}

#[axum::debug_handler]
pub async fn confirm_cita(
    State(state): State<Arc<AppConfig>>,
    headers: HeaderMap,
    Path(cita_id): Path<i64>,
) -> Result<Response, AppError> {
    let Ok(session) = session_from_headers(&headers) else {
        return Ok(to_login());
    };

    let result = AppointmentService::new(&state).confirm(&session, cita_id).await;
    after_action(&state, &session, PanelTab::Citas, result, "No se pudo confirmar la cita", None).await
}

#[axum::debug_handler]
pub async fn delete_cita(
    State(state): State<Arc<AppConfig>>,
    headers: HeaderMap,
    Path(cita_id): Path<i64>,
) -> Result<Response, AppError> {
    let Ok(session) = session_from_headers(&headers) else {
        return Ok(to_login());
    };

    let result = AppointmentService::new(&state).delete(&session, cita_id).await;
    after_action(&state, &session, PanelTab::Citas, result, "No se pudo eliminar la cita", None).await
}

#[axum::debug_handler]
pub async fn save_obra_social(
    State(state): State<Arc<AppConfig>>,
    headers: HeaderMap,
    Form(form): Form<ObraSocialForm>,
) -> Result<Response, AppError> {
    let Ok(session) = session_from_headers(&headers) else {
        return Ok(to_login());
    };

    let result = ObraSocialService::new(&state).save(&session, &form).await;
    after_action(&state, &session, PanelTab::Obras, result, OBRAS_FALLBACK, Some(form)).await
}

#[axum::debug_handler]
pub async fn delete_obra_social(
    State(state): State<Arc<AppConfig>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let Ok(session) = session_from_headers(&headers) else {
        return Ok(to_login());
    };

    let result = ObraSocialService::new(&state).delete(&session, id).await;
    after_action(
        &state,
        &session,
        PanelTab::Obras,
        result,
        "No se pudo eliminar la obra social",
        None,
    )
    .await
}
