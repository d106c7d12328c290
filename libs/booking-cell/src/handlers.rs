use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use calendar_cell::{CalendarView, DateRangePolicy, SystemClock};
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_models::obra_social::ObraSocial;
use shared_models::routes::RESERVAR_CITA_PATH;

use crate::models::PatientForm;
use crate::services::{
    booking::{DATE_STEP_FALLBACK, INVALID_DATE_MESSAGE},
    intake::OBRAS_FALLBACK,
    register_error_message, AvailabilityFetcher, BookingStepController, CitaService,
    PatientIntakeService, SlotSource,
};
use crate::views;

/// Query flag the landing page reads to show the success message.
pub const BOOKED_QUERY: &str = "reserva=solicitada";

/// Query of the date step. Every field is optional so that a hand-edited
/// or stale link still lands on the page instead of a bare 400.
#[derive(Debug, Default, Deserialize)]
pub struct DateStepQuery {
    #[serde(default, deserialize_with = "lenient")]
    pub paciente: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub anio: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub mes: Option<u32>,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub hora: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfirmForm {
    #[serde(default, deserialize_with = "lenient")]
    pub paciente: Option<i64>,
    #[serde(default)]
    pub fecha: String,
    #[serde(default)]
    pub hora: String,
}

/// Blank or unreadable values count as missing.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(str::trim).and_then(|value| value.parse().ok()))
}

/// `None` for a blank date, an error for one that is not `YYYY-MM-DD`.
fn parse_fecha(raw: &str) -> Result<Option<NaiveDate>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| AppError::Validation(INVALID_DATE_MESSAGE.to_string()))
}

// ==============================================================================
// STEP 1: PATIENT DATA
// ==============================================================================

async fn load_obras(service: &PatientIntakeService) -> (Vec<ObraSocial>, Option<String>) {
    match service.load_obras_sociales().await {
        Ok(obras) => (obras, None),
        Err(e) => (Vec::new(), Some(e.user_message(OBRAS_FALLBACK))),
    }
}

#[axum::debug_handler]
pub async fn intake_page(State(state): State<Arc<AppConfig>>) -> Result<Html<String>, AppError> {
    let service = PatientIntakeService::new(&state);
    let (obras, obras_error) = load_obras(&service).await;

    views::render_intake(&PatientForm::default(), None, &obras, obras_error, None)
}

#[axum::debug_handler]
pub async fn submit_intake(
    State(state): State<Arc<AppConfig>>,
    Form(form): Form<PatientForm>,
) -> Result<Response, AppError> {
    let service = PatientIntakeService::new(&state);

    let errors = form.validate();
    if !errors.is_empty() {
        debug!("Patient form rejected: {:?}", errors);
        let (obras, obras_error) = load_obras(&service).await;
        return Ok(views::render_intake(&form, Some(errors), &obras, obras_error, None)?.into_response());
    }

    match service.register(&form).await {
        Ok(route) => Ok(Redirect::to(&route.to_string()).into_response()),
        Err(e) => {
            let (obras, obras_error) = load_obras(&service).await;
            let message = register_error_message(&e);
            Ok(views::render_intake(&form, None, &obras, obras_error, Some(message))?.into_response())
        }
    }
}

// ==============================================================================
// STEP 2: DATE AND TIME
// ==============================================================================

fn controller_for(state: &AppConfig, paciente_id: i64) -> BookingStepController {
    BookingStepController::new(
        paciente_id,
        DateRangePolicy::from_config(state),
        Arc::new(SystemClock::from_config(state)),
    )
}

/// Moves to the month of `fecha`, selects it and waits for its slots.
async fn choose_date(
    controller: &mut BookingStepController,
    source: &dyn SlotSource,
    fecha: NaiveDate,
) -> Result<(), AppError> {
    controller.show_month(CalendarView::containing(fecha));
    let request = controller.select_date(fecha)?;
    controller.load_slots(source, request).await;
    Ok(())
}

#[axum::debug_handler]
pub async fn date_page(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<DateStepQuery>,
) -> Result<Response, AppError> {
    let Some(paciente_id) = query.paciente else {
        debug!("Date step opened without a patient, back to step 1");
        return Ok(Redirect::to(RESERVAR_CITA_PATH).into_response());
    };

    let mut controller = controller_for(&state, paciente_id);
    if let (Some(anio), Some(mes)) = (query.anio, query.mes) {
        match CalendarView::new(anio, mes) {
            Ok(view) => controller.show_month(view),
            Err(e) => debug!("Ignoring requested month: {}", e),
        }
    }

    let result = match parse_fecha(query.fecha.as_deref().unwrap_or_default()) {
        Ok(Some(fecha)) => {
            let fetcher = AvailabilityFetcher::new(&state);
            let mut result = choose_date(&mut controller, &fetcher, fecha).await;
            let hora = query.hora.as_deref().map(str::trim).filter(|h| !h.is_empty());
            if let (true, Some(hora)) = (result.is_ok(), hora) {
                result = controller.select_time(hora);
            }
            result
        }
        Ok(None) => Ok(()),
        Err(e) => Err(e),
    };
    let notice = result.err().map(|e| e.user_message(DATE_STEP_FALLBACK));

    Ok(views::render_date_step(&controller, notice)?.into_response())
}

#[axum::debug_handler]
pub async fn confirm_booking(
    State(state): State<Arc<AppConfig>>,
    Form(form): Form<ConfirmForm>,
) -> Result<Response, AppError> {
    let Some(paciente_id) = form.paciente else {
        debug!("Confirmation posted without a patient, back to step 1");
        return Ok(Redirect::to(RESERVAR_CITA_PATH).into_response());
    };

    let mut controller = controller_for(&state, paciente_id);
    let fetcher = AvailabilityFetcher::new(&state);

    let prepared = match parse_fecha(&form.fecha) {
        Ok(Some(fecha)) => match choose_date(&mut controller, &fetcher, fecha).await {
            Ok(()) => controller.select_time(form.hora.trim()),
            Err(e) => Err(e),
        },
        Ok(None) => Err(AppError::Validation("Seleccione una fecha".to_string())),
        Err(e) => Err(e),
    };
    if let Err(e) = prepared {
        let notice = Some(e.user_message(DATE_STEP_FALLBACK));
        return Ok(views::render_date_step(&controller, notice)?.into_response());
    }

    match controller.confirm(&CitaService::new(&state)).await {
        Ok(route) => {
            info!("Booking confirmed for patient {}", paciente_id);
            Ok(Redirect::to(&format!("{}?{}", route, BOOKED_QUERY)).into_response())
        }
        // The controller keeps the selection and carries the alert.
        Err(_) => Ok(views::render_date_step(&controller, None)?.into_response()),
    }
}
