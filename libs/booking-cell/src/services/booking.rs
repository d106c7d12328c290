use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use tracing::{debug, info, warn};

use calendar_cell::{month_grid, BookingWindow, CalendarView, Clock, DateRangePolicy};
use shared_api::BackendClient;
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_models::routes::Route;

use crate::models::{BookingState, CalendarDay, NewCita, SlotRequest};
use crate::services::availability::SlotSource;

pub const SLOTS_FALLBACK: &str = "No se pudieron cargar los horarios disponibles";
pub const SUBMIT_FALLBACK: &str = "No se pudo solicitar la cita. Intente nuevamente.";
pub const DATE_STEP_FALLBACK: &str = "No se pudo seleccionar la fecha y hora";
pub const INVALID_DATE_MESSAGE: &str = "La fecha seleccionada no es válida";
pub const SUCCESS_MESSAGE: &str =
    "¡Cita solicitada con éxito! Recibirá un email de confirmación.";

/// Anything that can place an appointment request.
#[async_trait]
pub trait AppointmentSubmitter: Send + Sync {
    async fn submit(&self, cita: &NewCita) -> Result<(), AppError>;
}

pub struct CitaService {
    backend: BackendClient,
}

impl CitaService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }
}

#[async_trait]
impl AppointmentSubmitter for CitaService {
    async fn submit(&self, cita: &NewCita) -> Result<(), AppError> {
        debug!("Requesting appointment for patient {} at {}", cita.paciente_id, cita.fecha_hora);

        let body = serde_json::to_value(cita).map_err(|e| AppError::Internal(e.to_string()))?;
        self.backend
            .execute(Method::POST, "/api/citas", None, Some(body))
            .await
    }
}

/// Selection state of the second booking step for one patient.
///
/// Every transition is a plain method on `&mut self`; the two backend
/// calls are split into a start (`select_day`, `begin_confirm`) and a
/// completion (`apply_slots`, `finish_confirm`) so that an event loop can
/// await them however it likes. `load_slots` and `confirm` do both halves
/// in one go.
pub struct BookingStepController {
    paciente_id: i64,
    policy: DateRangePolicy,
    clock: Arc<dyn Clock>,
    view: CalendarView,
    state: BookingState,
    generation: u64,
    alert: Option<String>,
}

impl BookingStepController {
    pub fn new(paciente_id: i64, policy: DateRangePolicy, clock: Arc<dyn Clock>) -> Self {
        let view = CalendarView::containing(clock.today());
        Self {
            paciente_id,
            policy,
            clock,
            view,
            state: BookingState::NoDateSelected,
            generation: 0,
            alert: None,
        }
    }

    pub fn paciente_id(&self) -> i64 {
        self.paciente_id
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.state.selected_date()
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.state.selected_time()
    }

    pub fn slots(&self) -> &[String] {
        self.state.slots()
    }

    /// Message of the last failed submission, if the user has not acted since.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn policy(&self) -> DateRangePolicy {
        self.policy
    }

    pub fn booking_window(&self) -> BookingWindow {
        self.policy.window(self.clock.now())
    }

    /// First and last bookable dates. No last date means no upper bound.
    pub fn bookable_dates(&self) -> (NaiveDate, Option<NaiveDate>) {
        let now = self.clock.now();
        (self.policy.first_selectable(now), self.policy.last_selectable(now))
    }

    /// Grid of the viewed month with each day's selectable/selected flags.
    pub fn calendar(&self) -> Vec<CalendarDay> {
        let now = self.clock.now();
        let selected = self.selected_date();

        month_grid(self.view)
            .into_iter()
            .map(|cell| match cell.day() {
                None => CalendarDay {
                    day: None,
                    selectable: false,
                    selected: false,
                },
                Some(day) => CalendarDay {
                    day: Some(day),
                    selectable: self.policy.is_selectable(day, self.view, now),
                    selected: selected.is_some() && self.view.date_of(day) == selected,
                },
            })
            .collect()
    }

    /// Replaces the viewed month. Changing month drops the selected date
    /// and time and invalidates any availability request in flight.
    pub fn show_month(&mut self, view: CalendarView) {
        if view == self.view {
            return;
        }
        if matches!(self.state, BookingState::Submitting { .. }) {
            warn!("Ignoring month change while a booking is being submitted");
            return;
        }
        self.view = view;
        self.reset_selection();
    }

    pub fn previous_month(&mut self) {
        self.show_month(self.view.previous());
    }

    pub fn next_month(&mut self) {
        self.show_month(self.view.next());
    }

    fn reset_selection(&mut self) {
        self.state = BookingState::NoDateSelected;
        self.alert = None;
        self.generation += 1;
    }

    /// Chooses `day` of the viewed month and starts loading its slots.
    pub fn select_day(&mut self, day: u32) -> Result<SlotRequest, AppError> {
        let date = self
            .view
            .date_of(day)
            .ok_or_else(|| AppError::Validation(format!("El día {} no existe en {}", day, self.view.label())))?;
        self.select_date(date)
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<SlotRequest, AppError> {
        if matches!(self.state, BookingState::Submitting { .. }) {
            return Err(AppError::Validation("Hay una solicitud en curso".to_string()));
        }
        if !self.view.contains(date) {
            return Err(AppError::Validation(format!(
                "La fecha {} no pertenece a {}",
                date,
                self.view.label()
            )));
        }
        if !self.policy.allows(date, self.clock.now()) {
            return Err(AppError::Validation(
                "La fecha elegida está fuera del período de reservas".to_string(),
            ));
        }

        self.generation += 1;
        self.alert = None;
        self.state = BookingState::Loading { date };
        debug!("Selected {} (request #{})", date, self.generation);

        Ok(SlotRequest {
            date,
            generation: self.generation,
        })
    }

    /// Completes an availability request. Returns `false` when the result
    /// belongs to a request that is no longer current and was dropped.
    pub fn apply_slots(&mut self, request: SlotRequest, result: Result<Vec<String>, AppError>) -> bool {
        let current = request.generation == self.generation
            && self.state == BookingState::Loading { date: request.date };
        if !current {
            debug!(
                "Dropping stale availability for {} (request #{}, current #{})",
                request.date, request.generation, self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(slots) => BookingState::Ready {
                date: request.date,
                slots,
            },
            Err(e) => {
                warn!("Could not load availability for {}: {}", request.date, e);
                BookingState::SlotsError {
                    date: request.date,
                    message: e.user_message(SLOTS_FALLBACK),
                }
            }
        };
        true
    }

    /// Re-issues the availability request after a failed load.
    pub fn retry_slots(&mut self) -> Result<SlotRequest, AppError> {
        match self.state {
            BookingState::SlotsError { date, .. } => self.select_date(date),
            _ => Err(AppError::Validation(
                "No hay una carga de horarios para reintentar".to_string(),
            )),
        }
    }

    pub async fn load_slots<S>(&mut self, source: &S, request: SlotRequest) -> bool
    where
        S: SlotSource + ?Sized,
    {
        let result = source.fetch_slots(request.date).await;
        self.apply_slots(request, result)
    }

    pub fn select_time(&mut self, time: &str) -> Result<(), AppError> {
        let (date, slots) = match &self.state {
            BookingState::Ready { date, slots } | BookingState::TimeSelected { date, slots, .. } => {
                (*date, slots.clone())
            }
            _ => {
                return Err(AppError::Validation(
                    "Seleccione primero una fecha con horarios disponibles".to_string(),
                ))
            }
        };

        if !slots.iter().any(|slot| slot == time) {
            return Err(AppError::Validation(format!("El horario {} no está disponible", time)));
        }

        self.alert = None;
        self.state = BookingState::TimeSelected {
            date,
            slots,
            time: time.to_string(),
        };
        Ok(())
    }

    /// Confirm is only possible with both a date and a time chosen and no
    /// submission in flight.
    pub fn can_confirm(&self) -> bool {
        matches!(self.state, BookingState::TimeSelected { .. })
    }

    pub fn begin_confirm(&mut self) -> Result<NewCita, AppError> {
        let (date, slots, time) = match &self.state {
            BookingState::TimeSelected { date, slots, time } => (*date, slots.clone(), time.clone()),
            _ => {
                return Err(AppError::Validation(
                    "Seleccione una fecha y un horario".to_string(),
                ))
            }
        };

        let cita = NewCita::new(self.paciente_id, date, &time)?;
        self.alert = None;
        self.state = BookingState::Submitting { date, slots, time };
        Ok(cita)
    }

    /// On success the confirmed time leaves the visible list and the next
    /// page is returned. On failure the selection is kept so the user can
    /// retry, and the alert carries the reason.
    pub fn finish_confirm(&mut self, result: Result<(), AppError>) -> Result<Route, AppError> {
        let (date, slots, time) = match &self.state {
            BookingState::Submitting { date, slots, time } => (*date, slots.clone(), time.clone()),
            _ => {
                return Err(AppError::Internal(
                    "No booking submission in progress".to_string(),
                ))
            }
        };

        match result {
            Ok(()) => {
                info!("Appointment requested for patient {} on {} {}", self.paciente_id, date, time);
                let remaining = slots.into_iter().filter(|slot| *slot != time).collect();
                self.state = BookingState::Submitted {
                    date,
                    slots: remaining,
                    time,
                };
                Ok(Route::Home)
            }
            Err(e) => {
                warn!("Appointment request failed: {}", e);
                self.alert = Some(e.user_message(SUBMIT_FALLBACK));
                self.state = BookingState::TimeSelected { date, slots, time };
                Err(e)
            }
        }
    }

    pub async fn confirm<A>(&mut self, submitter: &A) -> Result<Route, AppError>
    where
        A: AppointmentSubmitter + ?Sized,
    {
        let cita = self.begin_confirm()?;
        let result = submitter.submit(&cita).await;
        self.finish_confirm(result)
    }
}
