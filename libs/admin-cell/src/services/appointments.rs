use chrono::{FixedOffset, NaiveDate};
use reqwest::Method;
use tracing::{debug, info};

use calendar_cell::SystemClock;
use shared_api::BackendClient;
use shared_config::AppConfig;
use shared_models::auth::Session;
use shared_models::error::AppError;

use crate::models::{Cita, CitaFilter, CitaRecord, EstadoCita, PanelMetrics};

pub const CITAS_FALLBACK: &str = "No se pudieron cargar las citas";

/// Staff operations on appointments. Every call needs the caller's session.
pub struct AppointmentService {
    backend: BackendClient,
    offset: FixedOffset,
}

impl AppointmentService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
            offset: SystemClock::from_config(config).offset(),
        }
    }

    /// All citas, with times at the practice offset so they match the
    /// slots offered in the booking step.
    pub async fn list(&self, session: &Session) -> Result<Vec<Cita>, AppError> {
        debug!("Fetching citas");

        let records: Vec<CitaRecord> = self
            .backend
            .request(Method::GET, "/api/citas", Some(session), None)
            .await?;

        debug!("Fetched {} citas", records.len());
        Ok(records
            .into_iter()
            .map(|record| record.at_offset(self.offset))
            .collect())
    }

    pub async fn confirm(&self, session: &Session, cita_id: i64) -> Result<(), AppError> {
        let path = format!("/api/citas/{}/confirmar", cita_id);
        self.backend
            .execute(Method::PATCH, &path, Some(session), None)
            .await?;

        info!("Cita {} confirmed", cita_id);
        Ok(())
    }

    pub async fn delete(&self, session: &Session, cita_id: i64) -> Result<(), AppError> {
        let path = format!("/api/citas/{}", cita_id);
        self.backend
            .execute(Method::DELETE, &path, Some(session), None)
            .await?;

        info!("Cita {} deleted", cita_id);
        Ok(())
    }
}

pub fn panel_metrics(citas: &[Cita], today: NaiveDate) -> PanelMetrics {
    PanelMetrics {
        total: citas.len(),
        solicitadas: citas.iter().filter(|c| c.estado == EstadoCita::Solicitada).count(),
        confirmadas: citas.iter().filter(|c| c.estado == EstadoCita::Confirmada).count(),
        hoy: citas.iter().filter(|c| c.fecha_hora.date() == today).count(),
    }
}

/// Citas matching the state filter and the search text, earliest first.
/// The search is a case-insensitive substring of patient name or email and
/// is ignored when blank.
pub fn filter_citas(citas: &[Cita], filter: CitaFilter, search: &str, today: NaiveDate) -> Vec<Cita> {
    let search = search.trim().to_lowercase();

    let mut matching: Vec<Cita> = citas
        .iter()
        .filter(|cita| match filter {
            CitaFilter::Todas => true,
            CitaFilter::Solicitada => cita.estado == EstadoCita::Solicitada,
            CitaFilter::Confirmada => cita.estado == EstadoCita::Confirmada,
            CitaFilter::Hoy => cita.fecha_hora.date() == today,
        })
        .filter(|cita| {
            search.is_empty()
                || cita.paciente.to_lowercase().contains(&search)
                || cita.email.to_lowercase().contains(&search)
        })
        .cloned()
        .collect();

    matching.sort_by_key(|cita| cita.fecha_hora);
    matching
}
