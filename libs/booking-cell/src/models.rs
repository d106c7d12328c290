use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::error::AppError;
use shared_utils::validation::{has_min_length, is_valid_email, is_valid_phone};

/// Patient intake form as typed by the visitor. The obra social comes
/// from a `<select>`, hence the string id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientForm {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default, rename = "obraSocialId")]
    pub obra_social_id: String,
}

/// `true` marks a field that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub nombre: bool,
    pub apellido: bool,
    pub telefono: bool,
    pub email: bool,
    pub obra_social_id: bool,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        !(self.nombre || self.apellido || self.telefono || self.email || self.obra_social_id)
    }
}

impl PatientForm {
    pub fn validate(&self) -> FieldErrors {
        FieldErrors {
            nombre: !has_min_length(&self.nombre, 2),
            apellido: !has_min_length(&self.apellido, 2),
            telefono: !is_valid_phone(&self.telefono),
            email: !is_valid_email(&self.email),
            obra_social_id: self.obra_social_id.trim().parse::<i64>().is_err(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    pub fn to_payload(&self) -> Result<NewPaciente, AppError> {
        if !self.is_valid() {
            return Err(AppError::Validation(
                "Revise los datos del paciente".to_string(),
            ));
        }

        let obra_social_id = self
            .obra_social_id
            .trim()
            .parse()
            .map_err(|_| AppError::Validation("Seleccione su obra social".to_string()))?;

        Ok(NewPaciente {
            nombre: self.nombre.trim().to_string(),
            apellido: self.apellido.trim().to_string(),
            email: self.email.trim().to_string(),
            telefono: self.telefono.trim().to_string(),
            obra_social_id,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaciente {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub telefono: String,
    pub obra_social_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacienteCreated {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub slots: Vec<AvailabilitySlot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilitySlot {
    #[serde(rename = "fechaHora")]
    pub fecha_hora: DateTime<Utc>,
}

/// Appointment request sent on confirmation. `fecha_hora` is local wall
/// time without a zone suffix, e.g. `2025-01-09T09:00:00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCita {
    pub paciente_id: i64,
    pub fecha_hora: String,
}

impl NewCita {
    pub fn new(paciente_id: i64, date: NaiveDate, time: &str) -> Result<Self, AppError> {
        let time = NaiveTime::parse_from_str(time, "%H:%M")
            .map_err(|_| AppError::Validation(format!("Horario inválido: {}", time)))?;

        Ok(Self {
            paciente_id,
            fecha_hora: date.and_time(time).format("%Y-%m-%dT%H:%M:%S").to_string(),
        })
    }
}

/// Stamp of one availability request. Only the request matching the
/// controller's current generation may update the slot list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRequest {
    pub date: NaiveDate,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingState {
    NoDateSelected,
    Loading {
        date: NaiveDate,
    },
    Ready {
        date: NaiveDate,
        slots: Vec<String>,
    },
    SlotsError {
        date: NaiveDate,
        message: String,
    },
    TimeSelected {
        date: NaiveDate,
        slots: Vec<String>,
        time: String,
    },
    Submitting {
        date: NaiveDate,
        slots: Vec<String>,
        time: String,
    },
    Submitted {
        date: NaiveDate,
        slots: Vec<String>,
        time: String,
    },
}

impl BookingState {
    pub fn selected_date(&self) -> Option<NaiveDate> {
        match self {
            BookingState::NoDateSelected => None,
            BookingState::Loading { date }
            | BookingState::Ready { date, .. }
            | BookingState::SlotsError { date, .. }
            | BookingState::TimeSelected { date, .. }
            | BookingState::Submitting { date, .. }
            | BookingState::Submitted { date, .. } => Some(*date),
        }
    }

    pub fn selected_time(&self) -> Option<&str> {
        match self {
            BookingState::TimeSelected { time, .. }
            | BookingState::Submitting { time, .. }
            | BookingState::Submitted { time, .. } => Some(time.as_str()),
            _ => None,
        }
    }

    pub fn slots(&self) -> &[String] {
        match self {
            BookingState::Ready { slots, .. }
            | BookingState::TimeSelected { slots, .. }
            | BookingState::Submitting { slots, .. }
            | BookingState::Submitted { slots, .. } => slots.as_slice(),
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, BookingState::Loading { .. })
    }
}

/// Day cell as the booking page shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub day: Option<u32>,
    pub selectable: bool,
    pub selected: bool,
}
