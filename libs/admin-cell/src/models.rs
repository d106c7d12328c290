use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize};

use shared_models::error::AppError;
use shared_models::obra_social::{ObraSocial, ObraSocialPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EstadoCita {
    Solicitada,
    Confirmada,
}

impl EstadoCita {
    pub fn label(&self) -> &'static str {
        match self {
            EstadoCita::Solicitada => "Solicitada",
            EstadoCita::Confirmada => "Confirmada",
        }
    }
}

/// Appointment as the panel shows it, with `fecha_hora` in the practice's
/// local wall time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cita {
    pub id: i64,
    pub paciente: String,
    pub email: String,
    pub telefono: String,
    pub fecha_hora: NaiveDateTime,
    pub obra_social: String,
    pub estado: EstadoCita,
}

/// `fechaHora` as the listing may send it: local wall time
/// (`2025-01-09T09:00:00`) or an instant with an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FechaHora {
    Local(NaiveDateTime),
    Instant(DateTime<FixedOffset>),
}

impl FechaHora {
    /// Wall time at the practice offset. Local values are taken as is.
    pub fn at_offset(self, offset: FixedOffset) -> NaiveDateTime {
        match self {
            FechaHora::Local(local) => local,
            FechaHora::Instant(at) => at.with_timezone(&offset).naive_local(),
        }
    }
}

/// One entry of `GET /api/citas`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitaRecord {
    pub id: i64,
    pub paciente: String,
    pub email: String,
    #[serde(default)]
    pub telefono: String,
    pub fecha_hora: FechaHora,
    #[serde(default)]
    pub obra_social: String,
    pub estado: EstadoCita,
}

impl CitaRecord {
    pub fn at_offset(self, offset: FixedOffset) -> Cita {
        Cita {
            id: self.id,
            paciente: self.paciente,
            email: self.email,
            telefono: self.telefono,
            fecha_hora: self.fecha_hora.at_offset(offset),
            obra_social: self.obra_social,
            estado: self.estado,
        }
    }
}

/// State filter of the citas tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CitaFilter {
    #[default]
    Todas,
    Solicitada,
    Confirmada,
    Hoy,
}

impl CitaFilter {
    pub const ALL: [CitaFilter; 4] = [
        CitaFilter::Todas,
        CitaFilter::Solicitada,
        CitaFilter::Confirmada,
        CitaFilter::Hoy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CitaFilter::Todas => "TODAS",
            CitaFilter::Solicitada => "SOLICITADA",
            CitaFilter::Confirmada => "CONFIRMADA",
            CitaFilter::Hoy => "HOY",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CitaFilter::Todas => "Todas",
            CitaFilter::Solicitada => "Solicitadas",
            CitaFilter::Confirmada => "Confirmadas",
            CitaFilter::Hoy => "Hoy",
        }
    }
}

impl FromStr for CitaFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CitaFilter::ALL
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::Validation(format!("Filtro desconocido: {}", s)))
    }
}

impl fmt::Display for CitaFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PanelMetrics {
    pub total: usize,
    pub solicitadas: usize,
    pub confirmadas: usize,
    pub hoy: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelTab {
    #[default]
    Citas,
    Obras,
}

/// Query string of the panel page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PanelQuery {
    #[serde(default)]
    pub tab: PanelTab,
    #[serde(default, deserialize_with = "lenient_filter")]
    pub estado: CitaFilter,
    #[serde(default)]
    pub q: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub editar: Option<i64>,
}

fn lenient_filter<'de, D>(deserializer: D) -> Result<CitaFilter, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse().unwrap_or_default())
}

/// Empty form and query values mean "no id".
fn optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) => id.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Add-or-edit form of the obras sociales tab. With an id it updates that
/// obra social, without one it creates a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObraSocialForm {
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub nombre: String,
}

impl ObraSocialForm {
    pub fn editing(obra: &ObraSocial) -> Self {
        Self {
            id: Some(obra.id),
            nombre: obra.nombre.clone(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    /// Back to an empty "add" form.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    pub fn to_payload(&self) -> Result<ObraSocialPayload, AppError> {
        let nombre = self.nombre.trim();
        if nombre.is_empty() {
            return Err(AppError::Validation(
                "Ingrese el nombre de la obra social".to_string(),
            ));
        }
        Ok(ObraSocialPayload {
            nombre: nombre.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn buenos_aires() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    #[test]
    fn cita_reads_backend_shape() {
        let record: CitaRecord = serde_json::from_value(json!({
            "id": 2,
            "paciente": "María López",
            "email": "maria.lopez@email.com",
            "telefono": "+54 11 2222-3333",
            "fechaHora": "2025-01-15T10:30:00",
            "obraSocial": "Swiss Medical",
            "estado": "SOLICITADA"
        }))
        .unwrap();
        let cita = record.at_offset(buenos_aires());

        assert_eq!(cita.estado, EstadoCita::Solicitada);
        assert_eq!(cita.fecha_hora.format("%d/%m %H:%M").to_string(), "15/01 10:30");
    }

    #[test]
    fn instants_are_shown_at_the_practice_offset() {
        let record: CitaRecord = serde_json::from_value(json!({
            "id": 1,
            "paciente": "Juan Pérez",
            "email": "juan.perez@email.com",
            "fechaHora": "2025-01-09T12:00:00Z",
            "estado": "CONFIRMADA"
        }))
        .unwrap();
        assert_matches!(record.fecha_hora, FechaHora::Instant(_));

        let cita = record.at_offset(buenos_aires());
        assert_eq!(cita.fecha_hora.format("%Y-%m-%d %H:%M").to_string(), "2025-01-09 09:00");
        assert_eq!(cita.obra_social, "");
    }

    #[test]
    fn instants_near_midnight_move_to_the_local_day() {
        let fecha_hora: FechaHora = serde_json::from_value(json!("2025-01-10T01:30:00Z")).unwrap();

        let local = fecha_hora.at_offset(buenos_aires());
        assert_eq!(local.date().to_string(), "2025-01-09");
        assert_eq!(local.format("%H:%M").to_string(), "22:30");
    }

    #[test]
    fn unreadable_fecha_hora_is_rejected() {
        assert!(serde_json::from_value::<FechaHora>(json!("mañana")).is_err());
    }

    #[test]
    fn filters_parse_case_insensitively() {
        assert_eq!("hoy".parse::<CitaFilter>().unwrap(), CitaFilter::Hoy);
        assert_eq!("SOLICITADA".parse::<CitaFilter>().unwrap(), CitaFilter::Solicitada);
        assert_matches!("pendiente".parse::<CitaFilter>(), Err(AppError::Validation(_)));
    }

    #[test]
    fn obra_social_form_rules() {
        let mut form = ObraSocialForm {
            id: None,
            nombre: "   ".to_string(),
        };
        assert_matches!(form.to_payload(), Err(AppError::Validation(_)));

        let galeno = ObraSocial {
            id: 3,
            nombre: "Galeno".to_string(),
        };
        form = ObraSocialForm::editing(&galeno);
        assert!(form.is_editing());
        assert_eq!(form.to_payload().unwrap().nombre, "Galeno");

        form.cancel();
        assert_eq!(form, ObraSocialForm::default());
    }
}
