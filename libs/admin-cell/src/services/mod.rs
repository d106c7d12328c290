pub mod appointments;
pub mod obras_sociales;

pub use appointments::{filter_citas, panel_metrics, AppointmentService, CITAS_FALLBACK};
pub use obras_sociales::{ObraSocialService, OBRAS_FALLBACK};
