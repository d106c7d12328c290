pub mod availability;
pub mod booking;
pub mod intake;

pub use availability::{normalize_slots, AvailabilityFetcher, SlotSource};
pub use booking::{AppointmentSubmitter, BookingStepController, CitaService};
pub use intake::{register_error_message, PatientIntakeService};
