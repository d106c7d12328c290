pub mod clock;
pub mod grid;
pub mod policy;

pub use clock::{Clock, FixedClock, SystemClock};
pub use grid::{days_in_month, first_weekday, month_grid};
pub use policy::{BookingWindow, DateRangePolicy};
