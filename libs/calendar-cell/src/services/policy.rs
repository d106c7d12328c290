use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use shared_config::{AppConfig, WindowMode};

use crate::models::CalendarView;

/// Candidate days are compared at midday so that no instant around
/// midnight can move them across a window boundary.
fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()
}

fn start_of_day() -> NaiveTime {
    NaiveTime::default()
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or_default()
}

/// Range of local date-times in which a new appointment may be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: NaiveDateTime,
    /// `None` means the window has no upper bound.
    pub end: Option<NaiveDateTime>,
}

impl BookingWindow {
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && self.end.map_or(true, |end| at <= end)
    }
}

/// Decides which calendar days may be chosen, relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangePolicy {
    /// Today through `days` ahead, both ends inclusive.
    Rolling { days: u64 },
    /// Only days at least `days` ahead.
    MinimumLead { days: u64 },
}

impl Default for DateRangePolicy {
    fn default() -> Self {
        DateRangePolicy::Rolling { days: 14 }
    }
}

impl DateRangePolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        let days = config.window_days.max(0) as u64;
        match config.window_mode {
            WindowMode::Rolling => DateRangePolicy::Rolling { days },
            WindowMode::Lead => DateRangePolicy::MinimumLead { days },
        }
    }

    /// Recomputed on every call; nothing about the window is cached.
    pub fn window(&self, now: NaiveDateTime) -> BookingWindow {
        let today = now.date();
        match *self {
            DateRangePolicy::Rolling { days } => BookingWindow {
                start: today.and_time(start_of_day()),
                end: Some(add_days(today, days).and_time(end_of_day())),
            },
            DateRangePolicy::MinimumLead { days } => BookingWindow {
                start: add_days(today, days).and_time(start_of_day()),
                end: None,
            },
        }
    }

    pub fn allows(&self, date: NaiveDate, now: NaiveDateTime) -> bool {
        self.window(now).contains(date.and_time(noon()))
    }

    /// Whether `day` of the viewed month can be chosen. Days the month
    /// does not have are never selectable.
    pub fn is_selectable(&self, day: u32, view: CalendarView, now: NaiveDateTime) -> bool {
        view.date_of(day)
            .map_or(false, |date| self.allows(date, now))
    }

    pub fn first_selectable(&self, now: NaiveDateTime) -> NaiveDate {
        self.window(now).start.date()
    }

    pub fn last_selectable(&self, now: NaiveDateTime) -> Option<NaiveDate> {
        self.window(now).end.map(|end| end.date())
    }
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}
