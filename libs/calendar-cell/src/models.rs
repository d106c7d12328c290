use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use shared_models::error::AppError;

pub const MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Column headers, Sunday first to match the grid layout.
pub const WEEKDAYS: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sab"];

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Month shown by the calendar. `month` is zero-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarView {
    month: u32,
    year: i32,
}

impl CalendarView {
    pub fn new(year: i32, month: u32) -> Result<Self, AppError> {
        if month > 11 {
            return Err(AppError::Validation(format!(
                "Month must be between 0 and 11, got {}",
                month
            )));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(AppError::Validation(format!("Year {} is out of range", year)));
        }
        Ok(Self { month, year })
    }

    /// View of the month `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            month: date.month0(),
            year: date.year(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn previous(self) -> Self {
        let (year, month) = if self.month == 0 {
            (self.year - 1, 11)
        } else {
            (self.year, self.month - 1)
        };
        Self::new(year, month).unwrap_or(self)
    }

    pub fn next(self) -> Self {
        let (year, month) = if self.month == 11 {
            (self.year + 1, 0)
        } else {
            (self.year, self.month + 1)
        };
        Self::new(year, month).unwrap_or(self)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Date of `day` in this month, `None` when the month has no such day.
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }

    /// "Enero 2025"
    pub fn label(&self) -> String {
        format!("{} {}", MONTHS[self.month as usize], self.year)
    }
}

/// "09 de enero de 2025"
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{:02} de {} de {}",
        date.day(),
        MONTHS[date.month0() as usize].to_lowercase(),
        date.year()
    )
}

/// One position of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GridCell {
    Blank,
    Day(u32),
}

impl GridCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            GridCell::Blank => None,
            GridCell::Day(day) => Some(*day),
        }
    }
}
