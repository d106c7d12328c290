use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};
use tracing::warn;

use shared_config::AppConfig;

/// Source of the local wall-clock "now" the booking window is computed from.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Current time at the practice's UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let offset = config.utc_offset().unwrap_or_else(|| {
            warn!(
                "Invalid UTC offset of {} minutes, falling back to UTC",
                config.utc_offset_minutes
            );
            Utc.fix()
        });
        Self::new(offset)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.offset).naive_local()
    }
}

/// Clock frozen at a given local time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_date() {
        let now = NaiveDate::from_ymd_opt(2025, 1, 9)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let clock = FixedClock(now);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 1, 9).unwrap());
    }

    #[test]
    fn invalid_offset_falls_back_to_utc() {
        let config = AppConfig {
            utc_offset_minutes: 100_000,
            ..AppConfig::default()
        };
        assert_eq!(SystemClock::from_config(&config).offset(), Utc.fix());
    }

    #[test]
    fn system_clock_applies_offset() {
        let utc = SystemClock::new(Utc.fix()).now();
        let buenos_aires = SystemClock::new(FixedOffset::west_opt(3 * 3600).unwrap()).now();
        let diff = utc.signed_duration_since(buenos_aires).num_minutes();
        assert!((179..=181).contains(&diff));
    }
}
