use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_WINDOW_DAYS: i64 = 14;
/// Argentina (UTC-3), where the practice operates.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = -180;
pub const DEFAULT_WEB_PORT: u16 = 3000;

/// Which of the two booking-window rules the calendar applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    /// From today up to `days` ahead, both ends inclusive.
    Rolling,
    /// Only days at least `days` ahead, no upper bound.
    Lead,
}

impl FromStr for WindowMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rolling" => Ok(WindowMode::Rolling),
            "lead" => Ok(WindowMode::Lead),
            other => Err(format!("unknown booking window mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub request_timeout: Duration,
    pub window_mode: WindowMode,
    pub window_days: i64,
    pub utc_offset_minutes: i32,
    pub web_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            window_mode: WindowMode::Rolling,
            window_days: DEFAULT_WINDOW_DAYS,
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            web_port: DEFAULT_WEB_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            backend_url: env::var("BACKEND_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("BACKEND_API_URL not set, using {}", DEFAULT_BACKEND_URL);
                    defaults.backend_url.clone()
                }),
            request_timeout: Duration::from_secs(
                parse_var("BACKEND_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            ),
            window_mode: parse_var("BOOKING_WINDOW_MODE", defaults.window_mode),
            window_days: parse_var("BOOKING_WINDOW_DAYS", DEFAULT_WINDOW_DAYS),
            utc_offset_minutes: parse_var("CLINIC_UTC_OFFSET_MINUTES", DEFAULT_UTC_OFFSET_MINUTES),
            web_port: parse_var("WEB_PORT", DEFAULT_WEB_PORT),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - check backend settings");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.backend_url.is_empty()
            && !self.request_timeout.is_zero()
            && self.window_days >= 0
            && self.utc_offset().is_some()
    }

    /// Offset used to show backend instants as local wall-clock time.
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
    }
}

fn parse_var<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Debug,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value ({}), using {:?}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_mode_parses_case_insensitively() {
        assert_eq!("Rolling".parse::<WindowMode>(), Ok(WindowMode::Rolling));
        assert_eq!(" lead ".parse::<WindowMode>(), Ok(WindowMode::Lead));
        assert!("weekly".parse::<WindowMode>().is_err());
    }

    #[test]
    fn default_config_is_usable() {
        let config = AppConfig::default();
        assert!(config.is_configured());
        assert_eq!(config.utc_offset(), FixedOffset::west_opt(3 * 3600));
    }

    #[test]
    fn out_of_range_offset_is_not_configured() {
        let config = AppConfig {
            utc_offset_minutes: 24 * 60,
            ..AppConfig::default()
        };
        assert!(config.utc_offset().is_none());
        assert!(!config.is_configured());
    }
}
