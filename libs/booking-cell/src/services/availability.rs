use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate};
use reqwest::Method;
use tracing::debug;

use calendar_cell::SystemClock;
use shared_api::BackendClient;
use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AvailabilityResponse, AvailabilitySlot};

/// Anything that can list the open "HH:MM" slots of one date.
#[async_trait]
pub trait SlotSource: Send + Sync {
    async fn fetch_slots(&self, date: NaiveDate) -> Result<Vec<String>, AppError>;
}

/// Reads open slots from the backend's availability endpoint and shows
/// them in the practice's local time.
pub struct AvailabilityFetcher {
    backend: BackendClient,
    offset: FixedOffset,
}

impl AvailabilityFetcher {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
            offset: SystemClock::from_config(config).offset(),
        }
    }
}

#[async_trait]
impl SlotSource for AvailabilityFetcher {
    async fn fetch_slots(&self, date: NaiveDate) -> Result<Vec<String>, AppError> {
        let day = date.format("%Y-%m-%d").to_string();
        debug!("Fetching availability for {}", day);

        // Same day on both ends: the range covers exactly one date.
        let path = format!("/api/disponibilidad?desde={}&hasta={}", day, day);
        let response: AvailabilityResponse = self
            .backend
            .request(Method::GET, &path, None, None)
            .await?;

        let slots = normalize_slots(&response.slots, self.offset);
        debug!("{} raw slots -> {} distinct times for {}", response.slots.len(), slots.len(), day);

        Ok(slots)
    }
}

/// Local "HH:MM" of every slot, without duplicates, ascending. Sorting the
/// strings is enough because they are zero-padded 24-hour times.
pub fn normalize_slots(slots: &[AvailabilitySlot], offset: FixedOffset) -> Vec<String> {
    slots
        .iter()
        .map(|slot| slot.fecha_hora.with_timezone(&offset).format("%H:%M").to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
