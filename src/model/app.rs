use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    model::sync::{ConferenceTarget, SyncConfiguration},
    service::{availability::AvailabilityService, sync::SyncEngine},
};

/// Sync settings applied to runs that don't specify their own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncDefaults {
    pub week: i32,
    pub batch_size: usize,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl SyncDefaults {
    pub fn configuration(
        &self,
        conferences: Vec<ConferenceTarget>,
        season_id: i32,
        week: Option<i32>,
    ) -> SyncConfiguration {
        let mut config = SyncConfiguration::new(conferences, season_id, week.unwrap_or(self.week));
        config.batch_size = self.batch_size;
        config.retry_attempts = self.retry_attempts;
        config.retry_delay_ms = self.retry_delay_ms;

        config
    }
}

impl From<&Config> for SyncDefaults {
    fn from(config: &Config) -> Self {
        Self {
            week: config.sync_week,
            batch_size: config.sync_batch_size,
            retry_attempts: config.sync_retry_attempts,
            retry_delay_ms: config.sync_retry_delay_ms,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub sync_engine: SyncEngine,
    pub availability: AvailabilityService,
    pub sync_defaults: SyncDefaults,
}
