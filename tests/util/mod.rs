//! Shared helpers for integration tests.


use std::sync::Arc;

use huddle::{
    model::{
        app::{AppState, SyncDefaults},
        sync::{ConferenceTarget, SyncConfiguration},
    },
    service::{availability::AvailabilityService, sync::SyncEngine},
    source::FantasySource,
};
use huddle_test_utils::{
    constant::{TEST_SEASON_ID, TEST_WEEK},
    TestContext,
};

pub use source::GatedSource;

/// Sync defaults with millisecond retry delays so failing fetches don't slow tests down.
pub fn test_sync_defaults() -> SyncDefaults {
    SyncDefaults {
        week: TEST_WEEK,
        batch_size: 2,
        retry_attempts: 2,
        retry_delay_ms: 1,
    }
}

/// Extension trait wiring the crate's services onto a [`TestContext`]
pub trait TestContextExt {
    /// Sleeper client of the context as a fantasy source
    fn source(&self) -> Arc<dyn FantasySource>;

    /// Application state backed by the context's database and mock server
    fn into_app_state(&self) -> AppState;

    /// Engine with its own availability service
    fn sync_engine(&self) -> (SyncEngine, AvailabilityService);

    /// Sync configuration for the given conferences in the test season and week
    fn sync_configuration(&self, conferences: Vec<ConferenceTarget>) -> SyncConfiguration;
}

impl TestContextExt for TestContext {
    fn source(&self) -> Arc<dyn FantasySource> {
        Arc::new(self.sleeper_client.clone())
    }

    fn into_app_state(&self) -> AppState {
        let (sync_engine, availability) = self.sync_engine();

        AppState {
            db: self.db.clone(),
            sync_engine,
            availability,
            sync_defaults: test_sync_defaults(),
        }
    }

    fn sync_engine(&self) -> (SyncEngine, AvailabilityService) {
        let availability = AvailabilityService::new(self.db.clone());
        let engine = SyncEngine::new(self.db.clone(), self.source(), Some(availability.clone()));

        (engine, availability)
    }

    fn sync_configuration(&self, conferences: Vec<ConferenceTarget>) -> SyncConfiguration {
        let mut config = test_sync_defaults().configuration(conferences, TEST_SEASON_ID, None);
        config.batch_delay_ms = 0;

        config
    }
}
