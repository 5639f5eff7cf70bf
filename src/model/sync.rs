//! Synchronization engine configuration, progress events and results.

use std::{fmt, sync::Arc, time::Duration};

use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::RosterStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::retry::RetryPolicy;

/// Default number of players upserted per batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;
/// Default number of attempts for each external fetch.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
/// Default base delay between retry attempts.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
/// Default pause between player batches.
pub const DEFAULT_BATCH_DELAY_MS: u64 = 100;

/// A conference the engine synchronizes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConferenceTarget {
    /// Internal conference id
    pub id: i32,
    /// Sleeper league id of the conference
    pub external_league_id: String,
    /// Display name, used in progress events and logs
    pub name: String,
}

impl From<entity::conference::Model> for ConferenceTarget {
    fn from(conference: entity::conference::Model) -> Self {
        Self {
            id: conference.id,
            external_league_id: conference.external_league_id,
            name: conference.name,
        }
    }
}

/// How a status disagreement between the store and the external snapshot is settled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStrategy {
    /// The side that changed most recently wins; the store wins if it was written after
    /// the snapshot was observed.
    #[default]
    LatestWins,
    /// The external snapshot always wins.
    ApiPriority,
    /// Neither side is applied; the conflict is reported in [`SyncResult::conflicts`].
    ManualReview,
}

/// Side chosen by a conflict resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictWinner {
    Local,
    Remote,
}

/// The store's view of a contested roster slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocalClaim {
    pub entry_id: i32,
    pub team_id: i32,
    pub player_id: i32,
    #[schema(value_type = String)]
    pub status: RosterStatus,
    pub updated_at: NaiveDateTime,
}

/// The external snapshot's view of a contested roster slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RemoteClaim {
    pub team_id: i32,
    pub player_id: i32,
    #[schema(value_type = String)]
    pub status: RosterStatus,
    pub observed_at: NaiveDateTime,
}

/// Custom resolver, takes precedence over [`ConflictStrategy`] when set.
pub type ConflictResolver = Arc<dyn Fn(&LocalClaim, &RemoteClaim) -> ConflictWinner + Send + Sync>;

/// Conflict-resolution policy applied during reconciliation.
#[derive(Clone, Default)]
pub struct ConflictResolution {
    pub strategy: ConflictStrategy,
    pub resolver: Option<ConflictResolver>,
}

impl ConflictResolution {
    pub fn new(strategy: ConflictStrategy) -> Self {
        Self {
            strategy,
            resolver: None,
        }
    }

    /// Uses `resolver` instead of the built-in strategy.
    pub fn with_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&LocalClaim, &RemoteClaim) -> ConflictWinner + Send + Sync + 'static,
    {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Decides a contested slot, or `None` when it must be held for manual review.
    pub fn resolve(&self, local: &LocalClaim, remote: &RemoteClaim) -> Option<ConflictWinner> {
        if let Some(resolver) = &self.resolver {
            return Some(resolver(local, remote));
        }

        match self.strategy {
            ConflictStrategy::ApiPriority => Some(ConflictWinner::Remote),
            ConflictStrategy::ManualReview => None,
            ConflictStrategy::LatestWins => {
                if local.updated_at > remote.observed_at {
                    Some(ConflictWinner::Local)
                } else {
                    Some(ConflictWinner::Remote)
                }
            }
        }
    }
}

impl fmt::Debug for ConflictResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConflictResolution")
            .field("strategy", &self.strategy)
            .field("resolver", &self.resolver.as_ref().map(|_| "custom"))
            .finish()
    }
}

/// Everything a full synchronization needs to know.
#[derive(Clone, Debug)]
pub struct SyncConfiguration {
    pub conferences: Vec<ConferenceTarget>,
    pub season_id: i32,
    pub week: i32,
    pub conflict_resolution: ConflictResolution,
    pub batch_size: usize,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub batch_delay_ms: u64,
}

impl SyncConfiguration {
    /// Configuration with default batching, retry and conflict settings.
    pub fn new(conferences: Vec<ConferenceTarget>, season_id: i32, week: i32) -> Self {
        Self {
            conferences,
            season_id,
            week,
            conflict_resolution: ConflictResolution::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            batch_delay_ms: DEFAULT_BATCH_DELAY_MS,
        }
    }

    /// Retry policy derived from `retry_attempts` and `retry_delay_ms`.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_attempts,
            Duration::from_millis(self.retry_delay_ms),
        )
    }
}

/// Stage of a running synchronization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    Players,
    Rosters,
    Complete,
}

/// Progress event emitted after every unit of work.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SyncProgress {
    pub stage: SyncStage,
    /// Units completed in the current stage
    pub progress: usize,
    /// Units in the current stage
    pub total: usize,
    /// Player or conference the last unit concerned
    pub current_item: Option<String>,
}

/// A status disagreement held back for manual review.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SyncConflict {
    pub conference_id: i32,
    pub local: LocalClaim,
    pub remote: RemoteClaim,
}

/// Outcome of one full synchronization.
///
/// `success` is true iff `errors` is empty; per-item failures are reported here rather
/// than aborting the run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SyncResult {
    pub success: bool,
    pub records_processed: usize,
    pub errors: Vec<String>,
    pub duration_ms: u64,
    pub api_calls: usize,
    pub conflicts: Vec<SyncConflict>,
}

/// Snapshot of the engine's state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SyncState {
    pub is_running: bool,
    pub is_automatic: bool,
    pub last_progress: Option<SyncProgress>,
    pub last_result: Option<SyncResult>,
    pub last_sync_at: Option<NaiveDateTime>,
}
