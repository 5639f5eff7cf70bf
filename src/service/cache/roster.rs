//! Per-conference cache of league roster snapshots.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use sea_orm::DatabaseConnection;
use tokio_util::sync::CancellationToken;

use crate::{
    error::{cache::CacheError, Error},
    model::source::RosterSnapshot,
    service::{
        cache::{
            config::{
                roster_retry_policy, ROSTER_CACHE_POLICY, ROSTER_SNAPSHOT_PREFIX,
                ROSTER_SNAPSHOT_VERSION,
            },
            mirror::SnapshotMirror,
            CacheLookup, CacheRead, CacheStats, SwrCache,
        },
        retry::{RetryContext, RetryPolicy},
    },
    source::FantasySource,
};

/// Fetches the rosters of a league, retrying transient failures under `policy`.
pub async fn fetch_rosters(
    source: &Arc<dyn FantasySource>,
    league_id: &str,
    policy: RetryPolicy,
) -> Result<Vec<RosterSnapshot>, Error> {
    let mut ctx: RetryContext<()> = RetryContext::with_policy(policy);
    let description = format!("roster fetch for league {}", league_id);

    ctx.execute_with_retry(&description, |_| {
        let source = source.clone();
        let league_id = league_id.to_string();

        Box::pin(async move { source.fetch_league_rosters(&league_id).await })
    })
    .await
}

struct RosterLoader {
    source: Arc<dyn FantasySource>,
    policy: RetryPolicy,
}

#[async_trait]
impl super::CacheLoader<String, Vec<RosterSnapshot>> for RosterLoader {
    async fn load(
        &self,
        league_id: &String,
        cancel: CancellationToken,
    ) -> Result<Vec<RosterSnapshot>, Error> {
        tokio::select! {
            _ = cancel.cancelled() => Err(CacheError::Cancelled(league_id.clone()).into()),
            result = fetch_rosters(&self.source, league_id, self.policy) => result,
        }
    }
}

/// Roster snapshots keyed by Sleeper league id, one independent entry per conference.
#[derive(Clone)]
pub struct ConferenceRosterCache {
    source: Arc<dyn FantasySource>,
    cache: SwrCache<String, Vec<RosterSnapshot>>,
}

impl ConferenceRosterCache {
    /// In-memory roster cache.
    pub fn new(source: Arc<dyn FantasySource>) -> Self {
        let loader = Arc::new(RosterLoader {
            source: source.clone(),
            policy: roster_retry_policy(),
        });

        Self {
            source,
            cache: SwrCache::new("roster", ROSTER_CACHE_POLICY, loader),
        }
    }

    /// Roster cache mirrored to the `cache_snapshot` table.
    pub fn with_mirror(source: Arc<dyn FantasySource>, db: DatabaseConnection) -> Self {
        let loader = Arc::new(RosterLoader {
            source: source.clone(),
            policy: roster_retry_policy(),
        });
        let mirror = Arc::new(SnapshotMirror::new(db, ROSTER_SNAPSHOT_PREFIX));

        Self {
            source,
            cache: SwrCache::with_mirror(
                "roster",
                ROSTER_CACHE_POLICY,
                loader,
                mirror,
                ROSTER_SNAPSHOT_VERSION,
            ),
        }
    }

    /// Rosters of a league, served stale-while-revalidate.
    pub async fn get(&self, league_id: &str) -> Result<CacheRead<Vec<RosterSnapshot>>, Error> {
        self.cache.get(&league_id.to_string()).await
    }

    /// Whether the entry of a league is missing or no longer fresh.
    pub async fn needs_refresh(&self, league_id: &str) -> bool {
        !matches!(
            self.cache.peek(&league_id.to_string()).await,
            CacheLookup::Fresh(_)
        )
    }

    /// Fetches the rosters of a league bypassing the cache and stores the result.
    ///
    /// Used by synchronization, which must reconcile against the current snapshot.
    pub async fn fetch_fresh(
        &self,
        league_id: &str,
        policy: RetryPolicy,
    ) -> Result<Vec<RosterSnapshot>, Error> {
        let rosters = fetch_rosters(&self.source, league_id, policy).await?;
        self.cache.set(&league_id.to_string(), rosters.clone()).await;

        Ok(rosters)
    }

    /// Reloads every league independently.
    ///
    /// A league whose reload fails keeps its previous entry.
    ///
    /// # Returns
    /// Per league, the number of rosters loaded or the error that stopped it
    pub async fn refresh_all(&self, league_ids: &[String]) -> Vec<(String, Result<usize, Error>)> {
        let reloads = league_ids.iter().map(|league_id| async move {
            let result = self.cache.reload(league_id).await.map(|rosters| rosters.len());
            if let Err(e) = &result {
                tracing::warn!("Failed to refresh rosters of league {}: {}", league_id, e);
            }

            (league_id.clone(), result)
        });

        join_all(reloads).await
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
