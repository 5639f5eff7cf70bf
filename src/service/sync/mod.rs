//! Synchronization of players and conference rosters from the external source.
//!
//! A full sync runs the player stage first, then the roster stage of every conference in
//! turn. At most one sync runs at a time per engine; a second caller is rejected
//! immediately with [`SyncError::SyncInProgress`]. Stops requested through
//! [`SyncEngine::force_stop`] are observed between player batches and between
//! conferences.

mod player;
pub mod progress;
pub mod reconcile;
mod roster;

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::{
    error::{sync::SyncError, Error},
    model::sync::{
        SyncConfiguration, SyncConflict, SyncProgress, SyncResult, SyncStage, SyncState,
    },
    service::{availability::AvailabilityService, cache::roster::ConferenceRosterCache},
    source::FantasySource,
    util::time,
};

use self::progress::{ProgressHub, ProgressSubscription};

/// Borrowed view of the engine handed to the stages of one run.
pub(crate) struct SyncContext<'a> {
    pub db: &'a DatabaseConnection,
    pub source: &'a Arc<dyn FantasySource>,
    pub rosters: &'a ConferenceRosterCache,
    pub progress: &'a ProgressHub,
    pub config: &'a SyncConfiguration,
    stop_requested: &'a AtomicBool,
}

impl SyncContext<'_> {
    pub fn stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }
}

/// What a stage contributed to the run's [`SyncResult`].
#[derive(Debug, Default)]
pub(crate) struct StageOutcome {
    pub records_processed: usize,
    pub errors: Vec<String>,
    pub api_calls: usize,
    pub conflicts: Vec<SyncConflict>,
    pub stopped: bool,
}

impl StageOutcome {
    fn merge_into(self, result: &mut SyncResult) {
        result.records_processed += self.records_processed;
        result.errors.extend(self.errors);
        result.api_calls += self.api_calls;
        result.conflicts.extend(self.conflicts);
    }
}

/// Clears the running flag when a run ends, whichever way it ends.
struct RunningGuard<'a> {
    running: &'a AtomicBool,
}

impl<'a> RunningGuard<'a> {
    fn acquire(running: &'a AtomicBool) -> Option<Self> {
        running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { running })
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

struct AutomaticSync {
    scheduler: JobScheduler,
    job_id: Uuid,
}

#[derive(Default)]
struct RunHistory {
    last_result: Option<SyncResult>,
    last_sync_at: Option<NaiveDateTime>,
}

struct EngineInner {
    db: DatabaseConnection,
    source: Arc<dyn FantasySource>,
    rosters: ConferenceRosterCache,
    availability: Option<AvailabilityService>,
    running: AtomicBool,
    stop_requested: AtomicBool,
    progress: ProgressHub,
    history: Mutex<RunHistory>,
    automatic: Mutex<Option<AutomaticSync>>,
}

/// Synchronization engine, cheap to clone; clones share the single-flight guard.
#[derive(Clone)]
pub struct SyncEngine {
    inner: Arc<EngineInner>,
}

impl SyncEngine {
    /// Creates an engine writing to `db` and reading from `source`.
    ///
    /// # Arguments
    /// - `db` - Store the engine reconciles into
    /// - `source` - External fantasy data source
    /// - `availability` - Availability service whose cache is dropped after every run
    pub fn new(
        db: DatabaseConnection,
        source: Arc<dyn FantasySource>,
        availability: Option<AvailabilityService>,
    ) -> Self {
        let rosters = ConferenceRosterCache::with_mirror(source.clone(), db.clone());

        Self {
            inner: Arc::new(EngineInner {
                db,
                source,
                rosters,
                availability,
                running: AtomicBool::new(false),
                stop_requested: AtomicBool::new(false),
                progress: ProgressHub::new(),
                history: Mutex::new(RunHistory::default()),
                automatic: Mutex::new(None),
            }),
        }
    }

    /// Roster cache the engine refreshes while syncing.
    pub fn roster_cache(&self) -> &ConferenceRosterCache {
        &self.inner.rosters
    }

    /// Runs a full synchronization.
    ///
    /// Per-item failures are collected into the result instead of aborting the run, so a
    /// run that completes returns `Ok` even when `success` is false.
    ///
    /// # Returns
    /// - `Ok(SyncResult)` - The run completed or was stopped
    /// - `Err(Error::SyncError)` - Another run holds the single-flight guard
    pub async fn full_sync(&self, config: &SyncConfiguration) -> Result<SyncResult, Error> {
        let Some(_guard) = RunningGuard::acquire(&self.inner.running) else {
            return Err(SyncError::SyncInProgress.into());
        };
        self.inner.stop_requested.store(false, Ordering::Release);

        let started = Instant::now();
        tracing::info!(
            "Starting full sync of season {} week {} across {} conference(s)",
            config.season_id,
            config.week,
            config.conferences.len()
        );

        let ctx = SyncContext {
            db: &self.inner.db,
            source: &self.inner.source,
            rosters: &self.inner.rosters,
            progress: &self.inner.progress,
            config,
            stop_requested: &self.inner.stop_requested,
        };

        let mut result = SyncResult::default();
        player::sync_players(&ctx).await.merge_into(&mut result);

        let conference_count = config.conferences.len();
        for (index, conference) in config.conferences.iter().enumerate() {
            if ctx.stop_requested() {
                let message = format!(
                    "Sync stopped before conference {} ({} of {})",
                    conference.name,
                    index + 1,
                    conference_count
                );
                tracing::info!("{}", message);
                result.errors.push(message);
                break;
            }

            roster::sync_conference(&ctx, conference)
                .await
                .merge_into(&mut result);

            self.inner.progress.emit(SyncProgress {
                stage: SyncStage::Rosters,
                progress: index + 1,
                total: conference_count,
                current_item: Some(conference.name.clone()),
            });
        }

        if let Some(availability) = &self.inner.availability {
            availability.invalidate_all().await;
        }

        result.duration_ms = started.elapsed().as_millis() as u64;
        result.success = result.errors.is_empty();

        self.inner.progress.emit(SyncProgress {
            stage: SyncStage::Complete,
            progress: result.records_processed,
            total: result.records_processed,
            current_item: None,
        });

        tracing::info!(
            "Full sync finished in {} ms: {} records, {} api calls, {} errors, {} conflicts",
            result.duration_ms,
            result.records_processed,
            result.api_calls,
            result.errors.len(),
            result.conflicts.len()
        );

        let mut history = self.inner.history.lock().await;
        history.last_result = Some(result.clone());
        history.last_sync_at = Some(time::now());

        Ok(result)
    }

    /// Runs one sync now and then every `interval` until stopped.
    ///
    /// Ticks that find a sync still running are skipped and logged. Starting again
    /// replaces the previous schedule.
    pub async fn start_automatic_sync(
        &self,
        config: SyncConfiguration,
        interval: Duration,
    ) -> Result<(), Error> {
        self.stop_automatic_sync().await?;

        let config = Arc::new(config);
        let mut scheduler = JobScheduler::new().await?;

        let engine = self.clone();
        let job_config = Arc::clone(&config);
        let job = Job::new_repeated_async(interval, move |_, _| {
            let engine = engine.clone();
            let config = Arc::clone(&job_config);

            Box::pin(async move { engine.run_scheduled(&config).await })
        })?;

        let job_id = scheduler.add(job).await?;
        if let Err(e) = scheduler.start().await {
            scheduler.shutdown().await.ok();
            return Err(e.into());
        }

        *self.inner.automatic.lock().await = Some(AutomaticSync { scheduler, job_id });

        tracing::info!("Automatic sync started with an interval of {:?}", interval);

        let engine = self.clone();
        tokio::spawn(async move { engine.run_scheduled(&config).await });

        Ok(())
    }

    /// Cancels the automatic schedule. A sync already running is not interrupted.
    pub async fn stop_automatic_sync(&self) -> Result<(), Error> {
        let Some(mut automatic) = self.inner.automatic.lock().await.take() else {
            return Ok(());
        };

        automatic.scheduler.remove(&automatic.job_id).await?;
        automatic.scheduler.shutdown().await?;

        tracing::info!("Automatic sync stopped");

        Ok(())
    }

    /// Asks a running sync to stop at its next checkpoint.
    ///
    /// # Returns
    /// Whether a sync was running when the stop was requested
    pub fn force_stop(&self) -> bool {
        let was_running = self.inner.running.load(Ordering::Acquire);
        if was_running {
            self.inner.stop_requested.store(true, Ordering::Release);
            tracing::info!("Stop requested for running sync");
        }

        was_running
    }

    /// Registers a progress callback until the returned subscription is dropped.
    pub fn on_progress<F>(&self, callback: F) -> ProgressSubscription
    where
        F: Fn(&SyncProgress) + Send + Sync + 'static,
    {
        self.inner.progress.subscribe(callback)
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    pub async fn get_sync_state(&self) -> SyncState {
        let history = self.inner.history.lock().await;

        SyncState {
            is_running: self.is_running(),
            is_automatic: self.inner.automatic.lock().await.is_some(),
            last_progress: self.inner.progress.last(),
            last_result: history.last_result.clone(),
            last_sync_at: history.last_sync_at,
        }
    }

    async fn run_scheduled(&self, config: &SyncConfiguration) {
        match self.full_sync(config).await {
            Ok(result) if result.success => {
                tracing::debug!("Scheduled sync completed without errors")
            }
            Ok(result) => tracing::warn!(
                "Scheduled sync completed with {} error(s), first: {}",
                result.errors.len(),
                result.errors.first().map(String::as_str).unwrap_or_default()
            ),
            Err(Error::SyncError(SyncError::SyncInProgress)) => {
                tracing::info!("Skipping scheduled sync, previous sync still running")
            }
            Err(e) => tracing::error!("Scheduled sync failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests;
