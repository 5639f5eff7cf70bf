//! Cron scheduler for background maintenance.
//!
//! The periodic sync itself is owned by the
//! [`SyncEngine`](crate::service::sync::SyncEngine); this scheduler runs the jobs around
//! it: integrity audits, pruning of the mirrored cache tables and roster cache warming.

pub mod config;
pub mod maintenance;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::Error, service::cache::roster::ConferenceRosterCache};

use self::maintenance::{audit_integrity, prune_cache_mirrors, warm_roster_cache};

/// Shared handles cloned into every job.
#[derive(Clone)]
pub struct JobContext {
    pub db: DatabaseConnection,
    pub rosters: ConferenceRosterCache,
}

macro_rules! add_cron_job {
    ($sched:expr, $cron:expr, $ctx:expr, $fn:expr, $name:expr) => {{
        let ctx_clone = $ctx.clone();

        $sched
            .add(Job::new_async($cron, move |_, _| {
                let ctx = ctx_clone.clone();

                Box::pin(async move {
                    match $fn(&ctx).await {
                        Ok(count) => tracing::info!("Completed {}: {} item(s)", $name, count),
                        Err(e) => tracing::error!("Error running {}: {:?}", $name, e),
                    }
                })
            })?)
            .await?;
    }};
}

/// Initialize and start the cron job scheduler
///
/// # Returns
/// The running scheduler, to be shut down with the server
pub async fn start_scheduler(ctx: JobContext) -> Result<JobScheduler, Error> {
    let sched = JobScheduler::new().await?;

    add_cron_job!(
        sched,
        config::integrity::CRON_EXPRESSION,
        ctx,
        audit_integrity,
        "integrity audit"
    );

    add_cron_job!(
        sched,
        config::cache_mirror::CRON_EXPRESSION,
        ctx,
        prune_cache_mirrors,
        "cache mirror pruning"
    );

    add_cron_job!(
        sched,
        config::roster_cache::CRON_EXPRESSION,
        ctx,
        warm_roster_cache,
        "roster cache warming"
    );

    sched.start().await?;

    Ok(sched)
}
