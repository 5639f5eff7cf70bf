//! Maintenance jobs run by the cron scheduler.
//!
//! Each job returns the number of items it handled so the scheduler can log it.

use crate::{
    data::{
        availability_cache::AvailabilityCacheRepository, cache_snapshot::CacheSnapshotRepository,
        conference::ConferenceRepository, season::SeasonRepository,
    },
    error::Error,
    scheduler::JobContext,
    service::{
        cache::config::{AVAILABILITY_CACHE_POLICY, ROSTER_CACHE_POLICY},
        integrity::IntegrityService,
    },
    util::time,
};

/// Audits the store and returns the number of issue groups found.
///
/// Only reports; repairs are left to an explicit cleanup request.
pub async fn audit_integrity(ctx: &JobContext) -> Result<usize, Error> {
    let report = IntegrityService::new(&ctx.db).audit().await?;

    let issues = report.orphaned_records.count()
        + report.duplicate_team_seasons.len()
        + report.invalid_relationships.len()
        + report.missing_junctions.len()
        + report.inactive_junction_ids.len()
        + report.duplicate_roster_entries.len();

    for recommendation in &report.recommendations {
        tracing::warn!("Integrity audit: {}", recommendation);
    }

    Ok(issues)
}

/// Deletes mirrored cache rows older than their cache's hard expiry.
///
/// Such rows would be rejected on rehydration anyway.
pub async fn prune_cache_mirrors(ctx: &JobContext) -> Result<usize, Error> {
    let now = time::now();

    let availability = AvailabilityCacheRepository::new(&ctx.db)
        .delete_updated_before(time::cutoff(now, AVAILABILITY_CACHE_POLICY.hard_expire))
        .await?;
    let snapshots = CacheSnapshotRepository::new(&ctx.db)
        .delete_stored_before(time::cutoff(now, ROSTER_CACHE_POLICY.hard_expire))
        .await?;

    Ok((availability + snapshots) as usize)
}

/// Reloads the rosters of conferences of the current season whose entry isn't fresh.
///
/// Keeps roster reads from loading synchronously after an entry expires. Entries a sync
/// or a recent read already refreshed are skipped. Leagues that fail keep their previous
/// entry and are not counted.
pub async fn warm_roster_cache(ctx: &JobContext) -> Result<usize, Error> {
    let Some(season) = SeasonRepository::new(&ctx.db).find_current().await? else {
        return Ok(0);
    };

    let mut league_ids = Vec::new();
    for conference in ConferenceRepository::new(&ctx.db)
        .get_by_season(season.id)
        .await?
    {
        if ctx.rosters.needs_refresh(&conference.external_league_id).await {
            league_ids.push(conference.external_league_id);
        }
    }
    if league_ids.is_empty() {
        return Ok(0);
    }

    let refreshed = ctx
        .rosters
        .refresh_all(&league_ids)
        .await
        .into_iter()
        .filter(|(_, result)| result.is_ok())
        .count();

    Ok(refreshed)
}
