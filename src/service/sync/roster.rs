//! Roster stage of a full synchronization, run once per conference.

use std::collections::{BTreeMap, HashMap, HashSet};

use entity::sea_orm_active_enums::{RosterStatus, SyncType};

use crate::{
    data::{
        player::PlayerRepository,
        roster_entry::RosterEntryRepository,
        sync_status::{SyncStatusRepository, SyncStatusUpdate},
        team::TeamRepository,
        team_conference::TeamConferenceRepository,
        team_season::TeamSeasonRepository,
    },
    error::Error,
    model::{
        source::{LeagueUserSnapshot, RosterSnapshot},
        sync::{ConferenceTarget, SyncProgress, SyncStage},
    },
    service::{
        retry::RetryContext,
        roster::RosterService,
        sync::{
            reconcile::{DesiredSlot, Reconciler},
            StageOutcome, SyncContext,
        },
    },
    util::time,
};

/// Empty starter slots are reported with this placeholder id.
pub(super) const EMPTY_SLOT: &str = "0";

/// Status a roster snapshot assigns to one of its players.
pub(super) fn classify(roster: &RosterSnapshot, external_player_id: &str) -> RosterStatus {
    let contains = |ids: &[String]| ids.iter().any(|id| id == external_player_id);

    if contains(roster.starter_ids()) {
        RosterStatus::Active
    } else if contains(roster.reserve_ids()) {
        RosterStatus::Ir
    } else if contains(roster.taxi_ids()) {
        RosterStatus::Taxi
    } else {
        RosterStatus::Bench
    }
}

/// Every external player id held by a roster, in any slot.
pub(super) fn rostered_ids(roster: &RosterSnapshot) -> Vec<&str> {
    let mut seen = HashSet::new();

    roster
        .player_ids()
        .iter()
        .chain(roster.starter_ids())
        .chain(roster.reserve_ids())
        .chain(roster.taxi_ids())
        .map(String::as_str)
        .filter(|id| *id != EMPTY_SLOT && seen.insert(*id))
        .collect()
}

/// Synchronizes the rosters of one conference.
///
/// Failures stay inside the returned outcome so other conferences are unaffected.
pub(super) async fn sync_conference(
    ctx: &SyncContext<'_>,
    conference: &ConferenceTarget,
) -> StageOutcome {
    let started_at = time::now();
    let mut outcome = StageOutcome::default();

    tracing::info!(
        "Starting roster sync for conference {} ({})",
        conference.name,
        conference.external_league_id
    );

    if let Err(e) = sync_rosters(ctx, conference, &mut outcome).await {
        outcome.errors.push(format!(
            "Roster sync of conference {} failed: {}",
            conference.name, e
        ));
    }

    record_status(ctx, conference, &outcome, started_at).await;

    tracing::info!(
        "Finished roster sync for conference {}: {} records, {} errors, {} conflicts",
        conference.name,
        outcome.records_processed,
        outcome.errors.len(),
        outcome.conflicts.len()
    );

    outcome
}

async fn sync_rosters(
    ctx: &SyncContext<'_>,
    conference: &ConferenceTarget,
    outcome: &mut StageOutcome,
) -> Result<(), Error> {
    let league_id = conference.external_league_id.as_str();
    let policy = ctx.config.retry_policy();

    outcome.api_calls += 1;
    let rosters = ctx.rosters.fetch_fresh(league_id, policy).await?;
    let observed_at = time::now();

    outcome.api_calls += 1;
    let users = fetch_users(ctx, league_id).await;

    let junctions: HashMap<i32, entity::team_conference::Model> =
        TeamConferenceRepository::new(ctx.db)
            .get_active_by_conference(conference.id)
            .await?
            .into_iter()
            .filter_map(|junction| junction.external_roster_id.map(|id| (id, junction)))
            .collect();

    let all_ids: Vec<String> = rosters
        .iter()
        .flat_map(rostered_ids)
        .map(str::to_string)
        .collect();
    let players = PlayerRepository::new(ctx.db)
        .find_by_external_ids(&all_ids)
        .await?;

    let mut desired: BTreeMap<i32, DesiredSlot> = BTreeMap::new();
    let mut teams_in_scope: HashSet<i32> = HashSet::new();

    for roster in &rosters {
        let Some(junction) = junctions.get(&roster.roster_id) else {
            let message = format!(
                "Conference {}: roster {} is not mapped to a team",
                conference.name, roster.roster_id
            );
            tracing::warn!("{}", message);
            outcome.errors.push(message);
            continue;
        };
        let team_id = junction.team_id;
        teams_in_scope.insert(team_id);

        update_team(ctx, conference, roster, junction, users.as_deref(), outcome).await;

        for external_id in rostered_ids(roster) {
            let Some(player) = players.get(external_id) else {
                let message = format!(
                    "Conference {}: unknown player {} on roster {}",
                    conference.name, external_id, roster.roster_id
                );
                tracing::warn!("{}", message);
                outcome.errors.push(message);
                continue;
            };

            let slot = DesiredSlot {
                team_id,
                status: classify(roster, external_id),
            };
            if let Some(previous) = desired.insert(player.id, slot) {
                tracing::warn!(
                    "Conference {}: player {} listed on teams {} and {}, keeping {}",
                    conference.name,
                    external_id,
                    previous.team_id,
                    team_id,
                    team_id
                );
            }
        }

        outcome.records_processed += 1;
        ctx.progress.emit(SyncProgress {
            stage: SyncStage::Rosters,
            progress: outcome.records_processed,
            total: rosters.len(),
            current_item: Some(format!("{} roster {}", conference.name, roster.roster_id)),
        });
    }

    let current: Vec<entity::roster_entry::Model> = RosterEntryRepository::new(ctx.db)
        .get_current_by_conference(conference.id, ctx.config.season_id)
        .await?
        .into_iter()
        .filter(|entry| teams_in_scope.contains(&entry.team_id))
        .collect();

    let reconciler = Reconciler {
        conference_id: conference.id,
        season_id: ctx.config.season_id,
        week: ctx.config.week,
        resolution: &ctx.config.conflict_resolution,
        observed_at,
    };
    let plan = reconciler.plan(&desired, &current);

    tracing::debug!(
        "Conference {}: {} roster actions, {} conflicts for review",
        conference.name,
        plan.actions.len(),
        plan.conflicts.len()
    );

    let roster_service = RosterService::new(ctx.db);
    for action in &plan.actions {
        if let Err(e) = roster_service.apply(action).await {
            outcome.errors.push(format!(
                "Conference {}: failed to apply {:?}: {}",
                conference.name, action, e
            ));
        }
    }
    outcome.conflicts.extend(plan.conflicts);

    Ok(())
}

async fn fetch_users(ctx: &SyncContext<'_>, league_id: &str) -> Option<Vec<LeagueUserSnapshot>> {
    let mut retry: RetryContext<()> = RetryContext::with_policy(ctx.config.retry_policy());
    let description = format!("user fetch for league {}", league_id);

    let result = retry
        .execute_with_retry(&description, |_| {
            let source = ctx.source.clone();
            let league_id = league_id.to_string();

            Box::pin(async move { source.fetch_league_users(&league_id).await })
        })
        .await;

    match result {
        Ok(users) => Some(users),
        Err(e) => {
            tracing::warn!(
                "Failed to fetch users of league {}, owner names not refreshed: {}",
                league_id,
                e
            );
            None
        }
    }
}

/// Refreshes standings, waiver position and owner of the team behind a roster.
async fn update_team(
    ctx: &SyncContext<'_>,
    conference: &ConferenceTarget,
    roster: &RosterSnapshot,
    junction: &entity::team_conference::Model,
    users: Option<&[LeagueUserSnapshot]>,
    outcome: &mut StageOutcome,
) {
    let team_id = junction.team_id;

    if let Err(e) = TeamSeasonRepository::new(ctx.db)
        .upsert_standings(
            team_id,
            conference.id,
            ctx.config.season_id,
            &roster.settings,
        )
        .await
    {
        outcome.errors.push(format!(
            "Conference {}: failed to update standings of team {}: {}",
            conference.name, team_id, e
        ));
    }

    if let Err(e) = TeamConferenceRepository::new(ctx.db)
        .update_waiver_position(junction, roster.settings.waiver_position)
        .await
    {
        outcome.errors.push(format!(
            "Conference {}: failed to update waiver position of team {}: {}",
            conference.name, team_id, e
        ));
    }

    let owner = roster.owner_id.as_deref().and_then(|owner_id| {
        users?
            .iter()
            .find(|user| user.user_id == owner_id)
            .map(|user| (owner_id, user))
    });

    if let Some((owner_id, user)) = owner {
        let owner_name = user.display_name.as_deref().unwrap_or(owner_id);
        if let Err(e) = TeamRepository::new(ctx.db)
            .update_owner(team_id, owner_name, owner_id)
            .await
        {
            tracing::warn!("Failed to update owner of team {}: {}", team_id, e);
        }
    }
}

async fn record_status(
    ctx: &SyncContext<'_>,
    conference: &ConferenceTarget,
    outcome: &StageOutcome,
    started_at: chrono::NaiveDateTime,
) {
    let completed_at = time::now();
    let update = SyncStatusUpdate {
        sync_type: SyncType::Rosters,
        conference_id: Some(conference.id),
        season_id: ctx.config.season_id,
        week: ctx.config.week,
        started_at,
        completed_at,
        duration_ms: (completed_at - started_at).num_milliseconds(),
        records_processed: outcome.records_processed as i32,
        error_count: outcome.errors.len() as i32,
        last_error: outcome.errors.last().cloned(),
    };

    if let Err(e) = SyncStatusRepository::new(ctx.db).upsert(update).await {
        tracing::warn!(
            "Failed to record roster sync status of conference {}: {}",
            conference.name,
            e
        );
    }
}
