//! Player availability derived from current roster state.
//!
//! A player is available in a season/week when no current roster entry at or before that
//! week holds them. Records are served through a stale-while-revalidate cache mirrored to
//! the `availability_cache` table.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::Arc,
};

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tokio_util::sync::CancellationToken;

use crate::{
    data::{
        availability_cache::AvailabilityCacheRepository, player::PlayerRepository,
        roster_entry::RosterEntryRepository, team_conference::TeamConferenceRepository,
    },
    error::Error,
    model::availability::{
        AvailabilityBreakdown, AvailabilityFilter, AvailabilityKey, AvailabilityRecord,
        AvailabilityStats, ConflictingOwner, OwnershipConflict, OwnershipPolicy,
    },
    service::cache::{
        config::AVAILABILITY_CACHE_POLICY,
        mirror::{AvailabilityMirror, AVAILABILITY_MIRROR_VERSION},
        CacheLoader, CacheLookup, CachePolicy, SwrCache,
    },
    util::time,
};

const STATS_PAGE_SIZE: u64 = 500;

struct AvailabilityLoader {
    db: DatabaseConnection,
}

#[async_trait]
impl CacheLoader<AvailabilityKey, AvailabilityRecord> for AvailabilityLoader {
    async fn load(
        &self,
        key: &AvailabilityKey,
        _cancel: CancellationToken,
    ) -> Result<AvailabilityRecord, Error> {
        compute_availability(&self.db, key).await
    }
}

#[derive(Clone)]
pub struct AvailabilityService {
    db: DatabaseConnection,
    cache: SwrCache<AvailabilityKey, AvailabilityRecord>,
}

impl AvailabilityService {
    /// Creates the service with the default cache policy and the database mirror.
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_policy(db, AVAILABILITY_CACHE_POLICY)
    }

    pub fn with_policy(db: DatabaseConnection, policy: CachePolicy) -> Self {
        let loader = Arc::new(AvailabilityLoader { db: db.clone() });
        let mirror = Arc::new(AvailabilityMirror::new(db.clone()));

        Self {
            cache: SwrCache::with_mirror(
                "availability",
                policy,
                loader,
                mirror,
                AVAILABILITY_MIRROR_VERSION,
            ),
            db,
        }
    }

    /// Availability of a player across every conference.
    ///
    /// # Arguments
    /// - `force_refresh` - Recompute from roster state even when a cached record exists
    pub async fn calculate_availability(
        &self,
        player_id: i32,
        season_id: i32,
        week: i32,
        force_refresh: bool,
    ) -> Result<AvailabilityRecord, Error> {
        let key = AvailabilityKey {
            player_id,
            season_id,
            week,
            conference_id: None,
        };

        self.lookup(&key, force_refresh).await
    }

    /// Availability of a player within one conference.
    pub async fn calculate_conference_availability(
        &self,
        conference_id: i32,
        player_id: i32,
        season_id: i32,
        week: i32,
        force_refresh: bool,
    ) -> Result<AvailabilityRecord, Error> {
        let key = AvailabilityKey {
            player_id,
            season_id,
            week,
            conference_id: Some(conference_id),
        };

        self.lookup(&key, force_refresh).await
    }

    async fn lookup(
        &self,
        key: &AvailabilityKey,
        force_refresh: bool,
    ) -> Result<AvailabilityRecord, Error> {
        if force_refresh {
            return self.cache.reload(key).await;
        }

        Ok(self.cache.get(key).await?.value)
    }

    /// Aggregates availability of every current player matching `filter`.
    ///
    /// Roster state is read once up front, so every player is evaluated against the same
    /// snapshot even if a sync writes concurrently.
    pub async fn get_availability_stats(
        &self,
        season_id: i32,
        week: i32,
        filter: &AvailabilityFilter,
    ) -> Result<AvailabilityStats, Error> {
        let entries = RosterEntryRepository::new(&self.db)
            .get_current_for_week(season_id, week, filter.conference_id)
            .await?;
        let owned = owned_player_ids(&entries);

        let player_repo = PlayerRepository::new(&self.db);
        let mut stats = AvailabilityStats {
            season_id,
            week,
            conference_id: filter.conference_id,
            ..Default::default()
        };

        let mut page = 0;
        loop {
            let (players, total) = player_repo.page(filter, page, STATS_PAGE_SIZE).await?;
            if players.is_empty() {
                break;
            }

            for player in &players {
                tally(&mut stats, player, !owned.contains_key(&player.id));
            }

            page += 1;
            if page * STATS_PAGE_SIZE >= total {
                break;
            }
        }

        tracing::debug!(
            "Computed availability stats for season {} week {}: {}/{} available",
            season_id,
            week,
            stats.overall.available,
            stats.overall.total
        );

        Ok(stats)
    }

    /// Players currently owned by more than one team.
    ///
    /// Same-conference multi-ownership is always reported. Ownership spread over several
    /// conferences is legitimate and only reported under
    /// [`OwnershipPolicy::FlagCrossConference`]. Nothing is resolved here.
    pub async fn find_conflicting_ownership(
        &self,
        season_id: i32,
        week: i32,
        policy: OwnershipPolicy,
    ) -> Result<Vec<OwnershipConflict>, Error> {
        let entries = RosterEntryRepository::new(&self.db)
            .get_current_for_week(season_id, week, None)
            .await?;

        Ok(detect_conflicts(&entries, policy))
    }

    /// Cached record of `key` if one is held in memory, regardless of its age.
    pub async fn cached(&self, key: &AvailabilityKey) -> Option<AvailabilityRecord> {
        match self.cache.peek(key).await {
            CacheLookup::Fresh(record) | CacheLookup::Stale(record) => Some(record),
            CacheLookup::Miss => None,
        }
    }

    /// Stores a record as the current availability of its key.
    pub async fn put(&self, record: AvailabilityRecord) {
        self.cache.set(&record.key(), record).await;
    }

    pub async fn invalidate(&self, key: &AvailabilityKey) {
        self.cache.invalidate(key).await;
    }

    /// Drops every cached record of a player, in memory and in the mirror.
    pub async fn invalidate_player(&self, player_id: i32) -> Result<(), Error> {
        self.cache
            .invalidate_matching(|key| key.player_id == player_id)
            .await;
        AvailabilityCacheRepository::new(&self.db)
            .delete_by_player(player_id)
            .await?;

        Ok(())
    }

    /// Drops every cached record, used after a sync rewrote roster state.
    pub async fn invalidate_all(&self) {
        self.cache.invalidate_all().await;
    }
}

async fn compute_availability(
    db: &DatabaseConnection,
    key: &AvailabilityKey,
) -> Result<AvailabilityRecord, Error> {
    let now = time::now();

    let Some(entry) = RosterEntryRepository::new(db)
        .find_latest_current(key.player_id, key.season_id, key.week, key.conference_id)
        .await?
    else {
        return Ok(AvailabilityRecord::free_agent(*key, now));
    };

    let junctions = TeamConferenceRepository::new(db)
        .get_by_team(entry.team_id)
        .await?;
    let junction = select_junction(&junctions, entry.conference_id);

    Ok(AvailabilityRecord::owned(
        *key,
        entry.team_id,
        Some(junction.map_or(entry.conference_id, |j| j.conference_id)),
        entry.status,
        junction.and_then(|j| j.waiver_position),
        now,
    ))
}

/// Junction of the entry's conference if the team has one, otherwise its first junction.
///
/// `junctions` are expected active first, as returned by `get_by_team`.
fn select_junction(
    junctions: &[entity::team_conference::Model],
    conference_id: i32,
) -> Option<&entity::team_conference::Model> {
    junctions
        .iter()
        .find(|j| j.conference_id == conference_id)
        .or_else(|| junctions.first())
}

/// Latest current entry per owned player; entries are ordered by week then id.
fn owned_player_ids(
    entries: &[entity::roster_entry::Model],
) -> HashMap<i32, &entity::roster_entry::Model> {
    entries.iter().map(|entry| (entry.player_id, entry)).collect()
}

fn tally(stats: &mut AvailabilityStats, player: &entity::player::Model, is_available: bool) {
    stats.overall.count(is_available);

    let position = player.position.clone().unwrap_or_else(|| "UNKNOWN".to_string());
    stats
        .by_position
        .entry(position)
        .or_insert_with(AvailabilityBreakdown::default)
        .count(is_available);

    let nfl_team = player.nfl_team.clone().unwrap_or_else(|| "FA".to_string());
    stats
        .by_nfl_team
        .entry(nfl_team)
        .or_insert_with(AvailabilityBreakdown::default)
        .count(is_available);
}

fn detect_conflicts(
    entries: &[entity::roster_entry::Model],
    policy: OwnershipPolicy,
) -> Vec<OwnershipConflict> {
    // player -> (team, conference) -> entry; a team linked to several conferences holds
    // the player once per conference
    let mut by_player: BTreeMap<i32, BTreeMap<(i32, i32), &entity::roster_entry::Model>> =
        BTreeMap::new();
    for entry in entries {
        by_player
            .entry(entry.player_id)
            .or_default()
            .insert((entry.team_id, entry.conference_id), entry);
    }

    by_player
        .into_iter()
        .filter(|(_, owners)| {
            let teams: BTreeSet<i32> = owners.keys().map(|(team_id, _)| *team_id).collect();
            teams.len() > 1
        })
        .filter_map(|(player_id, owners)| {
            let owners: Vec<ConflictingOwner> = owners
                .into_values()
                .map(|entry| ConflictingOwner {
                    team_id: entry.team_id,
                    conference_id: entry.conference_id,
                    roster_entry_id: entry.id,
                    status: entry.status,
                })
                .collect();

            let same_conference = owners.iter().enumerate().any(|(i, a)| {
                owners[i + 1..]
                    .iter()
                    .any(|b| a.conference_id == b.conference_id && a.team_id != b.team_id)
            });

            if same_conference || policy == OwnershipPolicy::FlagCrossConference {
                Some(OwnershipConflict {
                    player_id,
                    same_conference,
                    owners,
                })
            } else {
                None
            }
        })
        .collect()
}
