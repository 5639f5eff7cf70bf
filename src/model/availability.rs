//! Availability records, statistics and ownership conflict reports.

use std::{collections::BTreeMap, fmt};

use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::{AvailabilityStatus, RosterStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Cache key of an availability record.
///
/// `conference_id == None` scopes the record to every conference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailabilityKey {
    pub player_id: i32,
    pub season_id: i32,
    pub week: i32,
    pub conference_id: Option<i32>,
}

impl fmt::Display for AvailabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.conference_id {
            Some(conference_id) => write!(
                f,
                "{}:{}:{}:{}",
                self.player_id, self.season_id, self.week, conference_id
            ),
            None => write!(f, "{}:{}:{}:all", self.player_id, self.season_id, self.week),
        }
    }
}

/// Whether a player can be acquired in a season/week, and who holds them if not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityRecord {
    pub player_id: i32,
    pub season_id: i32,
    pub week: i32,
    /// Conference the record was computed for, `None` when computed across all of them
    pub conference_id: Option<i32>,
    pub is_available: bool,
    pub owned_by_team_id: Option<i32>,
    pub owned_by_conference_id: Option<i32>,
    #[schema(value_type = String)]
    pub roster_status: AvailabilityStatus,
    /// Waiver position of the owning team in its conference, when known
    pub waiver_priority: Option<i32>,
    pub cache_updated_at: NaiveDateTime,
}

impl AvailabilityRecord {
    /// Record of an unowned player.
    pub fn free_agent(key: AvailabilityKey, now: NaiveDateTime) -> Self {
        Self {
            player_id: key.player_id,
            season_id: key.season_id,
            week: key.week,
            conference_id: key.conference_id,
            is_available: true,
            owned_by_team_id: None,
            owned_by_conference_id: None,
            roster_status: AvailabilityStatus::FreeAgent,
            waiver_priority: None,
            cache_updated_at: now,
        }
    }

    /// Record of a player rostered by `team_id`.
    pub fn owned(
        key: AvailabilityKey,
        team_id: i32,
        conference_id: Option<i32>,
        status: RosterStatus,
        waiver_priority: Option<i32>,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            player_id: key.player_id,
            season_id: key.season_id,
            week: key.week,
            conference_id: key.conference_id,
            is_available: false,
            owned_by_team_id: Some(team_id),
            owned_by_conference_id: conference_id,
            roster_status: status.into(),
            waiver_priority,
            cache_updated_at: now,
        }
    }

    pub fn key(&self) -> AvailabilityKey {
        AvailabilityKey {
            player_id: self.player_id,
            season_id: self.season_id,
            week: self.week,
            conference_id: self.conference_id,
        }
    }
}

/// Player attributes a statistics query is restricted to. Empty lists match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvailabilityFilter {
    pub positions: Vec<String>,
    pub nfl_teams: Vec<String>,
    pub injury_statuses: Vec<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub min_years_exp: Option<i32>,
    pub max_years_exp: Option<i32>,
    pub conference_id: Option<i32>,
}

/// Available/owned counts for one slice of the player pool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityBreakdown {
    pub total: usize,
    pub available: usize,
    pub owned: usize,
}

impl AvailabilityBreakdown {
    pub(crate) fn count(&mut self, is_available: bool) {
        self.total += 1;
        if is_available {
            self.available += 1;
        } else {
            self.owned += 1;
        }
    }
}

/// Aggregated availability of every player matching a filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityStats {
    pub season_id: i32,
    pub week: i32,
    pub conference_id: Option<i32>,
    pub overall: AvailabilityBreakdown,
    /// Keyed by position, players without one are grouped under `"UNKNOWN"`
    pub by_position: BTreeMap<String, AvailabilityBreakdown>,
    /// Keyed by NFL team abbreviation, free agents of the league are grouped under `"FA"`
    pub by_nfl_team: BTreeMap<String, AvailabilityBreakdown>,
}

/// Which multi-ownership situations [`find_conflicting_ownership`] reports.
///
/// [`find_conflicting_ownership`]: crate::service::availability::AvailabilityService::find_conflicting_ownership
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipPolicy {
    /// Report players owned in more than one conference as well.
    FlagCrossConference,
    /// Only report players owned by several teams of the same conference.
    #[default]
    SameConferenceOnly,
}

/// One current owner of a contested player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConflictingOwner {
    pub team_id: i32,
    pub conference_id: i32,
    pub roster_entry_id: i32,
    #[schema(value_type = String)]
    pub status: RosterStatus,
}

/// A player currently owned by more than one team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OwnershipConflict {
    pub player_id: i32,
    /// True if at least two owners share a conference, which is always invalid
    pub same_conference: bool,
    pub owners: Vec<ConflictingOwner>,
}
