//! Integrity audit reports and cleanup results.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Several standings records sharing one (team, conference, season) key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DuplicateGroup {
    pub team_id: i32,
    pub conference_id: i32,
    pub season_id: i32,
    /// Record cleanup keeps: most recently updated, ties broken by highest id
    pub keep_id: i32,
    pub record_ids: Vec<i32>,
}

/// Records pointing at a team, conference or season that no longer exists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrphanedRecords {
    pub team_season_ids: Vec<i32>,
    pub junction_ids: Vec<i32>,
}

impl OrphanedRecords {
    pub fn count(&self) -> usize {
        self.team_season_ids.len() + self.junction_ids.len()
    }
}

/// A standings record whose team is not actively linked to the claimed conference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InvalidRelationship {
    pub team_season_id: i32,
    pub team_id: i32,
    pub conference_id: i32,
    pub reason: String,
}

/// An expected team/conference pair with no junction row at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub struct MissingJunction {
    pub team_id: i32,
    pub conference_id: i32,
}

/// More than one current roster entry for the same team, player, season and conference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DuplicateRosterEntries {
    pub team_id: i32,
    pub player_id: i32,
    pub season_id: i32,
    pub conference_id: i32,
    pub keep_id: i32,
    pub entry_ids: Vec<i32>,
}

/// Read-only summary of structural problems in the reconciled data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IntegrityReport {
    pub duplicate_team_seasons: Vec<DuplicateGroup>,
    pub orphaned_records: OrphanedRecords,
    pub invalid_relationships: Vec<InvalidRelationship>,
    pub missing_junctions: Vec<MissingJunction>,
    pub inactive_junction_ids: Vec<i32>,
    pub duplicate_roster_entries: Vec<DuplicateRosterEntries>,
    pub recommendations: Vec<String>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.duplicate_team_seasons.is_empty()
            && self.orphaned_records.count() == 0
            && self.invalid_relationships.is_empty()
            && self.missing_junctions.is_empty()
            && self.inactive_junction_ids.is_empty()
            && self.duplicate_roster_entries.is_empty()
    }
}

/// What a cleanup run changed. Failures of individual steps are listed in `errors`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CleanupResult {
    pub deleted_orphans: usize,
    pub deleted_duplicates: usize,
    pub created_junctions: usize,
    pub reactivated_junctions: usize,
    pub demoted_roster_entries: usize,
    pub errors: Vec<String>,
}

impl CleanupResult {
    pub fn changes(&self) -> usize {
        self.deleted_orphans
            + self.deleted_duplicates
            + self.created_junctions
            + self.reactivated_junctions
            + self.demoted_roster_entries
    }
}
