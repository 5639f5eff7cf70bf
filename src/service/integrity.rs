//! Audit and repair of structural problems the store does not prevent on its own.
//!
//! The schema carries no foreign keys, so standings and junction rows can outlive the
//! team, conference or season they reference. [`IntegrityService::audit`] reports those
//! and the other detectable violations; [`IntegrityService::cleanup`] repairs them.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use sea_orm::DatabaseConnection;

use crate::{
    data::{
        conference::ConferenceRepository, roster_entry::RosterEntryRepository,
        season::SeasonRepository, team::TeamRepository,
        team_conference::TeamConferenceRepository, team_season::TeamSeasonRepository,
    },
    error::Error,
    model::integrity::{
        CleanupResult, DuplicateGroup, DuplicateRosterEntries, IntegrityReport,
        InvalidRelationship, MissingJunction, OrphanedRecords,
    },
};

/// Everything an audit inspects, loaded up front.
#[derive(Debug, Default)]
pub struct StoreSnapshot {
    pub team_ids: HashSet<i32>,
    pub conference_ids: HashSet<i32>,
    pub season_ids: HashSet<i32>,
    pub team_seasons: Vec<entity::team_season::Model>,
    pub junctions: Vec<entity::team_conference::Model>,
    pub current_roster_entries: Vec<entity::roster_entry::Model>,
}

impl StoreSnapshot {
    fn team_season_is_orphaned(&self, record: &entity::team_season::Model) -> bool {
        !self.team_ids.contains(&record.team_id)
            || !self.conference_ids.contains(&record.conference_id)
            || !self.season_ids.contains(&record.season_id)
    }

    fn junction_is_orphaned(&self, junction: &entity::team_conference::Model) -> bool {
        !self.team_ids.contains(&junction.team_id)
            || !self.conference_ids.contains(&junction.conference_id)
    }
}

/// Builds the report of a snapshot.
pub fn inspect(snapshot: &StoreSnapshot) -> IntegrityReport {
    let mut report = IntegrityReport::default();

    let (orphaned, team_seasons): (Vec<_>, Vec<_>) = snapshot
        .team_seasons
        .iter()
        .partition(|record| snapshot.team_season_is_orphaned(record));
    let (orphaned_junctions, junctions): (Vec<_>, Vec<_>) = snapshot
        .junctions
        .iter()
        .partition(|junction| snapshot.junction_is_orphaned(junction));

    report.orphaned_records = OrphanedRecords {
        team_season_ids: orphaned.iter().map(|record| record.id).collect(),
        junction_ids: orphaned_junctions.iter().map(|junction| junction.id).collect(),
    };

    let mut groups: BTreeMap<(i32, i32, i32), Vec<&entity::team_season::Model>> = BTreeMap::new();
    for record in &team_seasons {
        groups
            .entry((record.team_id, record.conference_id, record.season_id))
            .or_default()
            .push(record);
    }
    for ((team_id, conference_id, season_id), records) in groups {
        if records.len() < 2 {
            continue;
        }
        let Some(keep) = records
            .iter()
            .max_by_key(|record| (record.last_updated, record.id))
        else {
            continue;
        };

        report.duplicate_team_seasons.push(DuplicateGroup {
            team_id,
            conference_id,
            season_id,
            keep_id: keep.id,
            record_ids: records.iter().map(|record| record.id).collect(),
        });
    }

    let active_pairs: HashSet<(i32, i32)> = junctions
        .iter()
        .filter(|junction| junction.is_active)
        .map(|junction| (junction.team_id, junction.conference_id))
        .collect();
    let any_pairs: HashSet<(i32, i32)> = junctions
        .iter()
        .map(|junction| (junction.team_id, junction.conference_id))
        .collect();

    for record in &team_seasons {
        let pair = (record.team_id, record.conference_id);
        if active_pairs.contains(&pair) {
            continue;
        }

        let reason = if any_pairs.contains(&pair) {
            "junction between team and conference is inactive"
        } else {
            "no junction between team and conference"
        };
        report.invalid_relationships.push(InvalidRelationship {
            team_season_id: record.id,
            team_id: record.team_id,
            conference_id: record.conference_id,
            reason: reason.to_string(),
        });
    }

    // Pairs the data relies on: standings and current roster entries of existing rows.
    let expected_pairs: BTreeSet<(i32, i32)> = team_seasons
        .iter()
        .map(|record| (record.team_id, record.conference_id))
        .chain(
            snapshot
                .current_roster_entries
                .iter()
                .filter(|entry| {
                    snapshot.team_ids.contains(&entry.team_id)
                        && snapshot.conference_ids.contains(&entry.conference_id)
                })
                .map(|entry| (entry.team_id, entry.conference_id)),
        )
        .collect();

    for &(team_id, conference_id) in &expected_pairs {
        let pair = (team_id, conference_id);
        if !any_pairs.contains(&pair) {
            report.missing_junctions.push(MissingJunction {
                team_id,
                conference_id,
            });
        } else if !active_pairs.contains(&pair) {
            let newest_inactive = junctions
                .iter()
                .filter(|j| (j.team_id, j.conference_id) == pair)
                .map(|j| j.id)
                .max();
            report.inactive_junction_ids.extend(newest_inactive);
        }
    }

    let mut entry_groups: BTreeMap<(i32, i32, i32, i32), Vec<&entity::roster_entry::Model>> =
        BTreeMap::new();
    for entry in &snapshot.current_roster_entries {
        entry_groups
            .entry((
                entry.team_id,
                entry.player_id,
                entry.season_id,
                entry.conference_id,
            ))
            .or_default()
            .push(entry);
    }
    for ((team_id, player_id, season_id, conference_id), entries) in entry_groups {
        if entries.len() < 2 {
            continue;
        }
        let Some(keep) = entries.iter().max_by_key(|entry| (entry.updated_at, entry.id)) else {
            continue;
        };

        report.duplicate_roster_entries.push(DuplicateRosterEntries {
            team_id,
            player_id,
            season_id,
            conference_id,
            keep_id: keep.id,
            entry_ids: entries.iter().map(|entry| entry.id).collect(),
        });
    }

    report.recommendations = recommendations(&report);
    report
}

fn recommendations(report: &IntegrityReport) -> Vec<String> {
    let mut recommendations = Vec::new();

    if report.orphaned_records.count() > 0 {
        recommendations.push(format!(
            "Delete {} orphaned record(s) referencing missing teams, conferences or seasons",
            report.orphaned_records.count()
        ));
    }
    if !report.duplicate_team_seasons.is_empty() {
        recommendations.push(format!(
            "Merge {} duplicated team season group(s), keeping the most recently updated record",
            report.duplicate_team_seasons.len()
        ));
    }
    if !report.missing_junctions.is_empty() {
        recommendations.push(format!(
            "Create {} missing team/conference junction(s)",
            report.missing_junctions.len()
        ));
    }
    if !report.inactive_junction_ids.is_empty() {
        recommendations.push(format!(
            "Reactivate {} junction(s) still referenced by standings or rosters",
            report.inactive_junction_ids.len()
        ));
    }
    if !report.duplicate_roster_entries.is_empty() {
        recommendations.push(format!(
            "Demote surplus current roster entries in {} group(s)",
            report.duplicate_roster_entries.len()
        ));
    }
    if !report.invalid_relationships.is_empty() && report.missing_junctions.is_empty() {
        recommendations.push(format!(
            "Review {} standings record(s) whose team is not active in their conference",
            report.invalid_relationships.len()
        ));
    }

    recommendations
}

pub struct IntegrityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> IntegrityService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Scans the store and reports every detected violation. Writes nothing.
    pub async fn audit(&self) -> Result<IntegrityReport, Error> {
        let snapshot = self.load_snapshot().await?;
        let report = inspect(&snapshot);

        if report.is_clean() {
            tracing::debug!("Integrity audit found no issues");
        } else {
            tracing::info!(
                "Integrity audit: {} orphaned, {} duplicate group(s), {} invalid relationship(s), \
                 {} missing junction(s), {} inactive junction(s), {} duplicate roster group(s)",
                report.orphaned_records.count(),
                report.duplicate_team_seasons.len(),
                report.invalid_relationships.len(),
                report.missing_junctions.len(),
                report.inactive_junction_ids.len(),
                report.duplicate_roster_entries.len()
            );
        }

        Ok(report)
    }

    /// Repairs what [`audit`](Self::audit) reports, in order: orphans, duplicates,
    /// junctions, surplus roster entries.
    ///
    /// Each step works on a fresh audit and failures are recorded in the result rather
    /// than stopping later steps. Running it twice changes nothing the second time.
    pub async fn cleanup(&self) -> Result<CleanupResult, Error> {
        let mut result = CleanupResult::default();

        if let Err(e) = self.delete_orphans(&mut result).await {
            result.errors.push(format!("Orphan cleanup failed: {}", e));
        }
        if let Err(e) = self.delete_duplicates(&mut result).await {
            result.errors.push(format!("Duplicate cleanup failed: {}", e));
        }
        if let Err(e) = self.repair_junctions(&mut result).await {
            result.errors.push(format!("Junction repair failed: {}", e));
        }
        if let Err(e) = self.demote_surplus_entries(&mut result).await {
            result
                .errors
                .push(format!("Roster entry cleanup failed: {}", e));
        }

        tracing::info!(
            "Integrity cleanup: {} orphan(s) deleted, {} duplicate(s) deleted, {} junction(s) \
             created, {} reactivated, {} roster entr(ies) demoted, {} error(s)",
            result.deleted_orphans,
            result.deleted_duplicates,
            result.created_junctions,
            result.reactivated_junctions,
            result.demoted_roster_entries,
            result.errors.len()
        );

        Ok(result)
    }

    async fn load_snapshot(&self) -> Result<StoreSnapshot, Error> {
        Ok(StoreSnapshot {
            team_ids: TeamRepository::new(self.db)
                .get_all_ids()
                .await?
                .into_iter()
                .collect(),
            conference_ids: ConferenceRepository::new(self.db)
                .get_all()
                .await?
                .into_iter()
                .map(|conference| conference.id)
                .collect(),
            season_ids: SeasonRepository::new(self.db)
                .get_all_ids()
                .await?
                .into_iter()
                .collect(),
            team_seasons: TeamSeasonRepository::new(self.db).get_all().await?,
            junctions: TeamConferenceRepository::new(self.db).get_all().await?,
            current_roster_entries: RosterEntryRepository::new(self.db)
                .get_all_current()
                .await?,
        })
    }

    async fn delete_orphans(&self, result: &mut CleanupResult) -> Result<(), Error> {
        let report = self.audit().await?;
        let team_seasons = TeamSeasonRepository::new(self.db);
        let junctions = TeamConferenceRepository::new(self.db);

        for id in report.orphaned_records.team_season_ids {
            match team_seasons.delete(id).await {
                Ok(deleted) => result.deleted_orphans += deleted as usize,
                Err(e) => result
                    .errors
                    .push(format!("Failed to delete orphaned team season {}: {}", id, e)),
            }
        }
        for id in report.orphaned_records.junction_ids {
            match junctions.delete(id).await {
                Ok(deleted) => result.deleted_orphans += deleted as usize,
                Err(e) => result
                    .errors
                    .push(format!("Failed to delete orphaned junction {}: {}", id, e)),
            }
        }

        Ok(())
    }

    async fn delete_duplicates(&self, result: &mut CleanupResult) -> Result<(), Error> {
        let report = self.audit().await?;
        let team_seasons = TeamSeasonRepository::new(self.db);

        for group in report.duplicate_team_seasons {
            for id in group.record_ids.into_iter().filter(|id| *id != group.keep_id) {
                match team_seasons.delete(id).await {
                    Ok(deleted) => result.deleted_duplicates += deleted as usize,
                    Err(e) => result
                        .errors
                        .push(format!("Failed to delete duplicate team season {}: {}", id, e)),
                }
            }
        }

        Ok(())
    }

    async fn repair_junctions(&self, result: &mut CleanupResult) -> Result<(), Error> {
        let report = self.audit().await?;
        let junctions = TeamConferenceRepository::new(self.db);

        for missing in report.missing_junctions {
            match junctions
                .create(missing.team_id, missing.conference_id, None)
                .await
            {
                Ok(_) => result.created_junctions += 1,
                Err(e) => result.errors.push(format!(
                    "Failed to create junction for team {} in conference {}: {}",
                    missing.team_id, missing.conference_id, e
                )),
            }
        }
        for id in report.inactive_junction_ids {
            match junctions.set_active(id).await {
                Ok(()) => result.reactivated_junctions += 1,
                Err(e) => result
                    .errors
                    .push(format!("Failed to reactivate junction {}: {}", id, e)),
            }
        }

        Ok(())
    }

    async fn demote_surplus_entries(&self, result: &mut CleanupResult) -> Result<(), Error> {
        let report = self.audit().await?;
        let entries = RosterEntryRepository::new(self.db);

        for group in report.duplicate_roster_entries {
            let surplus: Vec<i32> = group
                .entry_ids
                .into_iter()
                .filter(|id| *id != group.keep_id)
                .collect();

            match entries.supersede(&surplus).await {
                Ok(demoted) => result.demoted_roster_entries += demoted as usize,
                Err(e) => result.errors.push(format!(
                    "Failed to demote roster entries {:?}: {}",
                    surplus, e
                )),
            }
        }

        Ok(())
    }
}
