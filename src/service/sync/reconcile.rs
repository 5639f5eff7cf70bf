//! Diffing of a conference's desired ownership against its current roster entries.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::RosterStatus;

use crate::model::{
    roster::{RosterAction, RosterTarget},
    sync::{ConflictResolution, ConflictWinner, LocalClaim, RemoteClaim, SyncConflict},
};

/// Owner and status the external snapshot reports for a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DesiredSlot {
    pub team_id: i32,
    pub status: RosterStatus,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub actions: Vec<RosterAction>,
    /// Status disagreements held back for manual review
    pub conflicts: Vec<SyncConflict>,
}

pub struct Reconciler<'a> {
    pub conference_id: i32,
    pub season_id: i32,
    pub week: i32,
    pub resolution: &'a ConflictResolution,
    /// When the snapshot being reconciled was fetched
    pub observed_at: NaiveDateTime,
}

impl Reconciler<'_> {
    /// Actions turning `current` into `desired`.
    ///
    /// `current` must only hold current entries of teams the snapshot covers; entries of
    /// other teams would be dropped. Applying the plan and reconciling again yields an
    /// empty plan.
    pub fn plan(
        &self,
        desired: &BTreeMap<i32, DesiredSlot>,
        current: &[entity::roster_entry::Model],
    ) -> ReconcilePlan {
        // player -> team -> latest current entry
        let mut owners_by_player: BTreeMap<i32, BTreeMap<i32, &entity::roster_entry::Model>> =
            BTreeMap::new();
        for entry in current {
            let owners = owners_by_player.entry(entry.player_id).or_default();
            match owners.get(&entry.team_id) {
                Some(existing) if existing.id > entry.id => {}
                _ => {
                    owners.insert(entry.team_id, entry);
                }
            }
        }

        let mut plan = ReconcilePlan::default();

        for (&player_id, slot) in desired {
            let target = self.target(player_id);
            let mut owners = owners_by_player.remove(&player_id).unwrap_or_default();

            match owners.remove(&slot.team_id) {
                Some(entry) => {
                    if entry.status != slot.status {
                        self.resolve_status(&mut plan, target, entry, slot);
                    }
                }
                None => {
                    let previous_owner = owners.keys().next().copied();
                    match previous_owner {
                        Some(from_team_id) => {
                            owners.remove(&from_team_id);
                            plan.actions.push(RosterAction::Trade {
                                target,
                                from_team_id,
                                to_team_id: slot.team_id,
                                status: slot.status,
                            });
                        }
                        None => plan.actions.push(RosterAction::Add {
                            target,
                            team_id: slot.team_id,
                            status: slot.status,
                        }),
                    }
                }
            }

            for team_id in owners.into_keys() {
                plan.actions.push(RosterAction::Drop { target, team_id });
            }
        }

        for (player_id, owners) in owners_by_player {
            let target = self.target(player_id);
            for team_id in owners.into_keys() {
                plan.actions.push(RosterAction::Drop { target, team_id });
            }
        }

        plan
    }

    pub(super) fn target(&self, player_id: i32) -> RosterTarget {
        RosterTarget {
            player_id,
            conference_id: self.conference_id,
            season_id: self.season_id,
            week: self.week,
        }
    }

    fn resolve_status(
        &self,
        plan: &mut ReconcilePlan,
        target: RosterTarget,
        entry: &entity::roster_entry::Model,
        slot: &DesiredSlot,
    ) {
        let local = LocalClaim {
            entry_id: entry.id,
            team_id: entry.team_id,
            player_id: entry.player_id,
            status: entry.status,
            updated_at: entry.updated_at,
        };
        let remote = RemoteClaim {
            team_id: slot.team_id,
            player_id: entry.player_id,
            status: slot.status,
            observed_at: self.observed_at,
        };

        match self.resolution.resolve(&local, &remote) {
            Some(ConflictWinner::Remote) => plan.actions.push(RosterAction::ChangeStatus {
                target,
                team_id: slot.team_id,
                status: slot.status,
            }),
            Some(ConflictWinner::Local) => tracing::debug!(
                "Keeping local status {:?} of player {} on team {} over snapshot status {:?}",
                local.status,
                local.player_id,
                local.team_id,
                remote.status
            ),
            None => plan.conflicts.push(SyncConflict {
                conference_id: self.conference_id,
                local,
                remote,
            }),
        }
    }
}
