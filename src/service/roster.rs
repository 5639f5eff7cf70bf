//! Single write path for roster entries and their history.
//!
//! Every mutation goes through [`RosterService::apply`], which keeps at most one current
//! entry per (team, player, season, conference) and appends one history row per transaction.

use entity::sea_orm_active_enums::{RosterStatus, RosterTransaction};
use sea_orm::DatabaseConnection;

use crate::{
    data::{roster_entry::RosterEntryRepository, roster_history::RosterHistoryRepository},
    error::{roster::RosterError, Error},
    model::{
        availability::{AvailabilityKey, AvailabilityRecord},
        roster::{RosterAction, RosterTarget},
    },
    service::availability::AvailabilityService,
    util::time,
};

pub struct RosterService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RosterService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Applies a roster action.
    ///
    /// # Returns
    /// - `Ok(Some(entry))` - The current entry holding the player afterwards
    /// - `Ok(None)` - The player is no longer held by the team (drops)
    /// - `Err(Error::RosterError)` - A status change targeted a player the team doesn't hold
    /// - `Err(Error::DbErr)` - A write failed
    pub async fn apply(
        &self,
        action: &RosterAction,
    ) -> Result<Option<entity::roster_entry::Model>, Error> {
        match action {
            RosterAction::Add {
                target,
                team_id,
                status,
            }
            | RosterAction::WaiverClaim {
                target,
                team_id,
                status,
            }
            | RosterAction::FreeAgentPickup {
                target,
                team_id,
                status,
            } => {
                let entry = self.acquire(target, *team_id, *status).await?;
                if let Some(transaction) = action.transaction() {
                    self.record(target, transaction, None, Some(*team_id)).await?;
                }

                Ok(Some(entry))
            }
            RosterAction::Drop { target, team_id } => {
                if self.release(target, *team_id).await? == 0 {
                    tracing::debug!(
                        "Team {} holds no current entry of player {}, nothing to drop",
                        team_id,
                        target.player_id
                    );
                    return Ok(None);
                }
                self.record(target, RosterTransaction::Drop, Some(*team_id), None)
                    .await?;

                Ok(None)
            }
            RosterAction::Trade {
                target,
                from_team_id,
                to_team_id,
                status,
            } => {
                self.release(target, *from_team_id).await?;
                let entry = self.acquire(target, *to_team_id, *status).await?;
                self.record(
                    target,
                    RosterTransaction::Trade,
                    Some(*from_team_id),
                    Some(*to_team_id),
                )
                .await?;

                Ok(Some(entry))
            }
            RosterAction::ChangeStatus {
                target,
                team_id,
                status,
            } => self.change_status(target, *team_id, *status).await.map(Some),
        }
    }

    /// Applies an action optimistically against the availability cache.
    ///
    /// The availability the action leads to is cached before the write. If the write fails
    /// the previous record is restored (or the tentative one dropped when nothing was
    /// cached) and the error returned.
    pub async fn apply_optimistic(
        &self,
        action: &RosterAction,
        availability: &AvailabilityService,
    ) -> Result<Option<entity::roster_entry::Model>, Error> {
        let target = action.target();
        let key = AvailabilityKey {
            player_id: target.player_id,
            season_id: target.season_id,
            week: target.week,
            conference_id: Some(target.conference_id),
        };

        let previous = availability.cached(&key).await;
        let tentative = match action.resulting_owner() {
            Some((team_id, status)) => AvailabilityRecord::owned(
                key,
                team_id,
                Some(target.conference_id),
                status,
                None,
                time::now(),
            ),
            None => AvailabilityRecord::free_agent(key, time::now()),
        };
        availability.put(tentative).await;

        match self.apply(action).await {
            Ok(entry) => {
                if let Err(e) = availability.invalidate_player(target.player_id).await {
                    tracing::warn!(
                        "Failed to invalidate availability of player {}: {}",
                        target.player_id,
                        e
                    );
                }

                Ok(entry)
            }
            Err(e) => {
                tracing::warn!(
                    "Roster write for player {} failed, reverting tentative availability: {}",
                    target.player_id,
                    e
                );
                match previous {
                    Some(record) => availability.put(record).await,
                    None => availability.invalidate(&key).await,
                }

                Err(e)
            }
        }
    }

    /// Supersedes the team's current entries of the player and inserts a new one.
    async fn acquire(
        &self,
        target: &RosterTarget,
        team_id: i32,
        status: RosterStatus,
    ) -> Result<entity::roster_entry::Model, Error> {
        let repo = RosterEntryRepository::new(self.db);

        self.release(target, team_id).await?;
        Ok(repo.create(target, team_id, status).await?)
    }

    /// Supersedes the team's current entries of the player.
    async fn release(&self, target: &RosterTarget, team_id: i32) -> Result<u64, Error> {
        let repo = RosterEntryRepository::new(self.db);

        let current = repo.get_current(team_id, target).await?;
        let ids: Vec<i32> = current.iter().map(|entry| entry.id).collect();

        Ok(repo.supersede(&ids).await?)
    }

    /// Rewrites the status in place when the current entry belongs to the target week,
    /// otherwise starts a new entry for that week.
    async fn change_status(
        &self,
        target: &RosterTarget,
        team_id: i32,
        status: RosterStatus,
    ) -> Result<entity::roster_entry::Model, Error> {
        let repo = RosterEntryRepository::new(self.db);

        let current = repo.get_current(team_id, target).await?;
        let Some((latest, surplus)) = current.split_first() else {
            return Err(RosterError::NotRostered {
                team_id,
                player_id: target.player_id,
                season_id: target.season_id,
            }
            .into());
        };

        let surplus_ids: Vec<i32> = surplus.iter().map(|entry| entry.id).collect();
        repo.supersede(&surplus_ids).await?;

        if latest.week == target.week {
            return Ok(repo.update_status(latest.id, status).await?);
        }

        repo.supersede(&[latest.id]).await?;
        Ok(repo.create(target, team_id, status).await?)
    }

    async fn record(
        &self,
        target: &RosterTarget,
        transaction: RosterTransaction,
        from_team_id: Option<i32>,
        to_team_id: Option<i32>,
    ) -> Result<(), Error> {
        RosterHistoryRepository::new(self.db)
            .append(target, transaction, from_team_id, to_team_id)
            .await?;

        Ok(())
    }
}
