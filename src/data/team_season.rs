use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::{model::source::RosterSettingsSnapshot, util::time};

pub struct TeamSeasonRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeamSeasonRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or updates the standings of a team in a conference and season.
    ///
    /// When duplicates already exist the most recently updated one is written; removing the
    /// others is left to integrity cleanup. Unchanged standings are not rewritten.
    ///
    /// # Returns
    /// - `Ok(true)` - A record was created or updated
    /// - `Ok(false)` - Stored standings already matched
    pub async fn upsert_standings(
        &self,
        team_id: i32,
        conference_id: i32,
        season_id: i32,
        settings: &RosterSettingsSnapshot,
    ) -> Result<bool, DbErr> {
        let existing = entity::prelude::TeamSeason::find()
            .filter(entity::team_season::Column::TeamId.eq(team_id))
            .filter(entity::team_season::Column::ConferenceId.eq(conference_id))
            .filter(entity::team_season::Column::SeasonId.eq(season_id))
            .order_by_desc(entity::team_season::Column::LastUpdated)
            .order_by_desc(entity::team_season::Column::Id)
            .one(self.db)
            .await?;

        let points_for = settings.points_for();
        let points_against = settings.points_against();

        match existing {
            Some(record)
                if record.wins == settings.wins
                    && record.losses == settings.losses
                    && record.ties == settings.ties
                    && record.points_for == points_for
                    && record.points_against == points_against =>
            {
                Ok(false)
            }
            Some(record) => {
                let mut record = record.into_active_model();
                record.wins = ActiveValue::Set(settings.wins);
                record.losses = ActiveValue::Set(settings.losses);
                record.ties = ActiveValue::Set(settings.ties);
                record.points_for = ActiveValue::Set(points_for);
                record.points_against = ActiveValue::Set(points_against);
                record.last_updated = ActiveValue::Set(time::now());
                record.update(self.db).await?;

                Ok(true)
            }
            None => {
                entity::team_season::ActiveModel {
                    team_id: ActiveValue::Set(team_id),
                    conference_id: ActiveValue::Set(conference_id),
                    season_id: ActiveValue::Set(season_id),
                    wins: ActiveValue::Set(settings.wins),
                    losses: ActiveValue::Set(settings.losses),
                    ties: ActiveValue::Set(settings.ties),
                    points_for: ActiveValue::Set(points_for),
                    points_against: ActiveValue::Set(points_against),
                    last_updated: ActiveValue::Set(time::now()),
                    ..Default::default()
                }
                .insert(self.db)
                .await?;

                Ok(true)
            }
        }
    }

    pub async fn get_all(&self) -> Result<Vec<entity::team_season::Model>, DbErr> {
        entity::prelude::TeamSeason::find()
            .order_by_asc(entity::team_season::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn delete(&self, team_season_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::TeamSeason::delete_by_id(team_season_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
