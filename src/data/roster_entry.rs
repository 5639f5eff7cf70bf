use entity::sea_orm_active_enums::RosterStatus;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::{model::roster::RosterTarget, util::time};

pub struct RosterEntryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RosterEntryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a current roster entry for `team_id`.
    pub async fn create(
        &self,
        target: &RosterTarget,
        team_id: i32,
        status: RosterStatus,
    ) -> Result<entity::roster_entry::Model, DbErr> {
        let now = time::now();

        entity::roster_entry::ActiveModel {
            team_id: ActiveValue::Set(team_id),
            player_id: ActiveValue::Set(target.player_id),
            season_id: ActiveValue::Set(target.season_id),
            conference_id: ActiveValue::Set(target.conference_id),
            week: ActiveValue::Set(target.week),
            status: ActiveValue::Set(status),
            is_current: ActiveValue::Set(true),
            added_date: ActiveValue::Set(now),
            removed_date: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Current entries of a team for the player, season and conference of `target`.
    ///
    /// More than one is an integrity violation, so callers get all of them. A team linked
    /// to several conferences holds the player independently in each.
    pub async fn get_current(
        &self,
        team_id: i32,
        target: &RosterTarget,
    ) -> Result<Vec<entity::roster_entry::Model>, DbErr> {
        entity::prelude::RosterEntry::find()
            .filter(entity::roster_entry::Column::TeamId.eq(team_id))
            .filter(entity::roster_entry::Column::PlayerId.eq(target.player_id))
            .filter(entity::roster_entry::Column::SeasonId.eq(target.season_id))
            .filter(entity::roster_entry::Column::ConferenceId.eq(target.conference_id))
            .filter(entity::roster_entry::Column::IsCurrent.eq(true))
            .order_by_desc(entity::roster_entry::Column::Id)
            .all(self.db)
            .await
    }

    /// Current entries written for a conference in a season.
    pub async fn get_current_by_conference(
        &self,
        conference_id: i32,
        season_id: i32,
    ) -> Result<Vec<entity::roster_entry::Model>, DbErr> {
        entity::prelude::RosterEntry::find()
            .filter(entity::roster_entry::Column::ConferenceId.eq(conference_id))
            .filter(entity::roster_entry::Column::SeasonId.eq(season_id))
            .filter(entity::roster_entry::Column::IsCurrent.eq(true))
            .order_by_asc(entity::roster_entry::Column::Id)
            .all(self.db)
            .await
    }

    /// Most recent current entry of a player at or before `week`.
    ///
    /// Ties on week are broken by the highest id.
    pub async fn find_latest_current(
        &self,
        player_id: i32,
        season_id: i32,
        week: i32,
        conference_id: Option<i32>,
    ) -> Result<Option<entity::roster_entry::Model>, DbErr> {
        let mut query = entity::prelude::RosterEntry::find()
            .filter(entity::roster_entry::Column::PlayerId.eq(player_id))
            .filter(entity::roster_entry::Column::SeasonId.eq(season_id))
            .filter(entity::roster_entry::Column::Week.lte(week))
            .filter(entity::roster_entry::Column::IsCurrent.eq(true));

        if let Some(conference_id) = conference_id {
            query = query.filter(entity::roster_entry::Column::ConferenceId.eq(conference_id));
        }

        query
            .order_by_desc(entity::roster_entry::Column::Week)
            .order_by_desc(entity::roster_entry::Column::Id)
            .one(self.db)
            .await
    }

    /// Every current entry of a season at or before `week`, optionally for one conference.
    pub async fn get_current_for_week(
        &self,
        season_id: i32,
        week: i32,
        conference_id: Option<i32>,
    ) -> Result<Vec<entity::roster_entry::Model>, DbErr> {
        let mut query = entity::prelude::RosterEntry::find()
            .filter(entity::roster_entry::Column::SeasonId.eq(season_id))
            .filter(entity::roster_entry::Column::Week.lte(week))
            .filter(entity::roster_entry::Column::IsCurrent.eq(true));

        if let Some(conference_id) = conference_id {
            query = query.filter(entity::roster_entry::Column::ConferenceId.eq(conference_id));
        }

        query
            .order_by_asc(entity::roster_entry::Column::Week)
            .order_by_asc(entity::roster_entry::Column::Id)
            .all(self.db)
            .await
    }

    /// Every current entry across all seasons.
    pub async fn get_all_current(&self) -> Result<Vec<entity::roster_entry::Model>, DbErr> {
        entity::prelude::RosterEntry::find()
            .filter(entity::roster_entry::Column::IsCurrent.eq(true))
            .order_by_asc(entity::roster_entry::Column::Id)
            .all(self.db)
            .await
    }

    /// Clears the current flag of the given entries and stamps their removal date.
    pub async fn supersede(&self, entry_ids: &[i32]) -> Result<u64, DbErr> {
        if entry_ids.is_empty() {
            return Ok(0);
        }

        let now = time::now();
        let result = entity::prelude::RosterEntry::update_many()
            .col_expr(entity::roster_entry::Column::IsCurrent, Expr::value(false))
            .col_expr(entity::roster_entry::Column::RemovedDate, Expr::value(Some(now)))
            .col_expr(entity::roster_entry::Column::UpdatedAt, Expr::value(now))
            .filter(entity::roster_entry::Column::Id.is_in(entry_ids.iter().copied()))
            .filter(entity::roster_entry::Column::IsCurrent.eq(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Rewrites the status of an entry in place.
    pub async fn update_status(
        &self,
        entry_id: i32,
        status: RosterStatus,
    ) -> Result<entity::roster_entry::Model, DbErr> {
        entity::roster_entry::ActiveModel {
            id: ActiveValue::Unchanged(entry_id),
            status: ActiveValue::Set(status),
            updated_at: ActiveValue::Set(time::now()),
            ..Default::default()
        }
        .update(self.db)
        .await
    }
}
