use entity::sea_orm_active_enums::RosterTransaction;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::{model::roster::RosterTarget, util::time};

pub struct RosterHistoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RosterHistoryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a transaction to the history log.
    pub async fn append(
        &self,
        target: &RosterTarget,
        action: RosterTransaction,
        from_team_id: Option<i32>,
        to_team_id: Option<i32>,
    ) -> Result<entity::roster_history::Model, DbErr> {
        entity::roster_history::ActiveModel {
            conference_id: ActiveValue::Set(target.conference_id),
            season_id: ActiveValue::Set(target.season_id),
            week: ActiveValue::Set(target.week),
            player_id: ActiveValue::Set(target.player_id),
            action: ActiveValue::Set(action),
            from_team_id: ActiveValue::Set(from_team_id),
            to_team_id: ActiveValue::Set(to_team_id),
            occurred_at: ActiveValue::Set(time::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// History of a player in a season, oldest first.
    pub async fn get_by_player(
        &self,
        player_id: i32,
        season_id: i32,
    ) -> Result<Vec<entity::roster_history::Model>, DbErr> {
        entity::prelude::RosterHistory::find()
            .filter(entity::roster_history::Column::PlayerId.eq(player_id))
            .filter(entity::roster_history::Column::SeasonId.eq(season_id))
            .order_by_asc(entity::roster_history::Column::Id)
            .all(self.db)
            .await
    }
}
