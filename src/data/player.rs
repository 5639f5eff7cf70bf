use std::collections::HashMap;

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::{availability::AvailabilityFilter, source::PlayerSnapshot},
    util::time,
};

pub struct PlayerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a player from a catalog snapshot at data version 1.
    pub async fn create(&self, snapshot: &PlayerSnapshot) -> Result<entity::player::Model, DbErr> {
        let now = time::now();

        entity::player::ActiveModel {
            external_player_id: ActiveValue::Set(snapshot.player_id.clone()),
            full_name: ActiveValue::Set(snapshot.display_name()),
            position: ActiveValue::Set(snapshot.position.clone()),
            nfl_team: ActiveValue::Set(snapshot.team.clone()),
            status: ActiveValue::Set(snapshot.status.clone()),
            injury_status: ActiveValue::Set(snapshot.injury_status.clone()),
            height: ActiveValue::Set(snapshot.height.clone()),
            weight: ActiveValue::Set(snapshot.weight.clone()),
            age: ActiveValue::Set(snapshot.age),
            years_exp: ActiveValue::Set(snapshot.years_exp),
            data_version: ActiveValue::Set(1),
            is_current_data: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Updates a player in place from a newer snapshot, bumping its data version.
    ///
    /// Callers check [`snapshot_differs`] first so unchanged players are not rewritten.
    pub async fn update_from_snapshot(
        &self,
        player: entity::player::Model,
        snapshot: &PlayerSnapshot,
    ) -> Result<entity::player::Model, DbErr> {
        let data_version = player.data_version + 1;
        let mut player = player.into_active_model();

        player.full_name = ActiveValue::Set(snapshot.display_name());
        player.position = ActiveValue::Set(snapshot.position.clone());
        player.nfl_team = ActiveValue::Set(snapshot.team.clone());
        player.status = ActiveValue::Set(snapshot.status.clone());
        player.injury_status = ActiveValue::Set(snapshot.injury_status.clone());
        player.height = ActiveValue::Set(snapshot.height.clone());
        player.weight = ActiveValue::Set(snapshot.weight.clone());
        player.age = ActiveValue::Set(snapshot.age);
        player.years_exp = ActiveValue::Set(snapshot.years_exp);
        player.data_version = ActiveValue::Set(data_version);
        player.is_current_data = ActiveValue::Set(true);
        player.updated_at = ActiveValue::Set(time::now());

        player.update(self.db).await
    }

    /// Players with the given external ids, keyed by external id.
    pub async fn find_by_external_ids(
        &self,
        external_ids: &[String],
    ) -> Result<HashMap<String, entity::player::Model>, DbErr> {
        if external_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let players = entity::prelude::Player::find()
            .filter(entity::player::Column::ExternalPlayerId.is_in(external_ids.iter().cloned()))
            .all(self.db)
            .await?;

        Ok(players
            .into_iter()
            .map(|p| (p.external_player_id.clone(), p))
            .collect())
    }

    /// `(id, external_player_id)` of every player still flagged as current data.
    pub async fn get_current_external_ids(&self) -> Result<Vec<(i32, String)>, DbErr> {
        entity::prelude::Player::find()
            .select_only()
            .column(entity::player::Column::Id)
            .column(entity::player::Column::ExternalPlayerId)
            .filter(entity::player::Column::IsCurrentData.eq(true))
            .into_tuple::<(i32, String)>()
            .all(self.db)
            .await
    }

    /// Flags players as superseded; their rows are kept.
    pub async fn mark_not_current(&self, player_ids: &[i32]) -> Result<u64, DbErr> {
        if player_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Player::update_many()
            .col_expr(entity::player::Column::IsCurrentData, Expr::value(false))
            .col_expr(entity::player::Column::UpdatedAt, Expr::value(time::now()))
            .filter(entity::player::Column::Id.is_in(player_ids.iter().copied()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// One page of current players matching `filter`, ordered by id.
    ///
    /// # Arguments
    /// - `filter` - Attribute filter; its conference scope is ignored here
    /// - `page` - Zero-based page number
    /// - `page_size` - Players per page
    ///
    /// # Returns
    /// - `Ok((players, total))` - The page and the number of matching players overall
    pub async fn page(
        &self,
        filter: &AvailabilityFilter,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<entity::player::Model>, u64), DbErr> {
        let paginator = entity::prelude::Player::find()
            .filter(filter_condition(filter))
            .order_by_asc(entity::player::Column::Id)
            .paginate(self.db, page_size);

        let total = paginator.num_items().await?;
        let players = paginator.fetch_page(page).await?;

        Ok((players, total))
    }
}

/// Whether a snapshot carries different content than the stored player.
pub fn snapshot_differs(player: &entity::player::Model, snapshot: &PlayerSnapshot) -> bool {
    player.full_name != snapshot.display_name()
        || player.position != snapshot.position
        || player.nfl_team != snapshot.team
        || player.status != snapshot.status
        || player.injury_status != snapshot.injury_status
        || player.height != snapshot.height
        || player.weight != snapshot.weight
        || player.age != snapshot.age
        || player.years_exp != snapshot.years_exp
}

fn filter_condition(filter: &AvailabilityFilter) -> Condition {
    let mut condition = Condition::all().add(entity::player::Column::IsCurrentData.eq(true));

    if !filter.positions.is_empty() {
        condition =
            condition.add(entity::player::Column::Position.is_in(filter.positions.iter().cloned()));
    }
    if !filter.nfl_teams.is_empty() {
        condition =
            condition.add(entity::player::Column::NflTeam.is_in(filter.nfl_teams.iter().cloned()));
    }
    if !filter.injury_statuses.is_empty() {
        condition = condition.add(
            entity::player::Column::InjuryStatus.is_in(filter.injury_statuses.iter().cloned()),
        );
    }
    if let Some(min_age) = filter.min_age {
        condition = condition.add(entity::player::Column::Age.gte(min_age));
    }
    if let Some(max_age) = filter.max_age {
        condition = condition.add(entity::player::Column::Age.lte(max_age));
    }
    if let Some(min_years_exp) = filter.min_years_exp {
        condition = condition.add(entity::player::Column::YearsExp.gte(min_years_exp));
    }
    if let Some(max_years_exp) = filter.max_years_exp {
        condition = condition.add(entity::player::Column::YearsExp.lte(max_years_exp));
    }

    condition
}
