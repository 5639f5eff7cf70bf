use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::util::time;

pub struct TeamConferenceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeamConferenceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        team_id: i32,
        conference_id: i32,
        external_roster_id: Option<i32>,
    ) -> Result<entity::team_conference::Model, DbErr> {
        let now = time::now();

        entity::team_conference::ActiveModel {
            team_id: ActiveValue::Set(team_id),
            conference_id: ActiveValue::Set(conference_id),
            external_roster_id: ActiveValue::Set(external_roster_id),
            waiver_position: ActiveValue::Set(None),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Active junctions of a conference that carry an external roster id.
    pub async fn get_active_by_conference(
        &self,
        conference_id: i32,
    ) -> Result<Vec<entity::team_conference::Model>, DbErr> {
        entity::prelude::TeamConference::find()
            .filter(entity::team_conference::Column::ConferenceId.eq(conference_id))
            .filter(entity::team_conference::Column::IsActive.eq(true))
            .filter(entity::team_conference::Column::ExternalRosterId.is_not_null())
            .order_by_asc(entity::team_conference::Column::Id)
            .all(self.db)
            .await
    }

    /// Junctions of a team, active ones first.
    pub async fn get_by_team(
        &self,
        team_id: i32,
    ) -> Result<Vec<entity::team_conference::Model>, DbErr> {
        entity::prelude::TeamConference::find()
            .filter(entity::team_conference::Column::TeamId.eq(team_id))
            .order_by_desc(entity::team_conference::Column::IsActive)
            .order_by_desc(entity::team_conference::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<entity::team_conference::Model>, DbErr> {
        entity::prelude::TeamConference::find()
            .order_by_asc(entity::team_conference::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn set_active(&self, junction_id: i32) -> Result<(), DbErr> {
        entity::team_conference::ActiveModel {
            id: ActiveValue::Unchanged(junction_id),
            is_active: ActiveValue::Set(true),
            updated_at: ActiveValue::Set(time::now()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Stores the waiver position reported for a junction's roster if it changed.
    pub async fn update_waiver_position(
        &self,
        junction: &entity::team_conference::Model,
        waiver_position: Option<i32>,
    ) -> Result<bool, DbErr> {
        if junction.waiver_position == waiver_position {
            return Ok(false);
        }

        let mut active = junction.clone().into_active_model();
        active.waiver_position = ActiveValue::Set(waiver_position);
        active.updated_at = ActiveValue::Set(time::now());
        active.update(self.db).await?;

        Ok(true)
    }

    pub async fn delete(&self, junction_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::TeamConference::delete_by_id(junction_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
