use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QuerySelect,
};

use crate::util::time;

pub struct TeamRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeamRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, team_id: i32) -> Result<Option<entity::team::Model>, DbErr> {
        entity::prelude::Team::find_by_id(team_id).one(self.db).await
    }

    pub async fn get_all_ids(&self) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Team::find()
            .select_only()
            .column(entity::team::Column::Id)
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Sets the owner of a team, skipping the write when nothing changed.
    ///
    /// # Returns
    /// - `Ok(true)` - Owner fields were updated
    /// - `Ok(false)` - Team missing or already up to date
    pub async fn update_owner(
        &self,
        team_id: i32,
        owner_name: &str,
        external_owner_id: &str,
    ) -> Result<bool, DbErr> {
        let Some(team) = self.find_by_id(team_id).await? else {
            return Ok(false);
        };

        if team.owner_name.as_deref() == Some(owner_name)
            && team.external_owner_id.as_deref() == Some(external_owner_id)
        {
            return Ok(false);
        }

        let mut team = team.into_active_model();
        team.owner_name = ActiveValue::Set(Some(owner_name.to_string()));
        team.external_owner_id = ActiveValue::Set(Some(external_owner_id.to_string()));
        team.updated_at = ActiveValue::Set(time::now());
        team.update(self.db).await?;

        Ok(true)
    }
}
