use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

pub struct ConferenceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ConferenceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(
        &self,
        conference_id: i32,
    ) -> Result<Option<entity::conference::Model>, DbErr> {
        entity::prelude::Conference::find_by_id(conference_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_season(
        &self,
        season_id: i32,
    ) -> Result<Vec<entity::conference::Model>, DbErr> {
        entity::prelude::Conference::find()
            .filter(entity::conference::Column::SeasonId.eq(season_id))
            .order_by_asc(entity::conference::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<entity::conference::Model>, DbErr> {
        entity::prelude::Conference::find()
            .order_by_asc(entity::conference::Column::Id)
            .all(self.db)
            .await
    }
}
