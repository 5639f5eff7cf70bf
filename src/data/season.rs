use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

pub struct SeasonRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SeasonRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Season flagged as current, the latest one if several are.
    pub async fn find_current(&self) -> Result<Option<entity::season::Model>, DbErr> {
        entity::prelude::Season::find()
            .filter(entity::season::Column::IsCurrent.eq(true))
            .order_by_desc(entity::season::Column::Id)
            .one(self.db)
            .await
    }

    pub async fn get_all_ids(&self) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Season::find()
            .select_only()
            .column(entity::season::Column::Id)
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }
}
