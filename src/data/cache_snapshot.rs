use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

pub struct CacheSnapshotRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CacheSnapshotRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, key: &str) -> Result<Option<entity::cache_snapshot::Model>, DbErr> {
        entity::prelude::CacheSnapshot::find_by_id(key.to_string())
            .one(self.db)
            .await
    }

    pub async fn upsert(
        &self,
        key: &str,
        version: &str,
        payload: String,
        stored_at: NaiveDateTime,
    ) -> Result<(), DbErr> {
        match self.find(key).await? {
            Some(snapshot) => {
                let mut snapshot = snapshot.into_active_model();
                snapshot.version = ActiveValue::Set(version.to_string());
                snapshot.payload = ActiveValue::Set(payload);
                snapshot.stored_at = ActiveValue::Set(stored_at);
                snapshot.update(self.db).await?;
            }
            None => {
                entity::cache_snapshot::ActiveModel {
                    key: ActiveValue::Set(key.to_string()),
                    version: ActiveValue::Set(version.to_string()),
                    payload: ActiveValue::Set(payload),
                    stored_at: ActiveValue::Set(stored_at),
                }
                .insert(self.db)
                .await?;
            }
        }

        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::CacheSnapshot::delete_by_id(key.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_with_prefix(&self, prefix: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::CacheSnapshot::delete_many()
            .filter(entity::cache_snapshot::Column::Key.starts_with(prefix))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_stored_before(&self, cutoff: NaiveDateTime) -> Result<u64, DbErr> {
        let result = entity::prelude::CacheSnapshot::delete_many()
            .filter(entity::cache_snapshot::Column::StoredAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
