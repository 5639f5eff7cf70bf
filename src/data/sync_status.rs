use entity::sea_orm_active_enums::SyncType;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

use crate::util::time;

/// Values recorded for one finished sync stage.
pub struct SyncStatusUpdate {
    pub sync_type: SyncType,
    pub conference_id: Option<i32>,
    pub season_id: i32,
    pub week: i32,
    pub started_at: chrono::NaiveDateTime,
    pub completed_at: chrono::NaiveDateTime,
    pub duration_ms: i64,
    pub records_processed: i32,
    pub error_count: i32,
    pub last_error: Option<String>,
}

pub struct SyncStatusRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SyncStatusRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Writes the status of a (sync type, conference, season, week), creating it on first run.
    pub async fn upsert(
        &self,
        update: SyncStatusUpdate,
    ) -> Result<entity::sync_status::Model, DbErr> {
        let conference_filter = match update.conference_id {
            Some(conference_id) => entity::sync_status::Column::ConferenceId.eq(conference_id),
            None => entity::sync_status::Column::ConferenceId.is_null(),
        };

        let existing = entity::prelude::SyncStatus::find()
            .filter(entity::sync_status::Column::SyncType.eq(update.sync_type))
            .filter(conference_filter)
            .filter(entity::sync_status::Column::SeasonId.eq(update.season_id))
            .filter(entity::sync_status::Column::Week.eq(update.week))
            .one(self.db)
            .await?;

        let now = time::now();
        let next_sync_due = time::next_sync_due(update.completed_at);

        match existing {
            Some(status) => {
                let mut status = status.into_active_model();
                status.last_started_at = ActiveValue::Set(update.started_at);
                status.last_completed_at = ActiveValue::Set(update.completed_at);
                status.duration_ms = ActiveValue::Set(update.duration_ms);
                status.records_processed = ActiveValue::Set(update.records_processed);
                status.error_count = ActiveValue::Set(update.error_count);
                status.last_error = ActiveValue::Set(update.last_error);
                status.next_sync_due = ActiveValue::Set(next_sync_due);
                status.updated_at = ActiveValue::Set(now);
                status.update(self.db).await
            }
            None => {
                entity::sync_status::ActiveModel {
                    sync_type: ActiveValue::Set(update.sync_type),
                    conference_id: ActiveValue::Set(update.conference_id),
                    season_id: ActiveValue::Set(update.season_id),
                    week: ActiveValue::Set(update.week),
                    last_started_at: ActiveValue::Set(update.started_at),
                    last_completed_at: ActiveValue::Set(update.completed_at),
                    duration_ms: ActiveValue::Set(update.duration_ms),
                    records_processed: ActiveValue::Set(update.records_processed),
                    error_count: ActiveValue::Set(update.error_count),
                    last_error: ActiveValue::Set(update.last_error),
                    next_sync_due: ActiveValue::Set(next_sync_due),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                }
                .insert(self.db)
                .await
            }
        }
    }
}
