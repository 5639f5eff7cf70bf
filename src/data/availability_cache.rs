use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::availability::{AvailabilityKey, AvailabilityRecord};

pub struct AvailabilityCacheRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AvailabilityCacheRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, key: &AvailabilityKey) -> Result<Option<AvailabilityRecord>, DbErr> {
        let row = entity::prelude::AvailabilityCache::find()
            .filter(entity::availability_cache::Column::PlayerId.eq(key.player_id))
            .filter(entity::availability_cache::Column::SeasonId.eq(key.season_id))
            .filter(entity::availability_cache::Column::Week.eq(key.week))
            .filter(conference_scope(key.conference_id))
            .order_by_desc(entity::availability_cache::Column::CacheUpdatedAt)
            .one(self.db)
            .await?;

        Ok(row.map(|row| AvailabilityRecord {
            player_id: row.player_id,
            season_id: row.season_id,
            week: row.week,
            conference_id: row.conference_id,
            is_available: row.is_available,
            owned_by_team_id: row.owned_by_team_id,
            owned_by_conference_id: row.owned_by_conference_id,
            roster_status: row.roster_status,
            waiver_priority: row.waiver_priority,
            cache_updated_at: row.cache_updated_at,
        }))
    }

    /// Replaces the mirrored record of the record's key.
    pub async fn replace(&self, record: &AvailabilityRecord) -> Result<(), DbErr> {
        self.delete(&record.key()).await?;

        entity::availability_cache::ActiveModel {
            player_id: ActiveValue::Set(record.player_id),
            season_id: ActiveValue::Set(record.season_id),
            week: ActiveValue::Set(record.week),
            conference_id: ActiveValue::Set(record.conference_id),
            is_available: ActiveValue::Set(record.is_available),
            owned_by_team_id: ActiveValue::Set(record.owned_by_team_id),
            owned_by_conference_id: ActiveValue::Set(record.owned_by_conference_id),
            roster_status: ActiveValue::Set(record.roster_status),
            waiver_priority: ActiveValue::Set(record.waiver_priority),
            cache_updated_at: ActiveValue::Set(record.cache_updated_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, key: &AvailabilityKey) -> Result<u64, DbErr> {
        let result = entity::prelude::AvailabilityCache::delete_many()
            .filter(entity::availability_cache::Column::PlayerId.eq(key.player_id))
            .filter(entity::availability_cache::Column::SeasonId.eq(key.season_id))
            .filter(entity::availability_cache::Column::Week.eq(key.week))
            .filter(conference_scope(key.conference_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_by_player(&self, player_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::AvailabilityCache::delete_many()
            .filter(entity::availability_cache::Column::PlayerId.eq(player_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_all(&self) -> Result<u64, DbErr> {
        let result = entity::prelude::AvailabilityCache::delete_many()
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_updated_before(&self, cutoff: NaiveDateTime) -> Result<u64, DbErr> {
        let result = entity::prelude::AvailabilityCache::delete_many()
            .filter(entity::availability_cache::Column::CacheUpdatedAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

fn conference_scope(conference_id: Option<i32>) -> Condition {
    match conference_id {
        Some(conference_id) => Condition::all()
            .add(entity::availability_cache::Column::ConferenceId.eq(conference_id)),
        None => Condition::all().add(entity::availability_cache::Column::ConferenceId.is_null()),
    }
}
