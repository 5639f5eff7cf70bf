use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sea_orm_active_enums::SyncType;

/// Outcome of the latest run of one sync type, per conference/season/week.
///
/// `conference_id` is `None` for the conference-independent player sync.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sync_status")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sync_type: SyncType,
    pub conference_id: Option<i32>,
    pub season_id: i32,
    pub week: i32,
    pub last_started_at: DateTime,
    pub last_completed_at: DateTime,
    pub duration_ms: i64,
    pub records_processed: i32,
    pub error_count: i32,
    pub last_error: Option<String>,
    pub next_sync_due: DateTime,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
