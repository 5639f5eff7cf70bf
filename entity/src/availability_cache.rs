use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sea_orm_active_enums::AvailabilityStatus;

/// Durable mirror of derived availability records.
///
/// `conference_id` is `None` for records computed across every conference.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "availability_cache")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub player_id: i32,
    pub season_id: i32,
    pub week: i32,
    pub conference_id: Option<i32>,
    pub is_available: bool,
    pub owned_by_team_id: Option<i32>,
    pub owned_by_conference_id: Option<i32>,
    pub roster_status: AvailabilityStatus,
    pub waiver_priority: Option<i32>,
    pub cache_updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
