use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sea_orm_active_enums::RosterStatus;

/// Temporal fact "team holds player in season/week with status".
///
/// At most one row per (team, player, season) carries `is_current = true`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roster_entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub team_id: i32,
    #[sea_orm(indexed)]
    pub player_id: i32,
    pub season_id: i32,
    #[sea_orm(indexed)]
    pub conference_id: i32,
    pub week: i32,
    pub status: RosterStatus,
    pub is_current: bool,
    pub added_date: DateTime,
    pub removed_date: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
