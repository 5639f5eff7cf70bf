use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sea_orm_active_enums::RosterTransaction;

/// Append-only audit log of roster transactions.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roster_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub conference_id: i32,
    pub season_id: i32,
    pub week: i32,
    #[sea_orm(indexed)]
    pub player_id: i32,
    pub action: RosterTransaction,
    pub from_team_id: Option<i32>,
    pub to_team_id: Option<i32>,
    pub occurred_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
