use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Canonical player identity synchronized from the external catalog.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "player")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub external_player_id: String,
    pub full_name: String,
    #[sea_orm(indexed)]
    pub position: Option<String>,
    pub nfl_team: Option<String>,
    pub status: Option<String>,
    pub injury_status: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub age: Option<i32>,
    pub years_exp: Option<i32>,
    pub data_version: i32,
    pub is_current_data: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
