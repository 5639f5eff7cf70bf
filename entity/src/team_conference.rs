use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Junction mapping a conference's external roster id to an internal team.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_conference")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub team_id: i32,
    #[sea_orm(indexed)]
    pub conference_id: i32,
    pub external_roster_id: Option<i32>,
    pub waiver_position: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
