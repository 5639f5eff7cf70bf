use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Standings of one team within one conference and season.
///
/// Expected to be unique per (team, conference, season); duplicates are detected
/// and collapsed by the integrity service.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_season")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub team_id: i32,
    #[sea_orm(indexed)]
    pub conference_id: i32,
    pub season_id: i32,
    pub wins: i32,
    pub losses: i32,
    pub ties: i32,
    pub points_for: f64,
    pub points_against: f64,
    pub last_updated: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
