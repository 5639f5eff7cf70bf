use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Durable copy of an in-process cache entry, used to rehydrate after a restart.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cache_snapshot")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub version: String,
    #[sea_orm(column_type = "Text")]
    pub payload: String,
    pub stored_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
