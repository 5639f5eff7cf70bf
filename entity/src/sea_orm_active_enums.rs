use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Slot a rostered player occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum RosterStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "bench")]
    Bench,
    #[sea_orm(string_value = "ir")]
    Ir,
    #[sea_orm(string_value = "taxi")]
    Taxi,
}

/// Roster status as reported by availability reads, which adds the unowned case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "bench")]
    Bench,
    #[sea_orm(string_value = "ir")]
    Ir,
    #[sea_orm(string_value = "taxi")]
    Taxi,
    #[sea_orm(string_value = "free_agent")]
    FreeAgent,
}

impl From<RosterStatus> for AvailabilityStatus {
    fn from(status: RosterStatus) -> Self {
        match status {
            RosterStatus::Active => Self::Active,
            RosterStatus::Bench => Self::Bench,
            RosterStatus::Ir => Self::Ir,
            RosterStatus::Taxi => Self::Taxi,
        }
    }
}

/// Kind of roster transaction recorded in the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum RosterTransaction {
    #[sea_orm(string_value = "add")]
    Add,
    #[sea_orm(string_value = "drop")]
    Drop,
    #[sea_orm(string_value = "trade")]
    Trade,
    #[sea_orm(string_value = "waiver_claim")]
    WaiverClaim,
    #[sea_orm(string_value = "free_agent_pickup")]
    FreeAgentPickup,
}

/// Kind of synchronization a sync status row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum SyncType {
    #[sea_orm(string_value = "players")]
    Players,
    #[sea_orm(string_value = "rosters")]
    Rosters,
}
