//! Roster mutations accepted by the roster service.

use entity::sea_orm_active_enums::{RosterStatus, RosterTransaction};

/// Player slot an action applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RosterTarget {
    pub player_id: i32,
    pub conference_id: i32,
    pub season_id: i32,
    pub week: i32,
}

/// Closed set of roster mutations.
///
/// Acquiring actions (`Add`, `WaiverClaim`, `FreeAgentPickup`, the receiving side of
/// `Trade`) supersede any current entry of the same team, player and season before
/// inserting the new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RosterAction {
    Add {
        target: RosterTarget,
        team_id: i32,
        status: RosterStatus,
    },
    WaiverClaim {
        target: RosterTarget,
        team_id: i32,
        status: RosterStatus,
    },
    FreeAgentPickup {
        target: RosterTarget,
        team_id: i32,
        status: RosterStatus,
    },
    Drop {
        target: RosterTarget,
        team_id: i32,
    },
    Trade {
        target: RosterTarget,
        from_team_id: i32,
        to_team_id: i32,
        status: RosterStatus,
    },
    ChangeStatus {
        target: RosterTarget,
        team_id: i32,
        status: RosterStatus,
    },
}

impl RosterAction {
    pub fn target(&self) -> &RosterTarget {
        match self {
            Self::Add { target, .. }
            | Self::WaiverClaim { target, .. }
            | Self::FreeAgentPickup { target, .. }
            | Self::Drop { target, .. }
            | Self::Trade { target, .. }
            | Self::ChangeStatus { target, .. } => target,
        }
    }

    /// Transaction recorded in the history log, `None` for status changes.
    pub fn transaction(&self) -> Option<RosterTransaction> {
        match self {
            Self::Add { .. } => Some(RosterTransaction::Add),
            Self::WaiverClaim { .. } => Some(RosterTransaction::WaiverClaim),
            Self::FreeAgentPickup { .. } => Some(RosterTransaction::FreeAgentPickup),
            Self::Drop { .. } => Some(RosterTransaction::Drop),
            Self::Trade { .. } => Some(RosterTransaction::Trade),
            Self::ChangeStatus { .. } => None,
        }
    }

    /// Team holding the player once the action applied, `None` after a drop.
    pub fn resulting_owner(&self) -> Option<(i32, RosterStatus)> {
        match self {
            Self::Add {
                team_id, status, ..
            }
            | Self::WaiverClaim {
                team_id, status, ..
            }
            | Self::FreeAgentPickup {
                team_id, status, ..
            }
            | Self::ChangeStatus {
                team_id, status, ..
            } => Some((*team_id, *status)),
            Self::Trade {
                to_team_id, status, ..
            } => Some((*to_team_id, *status)),
            Self::Drop { .. } => None,
        }
    }
}
