//! Rejection reasons for spatial and territorial actions
//!
//! Every variant is a recoverable, user-facing outcome.

use crate::hex::HexCoordinate;
use crate::player::FactionId;
use crate::territory::ColonyId;
use crate::terrain::TerrainKind;
use serde::{Deserialize, Serialize};

/// Requirement a caller failed to meet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Prerequisite {
    #[error("local influence level {required} required (have {actual})")]
    InfluenceLevel { required: u8, actual: u8 },

    #[error("exploration level {required} required (have {actual})")]
    ExplorationLevel { required: u8, actual: u8 },

    #[error("faction membership required")]
    FactionMembership,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SpatialError {
    #[error("hex {0} is already claimed")]
    AlreadyClaimed(HexCoordinate),

    #[error("prerequisites not met: {0}")]
    PrerequisitesNotMet(Prerequisite),

    #[error("avatar is at {actual}, not at {target}")]
    NotPresentAtHex {
        target: HexCoordinate,
        actual: HexCoordinate,
    },

    #[error("territory {hex} is not controlled by your faction")]
    TerritoryNotControlled {
        hex: HexCoordinate,
        faction: Option<FactionId>,
    },

    #[error("a colony already exists at {hex}")]
    ColonyAlreadyExists { hex: HexCoordinate, colony: ColonyId },

    #[error("insufficient action points: need {required}, have {available}")]
    InsufficientActionPoints { required: u32, available: u32 },

    #[error("{terrain:?} at {hex} is impassable")]
    ImpassableTerrain { hex: HexCoordinate, terrain: TerrainKind },

    #[error("hex {0} has negative coordinates")]
    InvalidHex(HexCoordinate),

    #[error("hex {0} is outside the map")]
    OffMap(HexCoordinate),

    #[error("{to} is not adjacent to {from}")]
    NotAdjacent { from: HexCoordinate, to: HexCoordinate },

    #[error("{hex} does not border the territory of colony {colony}")]
    NotContiguous { hex: HexCoordinate, colony: ColonyId },

    #[error("hex {hex} is already part of colony {colony}")]
    AlreadyInTerritory { hex: HexCoordinate, colony: ColonyId },

    #[error("hex {0} is not in view and cannot be explored")]
    NotExplorable(HexCoordinate),

    #[error("a colony name is required")]
    MissingColonyName,

    #[error("colony {0} not found")]
    ColonyNotFound(ColonyId),
}

pub type Result<T> = std::result::Result<T, SpatialError>;
