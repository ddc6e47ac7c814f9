//! Player and faction state read (and, for moves, written) by the engine
//!
//! The surrounding application owns this data; the engine borrows it per
//! action.

use crate::discovery::ExploredHexes;
use crate::error::{Result, SpatialError};
use crate::hex::{HexCoordinate, HexLayout, WorldPosition};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactionId(pub u32);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

impl std::fmt::Display for FactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "faction#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    pub name: String,
}

impl Faction {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id: FactionId(id),
            name: name.to_string(),
        }
    }
}

/// Whether a caller is held to the ordinary prerequisite checks.
///
/// `Unrestricted` (game master) skips competence, membership, presence
/// and cost checks but never the uniqueness rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallerPrivilege {
    #[default]
    Normal,
    Unrestricted,
}

impl CallerPrivilege {
    pub fn is_unrestricted(self) -> bool {
        self == CallerPrivilege::Unrestricted
    }
}

/// Competence levels relevant to spatial actions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Competences {
    #[serde(default)]
    pub exploration: u8,
    /// Map detail level; only carried through, never interpreted here
    #[serde(default)]
    pub cartography: u8,
    #[serde(default)]
    pub local_influence: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub faction: Option<Faction>,
    pub position: WorldPosition,
    pub action_points: u32,
    #[serde(default)]
    pub competences: Competences,
    #[serde(default)]
    pub explored: ExploredHexes,
    #[serde(default)]
    pub privilege: CallerPrivilege,
}

impl PlayerState {
    /// New player standing on the center of `hex`
    pub fn new(id: u32, name: &str, hex: HexCoordinate, layout: &HexLayout) -> Self {
        Self {
            id: PlayerId(id),
            name: name.to_string(),
            faction: None,
            position: layout.hex_to_world(hex),
            action_points: 0,
            competences: Competences::default(),
            explored: ExploredHexes::default(),
            privilege: CallerPrivilege::Normal,
        }
    }

    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = Some(faction);
        self
    }

    pub fn with_action_points(mut self, points: u32) -> Self {
        self.action_points = points;
        self
    }

    pub fn with_competences(mut self, competences: Competences) -> Self {
        self.competences = competences;
        self
    }

    pub fn with_privilege(mut self, privilege: CallerPrivilege) -> Self {
        self.privilege = privilege;
        self
    }

    /// Hex the avatar currently stands on (nearest hex center)
    pub fn avatar_hex(&self, layout: &HexLayout) -> HexCoordinate {
        layout.world_to_hex(self.position)
    }

    pub fn faction_id(&self) -> Option<FactionId> {
        self.faction.as_ref().map(|f| f.id)
    }

    /// Deduct action points, refusing if the balance is too low
    pub fn spend(&mut self, points: u32) -> Result<()> {
        if self.action_points < points {
            return Err(SpatialError::InsufficientActionPoints {
                required: points,
                available: self.action_points,
            });
        }
        self.action_points -= points;
        Ok(())
    }
}
