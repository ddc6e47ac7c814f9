//! HEXREALM Core - Spatial and territorial engine
//!
//! This crate provides the map-side rules of a hex strategy game:
//! - Hex geometry (offset "shoved-column" coordinates, rings, world mapping)
//! - Movement costs per terrain, with water as blocking terrain
//! - Vision radius from exploration competence
//! - Resource discovery gated on exploration and rarity
//! - Territory claims and colonies
//!
//! Terrain itself comes from the caller through [`TerrainProvider`].

pub mod hex;
pub mod terrain;
pub mod movement;
pub mod vision;
pub mod discovery;
pub mod player;
pub mod territory;
pub mod rules;
pub mod engine;
pub mod error;

// Re-exports for convenient access
pub use hex::{are_adjacent, neighbors, ring, HexCoordinate, HexLayout, WorldPosition, MAX_COORDINATE};
pub use terrain::{HexTile, Rarity, ResourceKind, TerrainKind, TerrainMap, TerrainProvider};
pub use movement::{MovementCosts, IMPASSABLE_COST};
pub use vision::{vision_radius, visible_hexes, VisionRules};
pub use discovery::{is_resource_visible, ExploredHexes, RarityUnlocks, Viewer};
pub use player::{CallerPrivilege, Competences, Faction, FactionId, PlayerId, PlayerState};
pub use territory::{
    BuildingId, ClaimedTerritory, Claimant, Colony, ColonyId, ExpansionPolicy, LedgerStats, TerritoryLedger,
};
pub use rules::{ActionCosts, Rules};
pub use engine::{MoveOutcome, SpatialEngine};
pub use error::{Prerequisite, Result, SpatialError};
