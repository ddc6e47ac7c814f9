//! Movement cost table and step validation
//!
//! Nothing here mutates state; the caller deducts the cost.

use crate::error::{Result, SpatialError};
use crate::hex::HexCoordinate;
use crate::terrain::{TerrainKind, TerrainProvider};
use serde::{Deserialize, Serialize};

/// Cost reported for blocking terrain; no balance ever covers it
pub const IMPASSABLE_COST: u32 = 999;

/// Allowed range for passable terrain costs
pub const MIN_LAND_COST: u32 = 1;
pub const MAX_LAND_COST: u32 = 5;

/// Action-point cost of entering each passable terrain kind.
/// Water is not listed: it is always blocking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementCosts {
    pub plains: u32,
    pub grassland: u32,
    pub desert: u32,
    pub tundra: u32,
    pub forest: u32,
    pub jungle: u32,
    pub swamp: u32,
    pub hills: u32,
    pub mountains: u32,
}

impl Default for MovementCosts {
    fn default() -> Self {
        Self {
            plains: 1,
            grassland: 1,
            desert: 2,
            tundra: 2,
            forest: 2,
            jungle: 3,
            swamp: 3,
            hills: 3,
            mountains: 4,
        }
    }
}

impl MovementCosts {
    pub fn cost(&self, terrain: TerrainKind) -> u32 {
        match terrain {
            TerrainKind::Plains => self.plains,
            TerrainKind::Grassland => self.grassland,
            TerrainKind::Desert => self.desert,
            TerrainKind::Tundra => self.tundra,
            TerrainKind::Forest => self.forest,
            TerrainKind::Jungle => self.jungle,
            TerrainKind::Swamp => self.swamp,
            TerrainKind::Hills => self.hills,
            TerrainKind::Mountains => self.mountains,
            TerrainKind::ShallowWater | TerrainKind::DeepWater => IMPASSABLE_COST,
        }
    }

    pub fn is_blocking(&self, terrain: TerrainKind) -> bool {
        self.cost(terrain) >= IMPASSABLE_COST
    }

    pub fn can_afford(&self, available_points: u32, terrain: TerrainKind) -> bool {
        let cost = self.cost(terrain);
        cost < IMPASSABLE_COST && available_points >= cost
    }

    /// Land terrain whose cost falls outside the allowed range
    pub fn out_of_range(&self) -> Vec<(TerrainKind, u32)> {
        TerrainKind::ALL
            .iter()
            .filter(|t| !t.is_blocking())
            .map(|&t| (t, self.cost(t)))
            .filter(|&(_, c)| !(MIN_LAND_COST..=MAX_LAND_COST).contains(&c))
            .collect()
    }

    /// Validate a single-hex step and return its cost.
    ///
    /// Checks, in order: target validity, both ends within
    /// [`crate::hex::MAX_COORDINATE`], adjacency, map bounds, blocking
    /// terrain, affordability.
    pub fn check_step<T: TerrainProvider + ?Sized>(
        &self,
        available_points: u32,
        from: HexCoordinate,
        to: HexCoordinate,
        terrain: &T,
    ) -> Result<u32> {
        if !to.is_valid() {
            return Err(SpatialError::InvalidHex(to));
        }
        if !to.in_bounds() {
            return Err(SpatialError::OffMap(to));
        }
        if !from.in_bounds() {
            return Err(SpatialError::OffMap(from));
        }
        if !from.is_adjacent_to(to) {
            return Err(SpatialError::NotAdjacent { from, to });
        }
        let tile = terrain.tile_at(to).ok_or(SpatialError::OffMap(to))?;
        let cost = self.cost(tile.terrain);
        if cost >= IMPASSABLE_COST {
            return Err(SpatialError::ImpassableTerrain {
                hex: to,
                terrain: tile.terrain,
            });
        }
        if available_points < cost {
            return Err(SpatialError::InsufficientActionPoints {
                required: cost,
                available: available_points,
            });
        }
        Ok(cost)
    }
}
