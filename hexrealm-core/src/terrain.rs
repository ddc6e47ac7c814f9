//! Terrain and resource definitions, plus the terrain lookup seam
//!
//! This crate never generates terrain. Callers supply a [`TerrainProvider`];
//! [`TerrainMap`] is a simple in-memory one.

use crate::hex::HexCoordinate;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Terrain tag of a single hex
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    Plains,
    Grassland,
    Desert,
    Tundra,
    Forest,
    Jungle,
    Swamp,
    Hills,
    Mountains,
    ShallowWater,
    DeepWater,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 11] = [
        TerrainKind::Plains,
        TerrainKind::Grassland,
        TerrainKind::Desert,
        TerrainKind::Tundra,
        TerrainKind::Forest,
        TerrainKind::Jungle,
        TerrainKind::Swamp,
        TerrainKind::Hills,
        TerrainKind::Mountains,
        TerrainKind::ShallowWater,
        TerrainKind::DeepWater,
    ];

    /// Water blocks every ground unit
    pub fn is_blocking(self) -> bool {
        matches!(self, TerrainKind::ShallowWater | TerrainKind::DeepWater)
    }
}

/// How hard a resource is to find
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Exotic,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Uncommon, Rarity::Rare, Rarity::Exotic];
}

/// Resource deposit that may sit on a hex
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Timber,
    Stone,
    Fish,
    Game,
    Clay,
    Copper,
    Iron,
    Silver,
    Gold,
    Gemstones,
    Crystal,
}

impl ResourceKind {
    pub fn rarity(self) -> Rarity {
        match self {
            ResourceKind::Timber | ResourceKind::Stone | ResourceKind::Fish | ResourceKind::Game => {
                Rarity::Common
            }
            ResourceKind::Clay | ResourceKind::Copper | ResourceKind::Iron => Rarity::Uncommon,
            ResourceKind::Silver | ResourceKind::Gold => Rarity::Rare,
            ResourceKind::Gemstones | ResourceKind::Crystal => Rarity::Exotic,
        }
    }
}

/// What the terrain collaborator knows about one hex
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexTile {
    pub terrain: TerrainKind,
    #[serde(default)]
    pub resource: Option<ResourceKind>,
}

impl HexTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self { terrain, resource: None }
    }

    pub const fn with_resource(terrain: TerrainKind, resource: ResourceKind) -> Self {
        Self { terrain, resource: Some(resource) }
    }
}

/// Terrain lookup collaborator.
///
/// Only ever called with valid (non-negative) hexes. `None` means the hex
/// lies outside the map.
pub trait TerrainProvider {
    fn tile_at(&self, hex: HexCoordinate) -> Option<HexTile>;
}

impl<T: TerrainProvider + ?Sized> TerrainProvider for &T {
    fn tile_at(&self, hex: HexCoordinate) -> Option<HexTile> {
        (**self).tile_at(hex)
    }
}

/// Sparse in-memory terrain: explicit tiles over a default, bounded map
#[derive(Clone, Debug)]
pub struct TerrainMap {
    width: i32,
    height: i32,
    default_tile: HexTile,
    tiles: FxHashMap<HexCoordinate, HexTile>,
}

impl TerrainMap {
    pub fn new(width: i32, height: i32, default_tile: HexTile) -> Self {
        Self {
            width,
            height,
            default_tile,
            tiles: FxHashMap::default(),
        }
    }

    pub fn set(&mut self, hex: HexCoordinate, tile: HexTile) {
        self.tiles.insert(hex, tile);
    }

    pub fn with_tile(mut self, hex: HexCoordinate, tile: HexTile) -> Self {
        self.set(hex, tile);
        self
    }

    pub fn contains(&self, hex: HexCoordinate) -> bool {
        hex.is_valid() && hex.x < self.width && hex.y < self.height
    }
}

impl TerrainProvider for TerrainMap {
    fn tile_at(&self, hex: HexCoordinate) -> Option<HexTile> {
        if !self.contains(hex) {
            return None;
        }
        Some(self.tiles.get(&hex).copied().unwrap_or(self.default_tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_water_blocks() {
        for kind in TerrainKind::ALL {
            let water = matches!(kind, TerrainKind::ShallowWater | TerrainKind::DeepWater);
            assert_eq!(kind.is_blocking(), water, "{:?}", kind);
        }
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(ResourceKind::Timber.rarity() < ResourceKind::Iron.rarity());
        assert!(ResourceKind::Gold.rarity() < ResourceKind::Crystal.rarity());
    }

    #[test]
    fn test_terrain_map_bounds() {
        let map = TerrainMap::new(4, 4, HexTile::new(TerrainKind::Plains))
            .with_tile(HexCoordinate::new(1, 1), HexTile::with_resource(TerrainKind::Hills, ResourceKind::Iron));

        assert_eq!(map.tile_at(HexCoordinate::new(0, 0)), Some(HexTile::new(TerrainKind::Plains)));
        assert_eq!(map.tile_at(HexCoordinate::new(1, 1)).and_then(|t| t.resource), Some(ResourceKind::Iron));
        assert_eq!(map.tile_at(HexCoordinate::new(4, 0)), None);
        assert_eq!(map.tile_at(HexCoordinate::new(-1, 0)), None);
    }
}
