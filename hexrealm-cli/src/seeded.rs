//! Seeded terrain - deterministic stand-in for a real terrain generator
//!
//! Every hex gets its own ChaCha stream keyed by (seed, x, y), so the same
//! hex always yields the same tile regardless of lookup order.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hexrealm_core::{HexCoordinate, HexTile, ResourceKind, TerrainKind, TerrainProvider};

/// Relative terrain frequencies
const TERRAIN_WEIGHTS: [(TerrainKind, u32); 11] = [
    (TerrainKind::Plains, 30),
    (TerrainKind::Grassland, 15),
    (TerrainKind::Forest, 15),
    (TerrainKind::Hills, 10),
    (TerrainKind::Mountains, 5),
    (TerrainKind::Desert, 5),
    (TerrainKind::Tundra, 3),
    (TerrainKind::Jungle, 4),
    (TerrainKind::Swamp, 3),
    (TerrainKind::ShallowWater, 6),
    (TerrainKind::DeepWater, 4),
];

/// Resource frequencies, common first
const RESOURCE_WEIGHTS: [(ResourceKind, u32); 11] = [
    (ResourceKind::Timber, 20),
    (ResourceKind::Stone, 20),
    (ResourceKind::Fish, 10),
    (ResourceKind::Game, 15),
    (ResourceKind::Clay, 8),
    (ResourceKind::Copper, 8),
    (ResourceKind::Iron, 8),
    (ResourceKind::Silver, 4),
    (ResourceKind::Gold, 3),
    (ResourceKind::Gemstones, 2),
    (ResourceKind::Crystal, 2),
];

/// Percent of land hexes carrying a resource
const RESOURCE_CHANCE: u32 = 15;

#[derive(Clone, Debug)]
pub struct SeededTerrain {
    seed: u64,
    width: i32,
    height: i32,
    /// Hand-placed tiles that win over generated ones
    overrides: BTreeMap<HexCoordinate, HexTile>,
}

impl SeededTerrain {
    pub fn new(seed: u64, width: i32, height: i32) -> Self {
        Self {
            seed,
            width,
            height,
            overrides: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, hex: HexCoordinate, tile: HexTile) {
        self.overrides.insert(hex, tile);
    }

    fn hex_rng(&self, hex: HexCoordinate) -> ChaCha8Rng {
        let key = ((hex.x as u64) << 32) | (hex.y as u32 as u64);
        ChaCha8Rng::seed_from_u64(self.seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ key)
    }

    fn generate(&self, hex: HexCoordinate) -> HexTile {
        let mut rng = self.hex_rng(hex);
        let terrain = pick(&mut rng, &TERRAIN_WEIGHTS);
        let resource = if !terrain.is_blocking() && rng.gen_range(0..100) < RESOURCE_CHANCE {
            Some(pick(&mut rng, &RESOURCE_WEIGHTS))
        } else {
            None
        };
        HexTile { terrain, resource }
    }
}

impl TerrainProvider for SeededTerrain {
    fn tile_at(&self, hex: HexCoordinate) -> Option<HexTile> {
        if !hex.is_valid() || hex.x >= self.width || hex.y >= self.height {
            return None;
        }
        Some(self.overrides.get(&hex).copied().unwrap_or_else(|| self.generate(hex)))
    }
}

/// Weighted choice from a non-empty table
fn pick<T: Copy, R: Rng>(rng: &mut R, table: &[(T, u32)]) -> T {
    let total: u32 = table.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for &(item, weight) in table {
        if roll < weight {
            return item;
        }
        roll -= weight;
    }
    table[table.len() - 1].0
}
