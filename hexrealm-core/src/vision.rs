//! Vision radius policy and visible hex sets

use crate::hex::{ring, HexCoordinate};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Exploration level at which vision first widens
pub const EXTENDED_VISION_LEVEL: u8 = 2;

/// Vision radius thresholds.
///
/// Levels below `extended_at_level` see `base_radius`; level 0 and level 1
/// are deliberately identical under the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionRules {
    pub base_radius: u32,
    pub extended_radius: u32,
    pub extended_at_level: u8,
}

impl Default for VisionRules {
    fn default() -> Self {
        Self {
            base_radius: 1,
            extended_radius: 2,
            extended_at_level: EXTENDED_VISION_LEVEL,
        }
    }
}

impl VisionRules {
    pub fn vision_radius(&self, exploration_level: u8) -> u32 {
        if exploration_level >= self.extended_at_level {
            self.extended_radius
        } else {
            self.base_radius
        }
    }

    /// Hexes visible from `center`. Deterministic in its inputs.
    pub fn visible_hexes(&self, center: HexCoordinate, exploration_level: u8) -> FxHashSet<HexCoordinate> {
        ring(center, self.vision_radius(exploration_level))
    }
}

/// Vision radius under the default thresholds
pub fn vision_radius(exploration_level: u8) -> u32 {
    VisionRules::default().vision_radius(exploration_level)
}

/// Visible hexes under the default thresholds
pub fn visible_hexes(center: HexCoordinate, exploration_level: u8) -> FxHashSet<HexCoordinate> {
    VisionRules::default().visible_hexes(center, exploration_level)
}
