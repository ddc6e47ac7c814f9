//! Resource discovery gate
//!
//! Seeing a hex is not enough to see what lies on it: the viewer must have
//! explored that hex and be skilled enough for the resource's rarity.

use crate::hex::HexCoordinate;
use crate::player::{CallerPrivilege, PlayerState};
use crate::terrain::{Rarity, ResourceKind, TerrainProvider};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Lowest exploration level that discloses any resource at all
pub const MIN_DISCOVERY_LEVEL: u8 = 1;

/// Per-viewer set of explored hexes. Flags are never cleared.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExploredHexes {
    hexes: FxHashSet<HexCoordinate>,
}

impl ExploredHexes {
    /// Returns true if the hex was newly marked
    pub fn mark(&mut self, hex: HexCoordinate) -> bool {
        self.hexes.insert(hex)
    }

    pub fn contains(&self, hex: HexCoordinate) -> bool {
        self.hexes.contains(&hex)
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HexCoordinate> {
        self.hexes.iter()
    }
}

/// Exploration level needed to notice each rarity tier
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityUnlocks {
    pub common: u8,
    pub uncommon: u8,
    pub rare: u8,
    pub exotic: u8,
}

impl Default for RarityUnlocks {
    fn default() -> Self {
        Self {
            common: 1,
            uncommon: 2,
            rare: 3,
            exotic: 4,
        }
    }
}

impl RarityUnlocks {
    pub fn required_level(&self, rarity: Rarity) -> u8 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Exotic => self.exotic,
        }
    }

    pub fn is_unlocked(&self, rarity: Rarity, exploration_level: u8) -> bool {
        exploration_level >= self.required_level(rarity)
    }

    /// Rarer tiers never unlock before more common ones
    pub fn is_monotonic(&self) -> bool {
        Rarity::ALL
            .windows(2)
            .all(|pair| self.required_level(pair[0]) <= self.required_level(pair[1]))
    }
}

/// The parts of a player's state the gate looks at
#[derive(Clone, Copy, Debug)]
pub struct Viewer<'a> {
    pub exploration_level: u8,
    pub explored: &'a ExploredHexes,
    pub privilege: CallerPrivilege,
}

impl<'a> Viewer<'a> {
    pub fn of(player: &'a PlayerState) -> Self {
        Self {
            exploration_level: player.competences.exploration,
            explored: &player.explored,
            privilege: player.privilege,
        }
    }
}

/// Whether `resource` on `hex` is disclosed to `viewer`.
///
/// Unrestricted viewers see everything. Everyone else needs all of: a
/// resource present, exploration level >= 1, the hex explored, and the
/// rarity tier unlocked.
pub fn is_resource_visible(
    hex: HexCoordinate,
    resource: Option<ResourceKind>,
    viewer: &Viewer<'_>,
    unlocks: &RarityUnlocks,
) -> bool {
    if viewer.privilege.is_unrestricted() {
        return true;
    }
    let Some(resource) = resource else {
        return false;
    };
    viewer.exploration_level >= MIN_DISCOVERY_LEVEL
        && viewer.explored.contains(hex)
        && unlocks.is_unlocked(resource.rarity(), viewer.exploration_level)
}

/// Resources the viewer may see among `hexes`, sorted by hex.
///
/// Invalid hexes are skipped without consulting the terrain provider.
pub fn disclosed_resources<'h, T, I>(
    hexes: I,
    terrain: &T,
    viewer: &Viewer<'_>,
    unlocks: &RarityUnlocks,
) -> Vec<(HexCoordinate, ResourceKind)>
where
    T: TerrainProvider + ?Sized,
    I: IntoIterator<Item = &'h HexCoordinate>,
{
    let mut found: Vec<(HexCoordinate, ResourceKind)> = hexes
        .into_iter()
        .filter(|hex| hex.is_valid())
        .filter_map(|&hex| {
            let resource = terrain.tile_at(hex)?.resource?;
            is_resource_visible(hex, Some(resource), viewer, unlocks).then_some((hex, resource))
        })
        .collect();
    found.sort_by_key(|&(hex, _)| hex);
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{HexTile, TerrainKind, TerrainMap};

    fn viewer(level: u8, explored: &ExploredHexes) -> Viewer<'_> {
        Viewer {
            exploration_level: level,
            explored,
            privilege: CallerPrivilege::Normal,
        }
    }

    #[test]
    fn test_unexplored_hex_hides_resource() {
        let explored = ExploredHexes::default();
        let hex = HexCoordinate::new(3, 3);
        let unlocks = RarityUnlocks::default();
        assert!(!is_resource_visible(hex, Some(ResourceKind::Timber), &viewer(4, &explored), &unlocks));
    }

    #[test]
    fn test_explored_hex_reveals_common_resource() {
        let mut explored = ExploredHexes::default();
        let hex = HexCoordinate::new(3, 3);
        assert!(explored.mark(hex));
        assert!(!explored.mark(hex));
        let unlocks = RarityUnlocks::default();
        assert!(is_resource_visible(hex, Some(ResourceKind::Timber), &viewer(1, &explored), &unlocks));
        assert!(!is_resource_visible(hex, Some(ResourceKind::Timber), &viewer(0, &explored), &unlocks));
        assert!(!is_resource_visible(hex, None, &viewer(4, &explored), &unlocks));
    }

    #[test]
    fn test_rarity_tiers_unlock_with_level() {
        let mut explored = ExploredHexes::default();
        let hex = HexCoordinate::new(1, 1);
        explored.mark(hex);
        let unlocks = RarityUnlocks::default();
        assert!(!is_resource_visible(hex, Some(ResourceKind::Iron), &viewer(1, &explored), &unlocks));
        assert!(is_resource_visible(hex, Some(ResourceKind::Iron), &viewer(2, &explored), &unlocks));
        assert!(!is_resource_visible(hex, Some(ResourceKind::Gold), &viewer(2, &explored), &unlocks));
        assert!(is_resource_visible(hex, Some(ResourceKind::Crystal), &viewer(4, &explored), &unlocks));
    }

    #[test]
    fn test_unrestricted_viewer_sees_everything() {
        let explored = ExploredHexes::default();
        let gm = Viewer {
            exploration_level: 0,
            explored: &explored,
            privilege: CallerPrivilege::Unrestricted,
        };
        assert!(is_resource_visible(
            HexCoordinate::new(9, 9),
            Some(ResourceKind::Crystal),
            &gm,
            &RarityUnlocks::default()
        ));
    }

    #[test]
    fn test_monotonic_unlocks() {
        assert!(RarityUnlocks::default().is_monotonic());
        let broken = RarityUnlocks {
            rare: 5,
            exotic: 4,
            ..Default::default()
        };
        assert!(!broken.is_monotonic());
    }

    #[test]
    fn test_unlocked_tiers_grow_with_level() {
        let unlocks = RarityUnlocks::default();
        for level in 0..=5 {
            let unlocked: Vec<bool> = Rarity::ALL.iter().map(|&r| unlocks.is_unlocked(r, level)).collect();
            // Unlocked tiers always form a prefix of the common-to-exotic order
            assert!(unlocked.windows(2).all(|w| w[0] || !w[1]), "level {}: {:?}", level, unlocked);
            assert_eq!(unlocked.iter().filter(|&&u| u).count(), usize::from(level.min(4)));
        }
    }

    #[test]
    fn test_disclosed_resources_filters_and_sorts() {
        let map = TerrainMap::new(8, 8, HexTile::new(TerrainKind::Plains))
            .with_tile(HexCoordinate::new(2, 1), HexTile::with_resource(TerrainKind::Forest, ResourceKind::Timber))
            .with_tile(HexCoordinate::new(1, 1), HexTile::with_resource(TerrainKind::Hills, ResourceKind::Stone))
            .with_tile(HexCoordinate::new(1, 2), HexTile::with_resource(TerrainKind::Hills, ResourceKind::Gold));
        let mut explored = ExploredHexes::default();
        explored.mark(HexCoordinate::new(2, 1));
        explored.mark(HexCoordinate::new(1, 1));
        explored.mark(HexCoordinate::new(1, 2));

        let hexes = [
            HexCoordinate::new(2, 1),
            HexCoordinate::new(1, 1),
            HexCoordinate::new(1, 2),
            HexCoordinate::new(-1, 1),
        ];
        let found = disclosed_resources(&hexes, &map, &viewer(1, &explored), &RarityUnlocks::default());
        assert_eq!(
            found,
            vec![
                (HexCoordinate::new(1, 1), ResourceKind::Stone),
                (HexCoordinate::new(2, 1), ResourceKind::Timber),
            ]
        );
    }
}
