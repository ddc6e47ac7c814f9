//! Spatial engine - ties movement, vision, discovery and the ledger together
//!
//! ## Action flow
//!
//! - move: cost check -> position update -> vision recomputed
//! - explore: vision check -> explored flag set
//! - claim / found / expand: ledger check -> point check -> ledger transition
//!   -> points spent, so ledger rejections win over a short balance

use crate::discovery::{self, Viewer, MIN_DISCOVERY_LEVEL};
use crate::error::{Prerequisite, Result, SpatialError};
use crate::hex::HexCoordinate;
use crate::player::PlayerState;
use crate::rules::Rules;
use crate::terrain::{ResourceKind, TerrainProvider};
use crate::territory::{BuildingId, ClaimedTerritory, Claimant, Colony, ColonyId, TerritoryLedger};
use rustc_hash::FxHashSet;

/// Result of a successful step
#[derive(Clone, Debug, PartialEq)]
pub struct MoveOutcome {
    pub from: HexCoordinate,
    pub to: HexCoordinate,
    pub cost: u32,
    pub visible: FxHashSet<HexCoordinate>,
}

pub struct SpatialEngine<T: TerrainProvider> {
    rules: Rules,
    terrain: T,
    ledger: TerritoryLedger,
}

impl<T: TerrainProvider> SpatialEngine<T> {
    pub fn new(rules: Rules, terrain: T) -> Self {
        let ledger = TerritoryLedger::new(rules.min_claim_influence, rules.expansion_policy);
        Self { rules, terrain, ledger }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn terrain(&self) -> &T {
        &self.terrain
    }

    pub fn ledger(&self) -> &TerritoryLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut TerritoryLedger {
        &mut self.ledger
    }

    // ========================================================================
    // MOVEMENT AND VISION
    // ========================================================================

    /// Step the avatar onto an adjacent hex.
    ///
    /// On failure the player's position and points are untouched.
    pub fn move_avatar(&self, player: &mut PlayerState, target: HexCoordinate) -> Result<MoveOutcome> {
        let from = player.avatar_hex(&self.rules.layout);
        let cost = self
            .rules
            .movement
            .check_step(player.action_points, from, target, &self.terrain)
            .inspect_err(|e| log_rejection("move", player, e))?;

        player.spend(cost)?;
        player.position = self.rules.layout.hex_to_world(target);
        tracing::debug!("{} moved {} -> {} for {} points", player.name, from, target, cost);

        Ok(MoveOutcome {
            from,
            to: target,
            cost,
            visible: self.visible_hexes(player),
        })
    }

    /// Hexes in view of the player's avatar
    pub fn visible_hexes(&self, player: &PlayerState) -> FxHashSet<HexCoordinate> {
        self.rules
            .vision
            .visible_hexes(player.avatar_hex(&self.rules.layout), player.competences.exploration)
    }

    // ========================================================================
    // EXPLORATION AND DISCOVERY
    // ========================================================================

    /// Explore a hex in view, marking it explored for this player.
    ///
    /// Returns false (and charges nothing) if it was already explored.
    pub fn explore(&self, player: &mut PlayerState, hex: HexCoordinate) -> Result<bool> {
        self.check_explore(player, hex)
            .inspect_err(|e| log_rejection("explore", player, e))?;
        if player.explored.contains(hex) {
            return Ok(false);
        }
        if !player.privilege.is_unrestricted() {
            player.spend(self.rules.action_costs.explore)?;
        }
        player.explored.mark(hex);
        tracing::debug!("{} explored {}", player.name, hex);
        Ok(true)
    }

    fn check_explore(&self, player: &PlayerState, hex: HexCoordinate) -> Result<()> {
        if !hex.is_valid() {
            return Err(SpatialError::InvalidHex(hex));
        }
        if self.terrain.tile_at(hex).is_none() {
            return Err(SpatialError::OffMap(hex));
        }
        if player.privilege.is_unrestricted() {
            return Ok(());
        }
        let level = player.competences.exploration;
        if level < MIN_DISCOVERY_LEVEL {
            return Err(SpatialError::PrerequisitesNotMet(Prerequisite::ExplorationLevel {
                required: MIN_DISCOVERY_LEVEL,
                actual: level,
            }));
        }
        if !self.visible_hexes(player).contains(&hex) {
            return Err(SpatialError::NotExplorable(hex));
        }
        if !player.explored.contains(hex) && player.action_points < self.rules.action_costs.explore {
            return Err(SpatialError::InsufficientActionPoints {
                required: self.rules.action_costs.explore,
                available: player.action_points,
            });
        }
        Ok(())
    }

    pub fn is_resource_visible(&self, player: &PlayerState, hex: HexCoordinate) -> bool {
        if !hex.is_valid() {
            return false;
        }
        let resource = self.terrain.tile_at(hex).and_then(|t| t.resource);
        discovery::is_resource_visible(hex, resource, &Viewer::of(player), &self.rules.rarity_unlocks)
    }

    /// Resources disclosed to the player within current vision
    pub fn disclosed_resources(&self, player: &PlayerState) -> Vec<(HexCoordinate, ResourceKind)> {
        let visible = self.visible_hexes(player);
        discovery::disclosed_resources(&visible, &self.terrain, &Viewer::of(player), &self.rules.rarity_unlocks)
    }

    // ========================================================================
    // TERRITORY
    // ========================================================================

    pub fn claim(&mut self, player: &mut PlayerState, hex: HexCoordinate) -> Result<&ClaimedTerritory> {
        let claimant = Claimant::from_player(player, &self.rules.layout);
        self.ledger
            .check_claim(hex, &claimant)
            .inspect_err(|e| log_rejection("claim", player, e))?;
        let cost = self.action_cost(player, self.rules.action_costs.claim)?;
        let territory = self
            .ledger
            .claim(hex, &claimant)
            .inspect_err(|e| log_rejection("claim", player, e))?;
        player.action_points -= cost;
        Ok(territory)
    }

    pub fn found_colony(&mut self, player: &mut PlayerState, hex: HexCoordinate, name: &str) -> Result<&Colony> {
        let claimant = Claimant::from_player(player, &self.rules.layout);
        self.ledger
            .check_found_colony(hex, name, &claimant)
            .inspect_err(|e| log_rejection("found colony", player, e))?;
        let cost = self.action_cost(player, self.rules.action_costs.found_colony)?;
        let colony = self
            .ledger
            .found_colony(hex, name, &claimant)
            .inspect_err(|e| log_rejection("found colony", player, e))?;
        player.action_points -= cost;
        Ok(colony)
    }

    pub fn expand_territory(
        &mut self,
        player: &mut PlayerState,
        colony: ColonyId,
        hex: HexCoordinate,
    ) -> Result<&Colony> {
        let claimant = Claimant::from_player(player, &self.rules.layout);
        self.ledger
            .check_expand_territory(colony, hex, &claimant)
            .inspect_err(|e| log_rejection("expand territory", player, e))?;
        let cost = self.action_cost(player, self.rules.action_costs.expand_territory)?;
        let colony = self
            .ledger
            .expand_territory(colony, hex, &claimant)
            .inspect_err(|e| log_rejection("expand territory", player, e))?;
        player.action_points -= cost;
        Ok(colony)
    }

    pub fn add_building(&mut self, colony: ColonyId, building: BuildingId) -> Result<&Colony> {
        self.ledger.add_building(colony, building)
    }

    /// Price of an action for this player; unrestricted callers pay nothing
    fn action_cost(&self, player: &PlayerState, cost: u32) -> Result<u32> {
        if player.privilege.is_unrestricted() {
            return Ok(0);
        }
        if player.action_points < cost {
            let err = SpatialError::InsufficientActionPoints {
                required: cost,
                available: player.action_points,
            };
            log_rejection("action", player, &err);
            return Err(err);
        }
        Ok(cost)
    }
}

fn log_rejection(action: &str, player: &PlayerState, err: &SpatialError) {
    tracing::debug!("{} rejected for {}: {}", action, player.name, err);
}
