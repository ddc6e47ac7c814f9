//! Territory claims and colonies
//!
//! Per hex: Unclaimed -> Claimed -> Claimed + Colonized. Claims are
//! permanent; the only mutation a claim ever sees is attaching its colony.

use crate::error::{Prerequisite, Result, SpatialError};
use crate::hex::{HexCoordinate, HexLayout};
use crate::player::{CallerPrivilege, Faction, FactionId, PlayerId, PlayerState};
use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Default minimum local-influence level needed to claim a hex
pub const DEFAULT_CLAIM_INFLUENCE: u8 = 1;

/// Population of a freshly founded colony (the founder)
pub const FOUNDING_POPULATION: u32 = 1;

/// Building identifier, assigned by the construction layer
pub type BuildingId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColonyId(pub u32);

impl std::fmt::Display for ColonyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "colony#{}", self.0)
    }
}

/// Whether expansion must touch the existing controlled set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionPolicy {
    /// Any hex claimed by the colony's faction may be added
    #[default]
    Permissive,
    /// The hex must neighbor a hex the colony already controls
    Contiguous,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaimedTerritory {
    pub hex: HexCoordinate,
    /// `None` only for unrestricted claims made outside any faction
    pub faction: Option<Faction>,
    pub claimed_by: PlayerId,
    pub claimed_by_name: String,
    pub claimed_at: DateTime<Utc>,
    pub colony_id: Option<ColonyId>,
}

impl ClaimedTerritory {
    pub fn faction_id(&self) -> Option<FactionId> {
        self.faction.as_ref().map(|f| f.id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Colony {
    pub id: ColonyId,
    pub name: String,
    pub hex: HexCoordinate,
    pub founder_id: PlayerId,
    pub founder_name: String,
    pub faction: Option<Faction>,
    pub founded_at: DateTime<Utc>,
    pub population: u32,
    /// Always contains `hex`; only ever grows
    pub controlled_territory: BTreeSet<HexCoordinate>,
    pub buildings: Vec<BuildingId>,
    pub is_capital: bool,
}

impl Colony {
    pub fn faction_id(&self) -> Option<FactionId> {
        self.faction.as_ref().map(|f| f.id)
    }

    pub fn controls(&self, hex: HexCoordinate) -> bool {
        self.controlled_territory.contains(&hex)
    }

    fn borders(&self, hex: HexCoordinate) -> bool {
        hex.neighbors().iter().any(|n| self.controlled_territory.contains(n))
    }
}

/// Who is acting on the ledger
#[derive(Clone, Copy, Debug)]
pub struct Claimant<'a> {
    pub player_id: PlayerId,
    pub player_name: &'a str,
    pub faction: Option<&'a Faction>,
    pub influence_level: u8,
    pub avatar_hex: HexCoordinate,
    pub privilege: CallerPrivilege,
}

impl<'a> Claimant<'a> {
    pub fn from_player(player: &'a PlayerState, layout: &HexLayout) -> Self {
        Self {
            player_id: player.id,
            player_name: &player.name,
            faction: player.faction.as_ref(),
            influence_level: player.competences.local_influence,
            avatar_hex: player.avatar_hex(layout),
            privilege: player.privilege,
        }
    }

    fn faction_id(&self) -> Option<FactionId> {
        self.faction.map(|f| f.id)
    }
}

/// Aggregate ledger counts
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_claims: usize,
    pub total_colonies: usize,
    pub claims_per_faction: BTreeMap<FactionId, usize>,
    pub colonies_per_faction: BTreeMap<FactionId, usize>,
    pub capital_count: usize,
}

/// Owned store of every claim and colony.
///
/// Single writer: wrap in a mutex (or equivalent) before sharing across
/// threads, since claim/found/expand are check-then-insert.
#[derive(Clone, Debug)]
pub struct TerritoryLedger {
    claims: Vec<ClaimedTerritory>,
    claim_index: FxHashMap<HexCoordinate, usize>,
    colonies: Vec<Colony>,
    colony_index: FxHashMap<ColonyId, usize>,
    next_colony_id: u32,
    capital_founded: bool,
    min_claim_influence: u8,
    expansion_policy: ExpansionPolicy,
}

impl Default for TerritoryLedger {
    fn default() -> Self {
        Self::new(DEFAULT_CLAIM_INFLUENCE, ExpansionPolicy::default())
    }
}

impl TerritoryLedger {
    pub fn new(min_claim_influence: u8, expansion_policy: ExpansionPolicy) -> Self {
        Self {
            claims: Vec::new(),
            claim_index: FxHashMap::default(),
            colonies: Vec::new(),
            colony_index: FxHashMap::default(),
            next_colony_id: 1,
            capital_founded: false,
            min_claim_influence,
            expansion_policy,
        }
    }

    pub fn expansion_policy(&self) -> ExpansionPolicy {
        self.expansion_policy
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    /// Claim `hex` for the claimant's faction.
    ///
    /// Normal callers need the influence level, a faction and an avatar
    /// standing on `hex`. Uniqueness applies to everyone.
    pub fn claim(&mut self, hex: HexCoordinate, claimant: &Claimant<'_>) -> Result<&ClaimedTerritory> {
        self.check_claim(hex, claimant)?;

        let territory = ClaimedTerritory {
            hex,
            faction: claimant.faction.cloned(),
            claimed_by: claimant.player_id,
            claimed_by_name: claimant.player_name.to_string(),
            claimed_at: Utc::now(),
            colony_id: None,
        };
        tracing::info!(
            "{} claimed {} for {}",
            claimant.player_name,
            hex,
            territory.faction.as_ref().map_or("no faction", |f| f.name.as_str())
        );

        let idx = self.claims.len();
        self.claims.push(territory);
        self.claim_index.insert(hex, idx);
        Ok(&self.claims[idx])
    }

    /// Validate a claim without recording it
    pub fn check_claim(&self, hex: HexCoordinate, claimant: &Claimant<'_>) -> Result<()> {
        if !hex.is_valid() {
            return Err(SpatialError::InvalidHex(hex));
        }
        if self.claim_index.contains_key(&hex) {
            return Err(SpatialError::AlreadyClaimed(hex));
        }
        if !claimant.privilege.is_unrestricted() {
            if claimant.influence_level < self.min_claim_influence {
                return Err(SpatialError::PrerequisitesNotMet(Prerequisite::InfluenceLevel {
                    required: self.min_claim_influence,
                    actual: claimant.influence_level,
                }));
            }
            if claimant.faction.is_none() {
                return Err(SpatialError::PrerequisitesNotMet(Prerequisite::FactionMembership));
            }
            if claimant.avatar_hex != hex {
                return Err(SpatialError::NotPresentAtHex {
                    target: hex,
                    actual: claimant.avatar_hex,
                });
            }
        }
        Ok(())
    }

    /// Found a colony on a hex claimed by the claimant's faction.
    ///
    /// The first colony the ledger ever records becomes the capital.
    pub fn found_colony(&mut self, hex: HexCoordinate, name: &str, claimant: &Claimant<'_>) -> Result<&Colony> {
        let claim_idx = self.check_found_colony(hex, name, claimant)?;
        let territory = &self.claims[claim_idx];

        let id = ColonyId(self.next_colony_id);
        self.next_colony_id += 1;
        let is_capital = !self.capital_founded;
        self.capital_founded = true;

        let colony = Colony {
            id,
            name: name.trim().to_string(),
            hex,
            founder_id: claimant.player_id,
            founder_name: claimant.player_name.to_string(),
            faction: territory.faction.clone().or_else(|| claimant.faction.cloned()),
            founded_at: Utc::now(),
            population: FOUNDING_POPULATION,
            controlled_territory: BTreeSet::from([hex]),
            buildings: Vec::new(),
            is_capital,
        };
        tracing::info!(
            "{} founded {} ({}) at {}{}",
            claimant.player_name,
            colony.name,
            id,
            hex,
            if is_capital { " as capital" } else { "" }
        );

        self.claims[claim_idx].colony_id = Some(id);
        let idx = self.colonies.len();
        self.colonies.push(colony);
        self.colony_index.insert(id, idx);
        Ok(&self.colonies[idx])
    }

    /// Add a hex claimed by the colony's faction to its controlled territory.
    ///
    /// Under [`ExpansionPolicy::Permissive`] the hex need not touch the
    /// existing territory.
    pub fn expand_territory(
        &mut self,
        colony_id: ColonyId,
        hex: HexCoordinate,
        claimant: &Claimant<'_>,
    ) -> Result<&Colony> {
        let colony_idx = self.check_expand_territory(colony_id, hex, claimant)?;

        let colony = &mut self.colonies[colony_idx];
        colony.controlled_territory.insert(hex);
        tracing::info!("{} expanded to {} ({} hexes)", colony.name, hex, colony.controlled_territory.len());
        Ok(&self.colonies[colony_idx])
    }

    /// Validate a founding without recording it; yields the claim's index
    pub fn check_found_colony(&self, hex: HexCoordinate, name: &str, claimant: &Claimant<'_>) -> Result<usize> {
        if name.trim().is_empty() {
            return Err(SpatialError::MissingColonyName);
        }
        let claim_idx = *self
            .claim_index
            .get(&hex)
            .ok_or(SpatialError::TerritoryNotControlled {
                hex,
                faction: claimant.faction_id(),
            })?;
        let territory = &self.claims[claim_idx];

        if !claimant.privilege.is_unrestricted() && territory.faction_id() != claimant.faction_id() {
            return Err(SpatialError::TerritoryNotControlled {
                hex,
                faction: claimant.faction_id(),
            });
        }
        if let Some(colony) = territory.colony_id {
            return Err(SpatialError::ColonyAlreadyExists { hex, colony });
        }
        Ok(claim_idx)
    }

    /// Validate an expansion without applying it; yields the colony's index
    pub fn check_expand_territory(
        &self,
        colony_id: ColonyId,
        hex: HexCoordinate,
        claimant: &Claimant<'_>,
    ) -> Result<usize> {
        let colony_idx = *self
            .colony_index
            .get(&colony_id)
            .ok_or(SpatialError::ColonyNotFound(colony_id))?;
        let colony = &self.colonies[colony_idx];
        let colony_faction = colony.faction_id();

        if !hex.is_valid() {
            return Err(SpatialError::InvalidHex(hex));
        }
        if !claimant.privilege.is_unrestricted() && claimant.faction_id() != colony_faction {
            return Err(SpatialError::TerritoryNotControlled {
                hex,
                faction: claimant.faction_id(),
            });
        }
        let claimed_by_colony_faction = self
            .territory_at(hex)
            .is_some_and(|t| t.faction_id() == colony_faction);
        if !claimed_by_colony_faction {
            return Err(SpatialError::TerritoryNotControlled {
                hex,
                faction: colony_faction,
            });
        }
        if colony.controls(hex) {
            return Err(SpatialError::AlreadyInTerritory { hex, colony: colony_id });
        }
        if self.expansion_policy == ExpansionPolicy::Contiguous && !colony.borders(hex) {
            return Err(SpatialError::NotContiguous { hex, colony: colony_id });
        }
        Ok(colony_idx)
    }

    /// Record a finished building in a colony
    pub fn add_building(&mut self, colony_id: ColonyId, building: BuildingId) -> Result<&Colony> {
        let colony = self.colony_mut(colony_id)?;
        colony.buildings.push(building);
        tracing::debug!("{} gained building {}", colony.name, building);
        Ok(&*colony)
    }

    pub fn set_population(&mut self, colony_id: ColonyId, population: u32) -> Result<&Colony> {
        let colony = self.colony_mut(colony_id)?;
        colony.population = population;
        Ok(&*colony)
    }

    /// Drop every claim and colony and forget the capital (admin/test use)
    pub fn reset(&mut self) {
        tracing::warn!(
            "Resetting territory ledger ({} claims, {} colonies)",
            self.claims.len(),
            self.colonies.len()
        );
        self.claims.clear();
        self.claim_index.clear();
        self.colonies.clear();
        self.colony_index.clear();
        self.next_colony_id = 1;
        self.capital_founded = false;
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn territory_at(&self, hex: HexCoordinate) -> Option<&ClaimedTerritory> {
        self.claim_index.get(&hex).map(|&idx| &self.claims[idx])
    }

    /// Every claim, in claim order
    pub fn all_territories(&self) -> &[ClaimedTerritory] {
        &self.claims
    }

    pub fn territories_of(&self, faction: FactionId) -> Vec<&ClaimedTerritory> {
        self.claims.iter().filter(|t| t.faction_id() == Some(faction)).collect()
    }

    pub fn colony(&self, id: ColonyId) -> Option<&Colony> {
        self.colony_index.get(&id).map(|&idx| &self.colonies[idx])
    }

    pub fn colony_at(&self, hex: HexCoordinate) -> Option<&Colony> {
        self.territory_at(hex)?.colony_id.and_then(|id| self.colony(id))
    }

    /// Every colony, in founding order
    pub fn all_colonies(&self) -> &[Colony] {
        &self.colonies
    }

    pub fn colonies_of_player(&self, player: PlayerId) -> Vec<&Colony> {
        self.colonies.iter().filter(|c| c.founder_id == player).collect()
    }

    pub fn colonies_of_faction(&self, faction: FactionId) -> Vec<&Colony> {
        self.colonies.iter().filter(|c| c.faction_id() == Some(faction)).collect()
    }

    pub fn capital(&self) -> Option<&Colony> {
        self.colonies.iter().find(|c| c.is_capital)
    }

    pub fn stats(&self) -> LedgerStats {
        let mut stats = LedgerStats {
            total_claims: self.claims.len(),
            total_colonies: self.colonies.len(),
            ..Default::default()
        };
        for faction in self.claims.iter().filter_map(ClaimedTerritory::faction_id) {
            *stats.claims_per_faction.entry(faction).or_insert(0) += 1;
        }
        for colony in &self.colonies {
            if let Some(faction) = colony.faction_id() {
                *stats.colonies_per_faction.entry(faction).or_insert(0) += 1;
            }
            if colony.is_capital {
                stats.capital_count += 1;
            }
        }
        stats
    }

    fn colony_mut(&mut self, id: ColonyId) -> Result<&mut Colony> {
        let idx = *self.colony_index.get(&id).ok_or(SpatialError::ColonyNotFound(id))?;
        Ok(&mut self.colonies[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Faction {
        Faction::new(1, "Red")
    }

    fn blue() -> Faction {
        Faction::new(2, "Blue")
    }

    fn claimant<'a>(id: u32, name: &'a str, faction: Option<&'a Faction>, at: HexCoordinate) -> Claimant<'a> {
        Claimant {
            player_id: PlayerId(id),
            player_name: name,
            faction,
            influence_level: 1,
            avatar_hex: at,
            privilege: CallerPrivilege::Normal,
        }
    }

    #[test]
    fn test_claim_records_territory() {
        let mut ledger = TerritoryLedger::default();
        let red = red();
        let hex = HexCoordinate::new(5, 5);
        let territory = ledger.claim(hex, &claimant(1, "Ada", Some(&red), hex)).unwrap();
        assert_eq!(territory.faction.as_ref().unwrap().name, "Red");
        assert_eq!(territory.claimed_by, PlayerId(1));
        assert!(territory.colony_id.is_none());
        assert_eq!(ledger.all_territories().len(), 1);
    }

    #[test]
    fn test_double_claim_rejected() {
        let mut ledger = TerritoryLedger::default();
        let (red, blue) = (red(), blue());
        let hex = HexCoordinate::new(2, 3);
        ledger.claim(hex, &claimant(1, "Ada", Some(&red), hex)).unwrap();

        let second = ledger.claim(hex, &claimant(2, "Bo", Some(&blue), hex));
        assert_eq!(second.unwrap_err(), SpatialError::AlreadyClaimed(hex));
        assert_eq!(ledger.all_territories().len(), 1);
        assert_eq!(ledger.territory_at(hex).unwrap().claimed_by, PlayerId(1));
    }

    #[test]
    fn test_claim_prerequisites() {
        let mut ledger = TerritoryLedger::default();
        let red = red();
        let hex = HexCoordinate::new(4, 4);

        let mut weak = claimant(1, "Ada", Some(&red), hex);
        weak.influence_level = 0;
        assert!(matches!(
            ledger.claim(hex, &weak),
            Err(SpatialError::PrerequisitesNotMet(Prerequisite::InfluenceLevel { required: 1, actual: 0 }))
        ));

        let loner = claimant(1, "Ada", None, hex);
        assert_eq!(
            ledger.claim(hex, &loner).unwrap_err(),
            SpatialError::PrerequisitesNotMet(Prerequisite::FactionMembership)
        );

        let elsewhere = claimant(1, "Ada", Some(&red), HexCoordinate::new(4, 5));
        assert_eq!(
            ledger.claim(hex, &elsewhere).unwrap_err(),
            SpatialError::NotPresentAtHex {
                target: hex,
                actual: HexCoordinate::new(4, 5)
            }
        );
        assert!(ledger.all_territories().is_empty());
    }

    #[test]
    fn test_unrestricted_claims_still_unique() {
        let mut ledger = TerritoryLedger::default();
        let hex = HexCoordinate::new(7, 1);
        let mut gm = claimant(99, "GM", None, HexCoordinate::new(0, 0));
        gm.influence_level = 0;
        gm.privilege = CallerPrivilege::Unrestricted;

        assert!(ledger.claim(hex, &gm).is_ok());
        assert_eq!(ledger.claim(hex, &gm).unwrap_err(), SpatialError::AlreadyClaimed(hex));
        assert_eq!(ledger.all_territories().len(), 1);
    }

    #[test]
    fn test_negative_hex_rejected() {
        let mut ledger = TerritoryLedger::default();
        let mut gm = claimant(99, "GM", None, HexCoordinate::new(0, 0));
        gm.privilege = CallerPrivilege::Unrestricted;
        let hex = HexCoordinate::new(-1, 2);
        assert_eq!(ledger.claim(hex, &gm).unwrap_err(), SpatialError::InvalidHex(hex));
    }

    #[test]
    fn test_found_colony_requires_own_claim() {
        let mut ledger = TerritoryLedger::default();
        let (red, blue) = (red(), blue());
        let hex = HexCoordinate::new(3, 3);

        let unclaimed = ledger.found_colony(hex, "Nowhere", &claimant(1, "Ada", Some(&red), hex));
        assert!(matches!(unclaimed, Err(SpatialError::TerritoryNotControlled { .. })));

        ledger.claim(hex, &claimant(2, "Bo", Some(&blue), hex)).unwrap();
        let foreign = ledger.found_colony(hex, "Stolen", &claimant(1, "Ada", Some(&red), hex));
        assert!(matches!(foreign, Err(SpatialError::TerritoryNotControlled { .. })));
        assert!(ledger.all_colonies().is_empty());
        assert!(ledger.territory_at(hex).unwrap().colony_id.is_none());
    }

    #[test]
    fn test_found_colony_and_capital() {
        let mut ledger = TerritoryLedger::default();
        let red = red();
        let first = HexCoordinate::new(5, 5);
        let second = HexCoordinate::new(9, 2);
        ledger.claim(first, &claimant(1, "Ada", Some(&red), first)).unwrap();
        ledger.claim(second, &claimant(1, "Ada", Some(&red), second)).unwrap();

        let capital = ledger.found_colony(first, "Redport", &claimant(1, "Ada", Some(&red), first)).unwrap();
        assert!(capital.is_capital);
        assert_eq!(capital.controlled_territory, BTreeSet::from([first]));
        assert_eq!(capital.population, FOUNDING_POPULATION);
        let capital_id = capital.id;

        let town = ledger.found_colony(second, "Redfield", &claimant(1, "Ada", Some(&red), second)).unwrap();
        assert!(!town.is_capital);
        assert_ne!(town.id, capital_id);

        assert_eq!(ledger.territory_at(first).unwrap().colony_id, Some(capital_id));
        assert_eq!(ledger.capital().unwrap().name, "Redport");
        assert_eq!(ledger.colonies_of_player(PlayerId(1)).len(), 2);
        assert_eq!(ledger.colonies_of_faction(red.id).len(), 2);
    }

    #[test]
    fn test_second_colony_on_same_hex_rejected() {
        let mut ledger = TerritoryLedger::default();
        let red = red();
        let hex = HexCoordinate::new(1, 1);
        let ada = claimant(1, "Ada", Some(&red), hex);
        ledger.claim(hex, &ada).unwrap();
        let id = ledger.found_colony(hex, "One", &ada).unwrap().id;

        assert_eq!(
            ledger.found_colony(hex, "Two", &ada).unwrap_err(),
            SpatialError::ColonyAlreadyExists { hex, colony: id }
        );
        assert_eq!(ledger.all_colonies().len(), 1);
    }

    #[test]
    fn test_colony_name_required() {
        let mut ledger = TerritoryLedger::default();
        let red = red();
        let hex = HexCoordinate::new(1, 1);
        let ada = claimant(1, "Ada", Some(&red), hex);
        ledger.claim(hex, &ada).unwrap();
        assert_eq!(ledger.found_colony(hex, "   ", &ada).unwrap_err(), SpatialError::MissingColonyName);
    }

    #[test]
    fn test_expand_territory_permissive() {
        let mut ledger = TerritoryLedger::default();
        let (red, blue) = (red(), blue());
        let home = HexCoordinate::new(4, 4);
        let far = HexCoordinate::new(10, 10);
        let foreign = HexCoordinate::new(4, 5);

        ledger.claim(home, &claimant(1, "Ada", Some(&red), home)).unwrap();
        ledger.claim(far, &claimant(1, "Ada", Some(&red), far)).unwrap();
        ledger.claim(foreign, &claimant(2, "Bo", Some(&blue), foreign)).unwrap();
        let ada = claimant(1, "Ada", Some(&red), home);
        let id = ledger.found_colony(home, "Redport", &ada).unwrap().id;

        let colony = ledger.expand_territory(id, far, &ada).unwrap();
        assert!(colony.controls(far));
        assert_eq!(colony.controlled_territory.len(), 2);

        assert!(matches!(
            ledger.expand_territory(id, foreign, &ada),
            Err(SpatialError::TerritoryNotControlled { .. })
        ));
        assert_eq!(
            ledger.expand_territory(id, far, &ada).unwrap_err(),
            SpatialError::AlreadyInTerritory { hex: far, colony: id }
        );
        assert!(matches!(
            ledger.expand_territory(id, HexCoordinate::new(0, 9), &ada),
            Err(SpatialError::TerritoryNotControlled { .. })
        ));
        assert_eq!(
            ledger.expand_territory(ColonyId(42), far, &ada).unwrap_err(),
            SpatialError::ColonyNotFound(ColonyId(42))
        );
    }

    #[test]
    fn test_expand_territory_contiguous() {
        let mut ledger = TerritoryLedger::new(1, ExpansionPolicy::Contiguous);
        assert_eq!(ledger.expansion_policy(), ExpansionPolicy::Contiguous);
        assert_eq!(TerritoryLedger::default().expansion_policy(), ExpansionPolicy::Permissive);
        let red = red();
        let home = HexCoordinate::new(4, 4);
        let next = HexCoordinate::new(4, 5);
        let far = HexCoordinate::new(8, 8);
        for hex in [home, next, far] {
            ledger.claim(hex, &claimant(1, "Ada", Some(&red), hex)).unwrap();
        }
        let ada = claimant(1, "Ada", Some(&red), home);
        let id = ledger.found_colony(home, "Redport", &ada).unwrap().id;

        assert_eq!(
            ledger.expand_territory(id, far, &ada).unwrap_err(),
            SpatialError::NotContiguous { hex: far, colony: id }
        );
        assert!(ledger.expand_territory(id, next, &ada).is_ok());
    }

    #[test]
    fn test_expand_requires_colony_faction() {
        let mut ledger = TerritoryLedger::default();
        let (red, blue) = (red(), blue());
        let home = HexCoordinate::new(2, 2);
        let extra = HexCoordinate::new(2, 3);
        ledger.claim(home, &claimant(1, "Ada", Some(&red), home)).unwrap();
        ledger.claim(extra, &claimant(1, "Ada", Some(&red), extra)).unwrap();
        let id = ledger.found_colony(home, "Redport", &claimant(1, "Ada", Some(&red), home)).unwrap().id;

        let bo = claimant(2, "Bo", Some(&blue), extra);
        assert!(matches!(
            ledger.expand_territory(id, extra, &bo),
            Err(SpatialError::TerritoryNotControlled { .. })
        ));
    }

    #[test]
    fn test_buildings_population_and_stats() {
        let mut ledger = TerritoryLedger::default();
        let (red, blue) = (red(), blue());
        let a = HexCoordinate::new(1, 1);
        let b = HexCoordinate::new(6, 6);
        let c = HexCoordinate::new(7, 6);
        ledger.claim(a, &claimant(1, "Ada", Some(&red), a)).unwrap();
        ledger.claim(b, &claimant(2, "Bo", Some(&blue), b)).unwrap();
        ledger.claim(c, &claimant(2, "Bo", Some(&blue), c)).unwrap();
        let id = ledger.found_colony(b, "Bluewater", &claimant(2, "Bo", Some(&blue), b)).unwrap().id;

        ledger.add_building(id, 7).unwrap();
        ledger.set_population(id, 12).unwrap();
        let colony = ledger.colony(id).unwrap();
        assert_eq!(colony.buildings, vec![7]);
        assert_eq!(colony.population, 12);
        assert_eq!(ledger.colony_at(b).map(|c| c.id), Some(id));

        let stats = ledger.stats();
        assert_eq!(stats.total_claims, 3);
        assert_eq!(stats.total_colonies, 1);
        assert_eq!(stats.claims_per_faction.get(&red.id), Some(&1));
        assert_eq!(stats.claims_per_faction.get(&blue.id), Some(&2));
        assert_eq!(stats.colonies_per_faction.get(&blue.id), Some(&1));
        assert_eq!(stats.capital_count, 1);
        assert_eq!(ledger.territories_of(blue.id).len(), 2);
    }

    #[test]
    fn test_reset_restores_capital() {
        let mut ledger = TerritoryLedger::default();
        let red = red();
        let hex = HexCoordinate::new(3, 0);
        let ada = claimant(1, "Ada", Some(&red), hex);
        ledger.claim(hex, &ada).unwrap();
        ledger.found_colony(hex, "First", &ada).unwrap();

        ledger.reset();
        assert!(ledger.all_territories().is_empty());
        assert!(ledger.capital().is_none());

        ledger.claim(hex, &ada).unwrap();
        let colony = ledger.found_colony(hex, "Again", &ada).unwrap();
        assert!(colony.is_capital);
        assert_eq!(colony.id, ColonyId(1));
    }
}
