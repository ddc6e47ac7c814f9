//! Rules - tunable tables for movement, vision, discovery and claims

use crate::discovery::RarityUnlocks;
use crate::hex::HexLayout;
use crate::movement::MovementCosts;
use crate::territory::{ExpansionPolicy, DEFAULT_CLAIM_INFLUENCE};
use crate::vision::VisionRules;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Action-point price of non-movement actions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCosts {
    pub explore: u32,
    pub claim: u32,
    pub found_colony: u32,
    pub expand_territory: u32,
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self {
            explore: 1,
            claim: 1,
            found_colony: 2,
            expand_territory: 1,
        }
    }
}

/// Complete rule set. Missing sections in a rules file take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub name: String,
    pub layout: HexLayout,
    pub movement: MovementCosts,
    pub vision: VisionRules,
    pub rarity_unlocks: RarityUnlocks,
    pub action_costs: ActionCosts,
    pub min_claim_influence: u8,
    pub expansion_policy: ExpansionPolicy,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            layout: HexLayout::default(),
            movement: MovementCosts::default(),
            vision: VisionRules::default(),
            rarity_unlocks: RarityUnlocks::default(),
            action_costs: ActionCosts::default(),
            min_claim_influence: DEFAULT_CLAIM_INFLUENCE,
            expansion_policy: ExpansionPolicy::default(),
        }
    }
}

impl Rules {
    /// Check table invariants
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some((terrain, cost)) = self.movement.out_of_range().first() {
            anyhow::bail!("Movement cost {} for {:?} outside 1..=5", cost, terrain);
        }
        if !self.rarity_unlocks.is_monotonic() {
            anyhow::bail!("Rarity unlock levels must not decrease with rarity");
        }
        if self.vision.extended_radius < self.vision.base_radius {
            anyhow::bail!(
                "Extended vision radius {} is smaller than base radius {}",
                self.vision.extended_radius,
                self.vision.base_radius
            );
        }
        if !(self.layout.column_pitch > 0.0 && self.layout.row_pitch > 0.0) {
            anyhow::bail!("Hex pitch must be positive");
        }
        Ok(())
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let rules: Rules = serde_json::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_valid() {
        assert!(Rules::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_takes_defaults() {
        let rules = Rules::from_json(r#"{"name": "coastal", "expansion_policy": "contiguous"}"#).unwrap();
        assert_eq!(rules.name, "coastal");
        assert_eq!(rules.expansion_policy, ExpansionPolicy::Contiguous);
        assert_eq!(rules.movement, MovementCosts::default());
    }

    #[test]
    fn test_rejects_bad_costs() {
        let mut rules = Rules::default();
        rules.movement.forest = 7;
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_rejects_non_monotonic_unlocks() {
        let mut rules = Rules::default();
        rules.rarity_unlocks.uncommon = 0;
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip_through_file() {
        let path = std::env::temp_dir().join(format!("hexrealm-rules-{}.json", std::process::id()));
        let mut rules = Rules::default();
        rules.name = "saved".to_string();
        rules.action_costs.explore = 3;
        rules.save(&path).unwrap();
        let loaded = Rules::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, rules);
    }
}
