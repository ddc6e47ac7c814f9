//! Scenario command - replay scripted actions against the spatial engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_scenario(), build_world(), replay(), report_results()
//! - Level 3: apply_action()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use hexrealm_core::{
    CallerPrivilege, ColonyId, Competences, Faction, HexCoordinate, HexTile, LedgerStats, PlayerState, ResourceKind,
    Rules, SpatialEngine, TerrainKind,
};

use crate::seeded::SeededTerrain;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ScenarioArgs {
    /// Scenario JSON file
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Rules JSON file (overrides rules embedded in the scenario)
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// SCENARIO FORMAT
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub rules: Option<Rules>,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_extent")]
    pub width: i32,
    #[serde(default = "default_extent")]
    pub height: i32,
    #[serde(default)]
    pub tiles: Vec<TileSetup>,
    pub players: Vec<PlayerSetup>,
    #[serde(default)]
    pub actions: Vec<ScriptedAction>,
}

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_extent() -> i32 {
    32
}

#[derive(Clone, Debug, Deserialize)]
pub struct TileSetup {
    pub x: i32,
    pub y: i32,
    pub terrain: TerrainKind,
    #[serde(default)]
    pub resource: Option<ResourceKind>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PlayerSetup {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub faction: Option<Faction>,
    pub hex: HexCoordinate,
    #[serde(default)]
    pub action_points: u32,
    #[serde(default)]
    pub competences: Competences,
    #[serde(default)]
    pub privilege: CallerPrivilege,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ScriptedAction {
    pub player: u32,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Move { to: HexCoordinate },
    Explore { hex: HexCoordinate },
    Claim { hex: HexCoordinate },
    FoundColony { hex: HexCoordinate, name: String },
    Expand { colony: ColonyId, hex: HexCoordinate },
    Build { colony: ColonyId, building: u32 },
}

/// Outcome of one replayed action
#[derive(Clone, Debug, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub player: String,
    pub action: Action,
    pub ok: bool,
    pub detail: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub steps: Vec<StepReport>,
    pub stats: LedgerStats,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run scenario command
///
/// 1. Load the scenario (and optional rules)
/// 2. Build terrain, engine and players
/// 3. Replay every action
/// 4. Report results
pub fn run(args: ScenarioArgs) -> Result<()> {
    let mut scenario = load_scenario(&args.file)?;
    if let Some(path) = &args.rules {
        let rules = Rules::load(path).with_context(|| format!("Failed to load rules: {}", path.display()))?;
        scenario.rules = Some(rules);
    }

    tracing::info!(
        "Replaying scenario '{}' ({} players, {} actions)",
        scenario.name,
        scenario.players.len(),
        scenario.actions.len()
    );

    let report = replay(&scenario)?;
    report_results(&report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_scenario(path: &Path) -> Result<Scenario> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read scenario: {}", path.display()))?;
    parse_scenario(&content).with_context(|| format!("Failed to parse scenario: {}", path.display()))
}

fn parse_scenario(content: &str) -> Result<Scenario> {
    let scenario: Scenario = serde_json::from_str(content)?;
    if let Some(rules) = &scenario.rules {
        rules.validate()?;
    }
    Ok(scenario)
}

fn build_world(scenario: &Scenario) -> (SpatialEngine<SeededTerrain>, Vec<PlayerState>) {
    let rules = scenario.rules.clone().unwrap_or_default();

    let mut terrain = SeededTerrain::new(scenario.seed, scenario.width, scenario.height);
    for tile in &scenario.tiles {
        terrain.set(
            HexCoordinate::new(tile.x, tile.y),
            HexTile {
                terrain: tile.terrain,
                resource: tile.resource,
            },
        );
    }

    let players = scenario
        .players
        .iter()
        .map(|p| {
            let mut player = PlayerState::new(p.id, &p.name, p.hex, &rules.layout)
                .with_action_points(p.action_points)
                .with_competences(p.competences)
                .with_privilege(p.privilege);
            player.faction = p.faction.clone();
            player
        })
        .collect();

    (SpatialEngine::new(rules, terrain), players)
}

/// Replay every scripted action in order
fn replay(scenario: &Scenario) -> Result<ScenarioReport> {
    let (mut engine, mut players) = build_world(scenario);
    let mut steps = Vec::with_capacity(scenario.actions.len());

    for (i, scripted) in scenario.actions.iter().enumerate() {
        let player = players
            .iter_mut()
            .find(|p| p.id.0 == scripted.player)
            .with_context(|| format!("Action {} refers to unknown player {}", i + 1, scripted.player))?;

        let outcome = apply_action(&mut engine, player, &scripted.action);
        let (ok, detail) = match outcome {
            Ok(detail) => (true, detail),
            Err(e) => (false, e.to_string()),
        };
        tracing::debug!("Step {}: {} -> {}", i + 1, player.name, detail);

        steps.push(StepReport {
            step: i + 1,
            player: player.name.clone(),
            action: scripted.action.clone(),
            ok,
            detail,
        });
    }

    Ok(ScenarioReport {
        name: scenario.name.clone(),
        steps,
        stats: engine.ledger().stats(),
    })
}

fn report_results(report: &ScenarioReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("Scenario: {}", report.name);
    for step in &report.steps {
        println!(
            "  {:>3}. {:<10} {:<28} {} {}",
            step.step,
            step.player,
            describe(&step.action),
            if step.ok { "ok  " } else { "FAIL" },
            step.detail
        );
    }
    println!(
        "Claims: {}  Colonies: {}  Capitals: {}",
        report.stats.total_claims, report.stats.total_colonies, report.stats.capital_count
    );
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Apply one action; errors are gameplay rejections, not failures of the run
fn apply_action(
    engine: &mut SpatialEngine<SeededTerrain>,
    player: &mut PlayerState,
    action: &Action,
) -> hexrealm_core::Result<String> {
    match action {
        Action::Move { to } => {
            let outcome = engine.move_avatar(player, *to)?;
            Ok(format!(
                "moved for {} points, {} left, {} hexes in view",
                outcome.cost,
                player.action_points,
                outcome.visible.len()
            ))
        }
        Action::Explore { hex } => {
            let fresh = engine.explore(player, *hex)?;
            let found = engine.disclosed_resources(player);
            Ok(format!(
                "{} explored, {} resources disclosed",
                if fresh { "newly" } else { "already" },
                found.len()
            ))
        }
        Action::Claim { hex } => {
            let territory = engine.claim(player, *hex)?;
            let faction = territory.faction.as_ref().map_or("no faction", |f| f.name.as_str());
            Ok(format!("claimed for {}", faction))
        }
        Action::FoundColony { hex, name } => {
            let colony = engine.found_colony(player, *hex, name)?;
            Ok(format!(
                "founded {} ({}){}",
                colony.name,
                colony.id,
                if colony.is_capital { " as capital" } else { "" }
            ))
        }
        Action::Expand { colony, hex } => {
            let colony = engine.expand_territory(player, *colony, *hex)?;
            Ok(format!("{} now controls {} hexes", colony.name, colony.controlled_territory.len()))
        }
        Action::Build { colony, building } => {
            let colony = engine.add_building(*colony, *building)?;
            Ok(format!("{} has {} buildings", colony.name, colony.buildings.len()))
        }
    }
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn describe(action: &Action) -> String {
    match action {
        Action::Move { to } => format!("move {}", to),
        Action::Explore { hex } => format!("explore {}", hex),
        Action::Claim { hex } => format!("claim {}", hex),
        Action::FoundColony { hex, name } => format!("found '{}' {}", name, hex),
        Action::Expand { colony, hex } => format!("expand {} {}", colony, hex),
        Action::Build { colony, building } => format!("build {} in {}", building, colony),
    }
}

// ============================================================================
// TESTS
// ============================================================================
