//! HEXREALM CLI - Command-line interface
//!
//! Commands:
//! - scenario: Replay a scripted scenario against the spatial engine
//! - vision: Print the hexes visible from a position
//! - rules: Print or save the default rules

mod rules_cmd;
mod scenario;
mod seeded;
mod vision_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexrealm")]
#[command(about = "HEXREALM spatial and territorial engine")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario file
    Scenario(scenario::ScenarioArgs),
    /// Show the visible set around a hex
    Vision(vision_cmd::VisionArgs),
    /// Print or save the default rules
    Rules(rules_cmd::RulesArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Scenario(args) => scenario::run(args),
        Commands::Vision(args) => vision_cmd::run(args),
        Commands::Rules(args) => rules_cmd::run(args),
    }
}

/// Initialize logging from RUST_LOG, falling back to info (or debug)
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
