//! Rules command - print or save the default rules

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexrealm_core::Rules;

#[derive(Args)]
pub struct RulesArgs {
    /// Write to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Validate an existing rules file instead of printing defaults
    #[arg(long, value_name = "FILE", conflicts_with = "output")]
    pub check: Option<PathBuf>,
}

pub fn run(args: RulesArgs) -> Result<()> {
    if let Some(path) = &args.check {
        let rules = Rules::load(path).with_context(|| format!("Invalid rules file: {}", path.display()))?;
        tracing::info!("Rules '{}' from {} are valid", rules.name, path.display());
        return Ok(());
    }

    let rules = Rules::default();
    match &args.output {
        Some(path) => {
            rules
                .save(path)
                .with_context(|| format!("Failed to write rules: {}", path.display()))?;
            tracing::info!("Saved default rules to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&rules)?),
    }
    Ok(())
}
