//! Vision command - list the hexes visible from a position

use anyhow::Result;
use clap::Args;

use hexrealm_core::{HexCoordinate, Rules};

#[derive(Args)]
pub struct VisionArgs {
    /// Column of the viewing hex
    #[arg(long)]
    pub x: i32,

    /// Row of the viewing hex
    #[arg(long)]
    pub y: i32,

    /// Exploration competence level
    #[arg(long, default_value = "0")]
    pub level: u8,

    /// Include hexes with negative coordinates
    #[arg(long)]
    pub all: bool,
}

pub fn run(args: VisionArgs) -> Result<()> {
    let center = HexCoordinate::new(args.x, args.y);
    let rules = Rules::default();
    let radius = rules.vision.vision_radius(args.level);
    let hexes = visible_list(center, args.level, args.all, &rules);

    println!("Vision from {} at exploration level {} (radius {}):", center, args.level, radius);
    for hex in &hexes {
        let marker = if *hex == center { " *" } else { "" };
        println!("  {}{}", hex, marker);
    }
    println!("{} hexes", hexes.len());
    Ok(())
}

/// Visible hexes in sorted order, optionally dropping off-map coordinates
fn visible_list(center: HexCoordinate, level: u8, include_invalid: bool, rules: &Rules) -> Vec<HexCoordinate> {
    let mut hexes: Vec<HexCoordinate> = rules
        .vision
        .visible_hexes(center, level)
        .into_iter()
        .filter(|h| include_invalid || h.is_valid())
        .collect();
    hexes.sort();
    hexes
}
