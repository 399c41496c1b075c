//! Level file validation
//!
//! Parses a level exactly as a session would and reports the markers it
//! found, or the first error with its code.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use platformer_content::LevelLoader;
use platformer_core::{EnemyKind, GameError, PickupKind};

use crate::utils;

/// Parse a level file and report its markers
#[derive(Parser)]
pub struct CheckLevel {
    /// Level file to check
    #[arg(short, long, value_name = "FILE")]
    level: PathBuf,

    /// Tuning file providing world size and marker alphabet
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl CheckLevel {
    pub fn execute(self) -> Result<()> {
        let config = utils::load_config(self.config.as_deref())?;
        let content = std::fs::read_to_string(&self.level)
            .with_context(|| format!("Failed to read level: {}", self.level.display()))?;

        println!("{} {}", style("Level:").bold().cyan(), self.level.display());

        let level = match LevelLoader::parse_str(&content, &config) {
            Ok(level) => level,
            Err(error) => {
                println!(
                    "{} [{}] {}",
                    style("Invalid:").bold().red(),
                    error.error_code(),
                    error
                );
                anyhow::bail!("level check failed ({:?})", error.severity());
            }
        };

        let world = &config.world;
        println!(
            "{} {} x {} cells, {} px tiles",
            style("World:").bold().cyan(),
            world.cols,
            world.rows,
            world.tile_size
        );
        println!(
            "{} ({:.0}, {:.0})",
            style("Player start:").bold().cyan(),
            level.player_start.x,
            level.player_start.y
        );
        match level.boss_start {
            Some(foot) => println!(
                "{} ({:.0}, {:.0})",
                style("Boss start:").bold().cyan(),
                foot.x,
                foot.y
            ),
            None => println!("{} {}", style("Boss start:").bold().cyan(), style("none").dim()),
        }

        println!("{}", style("Enemies:").bold().yellow());
        for kind in [
            EnemyKind::Skeleton,
            EnemyKind::Goblin,
            EnemyKind::Witch,
            EnemyKind::Grunt,
        ] {
            let count = level.enemies.iter().filter(|s| s.kind == kind).count();
            println!("  {:<10} {}", <&'static str>::from(kind), count);
        }

        println!("{}", style("Pickups:").bold().yellow());
        for kind in [PickupKind::Heart, PickupKind::Arrows] {
            let count = level.pickups.iter().filter(|s| s.kind == kind).count();
            println!("  {:<10} {}", <&'static str>::from(kind), count);
        }

        println!("{}", style("OK").bold().green());
        Ok(())
    }
}
