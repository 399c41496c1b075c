//! Headless simulation run
//!
//! Builds a world from a level and tuning file, feeds it scripted input for a
//! number of ticks and prints the events and a final summary.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use console::style;

use platformer_content::LevelLoader;
use platformer_core::{EventCategory, Intent, LevelOrigin, World};

use crate::utils;

/// Run the simulation headless
#[derive(Parser)]
pub struct Simulate {
    /// Level file (generated layout when omitted or unusable)
    #[arg(short, long, value_name = "FILE")]
    level: Option<PathBuf>,

    /// Tuning file (TOML or RON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Input script: one `<tick> <intents>` line per change, e.g. `30 right+jump`
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// High score the session starts with
    #[arg(long, default_value_t = 0)]
    high_score: u64,

    /// Print every event as it happens
    #[arg(long)]
    events: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let config = utils::load_config(self.config.as_deref())?;
        let script = match &self.script {
            Some(path) => Script::load(path)?,
            None => Script::default(),
        };

        let level = LevelLoader::load_or_generate(self.level.as_deref(), &config);
        if level.origin == LevelOrigin::Generated {
            println!("{}", style("Using generated level layout").yellow());
        }
        let mut world =
            World::new(config, level, self.high_score).context("Invalid game configuration")?;

        let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
        let mut simulated = 0u64;
        let mut ran = 0u64;

        for tick in 0..self.ticks {
            let report = world.tick(script.held_at(tick));
            ran += 1;
            if report.simulated {
                simulated += 1;
            }

            for event in world.drain_events() {
                *counts.entry(event.name()).or_default() += 1;
                if self.events {
                    let label = match event.category() {
                        EventCategory::Gameplay => style("gameplay").dim(),
                        EventCategory::Boss => style("boss    ").magenta(),
                        EventCategory::Session => style("session ").green().bold(),
                    };
                    println!("{:>6} {} {:?}", report.tick.0, label, event);
                }
            }

            if world.state().is_over() {
                break;
            }
        }

        if self.json {
            let snapshot = serde_json::to_string_pretty(&world.snapshot())
                .context("Failed to serialize snapshot")?;
            println!("{}", snapshot);
            return Ok(());
        }

        print_summary(&world, ran, simulated, &counts);
        Ok(())
    }
}

fn print_summary(world: &World, ran: u64, simulated: u64, counts: &BTreeMap<&'static str, usize>) {
    let snapshot = world.snapshot();
    let hud = &snapshot.hud;

    println!();
    println!("{}", style("=== Simulation Summary ===").bold().green());
    println!("  Ticks: {} run, {} simulated", ran, simulated);
    println!("  Score: {} (high score {})", hud.score, hud.high_score);
    println!("  Player HP: {}/{}", hud.hp, hud.max_hp);
    println!("  Arrows: {}/{}", hud.ammo, hud.quiver_capacity);
    println!("  Enemies left: {}", snapshot.enemies.len());
    match hud.boss_hp {
        Some((hp, max)) => println!("  Boss HP: {}/{} (armor {})", hp, max, hud.boss_armor),
        None => println!("  Boss: {}", style("not present").dim()),
    }

    let outcome = if snapshot.state.victory {
        style("victory").green().bold()
    } else if snapshot.state.game_over {
        style("game over").red().bold()
    } else {
        style("running").yellow()
    };
    println!("  Outcome: {}", outcome);

    if !counts.is_empty() {
        println!();
        println!("{}", style("Events:").bold().yellow());
        for (name, count) in counts {
            println!("  {:<24} {}", name, count);
        }
    }
}

/// Held input over time, changed at listed ticks.
#[derive(Debug, Default, PartialEq)]
struct Script {
    /// Sorted by tick.
    changes: Vec<(u64, Intent)>,
}

impl Script {
    fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid script: {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let mut changes = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((tick, intents)) = line.split_once(char::is_whitespace) else {
                bail!("line {}: expected `<tick> <intents>`", index + 1);
            };
            let tick: u64 = tick
                .parse()
                .with_context(|| format!("line {}: bad tick {:?}", index + 1, tick))?;
            let intent = parse_intents(intents.trim())
                .with_context(|| format!("line {}", index + 1))?;
            changes.push((tick, intent));
        }
        changes.sort_by_key(|(tick, _)| *tick);
        Ok(Self { changes })
    }

    fn held_at(&self, tick: u64) -> Intent {
        self.changes
            .iter()
            .take_while(|(start, _)| *start <= tick)
            .last()
            .map(|(_, intent)| *intent)
            .unwrap_or_default()
    }
}

fn parse_intents(text: &str) -> Result<Intent> {
    let mut intent = Intent::empty();
    if text == "none" || text == "-" {
        return Ok(intent);
    }
    for name in text.split('+') {
        intent |= match name.trim() {
            "left" => Intent::MOVE_LEFT,
            "right" => Intent::MOVE_RIGHT,
            "jump" => Intent::JUMP,
            "fire" => Intent::FIRE,
            "melee" => Intent::MELEE,
            other => bail!("unknown intent {:?}", other),
        };
    }
    Ok(intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_holds_last_change() {
        let script = Script::parse("# warm up\n30 right+jump\n0 none\n90 fire\n").unwrap();
        assert_eq!(script.held_at(0), Intent::empty());
        assert_eq!(script.held_at(29), Intent::empty());
        assert_eq!(script.held_at(30), Intent::MOVE_RIGHT | Intent::JUMP);
        assert_eq!(script.held_at(500), Intent::FIRE);
    }

    #[test]
    fn unknown_intent_is_rejected() {
        assert!(Script::parse("10 dash\n").is_err());
        assert!(Script::parse("ten right\n").is_err());
        assert!(Script::parse("10\n").is_err());
    }
}
