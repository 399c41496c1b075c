//! Development tasks for the platformer project
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{CheckLevel, DumpConfig, Simulate};

/// Development tasks for the platformer project
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the platformer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run the simulation headless and print what happened
    Simulate(Simulate),

    /// Parse a level file and report its markers or the error
    CheckLevel(CheckLevel),

    /// Print the default game configuration
    DumpConfig(DumpConfig),
}

fn main() -> Result<()> {
    utils::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::CheckLevel(cmd) => cmd.execute(),
        Command::DumpConfig(cmd) => cmd.execute(),
    }
}
