//! Print the game configuration
//!
//! The output is a complete tuning file; copy it and delete the keys you do
//! not change.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use platformer_content::ConfigLoader;

use crate::utils;

/// Print the default game configuration
#[derive(Parser)]
pub struct DumpConfig {
    /// Merge this tuning file over the defaults before printing
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "toml")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Toml,
    Ron,
}

impl DumpConfig {
    pub fn execute(self) -> Result<()> {
        let config = utils::load_config(self.config.as_deref())?;
        let rendered = match self.format {
            OutputFormat::Toml => ConfigLoader::to_toml(&config)?,
            OutputFormat::Ron => ConfigLoader::to_ron(&config)?,
        };
        println!("{}", rendered);
        Ok(())
    }
}
