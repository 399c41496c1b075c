//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check_level;
mod dump_config;
mod simulate;

pub use check_level::CheckLevel;
pub use dump_config::DumpConfig;
pub use simulate::Simulate;
