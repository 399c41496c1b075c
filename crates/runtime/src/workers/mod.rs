//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the world and executes commands; the driver
//! decides how many fixed steps to request from wall-clock time.

mod driver;
mod simulation;

pub use driver::{Driver, FixedTimestep};
pub use simulation::{Command, SimulationWorker, StepSummary};
