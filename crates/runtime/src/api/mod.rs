//! Public runtime API surface.
//!
//! Re-exports the handle clients use to drive the simulation and the error
//! type every call returns.
mod errors;
mod handle;

pub use errors::{Result, RuntimeError, StoreError};
pub use handle::RuntimeHandle;
