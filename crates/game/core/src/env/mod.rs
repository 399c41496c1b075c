//! Static world data: the level grid, its spawn markers, and the
//! deterministic random source.
//!
//! Everything here is read-only once a session starts. Actors borrow the
//! [`TileMap`] for collision; nothing in the tick loop mutates it.
mod error;
mod level;
mod rng;
mod tile_map;

pub use error::LevelError;
pub use level::{Level, LevelOrigin, MarkerAlphabet, Spawn};
pub use rng::{PcgRng, RngOracle, Rolls, compute_seed};
pub use tile_map::{Cell, TileMap};
