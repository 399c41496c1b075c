//! Deterministic platformer simulation shared by every host.
//!
//! `platformer-core` defines the canonical rules (tile collision, actor state
//! machines, projectiles, damage) and exposes a pure fixed-step API that both
//! the runtime and offline tools drive. All mutation flows through
//! [`engine::World::tick`]; hosts observe the result through
//! [`snapshot::WorldSnapshot`] and the drained [`event::GameEvent`]s.
pub mod actor;
pub mod anim;
pub mod camera;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod geometry;
pub mod input;
pub mod physics;
pub mod pickup;
pub mod projectile;
pub mod snapshot;
pub mod state;

pub use actor::{
    Boss, BossAction, BossAnim, Combatant, Cutscene, Enemy, EnemyAnim, EnemyKind, Facing, Life,
    Player, PlayerAnim, Presence,
};
pub use anim::{Animator, Clip};
pub use camera::Camera;
pub use combat::{Armor, Health, HitResult, Quiver};
pub use config::{
    BossConfig, EnemyAttack, EnemyConfig, GameConfig, PlayerConfig, ProjectileConfig, WorldConfig,
    Zone,
};
pub use engine::{TickReport, World};
pub use env::{Cell, Level, LevelError, LevelOrigin, MarkerAlphabet, Spawn, TileMap};
pub use error::{ConfigError, ErrorSeverity, GameError};
pub use event::{EventCategory, EventQueue, GameEvent};
pub use geometry::{Aabb, OrientedRect, Vec2};
pub use input::{InputFrame, InputTracker, Intent};
pub use physics::{Body, Contacts, PhysicsBody};
pub use pickup::{Pickup, PickupKind};
pub use projectile::{Faction, Projectile, ProjectileKind, TileResponse};
pub use snapshot::{EntityView, Hud, WorldSnapshot};
pub use state::{EntityId, GameState, Tick};
