//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-driven only: the host calls [`Game::update`] once per frame
//! - Seeded RNG only
//! - Stable iteration order (insertion order inside the entity manager)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod game;
pub mod manager;
pub mod score;
pub mod spawner;

pub use collision::{Body, CollisionOutcome, ProjectileHit, check_collisions};
pub use entity::{Alien, Entity, EntityKind, Player, Projectile};
pub use game::{FrameInput, Game, GameEvent, GamePhase, HudState};
pub use manager::{EntityId, EntityManager};
pub use score::ScoreBoard;
pub use spawner::{SpawnRequest, Spawner};
