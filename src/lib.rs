//! Arena Siege - a wave-defense arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, waves, collisions, game state machine)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, input capture and UI live outside this crate. The host
//! samples input into a [`sim::FrameInput`] once per frame, calls
//! [`sim::Game::update`], then reads the HUD snapshot and drains
//! lifecycle events to keep its visuals in sync.

pub mod sim;
pub mod tuning;

pub use tuning::{Config, WaveConfig};

use glam::Vec3;
use rand::Rng;

/// Lift ground-plane coordinates into world space.
///
/// Gameplay happens on the y = 0 plane; every position the simulation
/// produces goes through here so the invariant holds by construction.
#[inline]
pub fn ground_vec(x: f32, z: f32) -> Vec3 {
    Vec3::new(x, 0.0, z)
}

/// Random point on a horizontal circle of `radius` around the arena center.
pub fn random_point_on_circle<R: Rng>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = rng.random_range(0.0..std::f32::consts::TAU);
    ground_vec(radius * theta.cos(), radius * theta.sin())
}
