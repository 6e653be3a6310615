//! Simulation entities
//!
//! The entity set is closed: player, alien, projectile. Each variant keeps
//! the parameters it needs baked in at construction, so the per-frame
//! update is a plain `update(dt)` with no shared lookups. The [`Entity`]
//! enum gives the manager one uniform surface to drive, and keeps every
//! match over the variants exhaustive-checkable.

use glam::{Vec2, Vec3};

use crate::ground_vec;
use crate::tuning::Config;

/// Entity variant tag, used for type-filtered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Alien,
    Projectile,
}

/// An alien closer to its target than this holds position exactly on it,
/// instead of normalizing a near-zero direction.
pub const CHASE_EPSILON: f32 = 0.1;

/// The player avatar.
///
/// Health only decreases within a life; a restart builds a fresh player.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec3,
    pub health: i32,
    speed: f32,
    arena_half_extent: f32,
    /// Game-clock time of the last accepted shot.
    last_fire_time: f32,
    alive: bool,
}

impl Player {
    pub fn new(config: &Config) -> Self {
        Self {
            pos: Vec3::ZERO,
            health: config.player_max_health,
            speed: config.player_speed,
            arena_half_extent: config.arena_half_extent,
            // Never gate the first shot of a session.
            last_fire_time: f32::NEG_INFINITY,
            alive: true,
        }
    }

    /// Advance the player from this frame's movement input.
    ///
    /// A zero movement vector is a no-op (re-normalizing it would jitter).
    /// Both horizontal axes clamp independently, so the reachable area is
    /// the full square arena, not an inscribed circle.
    pub fn update_movement(&mut self, dt: f32, movement: Vec2) {
        if movement == Vec2::ZERO {
            return;
        }
        self.pos += ground_vec(movement.x, movement.y) * self.speed * dt;
        let half = self.arena_half_extent;
        self.pos.x = self.pos.x.clamp(-half, half);
        self.pos.z = self.pos.z.clamp(-half, half);
    }

    /// Cooldown gate: true once `cooldown` seconds have passed since the
    /// last accepted shot. No burst accumulation.
    pub fn can_fire(&self, now: f32, cooldown: f32) -> bool {
        now - self.last_fire_time >= cooldown
    }

    /// Must be called exactly once per accepted shot.
    pub fn record_fire(&mut self, now: f32) {
        self.last_fire_time = now;
    }

    /// Apply damage unconditionally; health floors at 0, and liveness
    /// flips false exactly when it reaches 0.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
        if self.health == 0 {
            self.alive = false;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

/// A wave enemy chasing the player.
///
/// Speed and tint are fixed at spawn from the wave parameters. Aliens
/// never expire on their own: they are shot down, or ground away by
/// repeated player collisions.
#[derive(Debug, Clone)]
pub struct Alien {
    pub pos: Vec3,
    pub speed: f32,
    pub health: i32,
    /// Index into [`crate::tuning::ALIEN_PALETTE`], fixed at spawn.
    pub palette_index: usize,
    target: Vec3,
    alive: bool,
}

impl Alien {
    pub fn new(pos: Vec3, speed: f32, health: i32, palette_index: usize) -> Self {
        Self {
            pos,
            speed,
            health,
            palette_index,
            target: pos,
            alive: true,
        }
    }

    /// Set the chase target. The controller calls this with the player's
    /// position before the alien's own update runs, so aliens always chase
    /// an already-finalized position.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn update(&mut self, dt: f32) {
        let direction = self.target - self.pos;
        if direction.length() > CHASE_EPSILON {
            self.pos += direction.normalize() * self.speed * dt;
        } else {
            // Close enough: hold exactly on the target.
            self.pos = self.target;
        }
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
        if self.health <= 0 {
            self.alive = false;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

/// A player shot travelling in a fixed direction.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec3,
    /// Normalized travel direction, fixed at spawn.
    pub direction: Vec3,
    speed: f32,
    lifetime: f32,
    max_lifetime: f32,
    /// Despawn once |x| or |z| exceeds this (arena half-extent plus slack,
    /// so edge shots still get a moment to land).
    bounds_limit: f32,
    alive: bool,
}

impl Projectile {
    pub fn new(pos: Vec3, direction: Vec3, config: &Config) -> Self {
        Self {
            pos,
            direction,
            speed: config.projectile_speed,
            lifetime: 0.0,
            max_lifetime: config.projectile_lifetime,
            bounds_limit: config.arena_half_extent + config.projectile_bounds_margin,
            alive: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.direction * self.speed * dt;
        self.lifetime += dt;
        if self.lifetime > self.max_lifetime
            || self.pos.x.abs() > self.bounds_limit
            || self.pos.z.abs() > self.bounds_limit
        {
            self.alive = false;
        }
    }

    /// Spend the projectile on a hit. Idempotent.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Any simulated object: a position, a per-frame update, a liveness flag.
#[derive(Debug, Clone)]
pub enum Entity {
    Player(Player),
    Alien(Alien),
    Projectile(Projectile),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Player(_) => EntityKind::Player,
            Entity::Alien(_) => EntityKind::Alien,
            Entity::Projectile(_) => EntityKind::Projectile,
        }
    }

    pub fn position(&self) -> Vec3 {
        match self {
            Entity::Player(p) => p.pos,
            Entity::Alien(a) => a.pos,
            Entity::Projectile(p) => p.pos,
        }
    }

    pub fn is_alive(&self) -> bool {
        match self {
            Entity::Player(p) => p.is_alive(),
            Entity::Alien(a) => a.is_alive(),
            Entity::Projectile(p) => p.is_alive(),
        }
    }

    /// Per-frame update. The player moves from input earlier in the frame
    /// pipeline, so its update here is a no-op.
    pub fn update(&mut self, dt: f32) {
        match self {
            Entity::Player(_) => {}
            Entity::Alien(a) => a.update(dt),
            Entity::Projectile(p) => p.update(dt),
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Entity::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_alien(&self) -> Option<&Alien> {
        match self {
            Entity::Alien(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_projectile(&self) -> Option<&Projectile> {
        match self {
            Entity::Projectile(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match self {
            Entity::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_alien_mut(&mut self) -> Option<&mut Alien> {
        match self {
            Entity::Alien(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_projectile_mut(&mut self) -> Option<&mut Projectile> {
        match self {
            Entity::Projectile(p) => Some(p),
            _ => None,
        }
    }
}
