//! Data-driven game balance
//!
//! Every tunable lives in one immutable [`Config`] built once at startup
//! and passed by reference into the simulation. The defaults are the
//! shipped balance table; the demo binary can override them from JSON.

use serde::{Deserialize, Serialize};

/// Alien tints, cycled by wave index so each wave reads differently.
pub const ALIEN_PALETTE: [[f32; 3]; 5] = [
    [0.35, 0.85, 0.35], // green
    [0.95, 0.85, 0.25], // yellow
    [0.95, 0.55, 0.20], // orange
    [0.90, 0.25, 0.25], // red
    [0.70, 0.35, 0.90], // violet
];

/// One wave of the campaign: how many aliens, and how fast they release.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    pub alien_count: u32,
    /// Seconds between alien releases within the wave.
    pub spawn_interval: f32,
}

/// The full tunables table.
///
/// Waves are consumed strictly in order; the table length is the campaign
/// length. Hit distances are the contact proxies for collision checks
/// (defaults are the sums of the matching hitbox radii).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Half-extent of the square arena; movement clamps to ±this on x and z.
    pub arena_half_extent: f32,

    pub player_speed: f32,
    pub player_max_health: i32,
    /// Player hitbox radius, exposed to the visual layer.
    pub player_radius: f32,

    pub projectile_speed: f32,
    /// Seconds before an unspent projectile expires.
    pub projectile_lifetime: f32,
    /// Slack beyond the arena edge before a projectile despawns.
    pub projectile_bounds_margin: f32,
    /// Projectile hitbox radius, exposed to the visual layer.
    pub projectile_radius: f32,
    /// Minimum game-time between accepted shots.
    pub fire_cooldown: f32,

    pub alien_base_speed: f32,
    /// Added to alien speed per wave index.
    pub alien_speed_increment: f32,
    pub alien_health: i32,
    /// Alien hitbox radius, exposed to the visual layer.
    pub alien_radius: f32,

    /// Radius of the spawn circle around the arena center.
    pub spawn_radius: f32,
    /// Rest period between clearing one wave and starting the next.
    pub wave_delay: f32,

    pub hit_distance_projectile_alien: f32,
    pub hit_distance_alien_player: f32,
    pub points_per_kill: u32,

    pub waves: Vec<WaveConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_half_extent: 20.0,
            player_speed: 10.0,
            player_max_health: 10,
            player_radius: 0.8,
            projectile_speed: 30.0,
            projectile_lifetime: 2.0,
            projectile_bounds_margin: 2.0,
            projectile_radius: 0.3,
            fire_cooldown: 0.25,
            alien_base_speed: 3.0,
            alien_speed_increment: 0.5,
            alien_health: 1,
            alien_radius: 0.7,
            spawn_radius: 25.0,
            wave_delay: 3.0,
            hit_distance_projectile_alien: 1.0, // projectile + alien radii
            hit_distance_alien_player: 1.5,     // alien + player radii
            points_per_kill: 10,
            waves: vec![
                WaveConfig { alien_count: 5, spawn_interval: 1.5 },
                WaveConfig { alien_count: 8, spawn_interval: 1.2 },
                WaveConfig { alien_count: 12, spawn_interval: 1.0 },
                WaveConfig { alien_count: 16, spawn_interval: 0.8 },
                WaveConfig { alien_count: 20, spawn_interval: 0.6 },
            ],
        }
    }
}

/// Why a config file could not be turned into a [`Config`].
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config file: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl Config {
    /// Load a balance table from a JSON file. Missing fields fall back to
    /// the defaults, so override files only need to list what changes.
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        Ok(config)
    }

    pub fn total_waves(&self) -> usize {
        self.waves.len()
    }
}
