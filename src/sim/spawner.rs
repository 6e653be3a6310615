//! Timed wave spawning
//!
//! One wave at a time: idle -> spawning -> drained -> (delay) -> handoff.
//! The spawner decides *when and where* an alien enters the arena; the
//! controller owns actually inserting it into the entity manager, so this
//! stays a pure timer/counter machine over the wave table.

use rand::Rng;

use glam::Vec3;

use crate::random_point_on_circle;
use crate::tuning::{ALIEN_PALETTE, Config};

/// Blueprint for one alien about to enter the arena.
#[derive(Debug, Clone, Copy)]
pub struct SpawnRequest {
    pub pos: Vec3,
    pub speed: f32,
    pub health: i32,
    /// Tint cue for the visual layer, cycling the palette by wave.
    pub palette_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpawnState {
    /// No wave armed.
    Idle,
    /// Releasing aliens on the interval timer.
    Spawning,
    /// Quota released; aliens may still be alive out there.
    Drained,
}

#[derive(Debug)]
pub struct Spawner {
    state: SpawnState,
    wave_index: usize,
    spawn_timer: f32,
    spawned: u32,
    quota: u32,
    interval: f32,
    /// Latched true once the wave is over; never re-evaluates to false
    /// within the same wave.
    wave_complete: bool,
    delay_timer: f32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            state: SpawnState::Idle,
            wave_index: 0,
            spawn_timer: 0.0,
            spawned: 0,
            quota: 0,
            interval: 0.0,
            wave_complete: false,
            delay_timer: 0.0,
        }
    }

    /// Arm a wave from the table. An index past the table end is a no-op:
    /// campaign completion is the scoreboard's call, not the spawner's.
    pub fn start_wave(&mut self, index: usize, config: &Config) {
        let Some(wave) = config.waves.get(index) else {
            return;
        };
        self.state = SpawnState::Spawning;
        self.wave_index = index;
        self.spawn_timer = 0.0;
        self.spawned = 0;
        self.quota = wave.alien_count;
        self.interval = wave.spawn_interval;
        self.wave_complete = false;
        self.delay_timer = 0.0;
        log::info!(
            "wave {} armed: {} aliens every {:.2}s",
            index + 1,
            self.quota,
            self.interval
        );
    }

    /// Advance the spawn timer; releases at most one alien per call.
    ///
    /// On each interval elapse with quota remaining, the alien appears at
    /// a random point on the spawn circle, with speed escalating by wave
    /// index. The timer resets to zero on release.
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R, config: &Config) -> Option<SpawnRequest> {
        if self.state != SpawnState::Spawning {
            return None;
        }

        self.spawn_timer += dt;
        if self.spawn_timer < self.interval || self.spawned >= self.quota {
            return None;
        }

        self.spawn_timer = 0.0;
        self.spawned += 1;
        if self.spawned >= self.quota {
            self.state = SpawnState::Drained;
        }

        let request = SpawnRequest {
            pos: random_point_on_circle(rng, config.spawn_radius),
            speed: config.alien_base_speed
                + self.wave_index as f32 * config.alien_speed_increment,
            health: config.alien_health,
            palette_index: self.wave_index % ALIEN_PALETTE.len(),
        };
        log::debug!(
            "wave {}: alien {}/{} released at ({:.1}, {:.1})",
            self.wave_index + 1,
            self.spawned,
            self.quota,
            request.pos.x,
            request.pos.z
        );
        Some(request)
    }

    /// True once the wave has stopped releasing, released at least one
    /// alien, and none of them are still alive. Latched: once true it
    /// stays true until the next `start_wave`/`reset`.
    ///
    /// The at-least-one guard keeps a wave that has not begun spawning
    /// from reading as already finished.
    pub fn is_wave_complete(&mut self, live_aliens: usize) -> bool {
        if !self.wave_complete
            && self.state == SpawnState::Drained
            && self.spawned > 0
            && live_aliens == 0
        {
            self.wave_complete = true;
        }
        self.wave_complete
    }

    /// Accumulate the inter-wave rest once the wave is complete; true once
    /// the configured delay has elapsed.
    pub fn update_wave_delay(&mut self, dt: f32, config: &Config) -> bool {
        self.delay_timer += dt;
        self.delay_timer >= config.wave_delay
    }

    /// Session start/restart only: back to idle, everything zeroed.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn wave_index(&self) -> usize {
        self.wave_index
    }

    pub fn aliens_spawned(&self) -> u32 {
        self.spawned
    }

    pub fn is_spawning(&self) -> bool {
        self.state == SpawnState::Spawning
    }
}
