//! Game controller and state machine
//!
//! [`Game`] owns every system and runs the per-frame pipeline in a fixed
//! order: move the player, fire, retarget aliens, advance the spawner,
//! advance and evict entities, resolve collisions, apply outcomes, then
//! check terminal and wave-progression conditions. The host drives it
//! with one [`Game::update`] call per frame and a fresh [`FrameInput`]
//! snapshot; between frames it reads [`Game::hud`] and drains
//! [`GameEvent`]s to keep menus and entity visuals in sync.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{Body, check_collisions};
use super::entity::{Alien, Entity, EntityKind, Player, Projectile};
use super::manager::{EntityId, EntityManager};
use super::score::ScoreBoard;
use super::spawner::Spawner;
use crate::tuning::Config;

/// Current phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Inert; waiting for an external start trigger.
    Menu,
    /// Active gameplay.
    Playing,
    /// The player fell. Final score stays readable; restart to go again.
    GameOver,
    /// Every wave cleared.
    Victory,
}

/// Input snapshot for a single frame (sampled once, immutable after).
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Ground-plane movement intent; zero means stand still.
    pub movement: Vec2,
    /// World-space point the player is aiming at.
    pub aim_point: Vec3,
    pub shooting: bool,
}

/// What the HUD shows: refreshed every frame while playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudState {
    pub score: u32,
    pub health: i32,
    /// 1-based for display.
    pub wave_display: usize,
    pub total_waves: usize,
}

/// Lifecycle notifications for the presentation layer, drained once per
/// frame. Entity spawn/despawn events are the hook for creating and
/// tearing down visual representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    MenuShown,
    HudShown,
    GameOverShown { score: u32 },
    VictoryShown { score: u32 },
    EntitySpawned { id: EntityId, kind: EntityKind },
    EntityDespawned { id: EntityId, kind: EntityKind },
}

/// Top-level orchestrator. Exclusively owns the entity collection and all
/// system counters; everything mutates synchronously inside `update`.
#[derive(Debug)]
pub struct Game {
    pub config: Config,
    pub phase: GamePhase,
    /// Elapsed Playing time this session, seconds.
    pub clock: f32,
    pub manager: EntityManager,
    pub spawner: Spawner,
    pub score: ScoreBoard,
    pub player_id: Option<EntityId>,
    seed: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: Config, seed: u64) -> Self {
        let score = ScoreBoard::new(&config);
        Self {
            config,
            phase: GamePhase::Menu,
            clock: 0.0,
            manager: EntityManager::new(),
            spawner: Spawner::new(),
            score,
            player_id: None,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: vec![GameEvent::MenuShown],
        }
    }

    /// Start or restart a session: tear down every entity, reset all
    /// systems and the clock, build a fresh player, arm wave 0.
    ///
    /// The RNG re-derives from the session seed, so a restarted session
    /// replays the same spawn pattern.
    pub fn start(&mut self) {
        for (id, kind) in self.manager.clear() {
            self.events.push(GameEvent::EntityDespawned { id, kind });
        }
        self.score.reset();
        self.spawner.reset();
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.clock = 0.0;

        let id = self.manager.add(Entity::Player(Player::new(&self.config)));
        self.player_id = Some(id);
        self.events.push(GameEvent::EntitySpawned {
            id,
            kind: EntityKind::Player,
        });

        self.spawner.start_wave(0, &self.config);
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::HudShown);
        log::info!("session started: {} waves ahead", self.score.total_waves());
    }

    /// Advance one frame. Outside of Playing this is inert: Menu waits
    /// for [`Game::start`], GameOver/Victory wait for a restart.
    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(player_id) = self.player_id else {
            return;
        };
        self.clock += dt;

        // (1) + (2): move the player, then gate the shot while the borrow
        // is still up. A degenerate aim (aim point on the player) skips
        // the shot without spending the cooldown.
        let mut shot = None;
        if let Some(player) = self.manager.get_mut(player_id).and_then(Entity::as_player_mut) {
            player.update_movement(dt, input.movement);
            if input.shooting && player.can_fire(self.clock, self.config.fire_cooldown) {
                let mut direction = input.aim_point - player.pos;
                direction.y = 0.0;
                if let Some(direction) = direction.try_normalize() {
                    player.record_fire(self.clock);
                    shot = Some((player.pos, direction));
                }
            }
        }
        if let Some((origin, direction)) = shot {
            let id = self
                .manager
                .add(Entity::Projectile(Projectile::new(origin, direction, &self.config)));
            self.events.push(GameEvent::EntitySpawned {
                id,
                kind: EntityKind::Projectile,
            });
        }

        // (3) retarget every alien at the player's now-final position.
        let player_pos = self
            .manager
            .get(player_id)
            .map(Entity::position)
            .unwrap_or_default();
        for (_, entity) in self.manager.iter_mut() {
            if let Entity::Alien(alien) = entity {
                if alien.is_alive() {
                    alien.set_target(player_pos);
                }
            }
        }

        // (4) release this wave's next alien if its interval elapsed.
        if let Some(request) = self.spawner.update(dt, &mut self.rng, &self.config) {
            let alien = Alien::new(request.pos, request.speed, request.health, request.palette_index);
            let id = self.manager.add(Entity::Alien(alien));
            self.events.push(GameEvent::EntitySpawned {
                id,
                kind: EntityKind::Alien,
            });
        }

        // (5) advance every entity, evict the dead.
        for (id, kind) in self.manager.update(dt) {
            self.events.push(GameEvent::EntityDespawned { id, kind });
        }

        // (6) collision pass over the post-update snapshot.
        let projectiles = self.bodies_of(EntityKind::Projectile);
        let aliens = self.bodies_of(EntityKind::Alien);
        let outcome = check_collisions(&projectiles, &aliens, player_pos, &self.config);

        // (7) apply outcomes. Projectile kills score; contact kills don't.
        for hit in &outcome.projectile_hits {
            if let Some(projectile) = self
                .manager
                .get_mut(hit.projectile)
                .and_then(Entity::as_projectile_mut)
            {
                projectile.kill();
            }
            if let Some(alien) = self.manager.get_mut(hit.alien).and_then(Entity::as_alien_mut) {
                let was_alive = alien.is_alive();
                alien.take_damage(1);
                if was_alive && !alien.is_alive() {
                    self.score.add_alien_kill_points();
                }
            }
        }
        for &alien_id in &outcome.alien_player_hits {
            // Symmetric 1-point contact damage: the alien is worn down by
            // the touch just like the player, not destroyed outright.
            if let Some(alien) = self.manager.get_mut(alien_id).and_then(Entity::as_alien_mut) {
                alien.take_damage(1);
            }
            if let Some(player) = self.manager.get_mut(player_id).and_then(Entity::as_player_mut) {
                player.take_damage(1);
            }
        }

        // (8) terminal check: the rest of the frame only runs if the
        // player survived it.
        let player_alive = self
            .manager
            .get(player_id)
            .map(Entity::is_alive)
            .unwrap_or(false);
        if !player_alive {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOverShown {
                score: self.score.score(),
            });
            log::info!(
                "game over on wave {} with score {}",
                self.score.wave() + 1,
                self.score.score()
            );
            return;
        }

        // (9) wave progression: once the wave is done, rest out the
        // inter-wave delay, then advance or finish the campaign.
        let live_aliens = self.manager.live_count(EntityKind::Alien);
        if self.spawner.is_wave_complete(live_aliens)
            && self.spawner.update_wave_delay(dt, &self.config)
        {
            self.score.next_wave();
            if self.score.all_waves_complete() {
                self.phase = GamePhase::Victory;
                self.events.push(GameEvent::VictoryShown {
                    score: self.score.score(),
                });
                log::info!(
                    "all {} waves cleared with score {}",
                    self.score.total_waves(),
                    self.score.score()
                );
            } else {
                self.spawner.start_wave(self.score.wave(), &self.config);
            }
        }
    }

    /// Current HUD snapshot. Health reads 0 once the player is gone.
    pub fn hud(&self) -> HudState {
        let health = self.player().map(|p| p.health).unwrap_or(0);
        HudState {
            score: self.score.score(),
            health,
            wave_display: (self.score.wave() + 1).min(self.score.total_waves().max(1)),
            total_waves: self.score.total_waves(),
        }
    }

    pub fn player(&self) -> Option<&Player> {
        self.player_id
            .and_then(|id| self.manager.get(id))
            .and_then(Entity::as_player)
    }

    /// Hand the queued lifecycle events to the presentation layer.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn bodies_of(&self, kind: EntityKind) -> Vec<Body> {
        self.manager
            .iter()
            .filter(|(_, entity)| entity.kind() == kind && entity.is_alive())
            .map(|(id, entity)| Body {
                id,
                pos: entity.position(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ground_vec;

    fn started_game() -> Game {
        let mut game = Game::new(Config::default(), 42);
        game.start();
        game
    }

    #[test]
    fn test_menu_is_inert() {
        let mut game = Game::new(Config::default(), 42);
        let input = FrameInput {
            shooting: true,
            ..Default::default()
        };
        game.update(&input, 0.016);
        assert_eq!(game.phase, GamePhase::Menu);
        assert_eq!(game.clock, 0.0);
        assert!(game.manager.is_empty());
    }

    #[test]
    fn test_start_builds_fresh_session() {
        let game = started_game();
        assert_eq!(game.phase, GamePhase::Playing);
        let hud = game.hud();
        assert_eq!(hud.score, 0);
        assert_eq!(hud.health, game.config.player_max_health);
        assert_eq!(hud.wave_display, 1);
        assert_eq!(hud.total_waves, 5);
        assert_eq!(game.player().unwrap().pos, Vec3::ZERO);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut game = started_game();
        let shooting = FrameInput {
            aim_point: ground_vec(10.0, 0.0),
            shooting: true,
            ..Default::default()
        };
        game.update(&shooting, 0.016);
        assert_eq!(game.manager.of_kind(EntityKind::Projectile).len(), 1);
        let projectile = game
            .manager
            .iter()
            .find_map(|(_, e)| e.as_projectile())
            .unwrap();
        assert!((projectile.direction.length() - 1.0).abs() < 0.001);
        // Immediately again: still cooling down.
        game.update(&shooting, 0.016);
        assert_eq!(game.manager.of_kind(EntityKind::Projectile).len(), 1);
        // Wait out the cooldown without firing, then shoot again.
        game.update(&FrameInput::default(), game.config.fire_cooldown);
        game.update(&shooting, 0.016);
        assert_eq!(game.manager.of_kind(EntityKind::Projectile).len(), 2);
    }

    #[test]
    fn test_degenerate_aim_skips_shot_and_keeps_cooldown() {
        let mut game = started_game();
        // Aim point exactly on the player: no projectile.
        let degenerate = FrameInput {
            aim_point: Vec3::ZERO,
            shooting: true,
            ..Default::default()
        };
        game.update(&degenerate, 0.016);
        assert!(game.manager.of_kind(EntityKind::Projectile).is_empty());

        // The skipped shot spent no cooldown: a valid aim fires at once.
        let valid = FrameInput {
            aim_point: ground_vec(10.0, 0.0),
            shooting: true,
            ..Default::default()
        };
        game.update(&valid, 0.016);
        assert_eq!(game.manager.of_kind(EntityKind::Projectile).len(), 1);
    }

    #[test]
    fn test_game_over_freezes_the_session() {
        let mut config = Config::default();
        config.player_max_health = 1;
        let mut game = Game::new(config, 42);
        game.start();

        // An alien standing on the player.
        game.manager
            .add(Entity::Alien(Alien::new(ground_vec(0.2, 0.0), 0.0, 5, 0)));
        game.update(&FrameInput::default(), 0.016);
        assert_eq!(game.phase, GamePhase::GameOver);

        let clock = game.clock;
        game.update(&FrameInput::default(), 0.016);
        assert_eq!(game.clock, clock);
        assert!(
            game.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::GameOverShown { score: 0 }))
        );
    }

    #[test]
    fn test_spawner_feeds_the_manager() {
        let mut game = started_game();
        // Wave 0 releases its first alien after one full interval.
        let interval = game.config.waves[0].spawn_interval;
        game.update(&FrameInput::default(), interval);
        assert_eq!(game.manager.live_count(EntityKind::Alien), 1);
        let events = game.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::EntitySpawned { kind: EntityKind::Alien, .. }
        )));
    }
}
