//! Arena Siege headless demo driver
//!
//! Stands in for the out-of-scope presentation layer: a small autopilot
//! synthesizes per-frame input (hold the center, aim at the nearest
//! alien, keep firing), the simulation runs at a fixed 60 Hz step, and
//! HUD/lifecycle changes go to the log.
//!
//! Usage: `arena-siege [seed] [config.json]` (either order, both optional).
//! Run with `RUST_LOG=info` to watch the session unfold.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use arena_siege::Config;
use arena_siege::sim::{Entity, FrameInput, Game, GamePhase};

const FRAME_DT: f32 = 1.0 / 60.0;
/// Safety cap: ten simulated minutes.
const MAX_FRAMES: u32 = 60 * 600;

fn main() {
    env_logger::init();

    let mut seed = None;
    let mut config_path: Option<PathBuf> = None;
    for arg in std::env::args().skip(1) {
        match arg.parse::<u64>() {
            Ok(value) => seed = Some(value),
            Err(_) => config_path = Some(PathBuf::from(arg)),
        }
    }

    let config = match &config_path {
        Some(path) => match Config::from_json_file(path) {
            Ok(config) => {
                log::info!("loaded balance overrides from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; falling back to the shipped balance table");
                Config::default()
            }
        },
        None => Config::default(),
    };

    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    log::info!(
        "arena {:.0}x{:.0}, player hp {}, {} waves, seed {seed}",
        config.arena_half_extent * 2.0,
        config.arena_half_extent * 2.0,
        config.player_max_health,
        config.total_waves(),
    );

    let mut game = Game::new(config, seed);
    game.start();

    let mut frames = 0u32;
    while game.phase == GamePhase::Playing && frames < MAX_FRAMES {
        let input = autopilot(&game);
        game.update(&input, FRAME_DT);

        for event in game.drain_events() {
            log::debug!("{event:?}");
        }
        if frames % 60 == 0 {
            let hud = game.hud();
            log::info!(
                "t={:>5.1}s wave {}/{} score {:>4} hp {:>2}",
                game.clock,
                hud.wave_display,
                hud.total_waves,
                hud.score,
                hud.health,
            );
        }
        frames += 1;
    }

    let hud = game.hud();
    match game.phase {
        GamePhase::Victory => println!("VICTORY - final score {}", hud.score),
        GamePhase::GameOver => println!("GAME OVER - final score {}", hud.score),
        _ => println!("stopped after {frames} frames with score {}", hud.score),
    }
}

/// Demo-mode pilot: drift back toward the arena center, aim at the
/// nearest live alien and keep the trigger held while one exists.
fn autopilot(game: &Game) -> FrameInput {
    let Some(player) = game.player() else {
        return FrameInput::default();
    };

    let mut nearest = None;
    let mut nearest_distance = f32::MAX;
    for (_, entity) in game.manager.iter() {
        if let Entity::Alien(alien) = entity {
            if alien.is_alive() {
                let distance = alien.pos.distance(player.pos);
                if distance < nearest_distance {
                    nearest_distance = distance;
                    nearest = Some(alien.pos);
                }
            }
        }
    }

    let to_center = Vec2::new(-player.pos.x, -player.pos.z);
    let movement = if to_center.length() > 1.0 {
        to_center.normalize()
    } else {
        Vec2::ZERO
    };

    match nearest {
        Some(aim_point) => FrameInput {
            movement,
            aim_point,
            shooting: true,
        },
        None => FrameInput {
            movement,
            ..Default::default()
        },
    }
}
