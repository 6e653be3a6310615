//! Collision detection for the arena
//!
//! A stateless, brute-force proximity pass over per-frame snapshots. Live
//! entity counts stay in the tens, so O(projectiles × aliens) is the right
//! tool; distances are full 3D Euclidean even though everything sits on
//! the ground plane.

use glam::Vec3;

use super::manager::EntityId;
use crate::tuning::Config;

/// Positional snapshot of one live entity, taken after the movement pass.
/// Snapshots are plain copies, so the collision scan cannot be distorted
/// by mutation elsewhere in the frame.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub id: EntityId,
    pub pos: Vec3,
}

/// A projectile contact: which shot landed on which alien.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileHit {
    pub projectile: EntityId,
    pub alien: EntityId,
}

/// Everything the pass found this frame. The two hit sets are independent:
/// an alien overlapping a projectile and the player at once shows up in
/// both, and the controller applies both damage events.
#[derive(Debug, Clone, Default)]
pub struct CollisionOutcome {
    pub projectile_hits: Vec<ProjectileHit>,
    pub alien_player_hits: Vec<EntityId>,
}

/// Scan projectiles against aliens, and aliens against the player.
///
/// Each projectile lands on at most one alien per frame: the scan stops at
/// the first alien in list order inside the hit distance, so when several
/// are in range the earliest-listed one wins.
pub fn check_collisions(
    projectiles: &[Body],
    aliens: &[Body],
    player_pos: Vec3,
    config: &Config,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    for projectile in projectiles {
        for alien in aliens {
            if projectile.pos.distance(alien.pos) < config.hit_distance_projectile_alien {
                outcome.projectile_hits.push(ProjectileHit {
                    projectile: projectile.id,
                    alien: alien.id,
                });
                break;
            }
        }
    }

    for alien in aliens {
        if alien.pos.distance(player_pos) < config.hit_distance_alien_player {
            outcome.alien_player_hits.push(alien.id);
        }
    }

    outcome
}
