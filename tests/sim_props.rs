//! Property tests over the entity arithmetic.

use glam::{Vec2, Vec3};
use proptest::prelude::*;

use arena_siege::sim::{Alien, Player, Projectile};
use arena_siege::{Config, ground_vec};

proptest! {
    #[test]
    fn movement_never_escapes_the_arena(
        steps in proptest::collection::vec(
            ((-1.0f32..1.0), (-1.0f32..1.0), (0.0f32..0.1)),
            1..200,
        )
    ) {
        let config = Config::default();
        let mut player = Player::new(&config);
        for (mx, my, dt) in steps {
            player.update_movement(dt, Vec2::new(mx, my));
            prop_assert!(player.pos.x.abs() <= config.arena_half_extent);
            prop_assert!(player.pos.z.abs() <= config.arena_half_extent);
            prop_assert_eq!(player.pos.y, 0.0);
        }
    }

    #[test]
    fn projectile_expires_past_its_lifetime(extra in 0.01f32..1.0) {
        let config = Config::default();
        let mut projectile = Projectile::new(Vec3::ZERO, Vec3::ZERO, &config);
        let mut elapsed = 0.0f32;
        while elapsed < config.projectile_lifetime + extra {
            projectile.update(0.05);
            elapsed += 0.05;
        }
        prop_assert!(!projectile.is_alive());
    }

    #[test]
    fn alien_chase_stays_finite_and_grounded(
        (x, z) in (-30.0f32..30.0, -30.0f32..30.0),
        (tx, tz) in (-30.0f32..30.0, -30.0f32..30.0),
        dt in 0.0f32..0.2,
    ) {
        let mut alien = Alien::new(ground_vec(x, z), 4.0, 1, 0);
        alien.set_target(ground_vec(tx, tz));
        alien.update(dt);
        prop_assert!(alien.pos.is_finite());
        prop_assert_eq!(alien.pos.y, 0.0);
    }
}
