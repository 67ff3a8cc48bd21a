//! Asteroid component, random launch parameters, and the population spawner.
//!
//! The spawner keeps the active set topped up to
//! `GameConfig::asteroid_target_population`.  It runs once at startup and then
//! every playing frame *after* bullet contacts have been resolved, so a
//! destroyed asteroid is replaced in the same frame.

use crate::config::GameConfig;
use crate::world::asteroid_collision_groups;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

/// Marker + visual scale for an asteroid entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    /// Uniform scale in `[asteroid_scale_min, asteroid_scale_max]`.
    pub scale: f32,
}

/// Everything that is random about a freshly spawned asteroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidLaunch {
    pub position: Vec2,
    pub scale: f32,
    pub velocity: Vec2,
    /// Degrees per second; converted to rad/s when handed to Rapier.
    pub angvel_deg: f32,
}

impl AsteroidLaunch {
    /// Draw launch parameters uniformly from the configured ranges.
    ///
    /// Position covers the whole world rectangle with no exclusion zone, so a
    /// new asteroid may appear on top of the player.
    pub fn roll(rng: &mut impl Rng, config: &GameConfig) -> Self {
        let v = config.asteroid_velocity_range;
        let w = config.asteroid_angvel_range_deg;
        Self {
            position: Vec2::new(
                rng.gen_range(0.0..=config.world_width),
                rng.gen_range(0.0..=config.world_height),
            ),
            scale: rng.gen_range(config.asteroid_scale_min..=config.asteroid_scale_max),
            velocity: Vec2::new(rng.gen_range(-v..=v), rng.gen_range(-v..=v)),
            angvel_deg: rng.gen_range(-w..=w),
        }
    }
}

/// Number of asteroids needed to bring `active` back up to `target`.
#[inline]
pub fn population_deficit(active: usize, target: usize) -> usize {
    target.saturating_sub(active)
}

/// Spawn one asteroid as a perfectly elastic dynamic body.
pub fn spawn_asteroid(commands: &mut Commands, launch: AsteroidLaunch, config: &GameConfig) -> Entity {
    commands
        .spawn((
            Asteroid {
                scale: launch.scale,
            },
            RigidBody::Dynamic,
            Collider::ball(config.asteroid_base_radius * launch.scale),
            Velocity {
                linvel: launch.velocity,
                angvel: launch.angvel_deg.to_radians(),
            },
            Restitution {
                coefficient: 1.0,
                combine_rule: CoefficientCombineRule::Max,
            },
            Friction {
                coefficient: 0.0,
                combine_rule: CoefficientCombineRule::Min,
            },
            Damping {
                linear_damping: 0.0,
                angular_damping: 0.0,
            },
            asteroid_collision_groups(),
            Transform::from_translation(launch.position.extend(0.0)),
            Visibility::default(),
        ))
        .id()
}

/// Spawn exactly `population_deficit(active, target)` asteroids and return
/// how many were created.
pub fn refill_asteroids(
    commands: &mut Commands,
    rng: &mut impl Rng,
    active: usize,
    config: &GameConfig,
) -> usize {
    let deficit = population_deficit(active, config.asteroid_target_population);
    for _ in 0..deficit {
        spawn_asteroid(commands, AsteroidLaunch::roll(rng, config), config);
    }
    deficit
}

/// Startup system: fill the empty scene to the target population.
pub fn spawn_initial_asteroids(
    mut commands: Commands,
    q: Query<(), With<Asteroid>>,
    config: Res<GameConfig>,
) {
    let spawned = refill_asteroids(&mut commands, &mut rand::thread_rng(), q.iter().count(), &config);
    info!("Spawned {spawned} initial asteroids");
}

/// Per-frame system: replace destroyed asteroids.
pub fn asteroid_refill_system(
    mut commands: Commands,
    q: Query<(), With<Asteroid>>,
    config: Res<GameConfig>,
) {
    let active = q.iter().count();
    if active >= config.asteroid_target_population {
        return;
    }
    let spawned = refill_asteroids(&mut commands, &mut rand::thread_rng(), active, &config);
    debug!("Refilled {spawned} asteroid(s) ({active} were active)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn deficit_tops_up_to_target_without_overshoot() {
        assert_eq!(population_deficit(0, 5), 5);
        assert_eq!(population_deficit(3, 5), 2);
        assert_eq!(population_deficit(5, 5), 0);
        assert_eq!(population_deficit(9, 5), 0);
    }

    #[test]
    fn rolled_launches_stay_within_configured_ranges() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(0xA57E_2010);
        for _ in 0..2_000 {
            let l = AsteroidLaunch::roll(&mut rng, &config);
            assert!((0.0..=800.0).contains(&l.position.x), "x out of bounds: {l:?}");
            assert!((0.0..=600.0).contains(&l.position.y), "y out of bounds: {l:?}");
            assert!((0.5..=1.0).contains(&l.scale), "scale out of range: {l:?}");
            assert!(l.velocity.x.abs() <= 100.0 && l.velocity.y.abs() <= 100.0);
            assert!(l.angvel_deg.abs() <= 100.0);
        }
    }

    #[test]
    fn rolls_are_not_degenerate() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let a = AsteroidLaunch::roll(&mut rng, &config);
        let b = AsteroidLaunch::roll(&mut rng, &config);
        assert_ne!(a, b, "two consecutive rolls should differ");
    }

    #[test]
    fn refill_from_three_spawns_two_in_bounds() {
        let mut app = App::new();
        app.insert_resource(GameConfig::default());
        for i in 0..3 {
            app.world_mut().spawn((
                Asteroid { scale: 1.0 },
                Transform::from_xyz(100.0 * i as f32, 50.0, 0.0),
            ));
        }
        app.add_systems(Update, asteroid_refill_system);
        app.update();

        let mut q = app.world_mut().query::<(&Asteroid, &Transform)>();
        let all: Vec<_> = q.iter(app.world()).collect();
        assert_eq!(all.len(), 5, "3 existing + 2 refilled");
        for (_, t) in all {
            assert!((0.0..=800.0).contains(&t.translation.x));
            assert!((0.0..=600.0).contains(&t.translation.y));
        }
    }

    #[test]
    fn refill_is_a_no_op_at_target() {
        let mut app = App::new();
        app.insert_resource(GameConfig::default());
        for _ in 0..5 {
            app.world_mut().spawn(Asteroid { scale: 0.5 });
        }
        app.add_systems(Update, asteroid_refill_system);
        app.update();

        let mut q = app.world_mut().query::<&Asteroid>();
        assert_eq!(q.iter(app.world()).count(), 5);
    }
}
