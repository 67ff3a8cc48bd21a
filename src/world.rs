//! World bounds and physics-pipeline control.
//!
//! Collision groups:
//!
//! | Group     | Members    | Collides with               |
//! |-----------|------------|-----------------------------|
//! | `GROUP_1` | asteroids  | player, bullets, walls      |
//! | `GROUP_2` | player     | asteroids, walls            |
//! | `GROUP_3` | bullets    | asteroids (sensor only)     |
//! | `GROUP_4` | walls      | asteroids, player           |
//!
//! Asteroids do not collide with each other, and bullets ignore the walls
//! and simply fly off screen until their lifetime ends.

use crate::config::GameConfig;
use bevy::prelude::*;
use bevy_rapier2d::geometry::Group;
use bevy_rapier2d::prelude::*;

pub const ASTEROID_GROUP: Group = Group::GROUP_1;
pub const PLAYER_GROUP: Group = Group::GROUP_2;
pub const BULLET_GROUP: Group = Group::GROUP_3;
pub const WALL_GROUP: Group = Group::GROUP_4;

pub fn asteroid_collision_groups() -> CollisionGroups {
    CollisionGroups::new(ASTEROID_GROUP, PLAYER_GROUP | BULLET_GROUP | WALL_GROUP)
}

pub fn player_collision_groups() -> CollisionGroups {
    CollisionGroups::new(PLAYER_GROUP, ASTEROID_GROUP | WALL_GROUP)
}

pub fn bullet_collision_groups() -> CollisionGroups {
    CollisionGroups::new(BULLET_GROUP, ASTEROID_GROUP)
}

/// Marker for the four static boundary walls.
#[derive(Component)]
pub struct WorldWall;

/// Spawn four fixed cuboid walls hugging the outside of `[0,W]×[0,H]`.
///
/// Walls are perfectly elastic so asteroids (restitution 1, `Max` combine
/// rule) bounce off without losing speed.
pub fn spawn_world_bounds(mut commands: Commands, config: Res<GameConfig>) {
    let w = config.world_width;
    let h = config.world_height;
    let t = config.wall_thickness;

    // (centre, half extents)
    let walls = [
        (Vec2::new(w * 0.5, -t * 0.5), Vec2::new(w * 0.5 + t, t * 0.5)),
        (Vec2::new(w * 0.5, h + t * 0.5), Vec2::new(w * 0.5 + t, t * 0.5)),
        (Vec2::new(-t * 0.5, h * 0.5), Vec2::new(t * 0.5, h * 0.5 + t)),
        (Vec2::new(w + t * 0.5, h * 0.5), Vec2::new(t * 0.5, h * 0.5 + t)),
    ];

    for (centre, half) in walls {
        commands.spawn((
            WorldWall,
            RigidBody::Fixed,
            Collider::cuboid(half.x, half.y),
            Restitution::coefficient(1.0),
            Friction::coefficient(0.0),
            CollisionGroups::new(WALL_GROUP, ASTEROID_GROUP | PLAYER_GROUP),
            Transform::from_translation(centre.extend(0.0)),
        ));
    }

    debug!("World bounds spawned: {w}×{h}");
}

/// Configure Rapier physics: no gravity in space.
pub fn setup_physics_config(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}

/// Halt the physics pipeline for every Rapier context.
///
/// Bodies keep their last `Velocity` but stop integrating.
pub fn pause_physics(config: &mut Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.physics_pipeline_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullets_and_player_never_collide() {
        let bullet = bullet_collision_groups();
        let player = player_collision_groups();
        assert!(!bullet.filters.contains(PLAYER_GROUP));
        assert!(!player.filters.contains(BULLET_GROUP));
    }

    #[test]
    fn asteroids_ignore_each_other_but_hit_walls() {
        let asteroid = asteroid_collision_groups();
        assert!(!asteroid.filters.contains(ASTEROID_GROUP));
        assert!(asteroid.filters.contains(WALL_GROUP));
    }
}
