//! Player module: ship entity, movement input, and the weapon.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | ECS components (`Player`, `ShipTint`, `Bullet`) and resources (`MoveIntent`, `BulletPool`, `BulletExpirySchedule`) |
//! | [`control`] | Input systems: arrow keys / WASD → constant-speed velocity |
//! | [`combat`] | Pointer fire input, pooled bullet firing, bullet expiry |
//!
//! All public items are re-exported at this level so that the rest of the crate
//! can use flat `crate::player::*` imports without knowing the sub-module layout.

pub mod combat;
pub mod control;
pub mod state;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use combat::{
    bullet_expiry_system, fire_bullet_system, pointer_fire_input_system, retire_bullet,
    spawn_bullet_pool, FireRequest,
};
pub use control::{apply_move_intent_system, keyboard_to_intent_system, velocity_from_intent};
pub use state::{
    Bullet, BulletExpirySchedule, BulletHandle, BulletPool, MoveIntent, Player, ShipTint,
};

// ── Ship spawn ─────────────────────────────────────────────────────────────────

use crate::config::GameConfig;
use crate::world::player_collision_groups;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Spawn the player's ship at the centre of the world.
///
/// The ship is a dynamic ball with rotation locked; its velocity is written
/// directly every frame by [`apply_move_intent_system`], and the world walls
/// stop it at the edges.  It reports collision events so the resolver can
/// see asteroid contacts.
pub fn spawn_player(mut commands: Commands, config: Res<GameConfig>) {
    let origin = config.world_center();
    commands.spawn((
        Player,
        ShipTint::default(),
        // Physics
        RigidBody::Dynamic,
        Collider::ball(config.player_collider_radius),
        Velocity::zero(),
        LockedAxes::ROTATION_LOCKED,
        Damping {
            linear_damping: 0.0,
            angular_damping: 0.0,
        },
        Restitution::coefficient(0.0),
        Friction::coefficient(0.0),
        player_collision_groups(),
        ActiveEvents::COLLISION_EVENTS,
        // Transform / visibility
        Transform::from_translation(origin.extend(2.0)),
        Visibility::default(),
    ));

    info!("Player ship spawned at {origin}");
}
