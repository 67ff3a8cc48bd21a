//! Weapon system: pointer input, pooled bullet firing, and lifetime expiry.
//!
//! ## Bullet lifecycle
//!
//! | Step | System | Effect |
//! |---|---|---|
//! | Startup | [`spawn_bullet_pool`] | Pre-spawn `bullet_pool_capacity` hidden, disabled bullets |
//! | Click | [`pointer_fire_input_system`] | Cursor → world, write [`FireRequest`] |
//! | Fire | [`fire_bullet_system`] | Acquire slot, launch, schedule expiry |
//! | Expiry | [`bullet_expiry_system`] | Release due handles (no-op if already released) |
//! | Contact | [`crate::collision::bullet_asteroid_contact_system`] | Release immediately |
//!
//! Released bullets are not despawned: they are hidden and their body and
//! collider are disabled until the slot is acquired again.

use super::state::{Bullet, BulletExpirySchedule, BulletHandle, BulletPool, Player};
use crate::config::GameConfig;
use crate::world::bullet_collision_groups;
use bevy::input::mouse::MouseButton;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::*;

/// A request to fire one bullet from the ship toward `target` (world space).
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct FireRequest {
    pub target: Vec2,
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Angle (radians, CCW from +x) of the ray from `from` to `to`.
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Velocity of magnitude `speed` pointing along `angle`.
#[inline]
pub fn velocity_from_rotation(angle: f32, speed: f32) -> Vec2 {
    Vec2::from_angle(angle) * speed
}

// ── Pool setup ────────────────────────────────────────────────────────────────

/// Pre-spawn every bullet in its parked state and insert the [`BulletPool`].
///
/// Bullets are kinematic sensors: they report contacts with asteroids but
/// never push them.
pub fn spawn_bullet_pool(mut commands: Commands, config: Res<GameConfig>) {
    let entities: Vec<Entity> = (0..config.bullet_pool_capacity)
        .map(|slot| {
            commands
                .spawn((
                    Bullet { slot },
                    RigidBody::KinematicVelocityBased,
                    Collider::ball(config.bullet_collider_radius),
                    Sensor,
                    Ccd::enabled(),
                    bullet_collision_groups(),
                    ActiveCollisionTypes::DYNAMIC_KINEMATIC,
                    ActiveEvents::COLLISION_EVENTS,
                    Velocity::zero(),
                    RigidBodyDisabled,
                    ColliderDisabled,
                    Transform::default(),
                    Visibility::Hidden,
                ))
                .id()
        })
        .collect();

    info!("Bullet pool ready with {} slots", entities.len());
    commands.insert_resource(BulletPool::new(entities));
}

// ── Activation / deactivation ─────────────────────────────────────────────────

fn launch_bullet(commands: &mut Commands, entity: Entity, origin: Vec2, angle: f32, speed: f32) {
    commands
        .entity(entity)
        .remove::<(RigidBodyDisabled, ColliderDisabled)>()
        .insert((
            Transform::from_translation(origin.extend(1.0))
                .with_rotation(Quat::from_rotation_z(angle)),
            Velocity::linear(velocity_from_rotation(angle, speed)),
            Visibility::Visible,
        ));
}

/// Return a bullet to the pool and park its entity.
///
/// Returns `false` (and touches nothing) when `handle` is stale, which makes
/// contact release and timed expiry safe to run in either order.
pub fn retire_bullet(commands: &mut Commands, pool: &mut BulletPool, handle: BulletHandle) -> bool {
    let Some(entity) = pool.release(handle) else {
        return false;
    };
    commands.entity(entity).insert((
        RigidBodyDisabled,
        ColliderDisabled,
        Velocity::zero(),
        Visibility::Hidden,
    ));
    true
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Turn a left-click into a [`FireRequest`] aimed at the cursor.
///
/// Does nothing without a primary window, a cursor inside it, or a camera.
pub fn pointer_fire_input_system(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    q_camera: Query<(&Camera, &GlobalTransform)>,
    mut requests: MessageWriter<FireRequest>,
) {
    if !mouse_buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = q_window.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = q_camera.single() else {
        return;
    };
    let Ok(target) = camera.viewport_to_world_2d(camera_transform, cursor) else {
        return;
    };
    requests.write(FireRequest { target });
}

// ── Firing ────────────────────────────────────────────────────────────────────

/// Consume [`FireRequest`]s: launch a pooled bullet from the ship for each.
///
/// An exhausted pool silently drops the request.  Every launched bullet gets
/// a one-shot expiry `bullet_lifetime_ms` after this frame.
pub fn fire_bullet_system(
    mut commands: Commands,
    mut requests: MessageReader<FireRequest>,
    q_player: Query<&Transform, With<Player>>,
    mut pool: ResMut<BulletPool>,
    mut schedule: ResMut<BulletExpirySchedule>,
    config: Res<GameConfig>,
) {
    let Ok(player) = q_player.single() else {
        requests.clear();
        return;
    };
    let origin = player.translation.truncate();

    for request in requests.read() {
        let Some((handle, entity)) = pool.acquire() else {
            debug!("Bullet pool exhausted; shot at {} dropped", request.target);
            continue;
        };
        let angle = angle_between(origin, request.target);
        launch_bullet(&mut commands, entity, origin, angle, config.bullet_speed);
        schedule.schedule(handle, config.bullet_lifetime());
    }
}

// ── Expiry ────────────────────────────────────────────────────────────────────

/// Advance the expiry schedule and retire bullets whose lifetime elapsed.
///
/// Runs before [`fire_bullet_system`] so a bullet's first tick is the frame
/// after it was fired.
pub fn bullet_expiry_system(
    mut commands: Commands,
    time: Res<Time>,
    mut schedule: ResMut<BulletExpirySchedule>,
    mut pool: ResMut<BulletPool>,
) {
    for handle in schedule.tick(time.delta()) {
        if !retire_bullet(&mut commands, &mut pool, handle) {
            debug!(
                "Expiry for bullet slot {} skipped: already retired",
                handle.index()
            );
        }
    }
}
