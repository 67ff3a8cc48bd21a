//! Player input and movement systems.
//!
//! ## Pipeline (runs in order every playing `Update` frame)
//!
//! 1. [`keyboard_to_intent_system`]: rebuilds `MoveIntent` from arrow keys and WASD.
//! 2. [`apply_move_intent_system`]: converts `MoveIntent` into the ship's `Velocity`.
//!
//! The **input abstraction layer** (`MoveIntent`) makes movement testable:
//! tests populate the resource directly and run only the apply step.

use super::state::{MoveIntent, Player};
use crate::config::GameConfig;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Both physical bindings for each logical direction.
const LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const UP_KEYS: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
const DOWN_KEYS: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];

// ── Step 1: Keyboard → Intent ─────────────────────────────────────────────────

/// Translate held keys into [`MoveIntent`].
///
/// A direction is held when either of its two bindings is pressed, so WASD
/// and the arrow keys produce identical movement.
pub fn keyboard_to_intent_system(keys: Res<ButtonInput<KeyCode>>, mut intent: ResMut<MoveIntent>) {
    *intent = MoveIntent {
        left: keys.any_pressed(LEFT_KEYS),
        right: keys.any_pressed(RIGHT_KEYS),
        up: keys.any_pressed(UP_KEYS),
        down: keys.any_pressed(DOWN_KEYS),
    };
}

// ── Step 2: Intent → velocity ─────────────────────────────────────────────────

/// Constant-speed velocity for the held directions.
///
/// Each axis is resolved independently.  Opposite directions do not cancel:
/// left is checked before right and up before down, and the first held one
/// wins.  World +y is up.
pub fn velocity_from_intent(intent: MoveIntent, speed: f32) -> Vec2 {
    let x = if intent.left {
        -speed
    } else if intent.right {
        speed
    } else {
        0.0
    };
    let y = if intent.up {
        speed
    } else if intent.down {
        -speed
    } else {
        0.0
    };
    Vec2::new(x, y)
}

/// Overwrite the ship's linear velocity from [`MoveIntent`].
pub fn apply_move_intent_system(
    mut q: Query<&mut Velocity, With<Player>>,
    intent: Res<MoveIntent>,
    config: Res<GameConfig>,
) {
    let Ok(mut velocity) = q.single_mut() else {
        return;
    };
    velocity.linvel = velocity_from_intent(*intent, config.player_speed);
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: f32 = 160.0;

    fn intent(left: bool, right: bool, up: bool, down: bool) -> MoveIntent {
        MoveIntent {
            left,
            right,
            up,
            down,
        }
    }

    // ── velocity_from_intent ──────────────────────────────────────────────────

    #[test]
    fn no_input_means_standing_still() {
        assert_eq!(velocity_from_intent(MoveIntent::default(), SPEED), Vec2::ZERO);
    }

    #[test]
    fn single_directions_map_to_signed_speed() {
        assert_eq!(velocity_from_intent(intent(true, false, false, false), SPEED).x, -SPEED);
        assert_eq!(velocity_from_intent(intent(false, true, false, false), SPEED).x, SPEED);
        assert_eq!(velocity_from_intent(intent(false, false, true, false), SPEED).y, SPEED);
        assert_eq!(velocity_from_intent(intent(false, false, false, true), SPEED).y, -SPEED);
    }

    #[test]
    fn opposite_keys_resolve_to_first_checked_direction() {
        let v = velocity_from_intent(intent(true, true, true, true), SPEED);
        assert_eq!(v, Vec2::new(-SPEED, SPEED), "left and up take precedence");
    }

    #[test]
    fn diagonal_is_not_normalised() {
        let v = velocity_from_intent(intent(false, true, false, true), SPEED);
        assert_eq!(v, Vec2::new(SPEED, -SPEED));
    }

    #[test]
    fn every_combination_stays_on_the_speed_lattice() {
        for bits in 0u8..16 {
            let i = intent(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0);
            let v = velocity_from_intent(i, SPEED);
            for c in [v.x, v.y] {
                assert!(
                    c == -SPEED || c == 0.0 || c == SPEED,
                    "component {c} not in {{-{SPEED}, 0, {SPEED}}} for {i:?}"
                );
            }
        }
    }

    // ── systems ───────────────────────────────────────────────────────────────

    /// Minimal app with only the resources the control systems need.
    fn build_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<MoveIntent>();
        app.insert_resource(GameConfig::default());
        app.add_systems(
            Update,
            (keyboard_to_intent_system, apply_move_intent_system).chain(),
        );
        app.world_mut().spawn((Player, Velocity::zero()));
        app
    }

    fn player_velocity(app: &mut App) -> Vec2 {
        let mut q = app.world_mut().query_filtered::<&Velocity, With<Player>>();
        q.single(app.world()).unwrap().linvel
    }

    #[test]
    fn wasd_and_arrows_drive_the_same_speed() {
        let mut app = build_test_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyA);
        app.update();
        assert_eq!(player_velocity(&mut app), Vec2::new(-SPEED, 0.0));

        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release(KeyCode::KeyA);
        keys.press(KeyCode::ArrowLeft);
        app.update();
        assert_eq!(player_velocity(&mut app), Vec2::new(-SPEED, 0.0));
    }

    #[test]
    fn releasing_all_keys_stops_the_ship() {
        let mut app = build_test_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ArrowUp);
        app.update();
        assert_eq!(player_velocity(&mut app), Vec2::new(0.0, SPEED));

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(KeyCode::ArrowUp);
        app.update();
        assert_eq!(player_velocity(&mut app), Vec2::ZERO);
    }

    #[test]
    fn mixed_bindings_on_opposite_sides_favour_left() {
        let mut app = build_test_app();
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.press(KeyCode::ArrowLeft);
        keys.press(KeyCode::KeyD);
        app.update();
        assert_eq!(player_velocity(&mut app).x, -SPEED);
    }
}
