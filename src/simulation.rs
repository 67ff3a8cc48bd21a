//! Scene driver: the plugin that wires every gameplay system into Bevy.
//!
//! ## Startup
//!
//! World walls, the player ship, the bullet pool, the initial asteroid field
//! and the HUD are spawned once.
//!
//! ## Update (while `GameState::Playing`, in this exact order)
//!
//! 1. `keyboard_to_intent_system` → `apply_move_intent_system`
//! 2. `player_asteroid_contact_system` (may request game over)
//! 3. `bullet_asteroid_contact_system`
//! 4. `asteroid_refill_system` (sees this frame's despawns)
//! 5. `pointer_fire_input_system` → `fire_bullet_system`
//! 6. `hud_score_display_system`
//!
//! Steps 3-6 are skipped in the frame that requested game over, so a ship
//! hit always ends the game even when a bullet hits the same asteroid.
//!
//! `bullet_expiry_system` runs every frame in both states, before contact
//! resolution.  Scheduled deactivations are never cancelled.
//!
//! This plugin needs no window, renderer or physics backend, so the
//! integration tests drive it under `MinimalPlugins` + `StatesPlugin`.
//! Visuals live in [`crate::rendering::RenderingPlugin`].

use crate::asteroid::{asteroid_refill_system, spawn_initial_asteroids};
use crate::collision::{bullet_asteroid_contact_system, player_asteroid_contact_system};
use crate::config::GameConfig;
use crate::hud::{hud_score_display_system, setup_hud};
use crate::player::{
    apply_move_intent_system, bullet_expiry_system, fire_bullet_system,
    keyboard_to_intent_system, pointer_fire_input_system, spawn_bullet_pool, spawn_player,
    BulletExpirySchedule, FireRequest, MoveIntent,
};
use crate::state::{GameState, Score};
use crate::world::{setup_physics_config, spawn_world_bounds};
use bevy::input::mouse::MouseButton;
use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameConfig>()
            .init_resource::<Score>()
            .init_resource::<MoveIntent>()
            .init_resource::<BulletExpirySchedule>()
            // Normally provided by InputPlugin; inserted here so headless
            // apps can press keys directly.
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_message::<FireRequest>()
            .add_message::<CollisionEvent>()
            .add_systems(
                Startup,
                (
                    setup_physics_config,
                    spawn_world_bounds,
                    spawn_player,
                    spawn_bullet_pool,
                    spawn_initial_asteroids,
                    setup_hud,
                ),
            )
            .add_systems(
                Update,
                (
                    (
                        keyboard_to_intent_system,
                        apply_move_intent_system,
                        player_asteroid_contact_system,
                    )
                        .chain()
                        .run_if(in_state(GameState::Playing)),
                    (
                        bullet_asteroid_contact_system,
                        asteroid_refill_system,
                        pointer_fire_input_system,
                        fire_bullet_system,
                        hud_score_display_system,
                    )
                        .chain()
                        .run_if(gameplay_running),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                bullet_expiry_system.before(bullet_asteroid_contact_system),
            );
    }
}

/// Playing, and no game over requested earlier in this frame.
pub fn gameplay_running(state: Res<State<GameState>>, next: Res<NextState<GameState>>) -> bool {
    *state.get() == GameState::Playing
        && !matches!(*next, NextState::Pending(GameState::GameOver))
}
