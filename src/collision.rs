//! Contact resolution for the two gameplay collision rules.
//!
//! Both systems read Rapier's `CollisionEvent::Started` messages; `Stopped`
//! is ignored.  Each reader keeps its own cursor, so the two rules see every
//! contact independently.
//!
//! | Contact | Effect |
//! |---|---|
//! | bullet ↔ asteroid | asteroid despawned, bullet returned to the pool, score += `score_per_asteroid` |
//! | player ↔ asteroid | physics paused, ship tinted red, "GAME OVER" shown, `GameState::GameOver` requested |

use crate::asteroid::Asteroid;
use crate::config::GameConfig;
use crate::hud::GameOverText;
use crate::player::{retire_bullet, Bullet, BulletPool, Player, ShipTint};
use crate::state::{GameState, Score};
use crate::world::pause_physics;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::HashSet;

/// Order a started contact as `(a, b)` where `a` matches `is_a`, if either does.
fn classify(e1: Entity, e2: Entity, is_a: impl Fn(Entity) -> bool) -> Option<(Entity, Entity)> {
    if is_a(e1) {
        Some((e1, e2))
    } else if is_a(e2) {
        Some((e2, e1))
    } else {
        None
    }
}

// ── Bullet ↔ Asteroid ─────────────────────────────────────────────────────────

/// Destroy asteroids hit by in-flight bullets and credit the score.
///
/// A contact only counts when the bullet's pool slot is still live: a bullet
/// that was already retired (by expiry or an earlier contact this frame)
/// cannot score.  Each asteroid is destroyed at most once per frame.
pub fn bullet_asteroid_contact_system(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    q_bullets: Query<&Bullet>,
    q_asteroids: Query<(), With<Asteroid>>,
    mut pool: ResMut<BulletPool>,
    mut score: ResMut<Score>,
    config: Res<GameConfig>,
) {
    let mut processed_asteroids: HashSet<Entity> = HashSet::new();

    for event in collision_events.read() {
        let &CollisionEvent::Started(e1, e2, _) = event else {
            continue;
        };
        let Some((bullet_entity, asteroid_entity)) = classify(e1, e2, |e| q_bullets.contains(e))
        else {
            continue;
        };
        if !q_asteroids.contains(asteroid_entity) || processed_asteroids.contains(&asteroid_entity)
        {
            continue;
        }
        let Ok(bullet) = q_bullets.get(bullet_entity) else {
            continue;
        };
        let Some(handle) = pool.live_handle(bullet.slot) else {
            continue;
        };

        retire_bullet(&mut commands, &mut pool, handle);
        processed_asteroids.insert(asteroid_entity);
        commands.entity(asteroid_entity).despawn();
        score.record_kill(config.score_per_asteroid);
        debug!("Asteroid {asteroid_entity} destroyed; score {}", score.points);
    }
}

// ── Player ↔ Asteroid ─────────────────────────────────────────────────────────

/// Latch the game-over state when the ship touches any asteroid.
///
/// Runs before [`bullet_asteroid_contact_system`] so the asteroid still
/// exists even if a bullet hit it in the same frame.  The rest of that
/// frame's gameplay is skipped by [`crate::simulation::gameplay_running`].
pub fn player_asteroid_contact_system(
    mut collision_events: MessageReader<CollisionEvent>,
    mut q_player: Query<(Entity, &mut ShipTint), With<Player>>,
    q_asteroids: Query<(), With<Asteroid>>,
    mut q_game_over_text: Query<&mut Visibility, With<GameOverText>>,
    mut rapier_config: Query<&mut RapierConfiguration>,
    mut next_state: ResMut<NextState<GameState>>,
    score: Res<Score>,
) {
    let Ok((player_entity, mut tint)) = q_player.single_mut() else {
        collision_events.clear();
        return;
    };

    let mut hit = false;
    for event in collision_events.read() {
        let &CollisionEvent::Started(e1, e2, _) = event else {
            continue;
        };
        if let Some((_, other)) = classify(e1, e2, |e| e == player_entity) {
            hit |= q_asteroids.contains(other);
        }
    }
    if !hit {
        return;
    }

    pause_physics(&mut rapier_config);
    *tint = ShipTint::WRECKED;
    for mut visibility in q_game_over_text.iter_mut() {
        *visibility = Visibility::Visible;
    }
    next_state.set(GameState::GameOver);
    info!("Ship hit an asteroid: GAME OVER (final score {})", score.points);
}
