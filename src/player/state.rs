//! Player components and resources.
//!
//! All ECS components and Bevy resources that describe player state live here.
//! Systems that mutate this state are in the sibling modules:
//! - [`super::control`]: input + movement
//! - [`super::combat`]: bullet firing + expiry

use crate::arena::{SlotArena, SlotHandle};
use bevy::prelude::*;
use std::time::Duration;

// ── Components ─────────────────────────────────────────────────────────────────

/// Marker component for the player ship entity.
#[derive(Component)]
pub struct Player;

/// Colour multiplier applied to the ship's fill.  White means untinted.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ShipTint(pub Color);

impl Default for ShipTint {
    fn default() -> Self {
        Self(Color::WHITE)
    }
}

impl ShipTint {
    /// Tint applied when the ship is hit.
    pub const WRECKED: Self = Self(Color::srgb(1.0, 0.0, 0.0));
}

/// A pooled bullet entity.  `slot` is its fixed index in [`BulletPool`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bullet {
    pub slot: usize,
}

// ── Input Abstraction ──────────────────────────────────────────────────────────

/// Logical directions held this frame, derived from all key bindings.
///
/// [`super::control::keyboard_to_intent_system`] writes it;
/// [`super::control::apply_move_intent_system`] turns it into velocity.  Tests
/// can populate this directly to drive the ship without a keyboard.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

// ── Bullet pool ────────────────────────────────────────────────────────────────

/// Generation-stamped reference to one firing of one pooled bullet.
pub type BulletHandle = SlotHandle;

/// Fixed-capacity pool of pre-spawned bullet entities.
///
/// Created by [`super::combat::spawn_bullet_pool`] at startup.  The pool is
/// the single source of truth for whether a bullet is in flight; the entity's
/// visibility and physics markers follow it.
#[derive(Resource, Debug, Clone)]
pub struct BulletPool {
    slots: SlotArena<Entity>,
}

impl BulletPool {
    /// Wrap already-spawned bullet entities; slot `i` holds `entities[i]`.
    pub fn new(entities: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            slots: SlotArena::with_values(entities),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Bullets currently in flight.
    #[inline]
    pub fn active(&self) -> usize {
        self.slots.occupied()
    }

    /// Take a free bullet, if any.
    pub fn acquire(&mut self) -> Option<(BulletHandle, Entity)> {
        self.slots.acquire().map(|(handle, &entity)| (handle, entity))
    }

    /// Return a bullet to the pool.
    ///
    /// `None` if the handle is stale (already released, or the slot has been
    /// re-fired since); the caller must then leave the entity alone.
    pub fn release(&mut self, handle: BulletHandle) -> Option<Entity> {
        self.slots.release(handle).copied()
    }

    /// Handle of the in-flight bullet occupying `slot`.
    #[inline]
    pub fn live_handle(&self, slot: usize) -> Option<BulletHandle> {
        self.slots.live_handle(slot)
    }

    #[inline]
    pub fn is_live(&self, handle: BulletHandle) -> bool {
        self.slots.is_live(handle)
    }
}

// ── Deferred deactivation ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct PendingExpiry {
    handle: BulletHandle,
    remaining: Duration,
}

/// One-shot deactivations scheduled at fire time.
///
/// Entries cannot be cancelled.  When one comes due its handle is handed
/// back to the caller, which releases it through [`BulletPool::release`]; a
/// bullet that already left the pool by contact makes that release a no-op.
#[derive(Resource, Debug, Default)]
pub struct BulletExpirySchedule {
    pending: Vec<PendingExpiry>,
}

impl BulletExpirySchedule {
    pub fn schedule(&mut self, handle: BulletHandle, after: Duration) {
        self.pending.push(PendingExpiry {
            handle,
            remaining: after,
        });
    }

    /// Advance every timer by `delta` and drain the ones that came due, in
    /// scheduling order.
    pub fn tick(&mut self, delta: Duration) -> Vec<BulletHandle> {
        let mut due = Vec::new();
        self.pending.retain_mut(|p| {
            p.remaining = p.remaining.saturating_sub(delta);
            if p.remaining.is_zero() {
                due.push(p.handle);
                false
            } else {
                true
            }
        });
        due
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: usize) -> BulletPool {
        let mut world = World::new();
        BulletPool::new((0..n).map(|_| world.spawn_empty().id()).collect::<Vec<_>>())
    }

    #[test]
    fn pool_refuses_to_exceed_capacity() {
        let mut pool = pool(10);
        for _ in 0..10 {
            assert!(pool.acquire().is_some());
        }
        assert!(pool.acquire().is_none(), "11th shot must be dropped");
        assert_eq!(pool.active(), 10);
        assert_eq!(pool.capacity(), 10);
    }

    #[test]
    fn release_returns_entity_once() {
        let mut pool = pool(2);
        let (handle, entity) = pool.acquire().unwrap();
        assert_eq!(pool.release(handle), Some(entity));
        assert_eq!(pool.release(handle), None);
        assert_eq!(pool.active(), 0);
    }

    #[test]
    fn expiry_fires_exactly_at_lifetime() {
        let mut pool = pool(1);
        let (handle, _) = pool.acquire().unwrap();
        let mut schedule = BulletExpirySchedule::default();
        schedule.schedule(handle, Duration::from_millis(2000));

        assert!(schedule.tick(Duration::from_millis(1000)).is_empty());
        assert!(schedule.tick(Duration::from_millis(999)).is_empty());
        assert_eq!(schedule.tick(Duration::from_millis(1)), vec![handle]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn expiry_after_contact_release_does_not_touch_refired_bullet() {
        let mut pool = pool(1);
        let mut schedule = BulletExpirySchedule::default();

        let (first, _) = pool.acquire().unwrap();
        schedule.schedule(first, Duration::from_millis(2000));

        // Contact at t=500ms frees the slot; it is re-fired at t=600ms.
        schedule.tick(Duration::from_millis(500));
        assert!(pool.release(first).is_some());
        schedule.tick(Duration::from_millis(100));
        let (second, _) = pool.acquire().unwrap();
        schedule.schedule(second, Duration::from_millis(2000));

        // t=2000ms: the first timer comes due but its handle is stale.
        let due = schedule.tick(Duration::from_millis(1400));
        assert_eq!(due, vec![first]);
        assert!(pool.release(first).is_none());
        assert!(pool.is_live(second), "re-fired bullet must stay in flight");

        // t=2600ms: the second timer retires the re-fired bullet.
        let due = schedule.tick(Duration::from_millis(600));
        assert_eq!(due, vec![second]);
        assert!(pool.release(second).is_some());
        assert_eq!(pool.active(), 0);
    }

    #[test]
    fn ship_tint_defaults_to_white() {
        assert_eq!(ShipTint::default().0, Color::WHITE);
        assert_ne!(ShipTint::WRECKED, ShipTint::default());
    }
}
