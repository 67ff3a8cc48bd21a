//! Top-level game state machine and the score counter.
//!
//! | State      | Description                                         |
//! |------------|-----------------------------------------------------|
//! | `Playing`  | Initial state; all gameplay systems active          |
//! | `GameOver` | Terminal; gameplay gated off, physics paused        |
//!
//! Nothing ever requests `Playing` after startup, so `GameOver` is a latch.

use bevy::prelude::*;

/// Top-level application state machine.
///
/// Every gameplay system in [`crate::simulation::SimulationPlugin`] runs
/// under `.run_if(in_state(GameState::Playing))`.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Playing,
    GameOver,
}

/// The player's score.  Only ever increases, and only while playing.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub points: u32,
}

impl Score {
    /// Credit one asteroid destroyed by a bullet.
    #[inline]
    pub fn record_kill(&mut self, points_per_kill: u32) {
        self.points = self.points.saturating_add(points_per_kill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_starts_at_zero_and_accumulates_per_kill() {
        let mut score = Score::default();
        assert_eq!(score.points, 0);
        for _ in 0..7 {
            score.record_kill(10);
        }
        assert_eq!(score.points, 70);
    }

    #[test]
    fn score_saturates_instead_of_wrapping() {
        let mut score = Score {
            points: u32::MAX - 5,
        };
        score.record_kill(10);
        assert_eq!(score.points, u32::MAX);
    }

    #[test]
    fn initial_state_is_playing() {
        assert_eq!(GameState::default(), GameState::Playing);
    }
}
