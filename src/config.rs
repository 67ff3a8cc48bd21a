//! Runtime gameplay configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  Before the app is built, `main` calls
//! [`GameConfig::load_or_default`], which reads the TOML file and overwrites
//! the defaults with any values present.  Missing keys fall back to the
//! compile-time defaults, so a minimal TOML can override just the values you
//! care about.
//!
//! The file is read before the `App` exists because the window size is taken
//! from the world dimensions.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{GameError, GameResult};
use bevy::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime-tunable gameplay configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World Bounds ─────────────────────────────────────────────────────────
    pub world_width: f32,
    pub world_height: f32,
    pub wall_thickness: f32,

    // ── Player ────────────────────────────────────────────────────────────────
    pub player_speed: f32,
    pub player_collider_radius: f32,

    // ── Weapon ────────────────────────────────────────────────────────────────
    pub bullet_speed: f32,
    pub bullet_lifetime_ms: u64,
    pub bullet_pool_capacity: usize,
    pub bullet_collider_radius: f32,

    // ── Asteroids ─────────────────────────────────────────────────────────────
    pub asteroid_target_population: usize,
    pub asteroid_base_radius: f32,
    pub asteroid_scale_min: f32,
    pub asteroid_scale_max: f32,
    pub asteroid_velocity_range: f32,
    pub asteroid_angvel_range_deg: f32,

    // ── Scoring ───────────────────────────────────────────────────────────────
    pub score_per_asteroid: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            wall_thickness: WALL_THICKNESS,
            player_speed: PLAYER_SPEED,
            player_collider_radius: PLAYER_COLLIDER_RADIUS,
            bullet_speed: BULLET_SPEED,
            bullet_lifetime_ms: BULLET_LIFETIME_MS,
            bullet_pool_capacity: BULLET_POOL_CAPACITY,
            bullet_collider_radius: BULLET_COLLIDER_RADIUS,
            asteroid_target_population: ASTEROID_TARGET_POPULATION,
            asteroid_base_radius: ASTEROID_BASE_RADIUS,
            asteroid_scale_min: ASTEROID_SCALE_MIN,
            asteroid_scale_max: ASTEROID_SCALE_MAX,
            asteroid_velocity_range: ASTEROID_VELOCITY_RANGE,
            asteroid_angvel_range_deg: ASTEROID_ANGVEL_RANGE_DEG,
            score_per_asteroid: SCORE_PER_ASTEROID,
        }
    }
}

impl GameConfig {
    /// Centre of the world rectangle; the player spawns here and the camera
    /// looks at it.
    pub fn world_center(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height) * 0.5
    }

    pub fn bullet_lifetime(&self) -> Duration {
        Duration::from_millis(self.bullet_lifetime_ms)
    }

    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(contents: &str, path: &Path) -> GameResult<Self> {
        let config: Self = toml::from_str(contents).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate the config at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> GameResult<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents, path).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(GameError::ConfigRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load the config named by `SHOOTER_CONFIG` (or `assets/game.toml`),
    /// falling back to compiled defaults on any problem.
    ///
    /// Errors are printed to stderr but never abort the game.
    pub fn load_or_default() -> Self {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        match Self::load(&path) {
            Ok(Some(config)) => {
                println!("✓ Loaded game config from {}", path.display());
                config
            }
            Ok(None) => {
                println!("ℹ No {} found; using compiled defaults", path.display());
                Self::default()
            }
            Err(e) => {
                eprintln!("⚠ {e}; using defaults");
                Self::default()
            }
        }
    }

    /// Reject values that would make the scene degenerate.
    pub fn validate(&self) -> GameResult<()> {
        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        positive("wall_thickness", self.wall_thickness)?;
        positive("player_speed", self.player_speed)?;
        positive("player_collider_radius", self.player_collider_radius)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("bullet_collider_radius", self.bullet_collider_radius)?;
        positive("asteroid_base_radius", self.asteroid_base_radius)?;

        if self.bullet_lifetime_ms == 0 {
            return Err(GameError::invalid("bullet_lifetime_ms", 0, "> 0"));
        }
        if self.bullet_pool_capacity == 0 {
            return Err(GameError::invalid("bullet_pool_capacity", 0, "> 0"));
        }
        if self.asteroid_target_population == 0 {
            return Err(GameError::invalid("asteroid_target_population", 0, "> 0"));
        }
        positive("asteroid_scale_max", self.asteroid_scale_max)?;
        if !(self.asteroid_scale_min > 0.0 && self.asteroid_scale_min <= self.asteroid_scale_max)
        {
            return Err(GameError::invalid(
                "asteroid_scale_min",
                self.asteroid_scale_min,
                "0 < min <= asteroid_scale_max",
            ));
        }
        non_negative("asteroid_velocity_range", self.asteroid_velocity_range)?;
        non_negative("asteroid_angvel_range_deg", self.asteroid_angvel_range_deg)?;
        Ok(())
    }
}

// Random ranges are drawn with `gen_range`, which panics on non-finite bounds.
fn positive(field: &'static str, value: f32) -> GameResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(GameError::invalid(field, value, "finite and > 0"));
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> GameResult<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(GameError::invalid(field, value, "finite and >= 0"));
    }
    Ok(())
}
