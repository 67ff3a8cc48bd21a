//! Centralised gameplay constants.
//!
//! Every tuneable value lives here so it can be found and changed in one
//! place.  [`crate::config::GameConfig`] mirrors these as its defaults, and
//! `assets/game.toml` can override any subset at startup.

// ── World Bounds ──────────────────────────────────────────────────────────────

/// Width of the playfield and of the window (world units == logical pixels).
pub const WORLD_WIDTH: f32 = 800.0;

/// Height of the playfield and of the window.
pub const WORLD_HEIGHT: f32 = 600.0;

/// Thickness of the four static walls that keep bodies inside the world.
pub const WALL_THICKNESS: f32 = 40.0;

// ── Player ────────────────────────────────────────────────────────────────────

/// Constant speed (u/s) applied per axis while a direction is held.
pub const PLAYER_SPEED: f32 = 160.0;

/// Radius of the ship's ball collider.
pub const PLAYER_COLLIDER_RADIUS: f32 = 14.0;

// ── Weapon ────────────────────────────────────────────────────────────────────

/// Bullet muzzle speed (u/s).
pub const BULLET_SPEED: f32 = 500.0;

/// Time from firing until a bullet is forcibly returned to the pool.
pub const BULLET_LIFETIME_MS: u64 = 2000;

/// Number of pre-spawned bullet slots.  Fire requests beyond this are dropped.
pub const BULLET_POOL_CAPACITY: usize = 10;

/// Radius of the bullet sensor collider.
pub const BULLET_COLLIDER_RADIUS: f32 = 4.0;

// ── Asteroids ─────────────────────────────────────────────────────────────────

/// The spawner refills the active set up to this many asteroids.
pub const ASTEROID_TARGET_POPULATION: usize = 5;

/// Collider radius of an asteroid at scale 1.0.
pub const ASTEROID_BASE_RADIUS: f32 = 28.0;

/// Lower bound of the random asteroid scale.
pub const ASTEROID_SCALE_MIN: f32 = 0.5;

/// Upper bound of the random asteroid scale.
pub const ASTEROID_SCALE_MAX: f32 = 1.0;

/// Each velocity component is drawn from `[-range, range]` (u/s).
pub const ASTEROID_VELOCITY_RANGE: f32 = 100.0;

/// Angular velocity is drawn from `[-range, range]` in **degrees** per second.
pub const ASTEROID_ANGVEL_RANGE_DEG: f32 = 100.0;

// ── Scoring / HUD ─────────────────────────────────────────────────────────────

/// Points awarded per asteroid destroyed by a bullet.
pub const SCORE_PER_ASTEROID: u32 = 10;

/// Fixed prefix of the score readout.
pub const SCORE_LABEL: &str = "Score: ";

/// Offset of the score readout from the window's top-left corner.
pub const HUD_MARGIN: f32 = 16.0;

pub const SCORE_FONT_SIZE: f32 = 32.0;

pub const GAME_OVER_FONT_SIZE: f32 = 64.0;

pub const GAME_OVER_TEXT: &str = "GAME OVER";

// ── Config file ───────────────────────────────────────────────────────────────

/// Default location of the optional TOML override file.
pub const DEFAULT_CONFIG_PATH: &str = "assets/game.toml";

/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "SHOOTER_CONFIG";
