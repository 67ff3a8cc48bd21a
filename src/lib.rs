//! Arcade asteroid shooter
//!
//! A ship in a walled 800×600 field dodges drifting asteroids and shoots them
//! down with a small pool of recycled bullets.  Gameplay lives in
//! [`simulation::SimulationPlugin`] and runs headless; visuals are added by
//! [`rendering::RenderingPlugin`].

pub mod arena;
pub mod asteroid;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod hud;
pub mod player;
pub mod rendering;
pub mod simulation;
pub mod state;
pub mod world;
