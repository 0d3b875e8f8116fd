//! Timeshift Arena - simulation core
//!
//! A third-person arena shooter where the enemies are time-shifted ghosts
//! of the player. The crate exposes:
//! - a fixed-tick [`sim::Simulation`] driven by per-frame [`sim::FrameInput`]
//! - static content tables (arena, weapons, power-ups, blueprints)
//! - serializable snapshots and events for a renderer/HUD host

pub mod config;
pub mod content;
pub mod sim;
pub mod util;

pub use sim::{FrameInput, Phase, Simulation};
