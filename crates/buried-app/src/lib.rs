//! BURIED headless application.
//!
//! Wires the simulation to a real-time game loop thread, the key bindings,
//! a scripted autopilot and a logging HUD.

pub mod autopilot;
pub mod game_loop;
pub mod hud;
pub mod input;
pub mod state;

pub use buried_core as core;
