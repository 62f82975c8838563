//! Simulation engine for BURIED.
//!
//! Owns the hecs ECS world, advances the player, weapon, grenades and enemies
//! once per frame, and produces GameStateSnapshots for the renderer and HUD.

pub mod engine;
pub mod frame;
pub mod player;
pub mod spatial;
pub mod systems;
pub mod timers;
pub mod viewmodel;
pub mod weapon;
pub mod world_setup;

pub use buried_core as core;
pub use engine::{SimConfig, SimulationEngine};
