//! Core types and definitions for the BURIED simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, tuning, and the renderer
//! capability. It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod render;
pub mod state;
pub mod tuning;
pub mod types;

#[cfg(test)]
mod tests;
