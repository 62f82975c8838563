//! Systems that operate on the simulation world each frame.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only)
//! plus the engine state they need. Per-entity state lives in components.

pub mod cleanup;
pub mod combat;
pub mod deferred;
pub mod enemy_ai;
pub mod grenades;
pub mod snapshot;
pub mod spawner;
