//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation running, entities update every frame.
    #[default]
    Playing,
    /// Player is dead. Entity updates are frozen until restart; deferred
    /// actions keep draining.
    Dead,
}

/// Movement intent axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveAxis {
    Forward,
    Right,
}

/// Weapon state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponState {
    #[default]
    Idle,
    Reloading,
}

/// Enemy lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    #[default]
    Alive,
    /// Removed from the visible world; occupies its roster slot until replaced.
    Dead,
}

/// What a visual proxy represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProxyKind {
    Enemy,
    Grenade,
    Explosion,
    HitMarker,
}

/// Cause of a damage event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    /// Hit-scan weapon.
    Bullet,
    /// Grenade explosion.
    Blast,
    /// Enemy melee attack.
    Melee,
}
