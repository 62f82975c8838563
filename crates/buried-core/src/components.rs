//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in the sim crate's systems, not here.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::EnemyState;

/// World-space position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec3);

/// World-space velocity (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec3);

/// A melee enemy occupying a roster slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Roster slot this entity occupies.
    pub slot: usize,
    pub state: EnemyState,
    /// Seconds until the next melee attack is allowed. May go negative.
    pub attack_cooldown: f64,
    /// Facing, radians about the vertical axis.
    pub yaw: f64,
    /// Body lean of the shamble animation.
    pub roll: f64,
    pub left_arm_pitch: f64,
    pub right_arm_pitch: f64,
    /// Red damage flash currently shown.
    pub flashing: bool,
    /// Bumped on every hit. A pending flash revert only applies if its token
    /// still matches.
    pub flash_token: u32,
}

/// A live grenade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grenade {
    /// Seconds until detonation.
    pub fuse_remaining: f64,
    pub exploded: bool,
}

/// A decaying blast effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub age: f64,
    pub lifetime: f64,
    /// Visual radius at the end of the lifetime.
    pub max_scale: f64,
    pub scale: f64,
    pub opacity: f64,
    pub light_intensity: f64,
}

/// Transient impact marker left by a hit-scan hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HitMarker;
