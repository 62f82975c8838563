//! Events emitted by the simulation for HUD and effects feedback.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::DamageSource;

/// Something noteworthy that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A round left the barrel.
    ShotFired { ammo: u32 },
    /// An enemy took damage.
    EnemyHit {
        slot: usize,
        amount: f64,
        source: DamageSource,
        point: DVec3,
    },
    /// An enemy died.
    EnemyKilled { slot: usize, source: DamageSource },
    /// A replacement enemy took over a roster slot.
    EnemyRespawned { slot: usize, position: DVec3 },
    /// A grenade left the player's hand.
    GrenadeThrown { remaining: u32 },
    /// A grenade went off.
    GrenadeExploded { position: DVec3 },
    /// The player took damage.
    PlayerDamaged {
        amount: f64,
        source: DamageSource,
        health: f64,
    },
    /// The player died. The HUD should show the death screen.
    PlayerDied,
    ReloadStarted,
    ReloadFinished { ammo: u32, reserve: u32 },
    /// A new session started after death.
    GameRestarted,
}
