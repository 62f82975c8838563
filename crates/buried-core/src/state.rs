//! Game state snapshot: the complete visible state handed to the renderer
//! and HUD after each frame.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::SimTime;

/// Complete game state published after each frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Whether input capture (pointer lock) is active.
    pub input_captured: bool,
    pub hud: HudView,
    pub camera: CameraView,
    pub viewmodel: ViewmodelPose,
    /// One entry per roster slot, in slot order.
    pub enemies: Vec<EnemyView>,
    pub grenades: Vec<GrenadeView>,
    pub explosions: Vec<ExplosionView>,
    /// Events raised during this frame.
    pub events: Vec<GameEvent>,
}

/// Plain numbers for the heads-up display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    pub health: f64,
    pub ammo: u32,
    pub reserve_ammo: u32,
    pub grenades: u32,
    pub reloading: bool,
    pub death_screen_visible: bool,
}

impl HudView {
    /// Health as the HUD prints it (rounded up).
    pub fn health_display(&self) -> u32 {
        self.health.max(0.0).ceil() as u32
    }
}

/// First-person camera state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub position: DVec3,
    pub yaw: f64,
    pub pitch: f64,
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
}

/// Cosmetic pose of the first-person weapon model, relative to the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewmodelPose {
    pub offset: DVec3,
    /// Weapon pitch (recoil kick, reload tilt).
    pub pitch: f64,
    pub muzzle_flash_opacity: f64,
    pub muzzle_flash_scale: f64,
}

/// A roster slot for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub slot: usize,
    pub state: EnemyState,
    pub position: DVec3,
    pub health: f64,
    pub yaw: f64,
    pub flashing: bool,
}

/// A live grenade for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrenadeView {
    pub position: DVec3,
    pub fuse_remaining: f64,
}

/// A live explosion for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub position: DVec3,
    pub scale: f64,
    pub opacity: f64,
}
