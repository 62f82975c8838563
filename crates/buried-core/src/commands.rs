//! Player intents sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next frame boundary.

use serde::{Deserialize, Serialize};

use crate::enums::MoveAxis;

/// All possible player intents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Input capture ---
    /// Enter input capture (pointer lock). Ignored while dead.
    CaptureInput,
    /// Leave input capture.
    ReleaseInput,

    // --- Movement ---
    /// Look delta in input pixels.
    Look { dx: f64, dy: f64 },
    /// Set a movement axis. Only the sign of `value` is used.
    Move { axis: MoveAxis, value: f64 },
    /// Hold or release sprint.
    Sprint { held: bool },

    // --- Combat ---
    /// Start aiming down sights.
    AimDown,
    /// Stop aiming down sights.
    AimUp,
    /// Pull the trigger once.
    Fire,
    /// Start a reload.
    Reload,
    /// Throw a grenade.
    Throw,

    // --- Session ---
    /// Restart after death.
    Restart,
}

impl PlayerCommand {
    /// Whether the command is a release that must apply even without input
    /// capture, so keys never get stuck down.
    pub fn is_release(&self) -> bool {
        match self {
            PlayerCommand::Move { value, .. } => *value == 0.0,
            PlayerCommand::Sprint { held } => !held,
            PlayerCommand::AimUp | PlayerCommand::ReleaseInput => true,
            _ => false,
        }
    }
}
