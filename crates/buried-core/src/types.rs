//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_FRAME_DT;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frames simulated so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds (sum of clamped frame deltas).
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Clamp a raw frame delta into `[0, max_dt]`.
///
/// Negative, NaN and infinite deltas collapse to zero so a broken clock can
/// never feed garbage into integration.
pub fn clamp_frame_dt(raw_dt: f64, max_dt: f64) -> f64 {
    if !raw_dt.is_finite() || raw_dt <= 0.0 {
        return 0.0;
    }
    raw_dt.min(max_dt)
}

/// Turns absolute timestamps into clamped per-frame deltas.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last_secs: Option<f64>,
    max_dt: f64,
}

impl FrameClock {
    pub fn new(max_dt: f64) -> Self {
        Self {
            last_secs: None,
            max_dt,
        }
    }

    /// Feed the current timestamp and get the clamped delta since the last call.
    /// The first call returns 0.
    pub fn tick(&mut self, now_secs: f64) -> f64 {
        let dt = match self.last_secs {
            Some(last) => clamp_frame_dt(now_secs - last, self.max_dt),
            None => 0.0,
        };
        self.last_secs = Some(now_secs);
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

/// Placement of a visual proxy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec3,
    /// Rotation about the vertical axis.
    pub yaw: f64,
    /// Sideways lean about the forward axis.
    pub roll: f64,
    /// Uniform scale.
    pub scale: f64,
}

impl Transform {
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            roll: 0.0,
            scale: 1.0,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(DVec3::ZERO)
    }
}

/// Result of applying damage to a [`Health`] pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Target already dead or the amount was not a usable number.
    Ignored,
    /// Damage applied, target still alive.
    Wounded,
    /// This hit took the target to zero.
    Killed,
}

impl DamageOutcome {
    pub fn applied(self) -> bool {
        !matches!(self, DamageOutcome::Ignored)
    }
}

/// Health pool shared by everything that can die.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

impl Health {
    pub fn full(max: f64) -> Self {
        Self { current: max, max }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Subtract `amount`, clamping at zero. Dead pools ignore further damage,
    /// so `Killed` is reported at most once per life.
    pub fn apply_damage(&mut self, amount: f64) -> DamageOutcome {
        if self.is_dead() || !amount.is_finite() || amount < 0.0 {
            return DamageOutcome::Ignored;
        }
        self.current = (self.current - amount).max(0.0);
        if self.current <= 0.0 {
            self.current = 0.0;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded
        }
    }

    /// Heal up to `max`. No effect on a dead pool.
    pub fn heal(&mut self, amount: f64) {
        if self.is_dead() || !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.current = (self.current + amount).min(self.max);
    }
}

/// Unit look vector for a yaw/pitch pair (yaw applied after pitch).
/// Yaw 0 and pitch 0 look down -Z.
pub fn view_forward(yaw: f64, pitch: f64) -> DVec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    DVec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
}

/// Horizontal forward basis vector for movement. Ignores pitch.
pub fn flat_forward(yaw: f64) -> DVec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    DVec3::new(-sin_yaw, 0.0, -cos_yaw)
}

/// Horizontal right basis vector for movement.
pub fn flat_right(yaw: f64) -> DVec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    DVec3::new(cos_yaw, 0.0, -sin_yaw)
}

/// Yaw that makes a proxy at `from` face `to` on the horizontal plane.
pub fn yaw_towards(from: DVec3, to: DVec3) -> f64 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    if dx == 0.0 && dz == 0.0 {
        return 0.0;
    }
    (-dx).atan2(-dz)
}
