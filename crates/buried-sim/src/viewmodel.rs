//! Cosmetic first-person weapon pose.

use glam::DVec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use buried_core::state::ViewmodelPose;

const HIP_OFFSET: DVec3 = DVec3::new(0.3, -0.25, -0.5);
const ADS_OFFSET: DVec3 = DVec3::new(0.0, -0.15, -0.4);
const OFFSET_LERP_SPEED: f64 = 12.0;

const BOB_RATE_WALK: f64 = 10.0;
const BOB_RATE_SPRINT: f64 = 14.0;
const BOB_AMPLITUDE_WALK: (f64, f64) = (0.012, 0.01);
const BOB_AMPLITUDE_SPRINT: (f64, f64) = (0.025, 0.02);

const RECOIL_KICK: f64 = 0.04;
const RECOIL_RECOVERY: f64 = 0.4;
const RECOIL_PITCH_FACTOR: f64 = 1.5;
/// Per tick.
const PITCH_SETTLE: f64 = 0.9;

const RELOAD_TILT_RATE: f64 = 5.0;
const RELOAD_TILT_AMPLITUDE: f64 = 0.3;
const RELOAD_TILT_BASE: f64 = -0.4;
const RELOAD_DROP: f64 = 0.12;

const MUZZLE_FADE_RATE: f64 = 25.0;

/// What the viewmodel reacts to each frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewmodelInput {
    pub moving: bool,
    pub sprinting: bool,
    pub aiming: bool,
    pub reloading: bool,
}

#[derive(Debug, Clone)]
pub struct Viewmodel {
    /// Lerped base offset between hip and ADS.
    base: DVec3,
    bob_phase: f64,
    recoil: f64,
    pose: ViewmodelPose,
}

impl Default for Viewmodel {
    fn default() -> Self {
        Self {
            base: HIP_OFFSET,
            bob_phase: 0.0,
            recoil: 0.0,
            pose: ViewmodelPose {
                offset: HIP_OFFSET,
                pitch: 0.0,
                muzzle_flash_opacity: 0.0,
                muzzle_flash_scale: 1.0,
            },
        }
    }
}

impl Viewmodel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pose(&self) -> ViewmodelPose {
        self.pose
    }

    /// Recoil kick and muzzle flash for one shot.
    pub fn kick(&mut self, rng: &mut ChaCha8Rng) {
        self.recoil = RECOIL_KICK;
        self.pose.muzzle_flash_opacity = 1.0;
        self.pose.muzzle_flash_scale = rng.gen_range(0.8..1.2);
    }

    pub fn tick(&mut self, dt: f64, input: ViewmodelInput, now_secs: f64) {
        let target = if input.aiming { ADS_OFFSET } else { HIP_OFFSET };
        self.base = self.base.lerp(target, (OFFSET_LERP_SPEED * dt).min(1.0));

        let mut offset = self.base;
        if input.moving && !input.aiming {
            let (rate, (amp_x, amp_y)) = if input.sprinting {
                (BOB_RATE_SPRINT, BOB_AMPLITUDE_SPRINT)
            } else {
                (BOB_RATE_WALK, BOB_AMPLITUDE_WALK)
            };
            self.bob_phase += dt * rate;
            offset.x += self.bob_phase.sin() * amp_x;
            offset.y += self.bob_phase.cos().abs() * amp_y;
        } else {
            self.bob_phase = 0.0;
        }

        let mut pitch = self.pose.pitch;
        if self.recoil > 0.0 {
            self.recoil -= dt * RECOIL_RECOVERY;
            offset.z += self.recoil;
            pitch = -self.recoil * RECOIL_PITCH_FACTOR;
        } else {
            pitch *= PITCH_SETTLE;
        }

        if input.reloading {
            pitch = (now_secs * RELOAD_TILT_RATE).sin() * RELOAD_TILT_AMPLITUDE + RELOAD_TILT_BASE;
            offset.y = self.base.y - RELOAD_DROP;
        }

        if self.pose.muzzle_flash_opacity > 0.0 {
            self.pose.muzzle_flash_opacity =
                (self.pose.muzzle_flash_opacity - dt * MUZZLE_FADE_RATE).max(0.0);
        }

        self.pose.offset = offset;
        self.pose.pitch = pitch;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_ads_offset_converges() {
        let mut vm = Viewmodel::new();
        let input = ViewmodelInput {
            aiming: true,
            ..Default::default()
        };
        for i in 0..30 {
            vm.tick(0.1, input, i as f64 * 0.1);
        }
        assert!((vm.pose().offset - ADS_OFFSET).length() < 1e-9);
    }

    #[test]
    fn test_kick_then_settle() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut vm = Viewmodel::new();
        vm.kick(&mut rng);
        let scale = vm.pose().muzzle_flash_scale;
        assert!((0.8..1.2).contains(&scale));

        vm.tick(0.0625, ViewmodelInput::default(), 0.0);
        assert!(vm.pose().pitch < 0.0, "recoil pitches the weapon");
        assert_eq!(vm.pose().muzzle_flash_opacity, 0.0);

        for i in 0..200 {
            vm.tick(0.0625, ViewmodelInput::default(), i as f64);
        }
        assert!(vm.pose().pitch.abs() < 1e-6);
    }

    #[test]
    fn test_reload_tilt_and_drop() {
        let mut vm = Viewmodel::new();
        let input = ViewmodelInput {
            reloading: true,
            ..Default::default()
        };
        vm.tick(0.0, input, 0.0);
        assert!((vm.pose().pitch - RELOAD_TILT_BASE).abs() < 1e-12);
        assert!((vm.pose().offset.y - (HIP_OFFSET.y - RELOAD_DROP)).abs() < 1e-12);
    }

    #[test]
    fn test_bob_only_while_moving_from_hip() {
        let mut vm = Viewmodel::new();
        let walking = ViewmodelInput {
            moving: true,
            ..Default::default()
        };
        vm.tick(0.1, walking, 0.1);
        assert_ne!(vm.pose().offset, HIP_OFFSET);

        vm.tick(0.1, ViewmodelInput::default(), 0.2);
        assert_eq!(vm.pose().offset, HIP_OFFSET);
    }
}
