//! First-person player controller.

use glam::DVec3;
use log::debug;

use buried_core::enums::MoveAxis;
use buried_core::state::CameraView;
use buried_core::tuning::PlayerTuning;
use buried_core::types::{flat_forward, flat_right, view_forward, DamageOutcome, Health};

/// Player state. Lives outside the ECS world; there is exactly one.
#[derive(Debug, Clone)]
pub struct Player {
    /// Eye position.
    pub position: DVec3,
    pub velocity: DVec3,
    pub yaw: f64,
    /// Clamped to [-pi/2, pi/2].
    pub pitch: f64,
    pub health: Health,
    /// Simulation time of the last damage taken. `None` until first hit.
    pub last_damage_secs: Option<f64>,
    pub move_forward: f64,
    pub move_right: f64,
    pub sprinting: bool,
    pub aiming: bool,
    /// Current vertical field of view in degrees.
    pub fov: f64,
    tuning: PlayerTuning,
    /// Half-extent of the arena on x and z.
    arena_size: f64,
}

impl Player {
    pub fn new(tuning: PlayerTuning, arena_size: f64) -> Self {
        Self {
            position: DVec3::new(0.0, tuning.height, 0.0),
            velocity: DVec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            health: Health::full(tuning.max_health),
            last_damage_secs: None,
            move_forward: 0.0,
            move_right: 0.0,
            sprinting: false,
            aiming: false,
            fov: tuning.default_fov,
            tuning,
            arena_size,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    pub fn is_moving(&self) -> bool {
        self.move_forward != 0.0 || self.move_right != 0.0
    }

    /// Unit look vector.
    pub fn forward(&self) -> DVec3 {
        view_forward(self.yaw, self.pitch)
    }

    /// Rotate the view by a look delta in input pixels.
    pub fn handle_look(&mut self, dx: f64, dy: f64) {
        if self.is_dead() || !dx.is_finite() || !dy.is_finite() {
            return;
        }
        let half_pi = std::f64::consts::FRAC_PI_2;
        self.yaw -= dx * self.tuning.mouse_sensitivity;
        self.pitch = (self.pitch - dy * self.tuning.mouse_sensitivity).clamp(-half_pi, half_pi);
    }

    /// Set a movement axis. Only the sign of `value` matters.
    pub fn set_move_axis(&mut self, axis: MoveAxis, value: f64) {
        let value = if value > 0.0 {
            1.0
        } else if value < 0.0 {
            -1.0
        } else {
            0.0
        };
        match axis {
            MoveAxis::Forward => self.move_forward = value,
            MoveAxis::Right => self.move_right = value,
        }
    }

    pub fn set_sprint(&mut self, held: bool) {
        self.sprinting = held;
    }

    pub fn set_aim(&mut self, aiming: bool) {
        self.aiming = aiming;
    }

    /// Apply damage at simulation time `now_secs`.
    pub fn take_damage(&mut self, amount: f64, now_secs: f64) -> DamageOutcome {
        if amount <= 0.0 {
            return DamageOutcome::Ignored;
        }
        let outcome = self.health.apply_damage(amount);
        if outcome.applied() {
            self.last_damage_secs = Some(now_secs);
            debug!(
                "Player took {amount:.1} damage, health {:.1}",
                self.health.current
            );
        }
        outcome
    }

    /// Advance regen, movement and field of view by `dt`.
    pub fn tick(&mut self, dt: f64, now_secs: f64) {
        if self.is_dead() {
            return;
        }

        let regen_ready = self
            .last_damage_secs
            .map_or(true, |t| now_secs - t > self.tuning.regen_delay);
        if regen_ready && self.health.current < self.health.max {
            self.health.heal(self.tuning.regen_rate * dt);
        }

        let direction =
            flat_forward(self.yaw) * self.move_forward + flat_right(self.yaw) * self.move_right;
        if direction.length_squared() > 0.0 {
            let speed = if self.sprinting {
                self.tuning.sprint_speed
            } else {
                self.tuning.walk_speed
            };
            let direction = direction.normalize_or_zero();
            self.velocity.x = direction.x * speed;
            self.velocity.z = direction.z * speed;
        } else {
            // Per tick, not per second.
            self.velocity.x *= self.tuning.velocity_damping;
            self.velocity.z *= self.tuning.velocity_damping;
        }

        let bound = self.arena_size - self.tuning.radius;
        self.position.x = (self.position.x + self.velocity.x * dt).clamp(-bound, bound);
        self.position.z = (self.position.z + self.velocity.z * dt).clamp(-bound, bound);

        let target_fov = if self.aiming {
            self.tuning.ads_fov
        } else {
            self.tuning.default_fov
        };
        self.fov += (target_fov - self.fov) * (self.tuning.fov_lerp_speed * dt).min(1.0);
    }

    pub fn camera_view(&self) -> CameraView {
        CameraView {
            position: self.position,
            yaw: self.yaw,
            pitch: self.pitch,
            fov_degrees: self.fov,
        }
    }

    /// Back to spawn state. Held movement keys are kept.
    pub fn reset(&mut self) {
        self.position = DVec3::new(0.0, self.tuning.height, 0.0);
        self.velocity = DVec3::ZERO;
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.health = Health::full(self.tuning.max_health);
        self.last_damage_secs = None;
        self.aiming = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buried_core::constants::*;

    fn player() -> Player {
        Player::new(PlayerTuning::default(), ARENA_SIZE)
    }

    #[test]
    fn test_four_hits_kill() {
        let mut p = player();
        for _ in 0..3 {
            assert_eq!(p.take_damage(25.0, 1.0), DamageOutcome::Wounded);
        }
        assert_eq!(p.health.current, 25.0);
        assert_eq!(p.take_damage(25.0, 1.0), DamageOutcome::Killed);
        assert!(p.is_dead());
        assert_eq!(p.take_damage(25.0, 1.0), DamageOutcome::Ignored);
        assert_eq!(p.health.current, 0.0);
    }

    #[test]
    fn test_look_clamps_pitch() {
        let mut p = player();
        p.handle_look(100.0, -10_000.0);
        assert_eq!(p.pitch, std::f64::consts::FRAC_PI_2);
        assert!((p.yaw - (-0.2)).abs() < 1e-12);
        p.handle_look(0.0, 100_000.0);
        assert_eq!(p.pitch, -std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_walk_forward_moves_down_negative_z() {
        let mut p = player();
        p.set_move_axis(MoveAxis::Forward, 1.0);
        p.tick(0.1, 0.1);
        assert!((p.position.z - (-0.5)).abs() < 1e-12);
        assert_eq!(p.position.y, PLAYER_HEIGHT);

        p.set_sprint(true);
        p.tick(0.1, 0.2);
        assert!((p.position.z - (-1.4)).abs() < 1e-12);
    }

    #[test]
    fn test_diagonal_is_normalised() {
        let mut p = player();
        p.set_move_axis(MoveAxis::Forward, 1.0);
        p.set_move_axis(MoveAxis::Right, 5.0);
        p.tick(0.1, 0.1);
        let flat = DVec3::new(p.velocity.x, 0.0, p.velocity.z);
        assert!((flat.length() - WALK_SPEED).abs() < 1e-9);
    }

    #[test]
    fn test_damping_without_input() {
        let mut p = player();
        p.set_move_axis(MoveAxis::Right, 1.0);
        p.tick(0.05, 0.05);
        p.set_move_axis(MoveAxis::Right, 0.0);
        p.tick(0.05, 0.1);
        assert!((p.velocity.x - WALK_SPEED * VELOCITY_DAMPING).abs() < 1e-12);
    }

    #[test]
    fn test_position_clamped_to_arena() {
        let mut p = player();
        p.set_move_axis(MoveAxis::Right, 1.0);
        p.set_sprint(true);
        for i in 0..200 {
            p.tick(0.1, i as f64 * 0.1);
        }
        let bound = ARENA_SIZE - PLAYER_RADIUS;
        assert_eq!(p.position.x, bound);
        assert!(p.position.z.abs() <= bound);
    }

    #[test]
    fn test_regen_waits_for_delay() {
        let mut p = player();
        p.take_damage(50.0, 0.0);
        p.tick(0.1, 4.0);
        assert_eq!(p.health.current, 50.0);
        p.tick(0.5, 5.5);
        assert!((p.health.current - 55.0).abs() < 1e-9);
        for i in 0..100 {
            p.tick(0.1, 6.0 + i as f64 * 0.1);
        }
        assert_eq!(p.health.current, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_fov_lerps_toward_ads() {
        let mut p = player();
        p.set_aim(true);
        p.tick(0.05, 0.05);
        // 75 + (45 - 75) * 0.6
        assert!((p.fov - 57.0).abs() < 1e-9);
        p.tick(0.1, 0.15);
        assert_eq!(p.fov, ADS_FOV);
    }

    #[test]
    fn test_dead_player_ignores_look_and_tick() {
        let mut p = player();
        p.set_move_axis(MoveAxis::Forward, 1.0);
        p.take_damage(1000.0, 0.0);
        p.handle_look(50.0, 50.0);
        p.tick(0.1, 0.1);
        assert_eq!(p.yaw, 0.0);
        assert_eq!(p.position, DVec3::new(0.0, PLAYER_HEIGHT, 0.0));
    }

    #[test]
    fn test_reset_restores_spawn_state() {
        let mut p = player();
        p.set_move_axis(MoveAxis::Forward, 1.0);
        p.tick(0.1, 0.1);
        p.handle_look(10.0, 10.0);
        p.take_damage(1000.0, 0.2);
        p.reset();
        assert!(!p.is_dead());
        assert_eq!(p.velocity, DVec3::ZERO);
        assert_eq!(p.position, DVec3::new(0.0, PLAYER_HEIGHT, 0.0));
        assert_eq!((p.yaw, p.pitch), (0.0, 0.0));
    }
}
