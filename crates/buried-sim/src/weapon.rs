//! Hit-scan rifle: ammo bookkeeping, fire-rate gating, reload state machine.
//!
//! Hit resolution is not done here; the engine casts the ray when `fire`
//! reports a discharge.

use log::debug;

use buried_core::enums::WeaponState;
use buried_core::tuning::WeaponTuning;

/// Result of a successful trigger pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shot {
    /// Rounds left in the magazine after this shot.
    pub ammo: u32,
    /// The magazine ran dry and a reload started automatically.
    pub auto_reload: bool,
}

#[derive(Debug, Clone)]
pub struct Weapon {
    pub ammo: u32,
    pub reserve: u32,
    /// Seconds until the next shot is allowed.
    pub cooldown: f64,
    pub state: WeaponState,
    pub reload_remaining: f64,
    tuning: WeaponTuning,
}

impl Weapon {
    pub fn new(tuning: WeaponTuning) -> Self {
        Self {
            ammo: tuning.max_ammo,
            reserve: tuning.reserve_ammo,
            cooldown: 0.0,
            state: WeaponState::Idle,
            reload_remaining: 0.0,
            tuning,
        }
    }

    pub fn is_reloading(&self) -> bool {
        self.state == WeaponState::Reloading
    }

    /// Pull the trigger. Returns `None` when the weapon cannot fire.
    pub fn fire(&mut self, player_dead: bool) -> Option<Shot> {
        if self.is_reloading() || self.cooldown > 0.0 || self.ammo == 0 || player_dead {
            return None;
        }
        self.ammo -= 1;
        self.cooldown = self.tuning.fire_rate;
        let auto_reload = self.ammo == 0 && self.reload();
        Some(Shot {
            ammo: self.ammo,
            auto_reload,
        })
    }

    /// Start a reload. Returns whether one started.
    pub fn reload(&mut self) -> bool {
        if self.is_reloading() || self.reserve == 0 || self.ammo >= self.tuning.max_ammo {
            return false;
        }
        self.state = WeaponState::Reloading;
        self.reload_remaining = self.tuning.reload_time;
        debug!("Reload started ({} + {} reserve)", self.ammo, self.reserve);
        true
    }

    /// Advance timers. Returns true on the frame a reload completes.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
        }
        if !self.is_reloading() {
            return false;
        }
        self.reload_remaining -= dt;
        if self.reload_remaining > 0.0 {
            return false;
        }
        let transfer = (self.tuning.max_ammo - self.ammo).min(self.reserve);
        self.ammo += transfer;
        self.reserve -= transfer;
        self.state = WeaponState::Idle;
        self.reload_remaining = 0.0;
        true
    }

    /// Full magazine and reserve, ready to fire.
    pub fn reset(&mut self) {
        self.ammo = self.tuning.max_ammo;
        self.reserve = self.tuning.reserve_ammo;
        self.cooldown = 0.0;
        self.state = WeaponState::Idle;
        self.reload_remaining = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon() -> Weapon {
        Weapon::new(WeaponTuning::default())
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut w = weapon();
        assert!(w.fire(false).is_some());
        assert!(w.fire(false).is_none(), "second shot inside fire-rate window");
        w.tick(0.125);
        assert_eq!(w.fire(false).map(|s| s.ammo), Some(28));
    }

    #[test]
    fn test_empty_magazine_auto_reloads() {
        let mut w = weapon();
        for n in 1..=30u32 {
            let shot = w.fire(false).expect("should fire");
            assert_eq!(shot.ammo, 30 - n);
            assert_eq!(shot.auto_reload, n == 30);
            w.tick(0.125);
        }
        assert!(w.is_reloading());
        assert!(w.fire(false).is_none(), "no firing while reloading");

        // 2.0 s reload, 0.125 already elapsed in the last tick above.
        let mut finished = false;
        for _ in 0..15 {
            finished = w.tick(0.125);
        }
        assert!(finished);
        assert_eq!((w.ammo, w.reserve), (30, 60));
        assert!(!w.is_reloading());
    }

    #[test]
    fn test_reload_refused_when_full_or_empty_reserve() {
        let mut w = weapon();
        assert!(!w.reload(), "full magazine");

        w.ammo = 3;
        w.reserve = 0;
        assert!(!w.reload(), "no reserve");

        w.reserve = 10;
        assert!(w.reload());
        assert!(!w.reload(), "already reloading");
    }

    #[test]
    fn test_partial_reload_drains_reserve() {
        let mut w = weapon();
        w.ammo = 5;
        w.reserve = 12;
        w.reload();
        w.tick(2.0);
        assert_eq!((w.ammo, w.reserve), (17, 0));
    }

    #[test]
    fn test_rounds_never_increase() {
        let mut w = weapon();
        let mut total = w.ammo + w.reserve;
        for i in 0..400 {
            if i % 7 == 0 {
                w.reload();
            }
            w.fire(false);
            w.tick(0.0625);
            let now = w.ammo + w.reserve;
            assert!(now <= total);
            total = now;
        }
    }

    #[test]
    fn test_dead_player_cannot_fire() {
        let mut w = weapon();
        assert!(w.fire(true).is_none());
        assert_eq!(w.ammo, 30);
    }
}
