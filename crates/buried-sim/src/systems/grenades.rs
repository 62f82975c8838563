//! Grenades and explosions.
//!
//! `GrenadeManager` holds the throwable count and throw cooldown. The live
//! grenades and explosions themselves are entities in the world.

use glam::DVec3;
use hecs::{Entity, World};
use log::debug;

use buried_core::components::{Explosion, Grenade, Position, Velocity};
use buried_core::constants::{
    EXPLOSION_LIGHT_INTENSITY, EXPLOSION_START_OPACITY, GRENADE_GROUND_FRICTION,
    GRENADE_GROUND_HEIGHT, GRENADE_GROUND_RESTITUTION, GRENADE_WALL_RESTITUTION,
};
use buried_core::events::GameEvent;
use buried_core::render::{ProxyStyle, VisualCommand};
use buried_core::tuning::{GameTuning, GrenadeTuning};
use buried_core::types::Transform;

use crate::frame::FrameOutput;
use crate::player::Player;
use crate::systems::combat;
use crate::timers::TimerQueue;
use crate::world_setup::{self, proxy_id};

/// Distance inside the arena bound where grenades bounce off the walls.
const WALL_SKIN: f64 = 0.1;

/// Integrate one grenade for `dt`: gravity, ground and wall bounces, fuse.
/// Returns true exactly once, on the tick the fuse runs out.
pub fn advance_grenade(
    grenade: &mut Grenade,
    position: &mut DVec3,
    velocity: &mut DVec3,
    dt: f64,
    gravity: f64,
    arena_size: f64,
) -> bool {
    if grenade.exploded {
        return false;
    }

    velocity.y -= gravity * dt;
    *position += *velocity * dt;

    if position.y < GRENADE_GROUND_HEIGHT {
        position.y = GRENADE_GROUND_HEIGHT;
        velocity.y *= -GRENADE_GROUND_RESTITUTION;
        velocity.x *= GRENADE_GROUND_FRICTION;
        velocity.z *= GRENADE_GROUND_FRICTION;
    }

    let bound = arena_size - WALL_SKIN;
    if position.x.abs() > bound {
        position.x = bound.copysign(position.x);
        velocity.x *= -GRENADE_WALL_RESTITUTION;
    }
    if position.z.abs() > bound {
        position.z = bound.copysign(position.z);
        velocity.z *= -GRENADE_WALL_RESTITUTION;
    }

    grenade.fuse_remaining -= dt;
    if grenade.fuse_remaining <= 0.0 {
        grenade.exploded = true;
        return true;
    }
    false
}

/// Age an explosion by `dt`. Returns whether it is still alive.
pub fn advance_explosion(explosion: &mut Explosion, dt: f64) -> bool {
    explosion.age += dt;
    let p = if explosion.lifetime > 0.0 {
        (explosion.age / explosion.lifetime).clamp(0.0, 1.0)
    } else {
        1.0
    };
    explosion.scale = 1.0 + p * (explosion.max_scale - 1.0);
    explosion.opacity = EXPLOSION_START_OPACITY * (1.0 - p);
    explosion.light_intensity = EXPLOSION_LIGHT_INTENSITY * (1.0 - p);
    explosion.age < explosion.lifetime
}

#[derive(Debug, Clone)]
pub struct GrenadeManager {
    pub count: u32,
    /// Seconds until another throw is allowed.
    pub cooldown: f64,
    tuning: GrenadeTuning,
    detonations: Vec<(Entity, DVec3)>,
    expired: Vec<Entity>,
}

impl GrenadeManager {
    pub fn new(tuning: GrenadeTuning) -> Self {
        Self {
            count: tuning.count,
            cooldown: 0.0,
            tuning,
            detonations: Vec::new(),
            expired: Vec::new(),
        }
    }

    /// Throw a grenade from `origin` along `forward`. Returns whether one left
    /// the hand.
    pub fn throw(
        &mut self,
        world: &mut World,
        out: &mut FrameOutput,
        origin: DVec3,
        forward: DVec3,
        player_dead: bool,
    ) -> bool {
        if self.count == 0 || self.cooldown > 0.0 || player_dead {
            return false;
        }
        self.count -= 1;
        self.cooldown = self.tuning.throw_cooldown;

        let position = origin + forward * self.tuning.spawn_offset;
        let velocity = forward * self.tuning.throw_force + DVec3::Y * self.tuning.upward_boost;
        world_setup::spawn_grenade(world, position, velocity, self.tuning.fuse_time, out);
        out.event(GameEvent::GrenadeThrown {
            remaining: self.count,
        });
        debug!("Grenade thrown, {} left", self.count);
        true
    }

    /// Advance every grenade and explosion. Detonations spawn an explosion
    /// and apply blast damage; expired explosions are destroyed.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        world: &mut World,
        timers: &mut TimerQueue,
        out: &mut FrameOutput,
        tuning: &GameTuning,
        player: &mut Player,
        dt: f64,
        now_secs: f64,
    ) {
        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
        }

        self.detonations.clear();
        for (entity, (grenade, pos, vel)) in
            world.query_mut::<(&mut Grenade, &mut Position, &mut Velocity)>()
        {
            if advance_grenade(
                grenade,
                &mut pos.0,
                &mut vel.0,
                dt,
                self.tuning.gravity,
                tuning.arena.size,
            ) {
                self.detonations.push((entity, pos.0));
            } else {
                out.visual(VisualCommand::Move {
                    proxy: proxy_id(entity),
                    transform: Transform::at(pos.0),
                });
            }
        }

        for &(entity, position) in &self.detonations {
            world_setup::destroy(world, entity, out);
            world_setup::spawn_explosion(
                world,
                position,
                self.tuning.explosion_lifetime,
                self.tuning.explosion_radius,
                out,
            );
            out.event(GameEvent::GrenadeExploded { position });
            debug!("Grenade exploded at {position:?}");
            combat::apply_blast(world, timers, out, tuning, player, position, now_secs);
        }

        self.expired.clear();
        for (entity, (explosion, pos)) in world.query_mut::<(&mut Explosion, &Position)>() {
            if !advance_explosion(explosion, dt) {
                self.expired.push(entity);
                continue;
            }
            let proxy = proxy_id(entity);
            out.visual(VisualCommand::Move {
                proxy,
                transform: Transform {
                    scale: explosion.scale,
                    ..Transform::at(pos.0)
                },
            });
            out.visual(VisualCommand::Style {
                proxy,
                style: ProxyStyle {
                    flash: false,
                    opacity: explosion.opacity,
                    light_intensity: explosion.light_intensity,
                },
            });
        }
        for &entity in &self.expired {
            world_setup::destroy(world, entity, out);
        }
    }

    /// Restore the full grenade count.
    pub fn reset(&mut self) {
        self.count = self.tuning.count;
        self.cooldown = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buried_core::constants::*;

    fn resting_grenade(fuse: f64) -> (Grenade, DVec3, DVec3) {
        (
            Grenade {
                fuse_remaining: fuse,
                exploded: false,
            },
            DVec3::new(0.0, 5.0, 0.0),
            DVec3::ZERO,
        )
    }

    #[test]
    fn test_fuse_fires_exactly_at_three_seconds() {
        let (mut g, mut pos, mut vel) = resting_grenade(GRENADE_FUSE_TIME);
        for tick in 1..=24 {
            let exploded = advance_grenade(&mut g, &mut pos, &mut vel, 0.125, 0.0, ARENA_SIZE);
            assert_eq!(exploded, tick == 24, "tick {tick}");
        }
        assert!(!advance_grenade(&mut g, &mut pos, &mut vel, 0.125, 0.0, ARENA_SIZE));
    }

    #[test]
    fn test_ground_bounce() {
        let mut g = Grenade {
            fuse_remaining: 10.0,
            exploded: false,
        };
        let mut pos = DVec3::new(0.0, 0.15, 0.0);
        let mut vel = DVec3::new(2.0, -10.0, 1.0);
        advance_grenade(&mut g, &mut pos, &mut vel, 0.01, 0.0, ARENA_SIZE);
        assert_eq!(pos.y, GRENADE_GROUND_HEIGHT);
        assert!((vel.y - 4.0).abs() < 1e-12);
        assert!((vel.x - 1.4).abs() < 1e-12);
        assert!((vel.z - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_wall_bounce() {
        let mut g = Grenade {
            fuse_remaining: 10.0,
            exploded: false,
        };
        let mut pos = DVec3::new(49.85, 3.0, -49.85);
        let mut vel = DVec3::new(4.0, 0.0, -4.0);
        advance_grenade(&mut g, &mut pos, &mut vel, 0.1, 0.0, ARENA_SIZE);
        assert_eq!(pos.x, ARENA_SIZE - 0.1);
        assert_eq!(pos.z, -(ARENA_SIZE - 0.1));
        assert_eq!(vel.x, -2.0);
        assert_eq!(vel.z, 2.0);
    }

    #[test]
    fn test_explosion_decays_monotonically_and_expires_once() {
        let mut e = Explosion {
            age: 0.0,
            lifetime: EXPLOSION_LIFETIME,
            max_scale: GRENADE_EXPLOSION_RADIUS,
            scale: 1.0,
            opacity: EXPLOSION_START_OPACITY,
            light_intensity: EXPLOSION_LIGHT_INTENSITY,
        };
        let mut last = (e.scale, e.opacity);
        let mut alive_ticks = 0;
        for _ in 0..8 {
            let alive = advance_explosion(&mut e, 0.0625);
            assert!(e.scale >= last.0 && e.opacity <= last.1);
            last = (e.scale, e.opacity);
            if alive {
                alive_ticks += 1;
            } else {
                break;
            }
        }
        assert_eq!(alive_ticks, 7);
        assert_eq!(e.scale, GRENADE_EXPLOSION_RADIUS);
        assert_eq!(e.opacity, 0.0);
    }

    #[test]
    fn test_explosion_overshoot_is_clamped() {
        let mut e = Explosion {
            age: 0.4,
            lifetime: 0.5,
            max_scale: 6.0,
            scale: 1.0,
            opacity: 0.9,
            light_intensity: 8.0,
        };
        assert!(!advance_explosion(&mut e, 0.1 + 0.1));
        assert_eq!(e.opacity, 0.0);
        assert_eq!(e.light_intensity, 0.0);
        assert_eq!(e.scale, 6.0);
    }

    #[test]
    fn test_throw_gating() {
        let mut manager = GrenadeManager::new(GrenadeTuning::default());
        let mut world = World::new();
        let mut out = FrameOutput::default();
        let origin = DVec3::new(0.0, PLAYER_HEIGHT, 0.0);

        assert!(!manager.throw(&mut world, &mut out, origin, DVec3::NEG_Z, true));
        assert!(manager.throw(&mut world, &mut out, origin, DVec3::NEG_Z, false));
        assert!(
            !manager.throw(&mut world, &mut out, origin, DVec3::NEG_Z, false),
            "cooldown"
        );
        assert_eq!(manager.count, GRENADE_COUNT - 1);

        let (pos, vel) = {
            let mut q = world.query::<(&Grenade, &Position, &Velocity)>();
            let (_, (_, p, v)) = q.iter().next().unwrap();
            (p.0, v.0)
        };
        assert!((pos - DVec3::new(0.0, PLAYER_HEIGHT, -0.5)).length() < 1e-12);
        assert!((vel - DVec3::new(0.0, 5.0, -18.0)).length() < 1e-12);

        manager.count = 0;
        manager.cooldown = 0.0;
        assert!(!manager.throw(&mut world, &mut out, origin, DVec3::NEG_Z, false));
        manager.reset();
        assert_eq!(manager.count, GRENADE_COUNT);
    }
}
