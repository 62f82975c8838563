//! Entity spawn factories.
//!
//! Each factory spawns the entity's component bundle and emits the `Spawn`
//! visual command for its proxy.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use buried_core::components::*;
use buried_core::constants::{
    ENEMY_ARM_REST_PITCH, ENEMY_BODY_HEIGHT, EXPLOSION_LIGHT_INTENSITY, EXPLOSION_START_OPACITY,
};
use buried_core::enums::{EnemyState, ProxyKind};
use buried_core::render::{ProxyId, ProxyStyle, VisualCommand};
use buried_core::tuning::{EnemyTuning, GameTuning};
use buried_core::types::{Health, Transform};

use crate::frame::FrameOutput;

/// Proxy id for an entity. Entity bits include the generation, so a recycled
/// slot in the world never reuses an id.
pub fn proxy_id(entity: Entity) -> ProxyId {
    ProxyId(entity.to_bits().get())
}

/// Pick an enemy spawn point: a random bearing at 25..35 m from the arena
/// centre, clamped inside the arena with a margin.
pub fn enemy_spawn_position(rng: &mut ChaCha8Rng, arena_size: f64, enemy: &EnemyTuning) -> DVec3 {
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    let distance = enemy.spawn_distance + rng.gen::<f64>() * enemy.spawn_jitter;
    let limit = arena_size - enemy.spawn_margin;
    DVec3::new(
        (angle.cos() * distance).clamp(-limit, limit),
        ENEMY_BODY_HEIGHT,
        (angle.sin() * distance).clamp(-limit, limit),
    )
}

/// Spawn a fresh enemy for roster `slot` at a random position.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tuning: &GameTuning,
    slot: usize,
    out: &mut FrameOutput,
) -> Entity {
    let position = enemy_spawn_position(rng, tuning.arena.size, &tuning.enemy);
    let enemy = Enemy {
        slot,
        state: EnemyState::Alive,
        attack_cooldown: 0.0,
        yaw: 0.0,
        roll: 0.0,
        left_arm_pitch: ENEMY_ARM_REST_PITCH,
        right_arm_pitch: ENEMY_ARM_REST_PITCH,
        flashing: false,
        flash_token: 0,
    };
    let entity = world.spawn((enemy, Position(position), Health::full(tuning.enemy.health)));
    out.visual(VisualCommand::Spawn {
        proxy: proxy_id(entity),
        kind: ProxyKind::Enemy,
        transform: Transform::at(position),
    });
    entity
}

/// Spawn a live grenade.
pub fn spawn_grenade(
    world: &mut World,
    position: DVec3,
    velocity: DVec3,
    fuse_secs: f64,
    out: &mut FrameOutput,
) -> Entity {
    let entity = world.spawn((
        Grenade {
            fuse_remaining: fuse_secs,
            exploded: false,
        },
        Position(position),
        Velocity(velocity),
    ));
    out.visual(VisualCommand::Spawn {
        proxy: proxy_id(entity),
        kind: ProxyKind::Grenade,
        transform: Transform::at(position),
    });
    entity
}

/// Spawn the visual blast left by a detonation.
pub fn spawn_explosion(
    world: &mut World,
    position: DVec3,
    lifetime: f64,
    max_scale: f64,
    out: &mut FrameOutput,
) -> Entity {
    let entity = world.spawn((
        Explosion {
            age: 0.0,
            lifetime,
            max_scale,
            scale: 1.0,
            opacity: EXPLOSION_START_OPACITY,
            light_intensity: EXPLOSION_LIGHT_INTENSITY,
        },
        Position(position),
    ));
    let proxy = proxy_id(entity);
    out.visual(VisualCommand::Spawn {
        proxy,
        kind: ProxyKind::Explosion,
        transform: Transform::at(position),
    });
    out.visual(VisualCommand::Style {
        proxy,
        style: ProxyStyle {
            flash: false,
            opacity: EXPLOSION_START_OPACITY,
            light_intensity: EXPLOSION_LIGHT_INTENSITY,
        },
    });
    entity
}

/// Spawn an impact marker at a hit-scan hit point.
pub fn spawn_hit_marker(world: &mut World, point: DVec3, out: &mut FrameOutput) -> Entity {
    let entity = world.spawn((HitMarker, Position(point)));
    out.visual(VisualCommand::Spawn {
        proxy: proxy_id(entity),
        kind: ProxyKind::HitMarker,
        transform: Transform::at(point),
    });
    entity
}

/// Despawn an entity and remove its proxy. Returns false if it was already gone.
pub fn destroy(world: &mut World, entity: Entity, out: &mut FrameOutput) -> bool {
    if world.despawn(entity).is_err() {
        return false;
    }
    out.visual(VisualCommand::Despawn {
        proxy: proxy_id(entity),
    });
    true
}
