//! Combat resolution: enemy damage, hit-scan shots, grenade blasts.
//!
//! All side effects apply synchronously within the frame. Anything that
//! should happen later (flash revert, respawn, marker removal) is scheduled
//! on the timer queue.

use glam::DVec3;
use hecs::{Entity, World};
use log::debug;

use buried_core::components::Enemy;
use buried_core::enums::{DamageSource, EnemyState};
use buried_core::events::GameEvent;
use buried_core::render::{ProxyStyle, VisualCommand};
use buried_core::tuning::GameTuning;
use buried_core::types::{DamageOutcome, Health};

use crate::frame::FrameOutput;
use crate::player::Player;
use crate::spatial::{self, RayHit};
use crate::timers::{DeferredAction, TimerQueue};
use crate::world_setup;

/// One instance of damage against an enemy.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub amount: f64,
    pub source: DamageSource,
    pub point: DVec3,
}

/// Linear falloff: full damage at the centre, zero at and beyond `radius`.
pub fn blast_falloff(max_damage: f64, distance: f64, radius: f64) -> f64 {
    if distance < radius {
        max_damage * (1.0 - distance / radius)
    } else {
        0.0
    }
}

/// Damage one enemy. Dead or missing enemies ignore it.
///
/// A hit turns on the damage flash with a fresh token and schedules its
/// revert. A killing hit marks the enemy Dead, removes its proxy at once and,
/// unless the player is dead, schedules a replacement for its roster slot.
#[allow(clippy::too_many_arguments)]
pub fn damage_enemy(
    world: &mut World,
    timers: &mut TimerQueue,
    out: &mut FrameOutput,
    tuning: &GameTuning,
    entity: Entity,
    hit: Hit,
    now_secs: f64,
    player_dead: bool,
) -> DamageOutcome {
    if hit.amount <= 0.0 {
        return DamageOutcome::Ignored;
    }
    let Ok((enemy, health)) = world.query_one_mut::<(&mut Enemy, &mut Health)>(entity) else {
        return DamageOutcome::Ignored;
    };
    if enemy.state == EnemyState::Dead {
        return DamageOutcome::Ignored;
    }

    let outcome = health.apply_damage(hit.amount);
    if !outcome.applied() {
        return outcome;
    }

    let proxy = world_setup::proxy_id(entity);
    let slot = enemy.slot;
    out.event(GameEvent::EnemyHit {
        slot,
        amount: hit.amount,
        source: hit.source,
        point: hit.point,
    });

    if outcome == DamageOutcome::Killed {
        enemy.state = EnemyState::Dead;
        enemy.flashing = false;
        out.visual(VisualCommand::Despawn { proxy });
        out.event(GameEvent::EnemyKilled {
            slot,
            source: hit.source,
        });
        debug!("Enemy in slot {slot} killed by {:?}", hit.source);
        if !player_dead {
            timers.schedule(
                now_secs + tuning.enemy.respawn_delay,
                DeferredAction::RespawnEnemy {
                    slot,
                    previous: entity,
                },
            );
        }
        return outcome;
    }

    enemy.flash_token = enemy.flash_token.wrapping_add(1);
    enemy.flashing = true;
    out.visual(VisualCommand::Style {
        proxy,
        style: ProxyStyle {
            flash: true,
            ..Default::default()
        },
    });
    timers.schedule(
        now_secs + tuning.enemy.flash_duration,
        DeferredAction::RevertFlash {
            enemy: entity,
            token: enemy.flash_token,
        },
    );
    outcome
}

/// Damage the player and report it.
pub fn damage_player(
    player: &mut Player,
    out: &mut FrameOutput,
    amount: f64,
    source: DamageSource,
    now_secs: f64,
) -> DamageOutcome {
    let outcome = player.take_damage(amount, now_secs);
    if outcome.applied() {
        out.event(GameEvent::PlayerDamaged {
            amount,
            source,
            health: player.health.current,
        });
    }
    outcome
}

/// Resolve one hit-scan shot from the player's eye. The nearest living enemy
/// on the ray takes weapon damage and an impact marker appears.
pub fn hitscan(
    world: &mut World,
    timers: &mut TimerQueue,
    out: &mut FrameOutput,
    tuning: &GameTuning,
    player: &Player,
    now_secs: f64,
) -> Option<RayHit> {
    let hit = spatial::raycast_enemies(
        world,
        player.position,
        player.forward(),
        tuning.weapon.range,
    )
    .into_iter()
    .next()?;

    damage_enemy(
        world,
        timers,
        out,
        tuning,
        hit.entity,
        Hit {
            amount: tuning.weapon.damage,
            source: DamageSource::Bullet,
            point: hit.point,
        },
        now_secs,
        player.is_dead(),
    );

    let marker = world_setup::spawn_hit_marker(world, hit.point, out);
    timers.schedule(
        now_secs + tuning.weapon.hit_marker_duration,
        DeferredAction::RemoveHitMarker { marker },
    );
    Some(hit)
}

/// Apply a grenade blast at `center`: living enemies first, then the player
/// at reduced scale.
pub fn apply_blast(
    world: &mut World,
    timers: &mut TimerQueue,
    out: &mut FrameOutput,
    tuning: &GameTuning,
    player: &mut Player,
    center: DVec3,
    now_secs: f64,
) {
    let radius = tuning.grenade.explosion_radius;
    let max_damage = tuning.grenade.damage;

    for (entity, distance) in spatial::enemies_within(world, center, radius) {
        let amount = blast_falloff(max_damage, distance, radius);
        damage_enemy(
            world,
            timers,
            out,
            tuning,
            entity,
            Hit {
                amount,
                source: DamageSource::Blast,
                point: center,
            },
            now_secs,
            player.is_dead(),
        );
    }

    let distance = player.position.distance(center);
    let amount = blast_falloff(max_damage, distance, radius) * tuning.grenade.player_damage_scale;
    if amount > 0.0 {
        damage_player(player, out, amount, DamageSource::Blast, now_secs);
    }
}
