//! Snapshot system: builds a complete GameStateSnapshot from the world and
//! the engine's non-ECS state.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use buried_core::components::*;
use buried_core::enums::{EnemyState, GamePhase};
use buried_core::events::GameEvent;
use buried_core::state::*;
use buried_core::types::{Health, SimTime};

use crate::player::Player;
use crate::systems::grenades::GrenadeManager;
use crate::systems::spawner::EnemySpawner;
use crate::viewmodel::Viewmodel;
use crate::weapon::Weapon;

/// Everything the snapshot reads that does not live in the world.
pub struct SnapshotSources<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub input_captured: bool,
    pub player: &'a Player,
    pub weapon: &'a Weapon,
    pub grenades: &'a GrenadeManager,
    pub viewmodel: &'a Viewmodel,
    pub spawner: &'a EnemySpawner,
}

pub fn build_snapshot(
    world: &World,
    sources: &SnapshotSources<'_>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: sources.time,
        phase: sources.phase,
        input_captured: sources.input_captured,
        hud: HudView {
            health: sources.player.health.current,
            ammo: sources.weapon.ammo,
            reserve_ammo: sources.weapon.reserve,
            grenades: sources.grenades.count,
            reloading: sources.weapon.is_reloading(),
            death_screen_visible: sources.phase == GamePhase::Dead,
        },
        camera: sources.player.camera_view(),
        viewmodel: sources.viewmodel.pose(),
        enemies: build_enemies(world, sources.spawner),
        grenades: build_grenades(world),
        explosions: build_explosions(world),
        events,
    }
}

/// One view per roster slot, in slot order.
fn build_enemies(world: &World, spawner: &EnemySpawner) -> Vec<EnemyView> {
    spawner
        .slots()
        .iter()
        .enumerate()
        .filter_map(|(slot, &entity)| {
            let mut query = world.query_one::<(&Enemy, &Position, &Health)>(entity).ok()?;
            let (enemy, pos, health) = query.get()?;
            Some(EnemyView {
                slot,
                state: enemy.state,
                position: pos.0,
                health: health.current,
                yaw: enemy.yaw,
                flashing: enemy.flashing && enemy.state == EnemyState::Alive,
            })
        })
        .collect()
}

fn build_grenades(world: &World) -> Vec<GrenadeView> {
    let mut grenades: Vec<(u64, GrenadeView)> = world
        .query::<(&Grenade, &Position)>()
        .iter()
        .map(|(entity, (grenade, pos))| {
            (
                entity.to_bits().get(),
                GrenadeView {
                    position: pos.0,
                    fuse_remaining: grenade.fuse_remaining,
                },
            )
        })
        .collect();
    grenades.sort_by_key(|(id, _)| *id);
    grenades.into_iter().map(|(_, view)| view).collect()
}

fn build_explosions(world: &World) -> Vec<ExplosionView> {
    let mut explosions: Vec<(u64, ExplosionView)> = world
        .query::<(&Explosion, &Position)>()
        .iter()
        .map(|(entity, (explosion, pos))| {
            (
                entity.to_bits().get(),
                ExplosionView {
                    position: pos.0,
                    scale: explosion.scale,
                    opacity: explosion.opacity,
                },
            )
        })
        .collect();
    explosions.sort_by_key(|(id, _)| *id);
    explosions.into_iter().map(|(_, view)| view).collect()
}
