//! Fixed-size enemy roster.
//!
//! Each slot always holds an entity. A killed enemy stays in its slot as a
//! Dead sentinel until a scheduled respawn replaces it.

use hecs::{Entity, World};
use log::debug;
use rand_chacha::ChaCha8Rng;

use buried_core::components::{Enemy, Position};
use buried_core::enums::EnemyState;
use buried_core::events::GameEvent;
use buried_core::tuning::GameTuning;

use crate::frame::FrameOutput;
use crate::world_setup;

#[derive(Debug, Default)]
pub struct EnemySpawner {
    slots: Vec<Entity>,
}

impl EnemySpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities in slot order.
    pub fn slots(&self) -> &[Entity] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Fill the roster with fresh enemies. Any previous roster must have been
    /// cleared first.
    pub fn populate(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        tuning: &GameTuning,
        out: &mut FrameOutput,
    ) {
        self.slots = (0..tuning.enemy.count)
            .map(|slot| world_setup::spawn_enemy(world, rng, tuning, slot, out))
            .collect();
        debug!("Roster populated with {} enemies", self.slots.len());
    }

    /// Replace the dead occupant of `slot`. Dropped when the player is dead or
    /// the slot no longer holds `previous`.
    #[allow(clippy::too_many_arguments)]
    pub fn respawn(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        tuning: &GameTuning,
        out: &mut FrameOutput,
        slot: usize,
        previous: Entity,
        player_dead: bool,
    ) -> Option<Entity> {
        if player_dead || self.slots.get(slot) != Some(&previous) {
            debug!("Dropping stale respawn for slot {slot}");
            return None;
        }
        let still_alive = world
            .get::<&Enemy>(previous)
            .map(|e| e.state == EnemyState::Alive)
            .unwrap_or(false);
        if still_alive {
            return None;
        }

        // The sentinel's proxy went away when it died; the handle was checked
        // against the slot above, so this cannot miss.
        world.despawn(previous).ok();
        let entity = world_setup::spawn_enemy(world, rng, tuning, slot, out);
        self.slots[slot] = entity;

        let position = world
            .get::<&Position>(entity)
            .map(|p| p.0)
            .unwrap_or_default();
        out.event(GameEvent::EnemyRespawned { slot, position });
        debug!("Enemy respawned in slot {slot} at {position:?}");
        Some(entity)
    }

    /// Despawn every roster entity. Living enemies also lose their proxy.
    pub fn clear(&mut self, world: &mut World, out: &mut FrameOutput) {
        for entity in self.slots.drain(..) {
            let alive = world
                .get::<&Enemy>(entity)
                .map(|e| e.state == EnemyState::Alive)
                .unwrap_or(false);
            if alive {
                world_setup::destroy(world, entity, out);
            } else if world.despawn(entity).is_err() {
                debug!("Roster entity {entity:?} already gone");
            }
        }
    }

    /// Number of slots holding a living enemy.
    pub fn living_count(&self, world: &World) -> usize {
        self.slots
            .iter()
            .filter(|&&e| {
                world
                    .get::<&Enemy>(e)
                    .map(|enemy| enemy.state == EnemyState::Alive)
                    .unwrap_or(false)
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buried_core::render::VisualCommand;
    use rand::SeedableRng;

    fn setup() -> (EnemySpawner, World, ChaCha8Rng, GameTuning, FrameOutput) {
        let tuning = GameTuning::default();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut out = FrameOutput::default();
        let mut spawner = EnemySpawner::new();
        spawner.populate(&mut world, &mut rng, &tuning, &mut out);
        (spawner, world, rng, tuning, out)
    }

    fn kill(world: &mut World, e: Entity) {
        world.get::<&mut Enemy>(e).unwrap().state = EnemyState::Dead;
    }

    #[test]
    fn test_populate_fills_every_slot() {
        let (spawner, world, _, tuning, out) = setup();
        assert_eq!(spawner.len(), tuning.enemy.count);
        assert_eq!(spawner.living_count(&world), tuning.enemy.count);
        for (slot, &e) in spawner.slots().iter().enumerate() {
            assert_eq!(world.get::<&Enemy>(e).unwrap().slot, slot);
        }
        let spawns = out
            .visuals
            .iter()
            .filter(|c| matches!(c, VisualCommand::Spawn { .. }))
            .count();
        assert_eq!(spawns, tuning.enemy.count);
    }

    #[test]
    fn test_respawn_replaces_dead_slot() {
        let (mut spawner, mut world, mut rng, tuning, mut out) = setup();
        let old = spawner.slots()[3];
        kill(&mut world, old);
        assert_eq!(spawner.living_count(&world), tuning.enemy.count - 1);

        let new = spawner
            .respawn(&mut world, &mut rng, &tuning, &mut out, 3, old, false)
            .expect("respawn");
        assert_ne!(new, old);
        assert!(!world.contains(old));
        assert_eq!(spawner.slots()[3], new);
        assert_eq!(spawner.living_count(&world), tuning.enemy.count);
    }

    #[test]
    fn test_stale_respawns_are_dropped() {
        let (mut spawner, mut world, mut rng, tuning, mut out) = setup();
        let old = spawner.slots()[0];
        kill(&mut world, old);

        assert!(spawner
            .respawn(&mut world, &mut rng, &tuning, &mut out, 0, old, true)
            .is_none());

        let other = spawner.slots()[1];
        assert!(spawner
            .respawn(&mut world, &mut rng, &tuning, &mut out, 0, other, false)
            .is_none());
        assert!(spawner
            .respawn(&mut world, &mut rng, &tuning, &mut out, 99, old, false)
            .is_none());

        // Living occupants are never replaced.
        assert!(spawner
            .respawn(&mut world, &mut rng, &tuning, &mut out, 1, other, false)
            .is_none());
        assert_eq!(spawner.slots()[0], old);
    }

    #[test]
    fn test_clear_empties_world() {
        let (mut spawner, mut world, _, _, mut out) = setup();
        kill(&mut world, spawner.slots()[2]);
        out.visuals.clear();
        spawner.clear(&mut world, &mut out);
        assert!(spawner.is_empty());
        assert_eq!(world.len(), 0);
        assert_eq!(out.visuals.len(), GameTuning::default().enemy.count - 1);
    }

    #[test]
    fn test_clear_tolerates_missing_roster_entity() {
        let (mut spawner, mut world, _, _, mut out) = setup();
        world.despawn(spawner.slots()[4]).unwrap();
        out.visuals.clear();
        spawner.clear(&mut world, &mut out);
        assert!(spawner.is_empty());
        assert_eq!(world.len(), 0);
        assert_eq!(out.visuals.len(), GameTuning::default().enemy.count - 1);
    }
}
