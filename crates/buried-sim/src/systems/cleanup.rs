//! Cleanup: removes transient entities (grenades, explosions, hit markers).

use hecs::{Entity, World};

use buried_core::components::{Explosion, Grenade, HitMarker};

use crate::frame::FrameOutput;
use crate::world_setup;

/// Despawn every grenade, explosion and hit marker with their proxies.
/// Uses a caller-owned buffer to avoid per-call allocation.
pub fn despawn_transients(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    out: &mut FrameOutput,
) {
    despawn_buffer.clear();

    despawn_buffer.extend(world.query_mut::<&Grenade>().into_iter().map(|(e, _)| e));
    despawn_buffer.extend(world.query_mut::<&Explosion>().into_iter().map(|(e, _)| e));
    despawn_buffer.extend(world.query_mut::<&HitMarker>().into_iter().map(|(e, _)| e));

    for entity in despawn_buffer.drain(..) {
        world_setup::destroy(world, entity, out);
    }
}
