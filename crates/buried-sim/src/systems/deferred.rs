//! Execution of due deferred actions.
//!
//! Each handler re-checks its target before touching it: the entity must still
//! exist (hecs handles are generation-tagged), be in the expected state, and
//! for flash reverts carry the same token.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use buried_core::components::{Enemy, HitMarker};
use buried_core::enums::EnemyState;
use buried_core::render::{ProxyStyle, VisualCommand};
use buried_core::tuning::GameTuning;

use crate::frame::FrameOutput;
use crate::systems::spawner::EnemySpawner;
use crate::timers::DeferredAction;
use crate::world_setup::{self, proxy_id};

#[allow(clippy::too_many_arguments)]
pub fn run(
    actions: Vec<DeferredAction>,
    world: &mut World,
    spawner: &mut EnemySpawner,
    rng: &mut ChaCha8Rng,
    tuning: &GameTuning,
    out: &mut FrameOutput,
    player_dead: bool,
) {
    for action in actions {
        match action {
            DeferredAction::RevertFlash { enemy, token } => {
                let Ok(state) = world.query_one_mut::<&mut Enemy>(enemy) else {
                    continue;
                };
                if state.state != EnemyState::Alive || state.flash_token != token || !state.flashing
                {
                    continue;
                }
                state.flashing = false;
                out.visual(VisualCommand::Style {
                    proxy: proxy_id(enemy),
                    style: ProxyStyle::default(),
                });
            }
            DeferredAction::RespawnEnemy { slot, previous } => {
                spawner.respawn(world, rng, tuning, out, slot, previous, player_dead);
            }
            DeferredAction::RemoveHitMarker { marker } => {
                if world.get::<&HitMarker>(marker).is_ok() {
                    world_setup::destroy(world, marker, out);
                }
            }
        }
    }
}
