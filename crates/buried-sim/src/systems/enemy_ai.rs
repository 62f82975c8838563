//! Enemy pursuit and melee.
//!
//! Living enemies walk straight at the player's horizontal position, face
//! them, play the shamble animation and attack when close enough.

use hecs::World;

use buried_core::components::{Enemy, Position};
use buried_core::constants::{ENEMY_ARM_REST_PITCH, ENEMY_WALK_CYCLE_RATE};
use buried_core::enums::{DamageSource, EnemyState};
use buried_core::render::{LimbPose, VisualCommand};
use buried_core::tuning::EnemyTuning;
use buried_core::types::{yaw_towards, Transform};

use crate::frame::FrameOutput;
use crate::player::Player;
use crate::systems::combat;
use crate::world_setup::proxy_id;

const BODY_SWAY: f64 = 0.07;
const ARM_SWING: f64 = 0.2;

pub fn run(
    world: &mut World,
    player: &mut Player,
    tuning: &EnemyTuning,
    out: &mut FrameOutput,
    dt: f64,
    now_secs: f64,
) {
    let phase = now_secs * ENEMY_WALK_CYCLE_RATE;
    let sway = phase.sin();
    let target = player.position;

    for (entity, (enemy, pos)) in world.query_mut::<(&mut Enemy, &mut Position)>() {
        if enemy.state == EnemyState::Dead {
            continue;
        }

        let direction = (target - pos.0).with_y(0.0).normalize_or_zero();
        pos.0 += direction * tuning.speed * dt;
        enemy.yaw = yaw_towards(pos.0, target);
        enemy.roll = sway * BODY_SWAY;
        enemy.left_arm_pitch = ENEMY_ARM_REST_PITCH + sway * ARM_SWING;
        enemy.right_arm_pitch =
            ENEMY_ARM_REST_PITCH + (phase + std::f64::consts::PI).sin() * ARM_SWING;

        let proxy = proxy_id(entity);
        out.visual(VisualCommand::Move {
            proxy,
            transform: Transform {
                position: pos.0,
                yaw: enemy.yaw,
                roll: enemy.roll,
                scale: 1.0,
            },
        });
        out.visual(VisualCommand::Pose {
            proxy,
            pose: LimbPose {
                left_arm_pitch: enemy.left_arm_pitch,
                right_arm_pitch: enemy.right_arm_pitch,
            },
        });

        enemy.attack_cooldown -= dt;
        if pos.0.distance(target) < tuning.attack_range && enemy.attack_cooldown <= 0.0 {
            combat::damage_player(player, out, tuning.damage, DamageSource::Melee, now_secs);
            enemy.attack_cooldown = tuning.attack_cooldown;
        }
    }
}
