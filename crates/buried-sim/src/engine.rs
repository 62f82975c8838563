//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! fires deferred actions, runs all systems and produces `GameStateSnapshot`s.
//! Rendering goes through the `Renderer` capability, so the engine runs fully
//! headless and deterministically under a seed.

use std::collections::VecDeque;

use hecs::World;
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use buried_core::commands::PlayerCommand;
use buried_core::enums::GamePhase;
use buried_core::events::GameEvent;
use buried_core::render::{NullRenderer, Renderer};
use buried_core::state::GameStateSnapshot;
use buried_core::tuning::GameTuning;
use buried_core::types::{clamp_frame_dt, SimTime};

use crate::frame::FrameOutput;
use crate::player::Player;
use crate::systems;
use crate::systems::grenades::GrenadeManager;
use crate::systems::snapshot::SnapshotSources;
use crate::systems::spawner::EnemySpawner;
use crate::timers::TimerQueue;
use crate::viewmodel::{Viewmodel, ViewmodelInput};
use crate::weapon::Weapon;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same commands = same simulation.
    pub seed: u64,
    pub tuning: GameTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: GameTuning::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine<R: Renderer = NullRenderer> {
    world: World,
    time: SimTime,
    phase: GamePhase,
    input_captured: bool,
    rng: ChaCha8Rng,
    tuning: GameTuning,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    output: FrameOutput,
    timers: TimerQueue,

    player: Player,
    weapon: Weapon,
    viewmodel: Viewmodel,
    grenades: GrenadeManager,
    spawner: EnemySpawner,

    renderer: R,
}

impl SimulationEngine<NullRenderer> {
    /// Create a headless engine.
    pub fn new(config: SimConfig) -> Self {
        Self::with_renderer(config, NullRenderer)
    }
}

impl<R: Renderer> SimulationEngine<R> {
    /// Create an engine that feeds `renderer`. The initial roster is spawned
    /// immediately; its proxies reach the renderer on the first frame.
    pub fn with_renderer(config: SimConfig, renderer: R) -> Self {
        let tuning = config.tuning;
        let mut engine = Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::Playing,
            input_captured: false,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            output: FrameOutput::default(),
            timers: TimerQueue::new(),
            player: Player::new(tuning.player.clone(), tuning.arena.size),
            weapon: Weapon::new(tuning.weapon.clone()),
            viewmodel: Viewmodel::new(),
            grenades: GrenadeManager::new(tuning.grenade.clone()),
            spawner: EnemySpawner::new(),
            tuning,
            renderer,
        };
        engine.spawner.populate(
            &mut engine.world,
            &mut engine.rng,
            &engine.tuning,
            &mut engine.output,
        );
        info!(
            "Simulation ready: {} enemies, seed {}",
            engine.spawner.len(),
            config.seed
        );
        engine
    }

    /// Queue a player command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame of `raw_dt` seconds (clamped) and
    /// return the resulting snapshot.
    pub fn frame(&mut self, raw_dt: f64) -> GameStateSnapshot {
        let dt = clamp_frame_dt(raw_dt, self.tuning.arena.max_frame_dt);
        self.time.advance(dt);
        let now = self.time.elapsed_secs;

        self.process_commands(now);
        self.process_deferred(now);

        if self.phase == GamePhase::Playing {
            self.run_systems(dt, now);

            if self.player.is_dead() {
                self.phase = GamePhase::Dead;
                self.input_captured = false;
                self.output.event(GameEvent::PlayerDied);
                info!("Player died at t={now:.2}s");
            }
        }

        for command in self.output.visuals.drain(..) {
            self.renderer.apply(&command);
        }
        let events = std::mem::take(&mut self.output.events);
        let snapshot = self.snapshot_with(events);
        self.renderer.render(&snapshot);
        snapshot
    }

    /// Build a snapshot of the current state without advancing time.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.snapshot_with(Vec::new())
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn input_captured(&self) -> bool {
        self.input_captured
    }

    pub fn tuning(&self) -> &GameTuning {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn grenades(&self) -> &GrenadeManager {
        &self.grenades
    }

    pub fn spawner(&self) -> &EnemySpawner {
        &self.spawner
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable world access for test setup.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Mutable player access for test setup.
    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    fn snapshot_with(&self, events: Vec<GameEvent>) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &SnapshotSources {
                time: self.time,
                phase: self.phase,
                input_captured: self.input_captured,
                player: &self.player,
                weapon: &self.weapon,
                grenades: &self.grenades,
                viewmodel: &self.viewmodel,
                spawner: &self.spawner,
            },
            events,
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self, now: f64) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, now);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand, now: f64) {
        let dead = self.phase == GamePhase::Dead;
        match command {
            PlayerCommand::CaptureInput => {
                if !dead {
                    self.input_captured = true;
                }
            }
            PlayerCommand::ReleaseInput => {
                self.input_captured = false;
            }
            PlayerCommand::Restart => {
                if dead {
                    self.restart();
                }
            }
            ref other if !self.input_captured && !other.is_release() => {
                debug!("Ignoring {other:?} without input capture");
            }
            PlayerCommand::Look { dx, dy } => self.player.handle_look(dx, dy),
            PlayerCommand::Move { axis, value } => self.player.set_move_axis(axis, value),
            PlayerCommand::Sprint { held } => self.player.set_sprint(held),
            PlayerCommand::AimDown => self.player.set_aim(true),
            PlayerCommand::AimUp => self.player.set_aim(false),
            PlayerCommand::Fire => self.fire(now),
            PlayerCommand::Reload => {
                if self.weapon.reload() {
                    self.output.event(GameEvent::ReloadStarted);
                }
            }
            PlayerCommand::Throw => {
                let origin = self.player.position;
                let forward = self.player.forward();
                self.grenades.throw(
                    &mut self.world,
                    &mut self.output,
                    origin,
                    forward,
                    self.player.is_dead(),
                );
            }
        }
    }

    fn fire(&mut self, now: f64) {
        let Some(shot) = self.weapon.fire(self.player.is_dead()) else {
            return;
        };
        self.viewmodel.kick(&mut self.rng);
        self.output.event(GameEvent::ShotFired { ammo: shot.ammo });
        systems::combat::hitscan(
            &mut self.world,
            &mut self.timers,
            &mut self.output,
            &self.tuning,
            &self.player,
            now,
        );
        if shot.auto_reload {
            self.output.event(GameEvent::ReloadStarted);
        }
    }

    /// Fire every deferred action that has come due.
    fn process_deferred(&mut self, now: f64) {
        let due = self.timers.pop_due(now);
        if due.is_empty() {
            return;
        }
        systems::deferred::run(
            due,
            &mut self.world,
            &mut self.spawner,
            &mut self.rng,
            &self.tuning,
            &mut self.output,
            self.player.is_dead(),
        );
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64, now: f64) {
        // 1. Player movement, regen, FOV
        self.player.tick(dt, now);

        // 2. Weapon timers and viewmodel
        if self.weapon.tick(dt) {
            self.output.event(GameEvent::ReloadFinished {
                ammo: self.weapon.ammo,
                reserve: self.weapon.reserve,
            });
        }
        self.viewmodel.tick(
            dt,
            ViewmodelInput {
                moving: self.player.is_moving(),
                sprinting: self.player.sprinting,
                aiming: self.player.aiming,
                reloading: self.weapon.is_reloading(),
            },
            now,
        );

        // 3. Grenades and explosions
        self.grenades.tick(
            &mut self.world,
            &mut self.timers,
            &mut self.output,
            &self.tuning,
            &mut self.player,
            dt,
            now,
        );

        // 4. Enemy pursuit and melee
        systems::enemy_ai::run(
            &mut self.world,
            &mut self.player,
            &self.tuning.enemy,
            &mut self.output,
            dt,
            now,
        );
    }

    /// Start a new session after death.
    fn restart(&mut self) {
        self.player.reset();
        self.weapon.reset();
        self.viewmodel.reset();
        self.grenades.reset();

        self.spawner.clear(&mut self.world, &mut self.output);
        systems::cleanup::despawn_transients(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.output,
        );
        self.timers.clear();
        self.spawner.populate(
            &mut self.world,
            &mut self.rng,
            &self.tuning,
            &mut self.output,
        );

        self.phase = GamePhase::Playing;
        self.input_captured = true;
        self.output.event(GameEvent::GameRestarted);
        info!("Game restarted at t={:.2}s", self.time.elapsed_secs);
    }
}
