//! Game loop drivers.
//!
//! `spawn_game_loop` runs the engine on its own thread, paced to real time.
//! The engine is created inside the thread. Commands arrive via `mpsc`;
//! snapshots are stored in shared state for polling. `run_headless` drives
//! an engine on the calling thread at a fixed step with the autopilot.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::debug;

use buried_core::events::GameEvent;
use buried_core::render::Renderer;
use buried_core::state::GameStateSnapshot;
use buried_core::types::FrameClock;
use buried_sim::{SimConfig, SimulationEngine};

use crate::autopilot::Autopilot;
use crate::hud::LoggingRenderer;
use crate::input::map_input;
use crate::state::GameLoopCommand;

pub const DEFAULT_FPS: u32 = 60;

/// Pacing and logging for the threaded loop.
#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    pub fps: u32,
    /// Log the HUD every this many frames (0 = never).
    pub log_every: u64,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            log_every: DEFAULT_FPS as u64,
        }
    }
}

impl LoopSettings {
    /// Nominal duration of one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.fps.max(1)))
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle, which yields the number
/// of frames run.
pub fn spawn_game_loop(
    config: SimConfig,
    settings: LoopSettings,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<u64>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("buried-game-loop".into())
        .spawn(move || run_game_loop(config, settings, cmd_rx, &latest_snapshot))
        .context("Failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    settings: LoopSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> u64 {
    let mut engine =
        SimulationEngine::with_renderer(config, LoggingRenderer::new(settings.log_every));
    let frame_duration = settings.frame_duration();
    let mut clock = FrameClock::new(engine.tuning().arena.max_frame_dt);
    let start = Instant::now();
    let mut next_frame_time = start;
    let mut frames = 0;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    debug!("Game loop stopping after {frames} frames");
                    return frames;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance by the real time since the last frame (clamped)
        let dt = clock.tick(start.elapsed().as_secs_f64());
        let snapshot = engine.frame(dt);
        frames += 1;

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next frame
        next_frame_time += frame_duration;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame_duration * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_frame_time = now;
        }
    }
}

/// Event tallies over a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub shots: u64,
    pub kills: u64,
    pub respawns: u64,
    pub grenades: u64,
    pub deaths: u64,
    pub restarts: u64,
}

impl RunSummary {
    pub fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::ShotFired { .. } => self.shots += 1,
                GameEvent::EnemyKilled { .. } => self.kills += 1,
                GameEvent::EnemyRespawned { .. } => self.respawns += 1,
                GameEvent::GrenadeThrown { .. } => self.grenades += 1,
                GameEvent::PlayerDied => self.deaths += 1,
                GameEvent::GameRestarted => self.restarts += 1,
                _ => {}
            }
        }
    }
}

/// Drive `engine` for `frames` fixed steps of `dt`, feeding autopilot input
/// through the key bindings. Returns the tallies and the last snapshot.
pub fn run_headless<R: Renderer>(
    engine: &mut SimulationEngine<R>,
    autopilot: &mut Autopilot,
    frames: u64,
    dt: f64,
) -> (RunSummary, GameStateSnapshot) {
    let mut summary = RunSummary::default();
    let mut snapshot = engine.snapshot();
    for _ in 0..frames {
        let dead = snapshot.hud.death_screen_visible;
        for event in autopilot.step(&snapshot) {
            engine.queue_commands(map_input(event, dead));
        }
        snapshot = engine.frame(dt);
        summary.frames += 1;
        summary.record(&snapshot.events);
    }
    (summary, snapshot)
}
