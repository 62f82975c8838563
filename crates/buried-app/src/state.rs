//! Application state shared between the input side and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::{anyhow, bail, Context, Result};

use buried_core::commands::PlayerCommand;
use buried_core::state::GameStateSnapshot;
use buried_sim::SimConfig;

use crate::game_loop::{self, LoopSettings};

/// Commands sent from the input side to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle on a running (or not yet started) game loop.
///
/// - `command_tx` is `None` until [`AppState::start`] succeeds.
/// - `latest_snapshot` is shared with the loop thread and replaced every frame.
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub running: Mutex<bool>,
    worker: Mutex<Option<JoinHandle<u64>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
            worker: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop thread. Fails if it is already running.
    pub fn start(&self, config: SimConfig, settings: LoopSettings) -> Result<()> {
        let mut running = self.running.lock().map_err(|e| anyhow!("{e}"))?;
        if *running {
            bail!("Simulation already running");
        }

        let (cmd_tx, handle) =
            game_loop::spawn_game_loop(config, settings, self.latest_snapshot.clone())?;

        *self.command_tx.lock().map_err(|e| anyhow!("{e}"))? = Some(cmd_tx);
        *self.worker.lock().map_err(|e| anyhow!("{e}"))? = Some(handle);
        *running = true;
        Ok(())
    }

    /// Forward a player command to the loop.
    pub fn send(&self, command: PlayerCommand) -> Result<()> {
        let tx_lock = self.command_tx.lock().map_err(|e| anyhow!("{e}"))?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::PlayerCommand(command))
                .context("Failed to send command"),
            None => bail!("Simulation not started"),
        }
    }

    /// Latest snapshot published by the loop, if any.
    pub fn snapshot(&self) -> Result<Option<GameStateSnapshot>> {
        let lock = self.latest_snapshot.lock().map_err(|e| anyhow!("{e}"))?;
        Ok(lock.clone())
    }

    /// Stop the loop and wait for it. Returns the number of frames it ran.
    pub fn shutdown(&self) -> Result<u64> {
        if let Some(tx) = self.command_tx.lock().map_err(|e| anyhow!("{e}"))?.take() {
            // A disconnected loop has already exited.
            let _ = tx.send(GameLoopCommand::Shutdown);
        }
        let handle = self.worker.lock().map_err(|e| anyhow!("{e}"))?.take();
        *self.running.lock().map_err(|e| anyhow!("{e}"))? = false;
        match handle {
            Some(handle) => handle
                .join()
                .map_err(|_| anyhow!("Game loop thread panicked")),
            None => Ok(0),
        }
    }
}
