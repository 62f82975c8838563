use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;

use buried_app::autopilot::Autopilot;
use buried_app::game_loop::{self, LoopSettings, DEFAULT_FPS};
use buried_app::hud::{format_hud, LoggingRenderer};
use buried_app::input::map_input;
use buried_app::state::AppState;
use buried_core::state::GameStateSnapshot;
use buried_core::tuning::GameTuning;
use buried_sim::{SimConfig, SimulationEngine};

/// BURIED: a cave shooter simulation, driven headless by an autopilot.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// RNG seed. Same seed and input give the same run.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON tuning file overriding the built-in constants.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of frames to run.
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Frames per second.
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..=1000))]
    fps: u32,

    /// Run the loop on its own thread paced to wall-clock time instead of
    /// stepping as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// Write the final snapshot as JSON to this path.
    #[arg(long, value_name = "PATH")]
    dump_snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let tuning = match &cli.config {
        Some(path) => GameTuning::load(path)
            .with_context(|| format!("Failed to load tuning from {}", path.display()))?,
        None => GameTuning::default(),
    };
    let sensitivity = tuning.player.mouse_sensitivity;
    let config = SimConfig {
        seed: cli.seed,
        tuning,
    };
    let settings = LoopSettings {
        fps: cli.fps,
        log_every: u64::from(cli.fps),
    };

    let last = if cli.realtime {
        run_realtime(config, settings, cli.frames, sensitivity)?
    } else {
        let mut engine =
            SimulationEngine::with_renderer(config, LoggingRenderer::new(settings.log_every));
        let mut autopilot = Autopilot::new(sensitivity);
        let dt = 1.0 / f64::from(cli.fps);
        let (summary, snapshot) =
            game_loop::run_headless(&mut engine, &mut autopilot, cli.frames, dt);
        info!(
            "Ran {} frames: {} shots, {} kills, {} grenades, {} deaths",
            summary.frames, summary.shots, summary.kills, summary.grenades, summary.deaths
        );
        Some(snapshot)
    };

    if let Some(snapshot) = &last {
        info!("Final HUD: {}", format_hud(&snapshot.hud));
    }

    if let Some(path) = &cli.dump_snapshot {
        let snapshot = last.ok_or_else(|| anyhow!("No snapshot was produced"))?;
        let json = serde_json::to_string_pretty(&snapshot).context("Failed to encode snapshot")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        info!("Snapshot written to {}", path.display());
    }

    Ok(())
}

/// Run the threaded loop, feeding autopilot input at the same rate, for
/// about `frames` frames of wall-clock time.
fn run_realtime(
    config: SimConfig,
    settings: LoopSettings,
    frames: u64,
    sensitivity: f64,
) -> Result<Option<GameStateSnapshot>> {
    let state = AppState::new();
    state.start(config, settings)?;

    let mut autopilot = Autopilot::new(sensitivity);
    let period = settings.frame_duration();
    for _ in 0..frames {
        if let Some(snapshot) = state.snapshot()? {
            let dead = snapshot.hud.death_screen_visible;
            for event in autopilot.step(&snapshot) {
                for command in map_input(event, dead) {
                    state.send(command)?;
                }
            }
        }
        std::thread::sleep(period);
    }

    let ran = state.shutdown()?;
    info!(
        "Game loop ran {ran} frames in {:.1}s",
        period.as_secs_f64() * frames as f64
    );
    state.snapshot()
}
