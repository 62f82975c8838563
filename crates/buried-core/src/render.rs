//! Renderer capability.
//!
//! The simulation never talks to a graphics API. It emits [`VisualCommand`]s
//! for the proxies of its entities and hands a [`GameStateSnapshot`] to the
//! renderer once per frame. Camera projection belongs to the renderer; the
//! snapshot carries the camera view it should use.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::enums::ProxyKind;
use crate::state::GameStateSnapshot;
use crate::types::Transform;

/// Identifier of a visual proxy. Derived from the generation-tagged entity
/// handle, so ids are never reused for a different entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProxyId(pub u64);

/// Appearance parameters that change over a proxy's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProxyStyle {
    /// Red damage flash on enemies.
    pub flash: bool,
    pub opacity: f64,
    /// Intensity of an attached point light (explosions).
    pub light_intensity: f64,
}

impl Default for ProxyStyle {
    fn default() -> Self {
        Self {
            flash: false,
            opacity: 1.0,
            light_intensity: 0.0,
        }
    }
}

/// Arm pitch for the enemy shamble animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LimbPose {
    pub left_arm_pitch: f64,
    pub right_arm_pitch: f64,
}

/// One change to the renderer-side scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VisualCommand {
    Spawn {
        proxy: ProxyId,
        kind: ProxyKind,
        transform: Transform,
    },
    Move {
        proxy: ProxyId,
        transform: Transform,
    },
    Style {
        proxy: ProxyId,
        style: ProxyStyle,
    },
    Pose {
        proxy: ProxyId,
        pose: LimbPose,
    },
    Despawn {
        proxy: ProxyId,
    },
}

impl VisualCommand {
    pub fn proxy(&self) -> ProxyId {
        match self {
            VisualCommand::Spawn { proxy, .. }
            | VisualCommand::Move { proxy, .. }
            | VisualCommand::Style { proxy, .. }
            | VisualCommand::Pose { proxy, .. }
            | VisualCommand::Despawn { proxy } => *proxy,
        }
    }
}

/// Anything that can display the simulation.
pub trait Renderer {
    /// Apply one scene change. Called in emission order.
    fn apply(&mut self, command: &VisualCommand);

    /// Draw a frame. Called once per frame after all commands are applied.
    fn render(&mut self, _snapshot: &GameStateSnapshot) {}
}

/// Discards everything. Used for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn apply(&mut self, _command: &VisualCommand) {}
}

/// A live proxy as seen by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedProxy {
    pub kind: ProxyKind,
    pub transform: Transform,
    pub style: ProxyStyle,
}

/// Keeps the current proxy set in memory so tests can inspect what a real
/// renderer would be showing.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub proxies: HashMap<ProxyId, RecordedProxy>,
    /// Commands addressed to proxies that were never spawned or already gone.
    pub orphan_commands: usize,
    pub frames_rendered: u64,
    pub last_snapshot: Option<GameStateSnapshot>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live proxies of the given kind.
    pub fn count(&self, kind: ProxyKind) -> usize {
        self.proxies.values().filter(|p| p.kind == kind).count()
    }
}

impl Renderer for RecordingRenderer {
    fn apply(&mut self, command: &VisualCommand) {
        match command {
            VisualCommand::Spawn {
                proxy,
                kind,
                transform,
            } => {
                self.proxies.insert(
                    *proxy,
                    RecordedProxy {
                        kind: *kind,
                        transform: *transform,
                        style: ProxyStyle::default(),
                    },
                );
            }
            VisualCommand::Move { proxy, transform } => match self.proxies.get_mut(proxy) {
                Some(p) => p.transform = *transform,
                None => self.orphan_commands += 1,
            },
            VisualCommand::Style { proxy, style } => match self.proxies.get_mut(proxy) {
                Some(p) => p.style = *style,
                None => self.orphan_commands += 1,
            },
            VisualCommand::Pose { proxy, .. } => {
                if !self.proxies.contains_key(proxy) {
                    self.orphan_commands += 1;
                }
            }
            VisualCommand::Despawn { proxy } => {
                if self.proxies.remove(proxy).is_none() {
                    self.orphan_commands += 1;
                }
            }
        }
    }

    fn render(&mut self, snapshot: &GameStateSnapshot) {
        self.frames_rendered += 1;
        self.last_snapshot = Some(snapshot.clone());
    }
}
