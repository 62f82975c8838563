//! Per-frame output buffers shared by the systems.

use buried_core::events::GameEvent;
use buried_core::render::VisualCommand;

/// Visual commands and events produced during one frame. Owned by the engine
/// and reused across frames.
#[derive(Debug, Default)]
pub struct FrameOutput {
    pub visuals: Vec<VisualCommand>,
    pub events: Vec<GameEvent>,
}

impl FrameOutput {
    pub fn visual(&mut self, command: VisualCommand) {
        self.visuals.push(command);
    }

    pub fn event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
