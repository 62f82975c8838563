//! Text HUD and a renderer that reports the scene through the log.

use std::collections::HashMap;

use log::{debug, info, trace};

use buried_core::enums::ProxyKind;
use buried_core::events::GameEvent;
use buried_core::render::{ProxyId, Renderer, VisualCommand};
use buried_core::state::{GameStateSnapshot, HudView};

/// One-line HUD text, e.g. `HP 73 | AMMO 24/90 | GRENADES 3`.
pub fn format_hud(hud: &HudView) -> String {
    let mut line = format!(
        "HP {} | AMMO {}/{} | GRENADES {}",
        hud.health_display(),
        hud.ammo,
        hud.reserve_ammo,
        hud.grenades
    );
    if hud.reloading {
        line.push_str(" | RELOADING");
    }
    if hud.death_screen_visible {
        line.push_str(" | YOU DIED - press R to restart");
    }
    line
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::EnemyKilled { slot, source } => info!("Enemy {slot} killed ({source:?})"),
        GameEvent::PlayerDied => info!("You died"),
        GameEvent::GameRestarted => info!("Restarted"),
        GameEvent::GrenadeExploded { position } => {
            debug!("Explosion at ({:.1}, {:.1})", position.x, position.z)
        }
        other => trace!("{other:?}"),
    }
}

/// Tracks live proxies and logs the HUD every `log_every` frames
/// (0 disables the periodic line).
#[derive(Debug, Default)]
pub struct LoggingRenderer {
    live: HashMap<ProxyId, ProxyKind>,
    frames: u64,
    log_every: u64,
}

impl LoggingRenderer {
    pub fn new(log_every: u64) -> Self {
        Self {
            log_every,
            ..Default::default()
        }
    }

    pub fn live(&self, kind: ProxyKind) -> usize {
        self.live.values().filter(|k| **k == kind).count()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LoggingRenderer {
    fn apply(&mut self, command: &VisualCommand) {
        match command {
            VisualCommand::Spawn { proxy, kind, .. } => {
                trace!("spawn {kind:?} {}", proxy.0);
                self.live.insert(*proxy, *kind);
            }
            VisualCommand::Despawn { proxy } => {
                if let Some(kind) = self.live.remove(proxy) {
                    trace!("despawn {kind:?} {}", proxy.0);
                }
            }
            _ => {}
        }
    }

    fn render(&mut self, snapshot: &GameStateSnapshot) {
        self.frames += 1;
        for event in &snapshot.events {
            log_event(event);
        }
        if self.log_every > 0 && self.frames % self.log_every == 0 {
            info!(
                "[t={:.1}s] {} | enemies {} grenades {} explosions {}",
                snapshot.time.elapsed_secs,
                format_hud(&snapshot.hud),
                self.live(ProxyKind::Enemy),
                self.live(ProxyKind::Grenade),
                self.live(ProxyKind::Explosion),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buried_core::types::Transform;

    #[test]
    fn test_hud_line() {
        let hud = HudView {
            health: 72.2,
            ammo: 24,
            reserve_ammo: 90,
            grenades: 3,
            reloading: true,
            death_screen_visible: false,
        };
        assert_eq!(format_hud(&hud), "HP 73 | AMMO 24/90 | GRENADES 3 | RELOADING");

        let dead = HudView {
            health: 0.0,
            death_screen_visible: true,
            ..hud
        };
        assert!(format_hud(&dead).contains("YOU DIED"));
    }

    #[test]
    fn test_logging_renderer_tracks_proxies() {
        let mut renderer = LoggingRenderer::new(0);
        for id in 0..3 {
            renderer.apply(&VisualCommand::Spawn {
                proxy: ProxyId(id),
                kind: ProxyKind::Enemy,
                transform: Transform::default(),
            });
        }
        renderer.apply(&VisualCommand::Despawn { proxy: ProxyId(1) });
        renderer.apply(&VisualCommand::Despawn { proxy: ProxyId(99) });
        assert_eq!(renderer.live(ProxyKind::Enemy), 2);
        assert_eq!(renderer.live(ProxyKind::Grenade), 0);

        renderer.render(&GameStateSnapshot::default());
        assert_eq!(renderer.frames(), 1);
    }
}
