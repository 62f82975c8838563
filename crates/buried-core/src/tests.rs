#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::commands::PlayerCommand;
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::render::{ProxyId, ProxyStyle, RecordingRenderer, Renderer, VisualCommand};
    use crate::state::{GameStateSnapshot, HudView};
    use crate::tuning::{GameTuning, TuningError};
    use crate::types::*;

    // ---- Health ----

    #[test]
    fn test_health_damage_clamps_at_zero() {
        let mut health = Health::full(100.0);
        assert_eq!(health.apply_damage(30.0), DamageOutcome::Wounded);
        assert_eq!(health.current, 70.0);
        assert_eq!(health.apply_damage(500.0), DamageOutcome::Killed);
        assert_eq!(health.current, 0.0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_health_killed_reported_once() {
        let mut health = Health::full(50.0);
        assert_eq!(health.apply_damage(50.0), DamageOutcome::Killed);
        assert_eq!(health.apply_damage(10.0), DamageOutcome::Ignored);
        assert_eq!(health.apply_damage(0.0), DamageOutcome::Ignored);
        assert_eq!(health.current, 0.0);
    }

    #[test]
    fn test_health_rejects_bad_amounts() {
        let mut health = Health::full(100.0);
        assert_eq!(health.apply_damage(-5.0), DamageOutcome::Ignored);
        assert_eq!(health.apply_damage(f64::NAN), DamageOutcome::Ignored);
        assert_eq!(health.apply_damage(f64::INFINITY), DamageOutcome::Ignored);
        assert_eq!(health.current, 100.0);
    }

    #[test]
    fn test_health_damage_matches_max_formula() {
        for &(h, d) in &[(100.0, 0.0), (100.0, 99.5), (40.0, 40.0), (10.0, 12.5)] {
            let mut health = Health::full(h);
            let outcome = health.apply_damage(d);
            let expected: f64 = (h - d).max(0.0);
            assert_eq!(health.current, expected);
            assert_eq!(outcome == DamageOutcome::Killed, expected == 0.0);
        }
    }

    #[test]
    fn test_health_heal_caps_at_max_and_skips_dead() {
        let mut health = Health::full(100.0);
        health.apply_damage(5.0);
        health.heal(50.0);
        assert_eq!(health.current, 100.0);

        health.apply_damage(100.0);
        health.heal(50.0);
        assert_eq!(health.current, 0.0);
    }

    // ---- Frame timing ----

    #[test]
    fn test_clamp_frame_dt() {
        assert_eq!(clamp_frame_dt(0.016, 0.1), 0.016);
        assert_eq!(clamp_frame_dt(5.0, 0.1), 0.1);
        assert_eq!(clamp_frame_dt(-1.0, 0.1), 0.0);
        assert_eq!(clamp_frame_dt(f64::NAN, 0.1), 0.0);
        assert_eq!(clamp_frame_dt(f64::INFINITY, 0.1), 0.0);
    }

    #[test]
    fn test_frame_clock_first_tick_is_zero_and_stalls_clamp() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(10.0), 0.0);
        assert!((clock.tick(10.25) - 0.1).abs() < 1e-12);
        assert!((clock.tick(10.3) - 0.05).abs() < 1e-9);
        // Clock going backwards never produces a negative delta.
        assert_eq!(clock.tick(9.0), 0.0);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..8 {
            time.advance(0.125);
        }
        assert_eq!(time.tick, 8);
        assert_eq!(time.elapsed_secs, 1.0);
    }

    // ---- Orientation ----

    #[test]
    fn test_view_forward_axes() {
        let f = view_forward(0.0, 0.0);
        assert!((f - DVec3::new(0.0, 0.0, -1.0)).length() < 1e-12);

        let left = view_forward(std::f64::consts::FRAC_PI_2, 0.0);
        assert!((left - DVec3::new(-1.0, 0.0, 0.0)).length() < 1e-12);

        let up = view_forward(0.3, std::f64::consts::FRAC_PI_2);
        assert!((up - DVec3::Y).length() < 1e-12);

        let v = view_forward(1.234, -0.7);
        assert!((v.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_flat_basis_ignores_pitch_and_is_orthonormal() {
        for &yaw in &[0.0, 0.5, -2.0, 3.0] {
            let f = flat_forward(yaw);
            let r = flat_right(yaw);
            assert_eq!(f.y, 0.0);
            assert_eq!(r.y, 0.0);
            assert!((f.length() - 1.0).abs() < 1e-12);
            assert!(f.dot(r).abs() < 1e-12);
            assert!((f - view_forward(yaw, 0.0)).length() < 1e-12);
        }
    }

    #[test]
    fn test_yaw_towards_faces_target() {
        let from = DVec3::new(1.0, 1.0, 1.0);
        let to = DVec3::new(4.0, 7.0, -3.0);
        let yaw = yaw_towards(from, to);
        let dir = (to - from).with_y(0.0).normalize();
        assert!((flat_forward(yaw) - dir).length() < 1e-12);
        assert_eq!(yaw_towards(from, from), 0.0);
    }

    // ---- Commands ----

    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::CaptureInput,
            PlayerCommand::Look { dx: 4.0, dy: -2.0 },
            PlayerCommand::Move {
                axis: MoveAxis::Forward,
                value: 1.0,
            },
            PlayerCommand::Sprint { held: true },
            PlayerCommand::AimDown,
            PlayerCommand::Fire,
            PlayerCommand::Reload,
            PlayerCommand::Throw,
            PlayerCommand::Restart,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(*cmd, back);
        }
    }

    #[test]
    fn test_release_commands() {
        assert!(PlayerCommand::AimUp.is_release());
        assert!(PlayerCommand::Sprint { held: false }.is_release());
        assert!(PlayerCommand::Move {
            axis: MoveAxis::Right,
            value: 0.0
        }
        .is_release());
        assert!(!PlayerCommand::Move {
            axis: MoveAxis::Right,
            value: -1.0
        }
        .is_release());
        assert!(!PlayerCommand::Fire.is_release());
        assert!(!PlayerCommand::Restart.is_release());
    }

    // ---- Tuning ----

    #[test]
    fn test_tuning_defaults_validate() {
        let tuning = GameTuning::default();
        tuning.validate().unwrap();
        assert_eq!(tuning.weapon.max_ammo, 30);
        assert_eq!(tuning.enemy.count, 8);
        assert_eq!(tuning.grenade.fuse_time, 3.0);
    }

    #[test]
    fn test_tuning_partial_override() {
        let tuning =
            GameTuning::from_json_str(r#"{ "weapon": { "max_ammo": 45 }, "enemy": { "count": 3 } }"#)
                .unwrap();
        assert_eq!(tuning.weapon.max_ammo, 45);
        assert_eq!(tuning.weapon.reserve_ammo, 90);
        assert_eq!(tuning.enemy.count, 3);
        assert_eq!(tuning.player, GameTuning::default().player);
    }

    #[test]
    fn test_tuning_rejects_invalid_values() {
        let err = GameTuning::from_json_str(r#"{ "weapon": { "max_ammo": 0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "weapon.max_ammo",
                ..
            }
        ));

        let err = GameTuning::from_json_str(r#"{ "grenade": { "explosion_radius": -1 } }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { .. }));

        let err = GameTuning::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_tuning_missing_file_is_io_error() {
        let err = GameTuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
        assert!(err.to_string().contains("tuning.json"));
    }

    #[test]
    fn test_tuning_file_with_invalid_values_is_rejected() {
        let path = std::env::temp_dir().join(format!("buried-tuning-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "enemy": { "speed": -2.5 } }"#).unwrap();
        let result = GameTuning::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            result,
            Err(TuningError::Invalid {
                field: "enemy.speed",
                ..
            })
        ));
    }

    // ---- Renderer ----

    #[test]
    fn test_recording_renderer_tracks_proxies() {
        let mut renderer = RecordingRenderer::new();
        let id = ProxyId(7);
        renderer.apply(&VisualCommand::Spawn {
            proxy: id,
            kind: ProxyKind::Enemy,
            transform: Transform::at(DVec3::new(1.0, 1.0, 1.0)),
        });
        renderer.apply(&VisualCommand::Style {
            proxy: id,
            style: ProxyStyle {
                flash: true,
                ..Default::default()
            },
        });
        assert_eq!(renderer.count(ProxyKind::Enemy), 1);
        assert!(renderer.proxies[&id].style.flash);

        renderer.apply(&VisualCommand::Despawn { proxy: id });
        assert_eq!(renderer.count(ProxyKind::Enemy), 0);
        assert_eq!(renderer.orphan_commands, 0);

        renderer.apply(&VisualCommand::Despawn { proxy: id });
        assert_eq!(renderer.orphan_commands, 1);
    }

    // ---- Snapshot ----

    #[test]
    fn test_snapshot_serde() {
        let snapshot = GameStateSnapshot {
            events: vec![GameEvent::PlayerDied, GameEvent::ReloadStarted],
            ..Default::default()
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time, back.time);
        assert_eq!(back.events, snapshot.events);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    #[test]
    fn test_hud_health_rounds_up() {
        let hud = HudView {
            health: 24.2,
            ..Default::default()
        };
        assert_eq!(hud.health_display(), 25);
        let hud = HudView::default();
        assert_eq!(hud.health_display(), 0);
    }
}
