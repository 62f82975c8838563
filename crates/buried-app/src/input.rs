//! Raw device input and the key bindings that turn it into player commands.
//!
//! Bindings: W/S forward and back, A/D strafe, Shift sprint, R reload (or
//! restart once dead), G throw, left mouse fire, right mouse aim, click to
//! capture the pointer.

use buried_core::commands::PlayerCommand;
use buried_core::enums::MoveAxis;

/// Keys the game binds. Everything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    W,
    A,
    S,
    D,
    Shift,
    R,
    G,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A raw input event as a windowing layer would report it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown { key: Key, repeat: bool },
    KeyUp { key: Key },
    MouseDown { button: MouseButton },
    MouseUp { button: MouseButton },
    MouseMove { dx: f64, dy: f64 },
    /// Click on the game surface (requests pointer capture).
    Click,
    /// The platform dropped pointer capture (e.g. Escape).
    CaptureLost,
}

/// Map one raw event to player commands. `dead` selects what R does.
///
/// Capture gating is left to the engine; releases are always forwarded so
/// no key ever sticks down.
pub fn map_input(event: InputEvent, dead: bool) -> Vec<PlayerCommand> {
    match event {
        InputEvent::KeyDown { repeat: true, .. } => Vec::new(),
        InputEvent::KeyDown { key, .. } => match key {
            Key::W => vec![move_cmd(MoveAxis::Forward, 1.0)],
            Key::S => vec![move_cmd(MoveAxis::Forward, -1.0)],
            Key::A => vec![move_cmd(MoveAxis::Right, -1.0)],
            Key::D => vec![move_cmd(MoveAxis::Right, 1.0)],
            Key::Shift => vec![PlayerCommand::Sprint { held: true }],
            Key::R if dead => vec![PlayerCommand::Restart],
            Key::R => vec![PlayerCommand::Reload],
            Key::G => vec![PlayerCommand::Throw],
            Key::Other => Vec::new(),
        },
        // Releasing either key of an axis stops that axis.
        InputEvent::KeyUp { key } => match key {
            Key::W | Key::S => vec![move_cmd(MoveAxis::Forward, 0.0)],
            Key::A | Key::D => vec![move_cmd(MoveAxis::Right, 0.0)],
            Key::Shift => vec![PlayerCommand::Sprint { held: false }],
            _ => Vec::new(),
        },
        InputEvent::MouseDown { button } => match button {
            MouseButton::Left => vec![PlayerCommand::Fire],
            MouseButton::Right => vec![PlayerCommand::AimDown],
            MouseButton::Middle => Vec::new(),
        },
        InputEvent::MouseUp {
            button: MouseButton::Right,
        } => vec![PlayerCommand::AimUp],
        InputEvent::MouseUp { .. } => Vec::new(),
        InputEvent::MouseMove { dx, dy } => vec![PlayerCommand::Look { dx, dy }],
        InputEvent::Click => vec![PlayerCommand::CaptureInput],
        InputEvent::CaptureLost => vec![PlayerCommand::ReleaseInput],
    }
}

fn move_cmd(axis: MoveAxis, value: f64) -> PlayerCommand {
    PlayerCommand::Move { axis, value }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(key: Key) -> InputEvent {
        InputEvent::KeyDown { key, repeat: false }
    }

    #[test]
    fn test_unbound_key_does_nothing() {
        assert!(map_input(down(Key::Other), false).is_empty());
        assert!(map_input(InputEvent::KeyUp { key: Key::Other }, false).is_empty());
    }

    #[test]
    fn test_movement_bindings() {
        assert_eq!(map_input(down(Key::W), false), vec![move_cmd(MoveAxis::Forward, 1.0)]);
        assert_eq!(map_input(down(Key::S), false), vec![move_cmd(MoveAxis::Forward, -1.0)]);
        assert_eq!(map_input(down(Key::A), false), vec![move_cmd(MoveAxis::Right, -1.0)]);
        assert_eq!(map_input(down(Key::D), false), vec![move_cmd(MoveAxis::Right, 1.0)]);
        assert_eq!(
            map_input(InputEvent::KeyUp { key: Key::S }, false),
            vec![move_cmd(MoveAxis::Forward, 0.0)]
        );
    }

    #[test]
    fn test_r_reloads_or_restarts() {
        assert_eq!(map_input(down(Key::R), false), vec![PlayerCommand::Reload]);
        assert_eq!(map_input(down(Key::R), true), vec![PlayerCommand::Restart]);
    }

    #[test]
    fn test_key_repeat_ignored() {
        let event = InputEvent::KeyDown {
            key: Key::G,
            repeat: true,
        };
        assert!(map_input(event, false).is_empty());
        assert_eq!(map_input(down(Key::G), false), vec![PlayerCommand::Throw]);
    }

    #[test]
    fn test_mouse_bindings() {
        let fire = InputEvent::MouseDown {
            button: MouseButton::Left,
        };
        let aim = InputEvent::MouseDown {
            button: MouseButton::Right,
        };
        assert_eq!(map_input(fire, false), vec![PlayerCommand::Fire]);
        assert_eq!(map_input(aim, false), vec![PlayerCommand::AimDown]);
        assert_eq!(
            map_input(
                InputEvent::MouseUp {
                    button: MouseButton::Right
                },
                false
            ),
            vec![PlayerCommand::AimUp]
        );
        assert!(map_input(
            InputEvent::MouseUp {
                button: MouseButton::Left
            },
            false
        )
        .is_empty());
        assert_eq!(
            map_input(InputEvent::Click, false),
            vec![PlayerCommand::CaptureInput]
        );
    }

    #[test]
    fn test_key_releases_are_release_commands() {
        for key in [Key::W, Key::S, Key::A, Key::D, Key::Shift] {
            for cmd in map_input(InputEvent::KeyUp { key }, false) {
                assert!(cmd.is_release(), "{cmd:?} should always apply");
            }
        }
        for cmd in map_input(InputEvent::CaptureLost, false) {
            assert!(cmd.is_release());
        }
    }
}
