//! Scripted input source for headless runs.
//!
//! The autopilot reads the latest snapshot and produces raw input events the
//! way a player at the keyboard would: it turns toward the nearest enemy,
//! shoots once lined up, backs off when something gets close, throws the odd
//! grenade and presses R on the death screen.

use std::f64::consts::{PI, TAU};

use buried_core::enums::EnemyState;
use buried_core::state::{EnemyView, GameStateSnapshot};
use buried_core::types::yaw_towards;

use crate::input::{InputEvent, Key, MouseButton};

/// Largest look delta sent in one frame, in input pixels.
const MAX_LOOK_PIXELS: f64 = 400.0;
/// Residual yaw error (radians) below which the bot pulls the trigger.
const FIRE_TOLERANCE: f64 = 0.01;
/// Enemies closer than this make the bot back-pedal.
const RETREAT_DISTANCE: f64 = 6.0;
/// Grenades are thrown at enemies in this distance band.
const GRENADE_BAND: (f64, f64) = (10.0, 18.0);
const GRENADE_INTERVAL_FRAMES: u64 = 240;
const STRAFE_SWITCH_FRAMES: u64 = 150;
/// Frames spent on the death screen before pressing R.
const RESTART_DELAY_FRAMES: u64 = 60;

#[derive(Debug)]
pub struct Autopilot {
    sensitivity: f64,
    frame: u64,
    dead_frames: u64,
    last_throw_frame: Option<u64>,
    held_forward: Option<Key>,
    held_strafe: Option<Key>,
}

impl Autopilot {
    pub fn new(mouse_sensitivity: f64) -> Self {
        Self {
            sensitivity: mouse_sensitivity,
            frame: 0,
            dead_frames: 0,
            last_throw_frame: None,
            held_forward: None,
            held_strafe: None,
        }
    }

    /// Input events for the next frame given the last snapshot.
    pub fn step(&mut self, snapshot: &GameStateSnapshot) -> Vec<InputEvent> {
        self.frame += 1;
        let mut events = Vec::new();

        if snapshot.hud.death_screen_visible {
            self.release_all(&mut events);
            self.dead_frames += 1;
            if self.dead_frames >= RESTART_DELAY_FRAMES {
                self.dead_frames = 0;
                tap(&mut events, Key::R);
            }
            return events;
        }
        self.dead_frames = 0;

        if !snapshot.input_captured {
            events.push(InputEvent::Click);
        }

        let camera = snapshot.camera;
        let Some(target) = nearest_enemy(snapshot) else {
            self.release_all(&mut events);
            return events;
        };
        let distance = camera.position.with_y(0.0).distance(target.position.with_y(0.0));

        // Aim: turn as far as one look delta allows, level the pitch.
        let error = wrap_angle(yaw_towards(camera.position, target.position) - camera.yaw);
        let max_turn = MAX_LOOK_PIXELS * self.sensitivity;
        let turn = error.clamp(-max_turn, max_turn);
        let dx = -turn / self.sensitivity;
        let dy = (camera.pitch / self.sensitivity).clamp(-MAX_LOOK_PIXELS, MAX_LOOK_PIXELS);
        if dx != 0.0 || dy != 0.0 {
            events.push(InputEvent::MouseMove { dx, dy });
        }
        let lined_up = (error - turn).abs() < FIRE_TOLERANCE && camera.pitch.abs() < FIRE_TOLERANCE;

        // Movement: back off from close enemies, otherwise hold position.
        let forward = (distance < RETREAT_DISTANCE).then_some(Key::S);
        self.hold(&mut events, forward, Axis::Forward);
        let strafe = if (self.frame / STRAFE_SWITCH_FRAMES) % 2 == 0 {
            Key::A
        } else {
            Key::D
        };
        self.hold(&mut events, Some(strafe), Axis::Strafe);

        if lined_up && !snapshot.hud.reloading && snapshot.hud.ammo > 0 {
            events.push(InputEvent::MouseDown {
                button: MouseButton::Left,
            });
            events.push(InputEvent::MouseUp {
                button: MouseButton::Left,
            });
        }

        let grenade_ready = self
            .last_throw_frame
            .map_or(true, |f| self.frame - f >= GRENADE_INTERVAL_FRAMES);
        if lined_up
            && grenade_ready
            && snapshot.hud.grenades > 0
            && (GRENADE_BAND.0..GRENADE_BAND.1).contains(&distance)
        {
            self.last_throw_frame = Some(self.frame);
            tap(&mut events, Key::G);
        }

        events
    }

    fn hold(&mut self, events: &mut Vec<InputEvent>, want: Option<Key>, axis: Axis) {
        let held = match axis {
            Axis::Forward => &mut self.held_forward,
            Axis::Strafe => &mut self.held_strafe,
        };
        if *held == want {
            return;
        }
        if let Some(key) = held.take() {
            events.push(InputEvent::KeyUp { key });
        }
        if let Some(key) = want {
            events.push(InputEvent::KeyDown { key, repeat: false });
        }
        *held = want;
    }

    fn release_all(&mut self, events: &mut Vec<InputEvent>) {
        self.hold(events, None, Axis::Forward);
        self.hold(events, None, Axis::Strafe);
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Forward,
    Strafe,
}

fn tap(events: &mut Vec<InputEvent>, key: Key) {
    events.push(InputEvent::KeyDown { key, repeat: false });
    events.push(InputEvent::KeyUp { key });
}

fn nearest_enemy(snapshot: &GameStateSnapshot) -> Option<&EnemyView> {
    let eye = snapshot.camera.position.with_y(0.0);
    snapshot
        .enemies
        .iter()
        .filter(|e| e.state == EnemyState::Alive)
        .min_by(|a, b| {
            let da = eye.distance_squared(a.position.with_y(0.0));
            let db = eye.distance_squared(b.position.with_y(0.0));
            da.total_cmp(&db)
        })
}

/// Wrap to (-PI, PI].
fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
