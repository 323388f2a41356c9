//! Input handling (winit -> engine commands).
//!
//! `UserInput` folds window events into an `InputState`; `commands_for_frame` turns that state
//! into `Command`s once per frame, so `Windowing` never interprets keys itself.
//!
//! Bindings use physical key positions, so the layout does not move them.

use std::collections::HashSet;

use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::engine::ecs::command_queue::{Command, Move};

/// Pixels of trackpad scroll that count as one wheel notch.
const PIXELS_PER_NOTCH: f64 = 40.0;

/// Camera orbit per pixel of left-button drag.
const ORBIT_RADIANS_PER_PIXEL: f64 = 0.005;

/// Snapshot of user input.
///
/// - held keys (`keys_down`) drive free-fly movement every frame
/// - keys pressed since the last frame fire one-shot commands
/// - wheel notches and drag distance accumulate until `begin_frame`
#[derive(Default, Debug, Clone)]
pub struct InputState {
    pub keys_down: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,

    /// Accumulated vertical wheel notches since last `begin_frame`.
    pub wheel_notches: f64,

    /// Left button held.
    pub dragging: bool,
    /// Cursor position in physical pixels (as reported by winit).
    pub cursor_pos: Option<(f64, f64)>,
    /// Cursor travel while dragging since last `begin_frame`.
    pub drag_delta: (f64, f64),
}

impl InputState {
    /// Clears per-frame transition state.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.wheel_notches = 0.0;
        self.drag_delta = (0.0, 0.0);
    }

    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        if let (true, Some((px, py))) = (self.dragging, self.cursor_pos) {
            self.drag_delta.0 += x - px;
            self.drag_delta.1 += y - py;
        }
        self.cursor_pos = Some((x, y));
    }

    pub fn key_event(&mut self, code: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.keys_down.insert(code) {
                    self.keys_pressed.insert(code);
                }
            }
            ElementState::Released => {
                self.keys_down.remove(&code);
            }
        }
    }
}

/// Stateful input event processor.
#[derive(Default, Debug, Clone)]
pub struct UserInput {
    state: InputState,
}

impl UserInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.state.begin_frame();
    }

    /// Feed a winit event into this input handler.
    ///
    /// Returns `true` if the event was recognized/consumed as input.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.state.key_event(code, event.state);
                }
                true
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.state.dragging = *state == ElementState::Pressed;
                true
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.state.cursor_moved(position.x, position.y);
                true
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.state.wheel_notches += match delta {
                    MouseScrollDelta::LineDelta(_, y) => f64::from(*y),
                    MouseScrollDelta::PixelDelta(pos) => pos.y / PIXELS_PER_NOTCH,
                };
                true
            }

            // Keys and buttons held while the window loses focus never report a release.
            WindowEvent::Focused(false) => {
                self.state.keys_down.clear();
                self.state.dragging = false;
                false
            }

            _ => false,
        }
    }

    pub fn commands_for_frame(&self) -> Vec<Command> {
        commands_for_frame(&self.state)
    }
}

fn digit(code: KeyCode) -> Option<u8> {
    let level = match code {
        KeyCode::Digit0 => 0,
        KeyCode::Digit1 => 1,
        KeyCode::Digit2 => 2,
        KeyCode::Digit3 => 3,
        KeyCode::Digit4 => 4,
        KeyCode::Digit5 => 5,
        KeyCode::Digit6 => 6,
        KeyCode::Digit7 => 7,
        KeyCode::Digit8 => 8,
        KeyCode::Digit9 => 9,
        _ => return None,
    };
    Some(level)
}

/// One-shot binding for a key press.
pub fn command_for_key(code: KeyCode) -> Option<Command> {
    if let Some(level) = digit(code) {
        return Some(Command::SetSpeedLevel(level));
    }
    let focus = |name: &str| Some(Command::FocusOn(name.to_owned()));
    match code {
        KeyCode::Escape => Some(Command::ReleaseFocus),
        KeyCode::KeyP => Some(Command::ToggleOrbits),
        KeyCode::KeyT => Some(Command::ToggleTour),
        KeyCode::BracketRight => Some(Command::TourNext),
        KeyCode::BracketLeft => Some(Command::TourPrev),
        KeyCode::KeyM => focus("Mercury"),
        KeyCode::KeyV => focus("Venus"),
        KeyCode::KeyE => focus("Earth"),
        KeyCode::KeyR => focus("Mars"),
        KeyCode::KeyJ => focus("Jupiter"),
        KeyCode::KeyS => focus("Saturn"),
        KeyCode::KeyU => focus("Uranus"),
        KeyCode::KeyN => focus("Neptune"),
        _ => None,
    }
}

/// Free-fly direction while `code` is held.
pub fn move_for_key(code: KeyCode) -> Option<Move> {
    match code {
        KeyCode::ArrowLeft => Some(Move::Left),
        KeyCode::ArrowRight => Some(Move::Right),
        KeyCode::ArrowUp => Some(Move::Up),
        KeyCode::ArrowDown => Some(Move::Down),
        KeyCode::KeyQ => Some(Move::Forward),
        KeyCode::KeyA => Some(Move::Backward),
        _ => None,
    }
}

/// Commands for one frame: presses first, then held movement, then orbit drag, then zoom.
pub fn commands_for_frame(state: &InputState) -> Vec<Command> {
    let mut commands: Vec<Command> =
        state.keys_pressed.iter().copied().filter_map(command_for_key).collect();

    let mut moves: Vec<Move> = state.keys_down.iter().copied().filter_map(move_for_key).collect();
    // HashSet order is arbitrary; keep the frame deterministic.
    moves.sort_by_key(|m| *m as u8);
    commands.extend(moves.into_iter().map(Command::Move));

    let (dx, dy) = state.drag_delta;
    if dx != 0.0 || dy != 0.0 {
        // Drag right spins the scene right; drag down tips the eye toward the top view.
        commands.push(Command::Orbit {
            yaw: dx * ORBIT_RADIANS_PER_PIXEL,
            pitch: dy * ORBIT_RADIANS_PER_PIXEL,
        });
    }

    if state.wheel_notches != 0.0 {
        commands.push(Command::Zoom(state.wheel_notches));
    }
    commands
}
