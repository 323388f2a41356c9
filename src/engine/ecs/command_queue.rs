/**
 * Queue for user commands (keyboard, REPL)
 * which reach the universe after input has been read, before the next frame is ticked.
 */

use crate::engine::EngineResult;

/// Free-fly movement direction in camera space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FocusOn(String),
    ReleaseFocus,
    StartTour,
    StopTour,
    ToggleTour,
    TourNext,
    TourPrev,
    /// 0 (stopped) ..= 9 (full speed).
    SetSpeedLevel(u8),
    ToggleOrbits,
    SetShowOrbits(bool),
    /// Wheel notches; positive moves the eye toward its target.
    Zoom(f64),
    Move(Move),
    /// Swing the eye around its look-at point (radians).
    Orbit { yaw: f64, pitch: f64 },
}

/// Something that can execute commands (the `Universe`, or a test double).
pub trait CommandTarget {
    fn apply(&mut self, command: &Command) -> EngineResult<()>;
}

#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.commands.extend(commands);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Apply all queued commands in order.
    ///
    /// A rejected command is logged and skipped; later commands still run. Returns how many
    /// were rejected.
    pub fn flush(&mut self, target: &mut impl CommandTarget) -> usize {
        let commands = std::mem::take(&mut self.commands);
        let mut rejected = 0;
        for cmd in commands {
            if let Err(e) = target.apply(&cmd) {
                log::warn!("Command {:?} rejected: {}", cmd, e);
                rejected += 1;
            }
        }
        rejected
    }
}
