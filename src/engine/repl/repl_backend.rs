use std::io::Write;

use crate::engine::Universe;
use crate::engine::ecs::{Command, CommandQueue};

use super::util;

/// What one REPL line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplAction {
    /// Changes state; queued and applied before the next frame.
    Command(Command),
    List,
    Status,
    Help,
    Clear,
}

/// Runs REPL lines against the universe.
///
/// Called from the main thread between frames, after lines arrive from the stdin thread.
/// Read-only actions print immediately; commands go through the shared `CommandQueue`.
#[derive(Debug, Default)]
pub struct ReplBackend;

impl ReplBackend {
    pub fn new() -> Self {
        Self
    }

    /// Parse one line. `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<ReplAction>, String> {
        let mut it = line.split_whitespace();
        let Some(verb) = it.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = it.collect();

        let action = match (verb, rest.as_slice()) {
            ("help", _) => ReplAction::Help,
            ("ls", []) => ReplAction::List,
            ("status", []) => ReplAction::Status,
            ("clear" | "cls", []) => ReplAction::Clear,
            ("release", []) => ReplAction::Command(Command::ReleaseFocus),
            ("focus", []) => return Err("usage: focus <name>".into()),
            // Body names may contain spaces ("Saturn Rings").
            ("focus", name) => ReplAction::Command(Command::FocusOn(name.join(" "))),
            ("tour", [sub]) => ReplAction::Command(match *sub {
                "start" => Command::StartTour,
                "stop" => Command::StopTour,
                "next" => Command::TourNext,
                "prev" => Command::TourPrev,
                other => return Err(format!("tour: unknown subcommand '{}'", other)),
            }),
            ("tour", _) => return Err("usage: tour start|stop|next|prev".into()),
            ("speed", [level]) => match level.parse::<u8>() {
                Ok(level) if level <= 9 => ReplAction::Command(Command::SetSpeedLevel(level)),
                _ => return Err(format!("speed: expected 0-9, got '{}'", level)),
            },
            ("speed", _) => return Err("usage: speed <0-9>".into()),
            ("orbits", []) => ReplAction::Command(Command::ToggleOrbits),
            ("orbits", ["on"]) => ReplAction::Command(Command::SetShowOrbits(true)),
            ("orbits", ["off"]) => ReplAction::Command(Command::SetShowOrbits(false)),
            ("orbits", _) => return Err("usage: orbits [on|off]".into()),
            (verb, _) => return Err(format!("unknown command: {}", verb)),
        };
        Ok(Some(action))
    }

    /// Execute a single REPL line, writing any output to `out`.
    pub fn exec(
        &mut self,
        universe: &Universe,
        line: &str,
        queue: &mut CommandQueue,
        out: &mut impl Write,
    ) -> std::io::Result<()> {
        let action = match Self::parse(line.trim()) {
            Ok(Some(action)) => action,
            Ok(None) => return Ok(()),
            Err(e) => return writeln!(out, "🪐 {}", e),
        };

        match action {
            ReplAction::Command(cmd) => {
                log::debug!("REPL queued {:?}", cmd);
                queue.push(cmd);
            }
            ReplAction::List => {
                let focused = universe.systems.camera.focus();
                for (i, id) in universe.world.ids().iter().copied().enumerate() {
                    let is_focused = Some(id) == focused;
                    if let Some(line) = util::format_ls_line(&universe.world, i, id, is_focused) {
                        writeln!(out, "{}", line)?;
                    }
                }
            }
            ReplAction::Status => Self::write_status(universe, out)?,
            ReplAction::Help => {
                writeln!(out, "🪐 Commands:")?;
                writeln!(out, "🪐   focus <name>")?;
                writeln!(out, "🪐   release")?;
                writeln!(out, "🪐   tour start|stop|next|prev")?;
                writeln!(out, "🪐   speed <0-9>")?;
                writeln!(out, "🪐   orbits [on|off]")?;
                writeln!(out, "🪐   ls")?;
                writeln!(out, "🪐   status")?;
                writeln!(out, "🪐   clear")?;
            }
            ReplAction::Clear => {
                // Clear screen, home the cursor, then drop scrollback (3J).
                write!(out, "\x1b[2J\x1b[H\x1b[3J")?;
                out.flush()?;
            }
        }
        Ok(())
    }

    fn write_status(universe: &Universe, out: &mut impl Write) -> std::io::Result<()> {
        let pose = universe.camera_pose();
        writeln!(
            out,
            "🪐 speed {} (x{:.3})  orbits {}",
            universe.speed_level(),
            universe.speed_multiplier(),
            if universe.show_orbits() { "on" } else { "off" }
        )?;
        writeln!(
            out,
            "🪐 focus {}{}",
            universe.focused_body().unwrap_or("-"),
            if universe.is_transitioning() { " (moving)" } else { "" }
        )?;
        match (universe.tour_stop(), &universe.visuals.tour) {
            (Some(stop), Some(tour)) => writeln!(
                out,
                "🪐 tour at {} ({}/{}), {:.1}s of {:.1}s",
                stop,
                tour.stop + 1,
                tour.stops,
                tour.time_at_current,
                tour.dwell_duration
            )?,
            _ => writeln!(out, "🪐 tour stopped")?,
        }
        writeln!(
            out,
            "🪐 camera ({:.1}, {:.1}, {:.1}) -> ({:.1}, {:.1}, {:.1})",
            pose.position.x,
            pose.position.y,
            pose.position.z,
            pose.look_at.x,
            pose.look_at.y,
            pose.look_at.z
        )
    }

    /// Execute all queued lines, printing to stdout.
    pub fn exec_all<I>(&mut self, universe: &Universe, lines: I, queue: &mut CommandQueue)
    where
        I: IntoIterator<Item = String>,
    {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for line in lines {
            if let Err(e) = self.exec(universe, &line, queue, &mut out) {
                log::warn!("REPL output failed: {}", e);
            }
        }
    }
}
