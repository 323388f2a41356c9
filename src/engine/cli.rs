//! Command-line interface for orrery.

use std::env;

#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Write the stock scene to a file.
    Save { filename: String },
    /// Run with a scene loaded from a file.
    Load { filename: String },
    /// Run headless for a number of frames and log the final state.
    Simulate { frames: u64 },
    /// Run normally (no special command).
    Run,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CLI {
    pub command: CliCommand,
    /// `--config <file>`: engine config JSON.
    pub config: Option<String>,
    /// `--prefs <file>`: preferences JSON, created on first save.
    pub prefs: Option<String>,
}

impl CLI {
    /// Parse the process arguments.
    ///
    /// Supported commands:
    /// - `./orrery save <filename>` - Save the stock scene
    /// - `./orrery load <filename>` - Run with a scene from file
    /// - `./orrery simulate <frames>` - Headless run
    /// - `./orrery` (no args) or `./orrery run` - Run normally
    ///
    /// `--config <file>` and `--prefs <file>` may appear anywhere.
    pub fn parse() -> Self {
        Self::parse_from(env::args().skip(1))
    }

    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = None;
        let mut prefs = None;
        let mut positional: Vec<String> = Vec::new();

        let mut it = args.into_iter().map(Into::<String>::into);
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--config" | "--prefs" => {
                    let Some(value) = it.next() else {
                        eprintln!("{} needs a file name; ignoring.", arg);
                        continue;
                    };
                    if arg == "--config" {
                        config = Some(value);
                    } else {
                        prefs = Some(value);
                    }
                }
                _ => positional.push(arg),
            }
        }

        let command = match positional.as_slice() {
            [] => CliCommand::Run,
            [cmd] if cmd == "run" => CliCommand::Run,
            [cmd, filename] if cmd == "save" => CliCommand::Save {
                filename: filename.clone(),
            },
            [cmd, filename] if cmd == "load" => CliCommand::Load {
                filename: filename.clone(),
            },
            [cmd, frames] if cmd == "simulate" => match frames.parse() {
                Ok(frames) => CliCommand::Simulate { frames },
                Err(_) => {
                    eprintln!("Invalid frame count: {}. Running normally.", frames);
                    CliCommand::Run
                }
            },
            [cmd, ..] => {
                eprintln!("Unknown command: {}. Running normally.", cmd);
                CliCommand::Run
            }
        };

        CLI {
            command,
            config,
            prefs,
        }
    }
}
