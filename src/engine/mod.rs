pub mod animation_loop;
pub mod backdrop;
pub mod camera;
pub mod cli;
pub mod config;
pub mod ecs;
pub mod graphics;
pub mod preferences;
pub mod repl;
pub mod tilt;
pub mod universe;
pub mod user_input;
pub mod windowing;

pub use animation_loop::AnimationLoop;
pub use config::EngineConfig;
pub use universe::Universe;
pub use windowing::Windowing;

use std::fmt;

/// Engine-level error type.
///
/// Command failures (`BodyNotFound`, `EmptyTour`, `TourNotRunning`) are non-fatal: the caller
/// gets the error and the running animation keeps its previous state.
#[derive(Debug)]
pub enum EngineError {
    BodyNotFound(String),
    EmptyTour,
    TourNotRunning,
    DuplicateBody(String),
    UnknownParent { body: String, parent: String },
    Io(std::io::Error),
    Json(serde_json::Error),
    Windowing(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::BodyNotFound(name) => write!(f, "body not found: '{}'", name),
            EngineError::EmptyTour => write!(f, "cannot start a tour: no bodies to visit"),
            EngineError::TourNotRunning => write!(f, "tour is not running"),
            EngineError::DuplicateBody(name) => write!(f, "duplicate body name: '{}'", name),
            EngineError::UnknownParent { body, parent } => {
                write!(f, "body '{}' references unknown parent '{}'", body, parent)
            }
            EngineError::Io(e) => write!(f, "i/o error: {}", e),
            EngineError::Json(e) => write!(f, "json error: {}", e),
            EngineError::Windowing(msg) => write!(f, "windowing error: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Io(e) => Some(e),
            EngineError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e)
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Json(e)
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
