pub mod color;
pub mod repl;
pub mod repl_backend;
pub mod util;

pub use repl::Repl;
pub use repl_backend::{ReplAction, ReplBackend};
