//! Process-wide logger setup.

use env_logger::Env;

/// Install `env_logger` as the `log` backend.
///
/// Defaults to `info`; `RUST_LOG` overrides (e.g. `RUST_LOG=orrery=trace`).
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}
