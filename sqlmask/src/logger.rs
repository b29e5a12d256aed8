// sqlmask/src/logger.rs
//! Logging setup for the sqlmask binary.
//!
//! Logs go to stderr through `env_logger`. `RUST_LOG` decides the filter unless
//! a level is forced from the command line.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger. Later calls are ignored, so tests may call
/// this freely.
///
/// `Some(level)` overrides `RUST_LOG`; `None` honors it and defaults to `warn`.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(true);
    if builder.try_init().is_ok() {
        log::debug!("Logger initialized (forced level: {:?}).", level);
    }
}
