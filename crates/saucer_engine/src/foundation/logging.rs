//! Logging utilities

pub use log::{debug, error, info, trace, warn, LevelFilter};

/// Initialize logging with a default level; `RUST_LOG` still takes precedence.
///
/// Safe to call more than once: later calls are ignored.
pub fn init_with_level(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
