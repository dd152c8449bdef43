//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace, LevelFilter};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize logging with a default level that `RUST_LOG` can still override.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_level(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
