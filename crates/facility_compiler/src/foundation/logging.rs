//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with a default filter
///
/// `RUST_LOG` still wins when it is set.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A second initialisation (tests, embedding hosts) is not an error.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
