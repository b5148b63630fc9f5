//! Logging setup

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global `tracing` subscriber. `RUST_LOG` takes precedence over
/// the configured level.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
