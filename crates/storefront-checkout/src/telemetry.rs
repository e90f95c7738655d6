//! Structured logging setup.

use tracing_subscriber::EnvFilter;

use crate::config::{CheckoutConfig, ConfigError};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages (wins over the config)
/// - `RUST_LOG=storefront_checkout=trace` - Trace this crate only
/// - Default: `config.log_filter`
///
/// Call once from the host application. A second call returns
/// `ConfigError::Logging` instead of panicking.
pub fn init_tracing(config: &CheckoutConfig) -> Result<(), ConfigError> {
    let filter = build_filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))
}

fn build_filter(config: &CheckoutConfig) -> Result<EnvFilter, ConfigError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .map_err(|e| ConfigError::Logging(e.to_string())),
    }
}
