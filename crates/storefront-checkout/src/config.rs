//! Checkout configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. There is no global instance: the loaded value is handed to
//! [`CheckoutService`](crate::service::CheckoutService) and
//! [`init_tracing`](crate::telemetry::init_tracing) explicitly.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use storefront_core::validation::DEFAULT_MAX_CODE_LENGTH;

/// Default `EnvFilter` directive when neither `RUST_LOG` nor
/// `STOREFRONT_LOG_FILTER` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront=debug";

/// Longest coupon code the backend schema allows.
const MAX_CODE_LENGTH_LIMIT: usize = 255;

/// Checkout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// tracing-subscriber filter directive
    pub log_filter: String,

    /// Maximum coupon code length accepted before lookup
    pub max_code_length: usize,

    /// Upper bound on any single coupon store call, in milliseconds
    pub store_timeout_ms: u64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        CheckoutConfig {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            max_code_length: DEFAULT_MAX_CODE_LENGTH,
            store_timeout_ms: 5000,
        }
    }
}

impl CheckoutConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// `load()` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CheckoutConfig::default();

        let config = CheckoutConfig {
            log_filter: lookup("STOREFRONT_LOG_FILTER").unwrap_or(defaults.log_filter),

            max_code_length: lookup("COUPON_CODE_MAX_LENGTH")
                .map(|v| v.trim().parse::<usize>())
                .transpose()
                .map_err(|_| ConfigError::InvalidValue("COUPON_CODE_MAX_LENGTH".to_string()))?
                .unwrap_or(defaults.max_code_length),

            store_timeout_ms: lookup("COUPON_STORE_TIMEOUT_MS")
                .map(|v| v.trim().parse::<u64>())
                .transpose()
                .map_err(|_| ConfigError::InvalidValue("COUPON_STORE_TIMEOUT_MS".to_string()))?
                .unwrap_or(defaults.store_timeout_ms),
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_code_length == 0 || self.max_code_length > MAX_CODE_LENGTH_LIMIT {
            return Err(ConfigError::InvalidValue("COUPON_CODE_MAX_LENGTH".to_string()));
        }

        if self.store_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue("COUPON_STORE_TIMEOUT_MS".to_string()));
        }

        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::InvalidValue("STOREFRONT_LOG_FILTER".to_string()));
        }

        Ok(())
    }

    /// Store call timeout as a Duration.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}
