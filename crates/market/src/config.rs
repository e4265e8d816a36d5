//! Marketplace configuration.
//!
//! Provides configuration loading from files and environment variables.

use pusaka_types::{MarketError, Result};
use serde::Deserialize;

/// Marketplace configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    /// Simulated settlement latency in milliseconds.
    ///
    /// Every settlement job waits this long after submission before it runs,
    /// standing in for blockchain confirmation time.
    #[serde(default = "default_settlement_delay_ms")]
    pub settlement_delay_ms: u64,
    /// Capacity of the settlement job queue.
    #[serde(default = "default_settlement_queue_depth")]
    pub settlement_queue_depth: usize,
    /// Whether to install the sample craft catalog at startup.
    #[serde(default)]
    pub seed_catalog: bool,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            settlement_delay_ms: default_settlement_delay_ms(),
            settlement_queue_depth: default_settlement_queue_depth(),
            seed_catalog: false,
        }
    }
}

fn default_settlement_delay_ms() -> u64 {
    2000 // matches the simulated blockchain confirmation delay
}

fn default_settlement_queue_depth() -> usize {
    1024
}

impl MarketConfig {
    /// Load configuration from a file.
    ///
    /// Supports TOML format. Environment variables override config values
    /// using the `PUSAKA__` prefix with `__` as the nesting separator
    /// (e.g., `PUSAKA__SETTLEMENT_DELAY_MS=0`).
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Config`] if the file cannot be read or the
    /// values do not deserialize.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let builder = config::Config::builder();

        let builder = if let Some(path) = path {
            builder.add_source(config::File::with_name(path))
        } else {
            builder
                .add_source(config::File::with_name("pusaka").required(false))
                .add_source(config::File::with_name("/etc/pusaka/config").required(false))
        };

        let builder = builder.add_source(
            config::Environment::with_prefix("PUSAKA").separator("__").try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| MarketError::Config { message: format!("failed to load: {e}") })?;

        config
            .try_deserialize()
            .map_err(|e| MarketError::Config { message: format!("failed to parse: {e}") })
    }

    /// Create a configuration for testing: no delay, no seed data.
    #[must_use]
    pub fn for_test() -> Self {
        Self { settlement_delay_ms: 0, settlement_queue_depth: 64, seed_catalog: false }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MarketConfig::default();
        assert_eq!(config.settlement_delay_ms, 2000);
        assert_eq!(config.settlement_queue_depth, 1024);
        assert!(!config.seed_catalog);
    }

    #[test]
    fn test_for_test_has_zero_delay() {
        let config = MarketConfig::for_test();
        assert_eq!(config.settlement_delay_ms, 0);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        // No file at the default locations and no env overrides set: the
        // serde defaults apply.
        let config = MarketConfig::load(None).unwrap();
        assert_eq!(config.settlement_queue_depth, 1024);
    }
}
