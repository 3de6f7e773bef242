//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the router's runtime
//! behavior.
//!
//! ## Environment Variables
//!
//! ### `PATHTREE_SLOW_LOOKUP_US`
//!
//! Lookups that take at least this many microseconds are logged at `warn`
//! instead of `debug`.
//!
//! Default: `1000` (1 ms)
//!
//! ### `PATHTREE_STRICT_ROUTES`
//!
//! When `true`, building a router from a route table stops at the first
//! rejected route. When `false`, rejected routes are logged and skipped.
//!
//! Default: `false`
//!
//! ## Usage
//!
//! ```rust
//! use pathtree::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Slow lookup threshold: {:?}", config.slow_lookup);
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_SLOW_LOOKUP_US: u64 = 1000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Lookups taking at least this long are logged at `warn`
    pub slow_lookup: Duration,
    /// Fail route-table builds on the first rejected route
    pub strict_routes: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            slow_lookup: Duration::from_micros(DEFAULT_SLOW_LOOKUP_US),
            strict_routes: false,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup. Unparseable values
    /// fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let slow_lookup_us = lookup("PATHTREE_SLOW_LOOKUP_US")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_SLOW_LOOKUP_US);
        let strict_routes = lookup("PATHTREE_STRICT_ROUTES")
            .map(|v| parse_bool(&v))
            .unwrap_or(false);

        RuntimeConfig {
            slow_lookup: Duration::from_micros(slow_lookup_us),
            strict_routes,
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> RuntimeConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config_from(&[]), RuntimeConfig::default());
    }

    #[test]
    fn test_reads_values() {
        let config = config_from(&[
            ("PATHTREE_SLOW_LOOKUP_US", "250"),
            ("PATHTREE_STRICT_ROUTES", "TRUE"),
        ]);
        assert_eq!(config.slow_lookup, Duration::from_micros(250));
        assert!(config.strict_routes);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("PATHTREE_SLOW_LOOKUP_US", "fast"),
            ("PATHTREE_STRICT_ROUTES", "maybe"),
        ]);
        assert_eq!(config.slow_lookup, Duration::from_micros(1000));
        assert!(!config.strict_routes);
    }
}
