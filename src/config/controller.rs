//! # Controller Configuration
//!
//! Settings loaded from environment variables.

use crate::constants::{DEFAULT_LOG_FILTER, PENDING_DEACTIVATION_SECONDS};
use chrono::Duration;

/// Controller configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// How long a revision must stay inactive before teardown (seconds)
    pub pending_deactivation_seconds: i64,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            pending_deactivation_seconds: PENDING_DEACTIVATION_SECONDS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            pending_deactivation_seconds: parse_or_default(
                lookup("PENDING_DEACTIVATION_SECONDS"),
                defaults.pending_deactivation_seconds,
            ),
            log_filter: lookup("LOG_FILTER")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.log_filter),
        }
    }

    /// Grace period as a duration; negative values clamp to zero
    pub fn pending_deactivation(&self) -> Duration {
        Duration::seconds(self.pending_deactivation_seconds.max(0))
    }
}

/// Parse a raw value or return the default
fn parse_or_default<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}
