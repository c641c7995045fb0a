//! Application Configuration
//!
//! Configuration for the ingestion control plane.

use platform::config::{ConfigError, env_lookup, parse_positive, parse_var};
use platform::rate_limit::RateLimitConfig;
use std::time::Duration;

/// Store URL including the access credential; unset leaves the store unconfigured
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const MAX_REQUESTS_VAR: &str = "RATE_LIMIT_MAX_REQUESTS";
pub const WINDOW_SECS_VAR: &str = "RATE_LIMIT_WINDOW_SECS";
pub const RETENTION_DAYS_VAR: &str = "RETENTION_DAYS";
pub const STORE_TIMEOUT_MS_VAR: &str = "STORE_TIMEOUT_MS";

const SECS_PER_DAY: u64 = 24 * 3600;

/// Ingest application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Admission control quota (default 10 per hour)
    pub rate_limit: RateLimitConfig,
    /// How long archived and draft postings are kept (default 30 days)
    pub retention: Duration,
    /// Upper bound for a single store call
    pub store_timeout: Duration,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            rate_limit: RateLimitConfig::default(),
            retention: Duration::from_secs(30 * SECS_PER_DAY),
            store_timeout: Duration::from_secs(5),
        }
    }
}

impl IngestConfig {
    /// Load from the process environment, defaulting unset values
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    /// Load from an arbitrary variable lookup
    pub fn from_lookup<L>(lookup: &L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_requests = parse_var(lookup, MAX_REQUESTS_VAR, defaults.rate_limit.max_requests)?;
        let window_secs = parse_positive(
            lookup,
            WINDOW_SECS_VAR,
            defaults.rate_limit.window.as_secs(),
        )?;
        if window_secs > RateLimitConfig::MAX_WINDOW_SECS {
            return Err(ConfigError::Invalid {
                name: WINDOW_SECS_VAR.to_string(),
                value: window_secs.to_string(),
                reason: format!("must be at most {}", RateLimitConfig::MAX_WINDOW_SECS),
            });
        }
        let retention_days = parse_positive(
            lookup,
            RETENTION_DAYS_VAR,
            defaults.retention.as_secs() / SECS_PER_DAY,
        )?;
        let store_timeout_ms = parse_positive(
            lookup,
            STORE_TIMEOUT_MS_VAR,
            defaults.store_timeout.as_millis() as u64,
        )?;

        Ok(Self {
            rate_limit: RateLimitConfig::new(max_requests, window_secs),
            retention: Duration::from_secs(retention_days.saturating_mul(SECS_PER_DAY)),
            store_timeout: Duration::from_millis(store_timeout_ms),
        })
    }
}
