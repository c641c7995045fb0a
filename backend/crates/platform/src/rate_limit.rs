//! Rate Limiting Infrastructure
//!
//! Fixed-window arithmetic shared by rate limit stores. Windows are aligned
//! to the Unix epoch, so every process derives the same bucket from the same
//! wall-clock instant.

use http::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use std::time::Duration;

pub const LIMIT_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const REMAINING_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const RESET_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Rate limit configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests admitted per window
    pub max_requests: u32,
    /// Window length
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(3600),
        }
    }
}

impl RateLimitConfig {
    /// Longest window whose length in milliseconds fits an `i64`
    pub const MAX_WINDOW_SECS: u64 = i64::MAX as u64 / 1000;

    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Window length in milliseconds, clamped to `1..=i64::MAX`
    pub fn window_ms(&self) -> i64 {
        i64::try_from(self.window.as_millis())
            .unwrap_or(i64::MAX)
            .max(1)
    }

    /// Start of the window containing `now_ms`: `now - (now mod window)`
    pub fn window_start_ms(&self, now_ms: i64) -> i64 {
        now_ms - now_ms.rem_euclid(self.window_ms())
    }

    /// First instant of the next window
    pub fn window_end_ms(&self, now_ms: i64) -> i64 {
        self.window_start_ms(now_ms).saturating_add(self.window_ms())
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub limit: u32,
    /// Requests counted in the window after this check
    pub count: u32,
    pub remaining: u32,
    pub reset_at_ms: i64,
    /// Seconds until the window resets, rounded up
    pub retry_after_secs: u64,
}

impl RateLimitResult {
    /// Build a result for a window holding `count` admitted requests
    pub fn new(config: &RateLimitConfig, allowed: bool, count: u32, now_ms: i64) -> Self {
        let reset_at_ms = config.window_end_ms(now_ms);
        Self {
            allowed,
            limit: config.max_requests,
            count,
            remaining: config.max_requests.saturating_sub(count),
            reset_at_ms,
            retry_after_secs: ((reset_at_ms - now_ms).max(0) as u64).div_ceil(1000),
        }
    }

    /// `X-RateLimit-*` response headers, plus `Retry-After` when rejected
    ///
    /// The reset header carries epoch seconds.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(LIMIT_HEADER, HeaderValue::from(self.limit));
        headers.insert(REMAINING_HEADER, HeaderValue::from(self.remaining));
        headers.insert(RESET_HEADER, HeaderValue::from(self.reset_at_ms.div_euclid(1000)));
        if !self.allowed {
            headers.insert(RETRY_AFTER, HeaderValue::from(self.retry_after_secs));
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: i64 = 3_600_000;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 10);
        assert_eq!(config.window, Duration::from_secs(3600));
        assert_eq!(config.window_ms(), HOUR_MS);
    }

    #[test]
    fn test_window_start_alignment() {
        let config = RateLimitConfig::default();
        let start = 1_700_000_000_000 - 1_700_000_000_000 % HOUR_MS;

        assert_eq!(config.window_start_ms(start), start);
        assert_eq!(config.window_start_ms(start + 1), start);
        assert_eq!(config.window_start_ms(start + HOUR_MS - 1), start);
        assert_eq!(config.window_start_ms(start + HOUR_MS), start + HOUR_MS);
        assert_eq!(config.window_end_ms(start + 42), start + HOUR_MS);
    }

    #[test]
    fn test_window_start_before_epoch() {
        let config = RateLimitConfig::new(10, 60);
        assert_eq!(config.window_start_ms(-1), -60_000);
    }

    #[test]
    fn test_zero_window_does_not_panic() {
        let config = RateLimitConfig::new(10, 0);
        assert_eq!(config.window_ms(), 1);
        assert_eq!(config.window_start_ms(12_345), 12_345);
    }

    #[test]
    fn test_oversized_window_saturates_instead_of_wrapping() {
        let config = RateLimitConfig::new(10, u64::MAX);
        assert_eq!(config.window_ms(), i64::MAX);
        assert_eq!(config.window_start_ms(1_700_000_000_123), 0);
        assert_eq!(config.window_end_ms(1_700_000_000_123), i64::MAX);

        let largest = RateLimitConfig::new(10, RateLimitConfig::MAX_WINDOW_SECS);
        assert_eq!(largest.window_ms(), (RateLimitConfig::MAX_WINDOW_SECS * 1000) as i64);
    }

    #[test]
    fn test_result_remaining_and_retry_after() {
        let config = RateLimitConfig::default();
        let now = 10 * HOUR_MS + 1_500;

        let result = RateLimitResult::new(&config, true, 3, now);
        assert_eq!(result.remaining, 7);
        assert_eq!(result.reset_at_ms, 11 * HOUR_MS);
        assert_eq!(result.retry_after_secs, 3599);

        let result = RateLimitResult::new(&config, false, 12, now);
        assert_eq!(result.remaining, 0);
    }

    #[test]
    fn test_headers() {
        let config = RateLimitConfig::default();
        let now = 10 * HOUR_MS;

        let allowed = RateLimitResult::new(&config, true, 4, now).headers();
        assert_eq!(allowed[&LIMIT_HEADER], "10");
        assert_eq!(allowed[&REMAINING_HEADER], "6");
        assert_eq!(allowed[&RESET_HEADER], (11 * 3600).to_string().as_str());
        assert!(allowed.get(RETRY_AFTER).is_none());

        let rejected = RateLimitResult::new(&config, false, 10, now).headers();
        assert_eq!(rejected[&REMAINING_HEADER], "0");
        assert_eq!(rejected[RETRY_AFTER], "3600");
    }
}
