//! Domain Services
//!
//! Pure policy logic: window bucketing, deduplication, retention cutoff.

use chrono::{DateTime, TimeDelta, Utc};
use platform::rate_limit::RateLimitConfig;
use std::collections::HashSet;
use std::hash::Hash;
use std::time::Duration;

use crate::domain::entities::CandidatePosting;

/// Start of the fixed window containing `now`
pub fn window_start(config: &RateLimitConfig, now: DateTime<Utc>) -> DateTime<Utc> {
    let start_ms = config.window_start_ms(now.timestamp_millis());
    DateTime::from_timestamp_millis(start_ms).unwrap_or(now)
}

/// Keep the first item for each key, preserving input order
pub fn dedupe_by_key<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Hash + Eq,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

/// Collapse postings sharing a composite key; first occurrence wins
pub fn deduplicate_postings(postings: Vec<CandidatePosting>) -> Vec<CandidatePosting> {
    dedupe_by_key(postings, |p| p.key.clone())
}

/// Instant before which non-active postings are expired
pub fn retention_cutoff(now: DateTime<Utc>, retention: Duration) -> DateTime<Utc> {
    let retention = TimeDelta::from_std(retention).unwrap_or(TimeDelta::MAX);
    now.checked_sub_signed(retention)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
