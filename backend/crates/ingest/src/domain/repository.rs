//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::RateLimitWindow;
use crate::domain::value_objects::{JobStatus, WindowKey};
use crate::error::IngestResult;
use chrono::{DateTime, Utc};

/// Rate limit counter store
#[trait_variant::make(RateLimitRepository: Send)]
pub trait LocalRateLimitRepository {
    /// Read a counter without mutating it. Absence is `Ok(None)`, not an error.
    async fn find(&self, key: &WindowKey) -> IngestResult<Option<RateLimitWindow>>;

    /// Atomically create the counter at 1, or increment it while it is below
    /// `max_requests`
    ///
    /// Returns the updated window, or `None` when the counter had already
    /// reached the limit (in which case nothing was written).
    async fn increment_below(
        &self,
        key: &WindowKey,
        max_requests: u32,
    ) -> IngestResult<Option<RateLimitWindow>>;

    /// Delete counters whose window started before `window_start`
    async fn purge_before(&self, window_start: DateTime<Utc>) -> IngestResult<u64>;
}

/// Job posting store
#[trait_variant::make(PostingRepository: Send)]
pub trait LocalPostingRepository {
    /// Delete every posting in one of `statuses` last updated before `cutoff`,
    /// as a single atomic operation. Returns the number deleted.
    async fn delete_stale(&self, statuses: &[JobStatus], cutoff: DateTime<Utc>)
    -> IngestResult<u64>;
}
