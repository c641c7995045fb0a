//! In-Memory Repository
//!
//! Process-local store with the same atomicity as the Postgres one: every
//! operation runs under a single lock. Used for local runs without a
//! database and by the handler tests, which can also inject latency and
//! failures.

use crate::domain::entities::{JobPosting, RateLimitWindow};
use crate::domain::repository::{PostingRepository, RateLimitRepository};
use crate::domain::value_objects::{JobStatus, WindowKey};
use crate::error::{IngestError, IngestResult};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Default)]
struct MemoryState {
    windows: Mutex<HashMap<WindowKey, u32>>,
    postings: Mutex<Vec<JobPosting>>,
    failure: Mutex<Option<String>>,
    latency: Mutex<Option<Duration>>,
}

/// Shared in-memory store; clones see the same data
#[derive(Clone, Default)]
pub struct MemoryIngestRepository {
    state: Arc<MemoryState>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryIngestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_posting(&self, posting: JobPosting) {
        lock(&self.state.postings).push(posting);
    }

    pub fn postings(&self) -> Vec<JobPosting> {
        lock(&self.state.postings).clone()
    }

    pub fn window_count(&self, key: &WindowKey) -> Option<u32> {
        lock(&self.state.windows).get(key).copied()
    }

    pub fn window_len(&self) -> usize {
        lock(&self.state.windows).len()
    }

    /// Make every following call fail until [`Self::recover`]
    pub fn fail_with(&self, message: impl Into<String>) {
        *lock(&self.state.failure) = Some(message.into());
    }

    pub fn recover(&self) {
        *lock(&self.state.failure) = None;
    }

    /// Delay every following call by `latency`
    pub fn set_latency(&self, latency: Option<Duration>) {
        *lock(&self.state.latency) = latency;
    }

    async fn round_trip(&self) -> IngestResult<()> {
        let latency = *lock(&self.state.latency);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        match lock(&self.state.failure).clone() {
            Some(message) => Err(IngestError::StoreUnavailable(message)),
            None => Ok(()),
        }
    }
}

impl RateLimitRepository for MemoryIngestRepository {
    async fn find(&self, key: &WindowKey) -> IngestResult<Option<RateLimitWindow>> {
        self.round_trip().await?;
        Ok(self
            .window_count(key)
            .map(|count| RateLimitWindow::new(key, count)))
    }

    async fn increment_below(
        &self,
        key: &WindowKey,
        max_requests: u32,
    ) -> IngestResult<Option<RateLimitWindow>> {
        self.round_trip().await?;

        let mut windows = lock(&self.state.windows);
        let current = windows.get(key).copied().unwrap_or(0);
        if current >= max_requests {
            return Ok(None);
        }
        windows.insert(key.clone(), current + 1);
        Ok(Some(RateLimitWindow::new(key, current + 1)))
    }

    async fn purge_before(&self, window_start: DateTime<Utc>) -> IngestResult<u64> {
        self.round_trip().await?;

        let mut windows = lock(&self.state.windows);
        let before = windows.len();
        windows.retain(|key, _| key.window_start >= window_start);
        Ok((before - windows.len()) as u64)
    }
}

impl PostingRepository for MemoryIngestRepository {
    async fn delete_stale(
        &self,
        statuses: &[JobStatus],
        cutoff: DateTime<Utc>,
    ) -> IngestResult<u64> {
        self.round_trip().await?;

        let mut postings = lock(&self.state.postings);
        let before = postings.len();
        postings.retain(|p| !(statuses.contains(&p.status) && p.updated_at < cutoff));
        Ok((before - postings.len()) as u64)
    }
}
