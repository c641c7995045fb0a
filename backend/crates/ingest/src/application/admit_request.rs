//! Admit Request Use Case
//!
//! Fixed-window admission control. The counter is advanced with a single
//! conditional upsert, so a request is either admitted and counted or
//! rejected with nothing written.

use crate::application::config::IngestConfig;
use crate::application::with_store_timeout;
use crate::domain::repository::RateLimitRepository;
use crate::domain::services::window_start;
use crate::domain::value_objects::WindowKey;
use crate::error::{IngestError, IngestResult};
use chrono::{DateTime, Utc};
use platform::client::ClientIdentity;
use platform::rate_limit::RateLimitResult;
use std::sync::Arc;

/// Admit Request Use Case
pub struct AdmitRequestUseCase<R>
where
    R: RateLimitRepository,
{
    rate_limit_repo: Arc<R>,
    config: Arc<IngestConfig>,
}

impl<R> AdmitRequestUseCase<R>
where
    R: RateLimitRepository,
{
    pub fn new(rate_limit_repo: Arc<R>, config: Arc<IngestConfig>) -> Self {
        Self {
            rate_limit_repo,
            config,
        }
    }

    pub async fn execute(&self, identity: &ClientIdentity) -> IngestResult<RateLimitResult> {
        self.execute_at(identity, Utc::now()).await
    }

    /// Admit or reject a request arriving at `now`
    ///
    /// Store failures (including timeouts) fail closed as
    /// `AdmissionCheckFailed`.
    pub async fn execute_at(
        &self,
        identity: &ClientIdentity,
        now: DateTime<Utc>,
    ) -> IngestResult<RateLimitResult> {
        let limits = &self.config.rate_limit;
        let now_ms = now.timestamp_millis();
        let key = WindowKey::new(identity.as_str(), window_start(limits, now));

        if limits.max_requests == 0 {
            return Err(IngestError::RateLimitExceeded(RateLimitResult::new(
                limits, false, 0, now_ms,
            )));
        }

        let updated = with_store_timeout(
            self.config.store_timeout,
            self.rate_limit_repo.increment_below(&key, limits.max_requests),
        )
        .await
        .map_err(|e| IngestError::AdmissionCheckFailed(Box::new(e)))?;

        match updated {
            Some(window) => {
                tracing::info!(
                    identifier = %key.identifier,
                    window_start = %key.window_start,
                    count = window.count,
                    max = limits.max_requests,
                    "Request admitted"
                );
                Ok(RateLimitResult::new(limits, true, window.count, now_ms))
            }
            None => {
                tracing::warn!(
                    identifier = %key.identifier,
                    window_start = %key.window_start,
                    max = limits.max_requests,
                    "Rate limit exceeded"
                );
                Err(IngestError::RateLimitExceeded(RateLimitResult::new(
                    limits,
                    false,
                    limits.max_requests,
                    now_ms,
                )))
            }
        }
    }

    /// Report current window usage without counting a request
    pub async fn usage_at(
        &self,
        identity: &ClientIdentity,
        now: DateTime<Utc>,
    ) -> IngestResult<RateLimitResult> {
        let limits = &self.config.rate_limit;
        let key = WindowKey::new(identity.as_str(), window_start(limits, now));

        let count = with_store_timeout(self.config.store_timeout, self.rate_limit_repo.find(&key))
            .await
            .map_err(|e| IngestError::AdmissionCheckFailed(Box::new(e)))?
            .map_or(0, |window| window.count);

        Ok(RateLimitResult::new(
            limits,
            count < limits.max_requests,
            count,
            now.timestamp_millis(),
        ))
    }

    /// Delete counters for windows that ended before the current one began
    pub async fn purge_stale_windows(&self, now: DateTime<Utc>) -> IngestResult<u64> {
        let limits = &self.config.rate_limit;
        let current = window_start(limits, now);
        let deleted = with_store_timeout(
            self.config.store_timeout,
            self.rate_limit_repo.purge_before(current),
        )
        .await?;

        tracing::info!(
            windows_deleted = deleted,
            before = %current,
            "Purged stale rate limit windows"
        );

        Ok(deleted)
    }
}
