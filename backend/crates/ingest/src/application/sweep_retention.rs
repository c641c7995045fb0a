//! Sweep Retention Use Case

use crate::application::config::IngestConfig;
use crate::application::with_store_timeout;
use crate::domain::repository::PostingRepository;
use crate::domain::services::retention_cutoff;
use crate::domain::value_objects::JobStatus;
use crate::error::{IngestError, IngestResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Output DTO for a retention sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub deleted: u64,
    pub cutoff: DateTime<Utc>,
    pub statuses: Vec<JobStatus>,
}

/// Sweep Retention Use Case
///
/// Idempotent: a second sweep with no intervening writes deletes nothing.
/// Scheduling belongs to the caller.
pub struct SweepRetentionUseCase<P>
where
    P: PostingRepository,
{
    posting_repo: Arc<P>,
    config: Arc<IngestConfig>,
}

impl<P> SweepRetentionUseCase<P>
where
    P: PostingRepository,
{
    pub fn new(posting_repo: Arc<P>, config: Arc<IngestConfig>) -> Self {
        Self {
            posting_repo,
            config,
        }
    }

    pub async fn execute(&self) -> IngestResult<SweepReport> {
        self.execute_at(Utc::now()).await
    }

    pub async fn execute_at(&self, now: DateTime<Utc>) -> IngestResult<SweepReport> {
        let cutoff = retention_cutoff(now, self.config.retention);
        let statuses = JobStatus::SWEPT;

        let deleted = with_store_timeout(
            self.config.store_timeout,
            self.posting_repo.delete_stale(&statuses, cutoff),
        )
        .await
        .map_err(|e| {
            tracing::error!(
                statuses = ?statuses,
                cutoff = %cutoff,
                error = %e,
                "Retention delete failed"
            );
            IngestError::CleanupFailed(Box::new(e))
        })?;

        tracing::info!(
            deleted = deleted,
            statuses = ?statuses,
            cutoff = %cutoff,
            "Retention sweep completed"
        );

        Ok(SweepReport {
            deleted,
            cutoff,
            statuses: statuses.to_vec(),
        })
    }
}
