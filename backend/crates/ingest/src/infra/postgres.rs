//! PostgreSQL Repository Implementations

use crate::domain::entities::RateLimitWindow;
use crate::domain::repository::{PostingRepository, RateLimitRepository};
use crate::domain::value_objects::{JobStatus, WindowKey};
use crate::error::IngestResult;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// PostgreSQL-backed repository for counters and postings
#[derive(Clone)]
pub struct PgIngestRepository {
    pool: PgPool,
}

impl PgIngestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RateLimitRepository for PgIngestRepository {
    async fn find(&self, key: &WindowKey) -> IngestResult<Option<RateLimitWindow>> {
        let row = sqlx::query_as::<_, RateLimitRow>(
            r#"
            SELECT identifier, window_start, count
            FROM rate_limits
            WHERE identifier = $1 AND window_start = $2
            "#,
        )
        .bind(&key.identifier)
        .bind(key.window_start)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RateLimitRow::into_window))
    }

    async fn increment_below(
        &self,
        key: &WindowKey,
        max_requests: u32,
    ) -> IngestResult<Option<RateLimitWindow>> {
        // The WHERE on the conflict branch makes the check and the increment
        // one statement: at the limit no row is returned and nothing changes.
        let row = sqlx::query_as::<_, RateLimitRow>(
            r#"
            INSERT INTO rate_limits (identifier, window_start, count)
            VALUES ($1, $2, 1)
            ON CONFLICT (identifier, window_start)
            DO UPDATE SET count = rate_limits.count + 1, updated_at = NOW()
            WHERE rate_limits.count < $3
            RETURNING identifier, window_start, count
            "#,
        )
        .bind(&key.identifier)
        .bind(key.window_start)
        .bind(i32::try_from(max_requests).unwrap_or(i32::MAX))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RateLimitRow::into_window))
    }

    async fn purge_before(&self, window_start: DateTime<Utc>) -> IngestResult<u64> {
        let deleted = sqlx::query("DELETE FROM rate_limits WHERE window_start < $1")
            .bind(window_start)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

impl PostingRepository for PgIngestRepository {
    async fn delete_stale(
        &self,
        statuses: &[JobStatus],
        cutoff: DateTime<Utc>,
    ) -> IngestResult<u64> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();

        let deleted = sqlx::query("DELETE FROM jobs WHERE status = ANY($1) AND updated_at < $2")
            .bind(&statuses)
            .bind(cutoff)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(
            deleted = deleted,
            statuses = ?statuses,
            cutoff = %cutoff,
            "Deleted stale job postings"
        );

        Ok(deleted)
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct RateLimitRow {
    identifier: String,
    window_start: DateTime<Utc>,
    count: i32,
}

impl RateLimitRow {
    fn into_window(self) -> RateLimitWindow {
        RateLimitWindow {
            identifier: self.identifier,
            window_start: self.window_start,
            count: u32::try_from(self.count).unwrap_or(0),
        }
    }
}
