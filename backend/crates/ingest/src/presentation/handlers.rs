//! HTTP Handlers

use crate::application::admit_request::AdmitRequestUseCase;
use crate::application::config::{DATABASE_URL_VAR, IngestConfig};
use crate::application::deduplicate_batch::DeduplicateBatchUseCase;
use crate::application::sweep_retention::SweepRetentionUseCase;
use crate::domain::repository::{PostingRepository, RateLimitRepository};
use crate::error::{IngestError, IngestResult};
use crate::presentation::dto::{
    AdmissionResponse, DedupeRequest, DedupeResponse, SweepResponse, UsageResponse,
};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use chrono::Utc;
use platform::client::extract_identity;
use std::sync::Arc;

/// Shared state for ingest handlers
///
/// `repo` is `None` when no store is configured; store-backed routes then
/// answer 500 while deduplication keeps working.
#[derive(Clone)]
pub struct IngestAppState<R>
where
    R: RateLimitRepository + PostingRepository + Clone + Send + Sync + 'static,
{
    pub repo: Option<Arc<R>>,
    pub config: Arc<IngestConfig>,
}

impl<R> IngestAppState<R>
where
    R: RateLimitRepository + PostingRepository + Clone + Send + Sync + 'static,
{
    fn store(&self) -> IngestResult<Arc<R>> {
        self.repo
            .clone()
            .ok_or(IngestError::MissingStoreConfig(DATABASE_URL_VAR))
    }
}

/// POST /api/ingest/admission
pub async fn admit<R>(
    State(state): State<IngestAppState<R>>,
    headers: HeaderMap,
) -> IngestResult<impl IntoResponse>
where
    R: RateLimitRepository + PostingRepository + Clone + Send + Sync + 'static,
{
    let repo = state.store()?;
    let identity = extract_identity(&headers);

    let use_case = AdmitRequestUseCase::new(repo, state.config.clone());
    let result = use_case.execute(&identity).await?;

    Ok((
        result.headers(),
        Json(AdmissionResponse {
            message: "Request allowed",
            limit: result.limit,
            remaining: result.remaining,
            reset_at_ms: result.reset_at_ms,
        }),
    ))
}

/// GET /api/ingest/admission
pub async fn admission_usage<R>(
    State(state): State<IngestAppState<R>>,
    headers: HeaderMap,
) -> IngestResult<Json<UsageResponse>>
where
    R: RateLimitRepository + PostingRepository + Clone + Send + Sync + 'static,
{
    let repo = state.store()?;
    let identity = extract_identity(&headers);

    let use_case = AdmitRequestUseCase::new(repo, state.config.clone());
    let usage = use_case.usage_at(&identity, Utc::now()).await?;

    Ok(Json(UsageResponse {
        identifier: identity.as_str().to_string(),
        limit: usage.limit,
        count: usage.count,
        remaining: usage.remaining,
        reset_at_ms: usage.reset_at_ms,
    }))
}

/// POST /api/ingest/dedupe
///
/// The body is parsed here rather than by the `Json` extractor so every
/// malformed body gets the same problem document.
pub async fn deduplicate(body: Bytes) -> IngestResult<Json<DedupeResponse>> {
    let request: DedupeRequest = serde_json::from_slice(&body)?;

    let output = DeduplicateBatchUseCase::new().execute(request.jobs)?;

    Ok(Json(DedupeResponse {
        jobs: output.jobs,
        received: output.received,
        removed: output.removed,
    }))
}

/// POST /api/ingest/retention/sweep
pub async fn sweep_retention<R>(
    State(state): State<IngestAppState<R>>,
) -> IngestResult<Json<SweepResponse>>
where
    R: RateLimitRepository + PostingRepository + Clone + Send + Sync + 'static,
{
    let repo = state.store()?;

    let use_case = SweepRetentionUseCase::new(repo, state.config.clone());
    let report = use_case.execute().await?;

    Ok(Json(SweepResponse {
        message: "Expired jobs cleaned up successfully",
        deleted: report.deleted,
        cutoff: report.cutoff,
        statuses: report.statuses,
    }))
}
