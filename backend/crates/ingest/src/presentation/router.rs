//! Ingest Router

use crate::application::config::IngestConfig;
use crate::domain::repository::{PostingRepository, RateLimitRepository};
use crate::infra::postgres::PgIngestRepository;
use crate::presentation::handlers::{self, IngestAppState};
use axum::{Router, routing::post};
use std::sync::Arc;

/// Create the ingest router with PostgreSQL repository
///
/// Pass `None` when no database is configured.
pub fn ingest_router(repo: Option<PgIngestRepository>, config: IngestConfig) -> Router {
    ingest_router_generic(repo, config)
}

/// Create a generic ingest router for any repository implementation
pub fn ingest_router_generic<R>(repo: Option<R>, config: IngestConfig) -> Router
where
    R: RateLimitRepository + PostingRepository + Clone + Send + Sync + 'static,
{
    let state = IngestAppState {
        repo: repo.map(Arc::new),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/admission",
            post(handlers::admit::<R>).get(handlers::admission_usage::<R>),
        )
        .route("/dedupe", post(handlers::deduplicate))
        .route(
            "/retention/sweep",
            post(handlers::sweep_retention::<R>),
        )
        .with_state(state)
}
