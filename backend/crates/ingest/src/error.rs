//! Ingest Error Types
//!
//! This module provides ingest-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::{AppError, FieldError};
use kernel::error::kind::ErrorKind;
use platform::rate_limit::RateLimitResult;
use std::time::Duration;
use thiserror::Error;

/// Ingest-specific result type alias
pub type IngestResult<T> = Result<T, IngestError>;

/// Ingest-specific error variants
#[derive(Debug, Error)]
pub enum IngestError {
    /// Store connection settings are absent
    #[error("Missing store credentials: {0} must be set")]
    MissingStoreConfig(&'static str),

    /// Quota for the current window is used up
    #[error("Rate limit exceeded. Try again later.")]
    RateLimitExceeded(RateLimitResult),

    /// One or more postings lack required identity fields
    #[error("Malformed posting batch: {} invalid field(s)", .0.len())]
    InvalidBatch(Vec<FieldError>),

    /// Request body is not the expected JSON shape
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// A store call exceeded its time budget
    #[error("Store call timed out after {0:?}")]
    StoreTimeout(Duration),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Non-database store failure
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Counter store failed during admission; the request is not admitted
    #[error("Rate limit check failed")]
    AdmissionCheckFailed(#[source] Box<IngestError>),

    /// Retention delete failed
    #[error("Cleanup failed: {0}")]
    CleanupFailed(#[source] Box<IngestError>),
}

impl IngestError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    ///
    /// Store failures of every flavour map to 500: admission fails closed
    /// and the sweep fails loudly, the caller owns any retry.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IngestError::RateLimitExceeded(_) => ErrorKind::TooManyRequests,
            IngestError::InvalidBatch(_) => ErrorKind::UnprocessableEntity,
            IngestError::InvalidBody(_) => ErrorKind::BadRequest,
            IngestError::MissingStoreConfig(_)
            | IngestError::StoreTimeout(_)
            | IngestError::Database(_)
            | IngestError::StoreUnavailable(_)
            | IngestError::AdmissionCheckFailed(_)
            | IngestError::CleanupFailed(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether this error originates from the backing store
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            IngestError::StoreTimeout(_)
                | IngestError::Database(_)
                | IngestError::StoreUnavailable(_)
        )
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IngestError::AdmissionCheckFailed(e) => {
                tracing::error!(error = %e, "Admission denied: counter store failure");
            }
            IngestError::CleanupFailed(e) => {
                tracing::error!(error = %e, "Retention sweep failed");
            }
            IngestError::MissingStoreConfig(var) => {
                tracing::error!(variable = *var, "Store is not configured");
            }
            e if e.is_store_error() => {
                tracing::error!(error = %e, "Ingest store error");
            }
            IngestError::RateLimitExceeded(result) => {
                tracing::warn!(
                    limit = result.limit,
                    retry_after_secs = result.retry_after_secs,
                    "Ingest rate limit exceeded"
                );
            }
            _ => {
                tracing::debug!(error = %self, "Ingest error");
            }
        }
    }

    /// Caller-facing message; raw store errors are not echoed back
    fn public_message(&self) -> String {
        if self.is_store_error() {
            "Store operation failed".to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        let message = err.public_message();
        match err {
            IngestError::InvalidBatch(errors) => AppError::unprocessable(message)
                .with_errors(errors)
                .with_action("Every posting needs string title, company and location"),
            IngestError::InvalidBody(e) => AppError::from(e),
            IngestError::RateLimitExceeded(_) => {
                AppError::too_many_requests(message).with_action("Try again after the window resets")
            }
            other => AppError::new(other.kind(), message).with_source(other),
        }
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        self.log();
        let headers = match &self {
            IngestError::RateLimitExceeded(result) => Some(result.headers()),
            _ => None,
        };
        let mut response = AppError::from(self).into_response();
        if let Some(headers) = headers {
            response.headers_mut().extend(headers);
        }
        response
    }
}
