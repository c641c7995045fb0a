//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod admit_request;
pub mod config;
pub mod deduplicate_batch;
pub mod sweep_retention;

use crate::error::{IngestError, IngestResult};
use std::future::Future;
use std::time::Duration;

/// Run a store operation under a deadline; elapsing is a store error
pub(crate) async fn with_store_timeout<T, F>(timeout: Duration, op: F) -> IngestResult<T>
where
    F: Future<Output = IngestResult<T>>,
{
    tokio::time::timeout(timeout, op)
        .await
        .map_err(|_| IngestError::StoreTimeout(timeout))?
}
