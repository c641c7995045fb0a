//! API DTOs (Data Transfer Objects)

use crate::domain::value_objects::JobStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response for POST /api/ingest/admission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionResponse {
    pub message: &'static str,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Response for GET /api/ingest/admission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub identifier: String,
    pub limit: u32,
    pub count: u32,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Request for POST /api/ingest/dedupe
///
/// Postings stay raw JSON so unknown fields pass through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct DedupeRequest {
    pub jobs: Vec<Value>,
}

/// Response for POST /api/ingest/dedupe
#[derive(Debug, Clone, Serialize)]
pub struct DedupeResponse {
    pub jobs: Vec<Value>,
    pub received: usize,
    pub removed: usize,
}

/// Response for POST /api/ingest/retention/sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepResponse {
    pub message: &'static str,
    pub deleted: u64,
    pub cutoff: DateTime<Utc>,
    pub statuses: Vec<JobStatus>,
}
