//! Deduplicate Batch Use Case

use crate::domain::entities::CandidatePosting;
use crate::domain::services::deduplicate_postings;
use crate::error::{IngestError, IngestResult};
use serde_json::Value;

/// Output DTO for deduplicate batch
#[derive(Debug, Clone, PartialEq)]
pub struct DeduplicateOutput {
    /// Surviving postings, verbatim, in first-seen order
    pub jobs: Vec<Value>,
    pub received: usize,
    pub removed: usize,
}

/// Deduplicate Batch Use Case
///
/// Validation is all-or-nothing: one malformed posting rejects the batch,
/// and the error lists every offending position.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeduplicateBatchUseCase;

impl DeduplicateBatchUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, jobs: Vec<Value>) -> IngestResult<DeduplicateOutput> {
        let received = jobs.len();

        let mut candidates = Vec::with_capacity(received);
        let mut errors = Vec::new();
        for (index, body) in jobs.into_iter().enumerate() {
            match CandidatePosting::parse(index, body) {
                Ok(candidate) => candidates.push(candidate),
                Err(field_errors) => errors.extend(field_errors),
            }
        }

        if !errors.is_empty() {
            tracing::warn!(
                received = received,
                invalid_fields = errors.len(),
                "Rejected malformed posting batch"
            );
            return Err(IngestError::InvalidBatch(errors));
        }

        let unique = deduplicate_postings(candidates);
        let removed = received - unique.len();

        tracing::info!(received = received, removed = removed, "Deduplicated batch");

        Ok(DeduplicateOutput {
            jobs: unique.into_iter().map(|c| c.body).collect(),
            received,
            removed,
        })
    }
}
