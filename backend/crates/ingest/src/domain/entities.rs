//! Domain Entities
//!
//! Core business entities for the ingestion control plane.

use chrono::{DateTime, Utc};
use kernel::error::app_error::FieldError;
use serde_json::Value;

use crate::domain::value_objects::{JobStatus, PostingKey, WindowKey};

/// Request volume of one client within one fixed window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitWindow {
    pub identifier: String,
    pub window_start: DateTime<Utc>,
    pub count: u32,
}

impl RateLimitWindow {
    pub fn new(key: &WindowKey, count: u32) -> Self {
        Self {
            identifier: key.identifier.clone(),
            window_start: key.window_start,
            count,
        }
    }

    pub fn key(&self) -> WindowKey {
        WindowKey::new(self.identifier.clone(), self.window_start)
    }
}

/// Stored job posting, reduced to the fields the control plane touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPosting {
    pub key: PostingKey,
    pub status: JobStatus,
    pub updated_at: DateTime<Utc>,
}

impl JobPosting {
    pub fn new(key: PostingKey, status: JobStatus, updated_at: DateTime<Utc>) -> Self {
        Self {
            key,
            status,
            updated_at,
        }
    }

    /// Whether the retention policy requires this posting to be deleted
    pub fn is_expired(&self, cutoff: DateTime<Utc>) -> bool {
        self.status.is_swept() && self.updated_at < cutoff
    }
}

/// Fields every candidate posting must carry as strings
pub const REQUIRED_FIELDS: [&str; 3] = ["title", "company", "location"];

/// A posting submitted for deduplication
///
/// `body` is kept verbatim so arbitrary passthrough fields survive.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePosting {
    pub key: PostingKey,
    pub body: Value,
}

impl CandidatePosting {
    /// Validate a raw posting at `index` in its batch
    ///
    /// Every violation is reported, not just the first.
    pub fn parse(index: usize, body: Value) -> Result<Self, Vec<FieldError>> {
        let Some(object) = body.as_object() else {
            return Err(vec![
                FieldError::new("posting", "must be a JSON object").at(index),
            ]);
        };

        let mut errors = Vec::new();
        let mut values = Vec::with_capacity(REQUIRED_FIELDS.len());
        for field in REQUIRED_FIELDS {
            match object.get(field) {
                Some(Value::String(s)) => values.push(s.clone()),
                None | Some(Value::Null) => {
                    errors.push(FieldError::new(field, "is required").at(index))
                }
                Some(_) => errors.push(FieldError::new(field, "must be a string").at(index)),
            }
        }

        match <[String; 3]>::try_from(values) {
            Ok([title, company, location]) if errors.is_empty() => Ok(Self {
                key: PostingKey::new(title, company, location),
                body,
            }),
            _ => Err(errors),
        }
    }
}
