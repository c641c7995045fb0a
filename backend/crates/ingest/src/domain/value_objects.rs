//! Domain Value Objects
//!
//! Immutable value types for the ingestion domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a job posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Active,
    Archived,
    Draft,
}

impl JobStatus {
    /// States the retention sweep may delete. Never contains `Active`.
    pub const SWEPT: [JobStatus; 2] = [JobStatus::Archived, JobStatus::Draft];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "ACTIVE",
            JobStatus::Archived => "ARCHIVED",
            JobStatus::Draft => "DRAFT",
        }
    }

    pub fn is_swept(&self) -> bool {
        Self::SWEPT.contains(self)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job status: {0}")]
pub struct UnknownJobStatus(pub String);

impl FromStr for JobStatus {
    type Err = UnknownJobStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(JobStatus::Active),
            "ARCHIVED" => Ok(JobStatus::Archived),
            "DRAFT" => Ok(JobStatus::Draft),
            other => Err(UnknownJobStatus(other.to_string())),
        }
    }
}

/// Composite identity used for deduplication
///
/// Values are compared exactly as received: no trimming, no case folding.
/// Kept as three fields rather than a joined string so separators inside a
/// value cannot make two different postings collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostingKey {
    pub title: String,
    pub company: String,
    pub location: String,
}

impl PostingKey {
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            location: location.into(),
        }
    }
}

impl fmt::Display for PostingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.title, self.company, self.location)
    }
}

/// Lookup key of a rate limit counter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowKey {
    pub identifier: String,
    pub window_start: DateTime<Utc>,
}

impl WindowKey {
    pub fn new(identifier: impl Into<String>, window_start: DateTime<Utc>) -> Self {
        Self {
            identifier: identifier.into(),
            window_start,
        }
    }
}
