//! Ingest (Job Ingestion Control Plane) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database and in-memory implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Operations
//! - Admission control: fixed-window quota per client identity, fail closed
//!   on any store error
//! - Deduplication: first posting per (title, company, location) wins
//! - Retention sweep: deletes ARCHIVED/DRAFT postings past the retention age,
//!   never ACTIVE ones
//!
//! Handlers keep no state between calls; counters and postings live in the
//! store.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::IngestConfig;
pub use error::{IngestError, IngestResult};
pub use infra::memory::MemoryIngestRepository;
pub use infra::postgres::PgIngestRepository;
pub use presentation::router::{ingest_router, ingest_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
