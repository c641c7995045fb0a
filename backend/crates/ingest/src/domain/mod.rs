//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (RateLimitWindow, JobPosting, CandidatePosting)
//! - Domain value objects (JobStatus, PostingKey, WindowKey)
//! - Domain services (window bucketing, deduplication, retention cutoff)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
