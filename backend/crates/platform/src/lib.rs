//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Client identity extraction from request headers
//! - Fixed-window rate limit arithmetic
//! - Environment configuration readers

pub mod client;
pub mod config;
pub mod rate_limit;
