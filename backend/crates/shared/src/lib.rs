//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by every crate in the ingestion backend:
//! - Error classification and the unified `AppError` response type
//!
//! Only things with the same meaning in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
