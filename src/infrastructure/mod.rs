//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - The reqwest-based backoffice API client
//! - Tokio runtime bridge for async operations

pub mod backoffice;
pub mod runtime;
