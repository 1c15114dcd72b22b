//! HTTP request handlers.
//!
//! - [`slice`] - Keyset-paginated listings of catalog entities
//! - [`health`] - Health, liveness and readiness endpoints

pub mod health;
pub mod slice;

// Re-export handlers for convenience
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use slice::{SliceResource, slice_handler};
