//! Route configuration for the catalog REST API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod catalog_routes;

pub use catalog_routes::{API_PREFIX, create_routes};
