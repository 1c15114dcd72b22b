//! Canon Catalog Persistence Layer
//!
//! This crate provides cursor-based slice pagination over the coding-standards
//! catalog: tech stacks, architectures, layers, modules, conventions, coding
//! rules, class type categories and class types.
//! A single generic engine serves every entity; each entity only supplies a
//! [`SliceEntity`](core::SliceEntity) strategy.
//!
//! # Features
//!
//! - **Keyset pagination**: pages continue from the last key seen, never from an offset
//! - **Probe row**: the port fetches `size + 1` rows so `hasNext` needs no count query
//! - **Dynamic criteria**: optional ID lists, entity filters and a field-scoped search word
//! - **Fail-closed validation**: bad cursors, page sizes, search fields and filter values
//!   are rejected before storage is touched
//!
//! # Architecture
//!
//! - [`types`] - Search parameters, criteria and slice results
//! - [`error`] - Error types for all operations
//! - [`core`] - The entity strategy, the repository port and the slice pipeline
//! - [`catalog`] - The catalog entities
//! - [`backends`] - Storage implementations
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use canon_persistence::backends::memory::MemoryBackend;
//! use canon_persistence::catalog::{Layer, LayerFilterParams};
//! use canon_persistence::core::SliceService;
//! use canon_persistence::types::{PageSizeLimits, SearchParams};
//!
//! # tokio_test::block_on(async {
//! let backend = MemoryBackend::new();
//! for id in 1..=3 {
//!     backend.insert(Layer::new(id, 1, format!("L{id}"), format!("Layer {id}"))).unwrap();
//! }
//!
//! let service = SliceService::new(Arc::new(backend), PageSizeLimits::default());
//!
//! let first = service
//!     .search::<Layer>(SearchParams::<LayerFilterParams>::first(2))
//!     .await
//!     .unwrap();
//! assert_eq!(first.len(), 2);
//! assert!(first.has_next());
//!
//! let cursor = first.next_cursor().unwrap().to_string();
//! let last = service
//!     .search::<Layer>(SearchParams::<LayerFilterParams>::after(cursor, 2))
//!     .await
//!     .unwrap();
//! assert_eq!(last.len(), 1);
//! assert!(!last.has_next());
//! # });
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod catalog;
pub mod core;
pub mod error;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-export commonly used types at crate root
pub use error::{ErrorKind, QueryError, SliceError, SliceQueryResult, StorageError, StorageResult};
pub use types::{SearchParams, SliceCriteria, SliceMeta, SliceResult};

// Re-export core traits
pub use core::{Clock, SliceEntity, SliceRepository, SliceService};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
