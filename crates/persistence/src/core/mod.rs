//! Core slice engine.
//!
//! This module provides the generic pieces every list query goes through:
//!
//! - [`SliceEntity`] - the per-entity strategy (key, filters, search fields, DTO)
//! - [`QueryFactory`] - search parameters to criteria, including cursor parsing
//! - [`SliceRepository`] - the storage port (keyset fetch of `size + 1` rows)
//! - [`SliceAssembler`] - probe-row trimming and DTO mapping
//! - [`SliceService`] - the three wired together
//! - [`Clock`] - explicit time source
//!
//! # Data Flow
//!
//! ```text
//! SearchParams ──► QueryFactory ──► SliceCriteria ──► SliceRepository (fetch N+1)
//!                                                            │
//!                           SliceResult ◄── SliceAssembler ◄─┘
//! ```
//!
//! # Example: Implementing a Repository
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use canon_persistence::core::{SliceEntity, SliceRepository};
//! use canon_persistence::error::StorageResult;
//! use canon_persistence::types::SliceCriteria;
//!
//! struct VecRepository<E>(Vec<E>);
//!
//! #[async_trait]
//! impl<E: SliceEntity> SliceRepository<E> for VecRepository<E> {
//!     fn backend_name(&self) -> &'static str {
//!         "vec"
//!     }
//!
//!     async fn find_by_slice_criteria(&self, criteria: &SliceCriteria<E>) -> StorageResult<Vec<E>> {
//!         Ok(self.0
//!             .iter()
//!             .filter(|e| criteria.is_past_cursor(&e.id()) && criteria.matches(e))
//!             .take(criteria.fetch_size())
//!             .cloned()
//!             .collect())
//!     }
//! }
//! ```

mod assembler;
mod clock;
mod entity;
mod query_factory;
mod repository;
mod service;

pub use assembler::SliceAssembler;
pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::{EntityId, KeyOrder, SearchField, SliceEntity};
pub use query_factory::{QueryFactory, parse_cursor};
pub use repository::SliceRepository;
pub use service::SliceService;
