//! Core value types for slice queries.
//!
//! - [`SearchParams`] - raw caller input
//! - [`CursorPageRequest`], [`PageSizeLimits`] - keyset page descriptors
//! - [`SliceCriteria`], [`FilterSet`], [`SearchTerm`] - validated criteria
//! - [`SliceMeta`], [`SliceResult`] - slice output
//!
//! # Example
//!
//! ```
//! use canon_persistence::types::{CursorPageRequest, FilterSet, SliceMeta};
//!
//! let page = CursorPageRequest::after_id(4_i64, 2, 100).unwrap();
//! assert_eq!(page.fetch_size(), 3);
//!
//! let absent: FilterSet<i64> = FilterSet::Unconstrained;
//! let empty: FilterSet<i64> = FilterSet::only(Vec::new());
//! assert!(absent.admits(&1));
//! assert!(!empty.admits(&1));
//!
//! assert!(SliceMeta::empty(20).is_last());
//! ```

mod criteria;
mod pagination;
mod search_params;

pub use criteria::{FilterSet, SearchTerm, SliceCriteria};
pub use pagination::{
    CursorPageRequest, DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE, PageSizeLimits, SliceMeta,
    SliceResult,
};
pub use search_params::SearchParams;
