//! Axum extractors for catalog requests.
//!
//! - [`SliceQuery`] - Extract cursor, size, ID lists, filters and search terms

mod slice_query;

pub use slice_query::{CURSOR, IDS, SEARCH_FIELD, SEARCH_WORD, SIZE, SliceQuery};
