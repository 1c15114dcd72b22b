//! Success envelopes.

use canon_persistence::types::SliceResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wraps every successful payload with the time it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// The payload.
    pub data: T,
    /// When the response was produced.
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    /// Wraps `data`.
    pub fn new(data: T, timestamp: DateTime<Utc>) -> Self {
        Self { data, timestamp }
    }
}

/// A slice as sent over the wire.
///
/// `nextCursor` is always present, `null` on the last slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceBody<T> {
    /// The rows of this slice.
    pub content: Vec<T>,
    /// The requested slice size.
    pub size: usize,
    /// Whether another slice follows.
    pub has_next: bool,
    /// Cursor for the next slice.
    pub next_cursor: Option<String>,
}

impl<T> From<SliceResult<T>> for SliceBody<T> {
    fn from(slice: SliceResult<T>) -> Self {
        Self {
            content: slice.content,
            size: slice.slice_meta.size,
            has_next: slice.slice_meta.has_next,
            next_cursor: slice.slice_meta.next_cursor,
        }
    }
}

/// Envelope of a slice listing.
pub type SliceApiResponse<T> = ApiResponse<SliceBody<T>>;
