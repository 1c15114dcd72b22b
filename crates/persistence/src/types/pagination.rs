//! Pagination types for slice queries.
//!
//! Slices are keyset-paginated: a request names the last key it has seen
//! (or none, for the first page) and a page size, and the response carries
//! a `has_next` flag instead of a total count.

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Default number of rows per slice.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound on rows per slice unless configured otherwise.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// Configured page size bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizeLimits {
    /// Size used when the caller does not ask for one.
    pub default_size: usize,
    /// Largest size a caller may ask for.
    pub max_size: usize,
}

impl Default for PageSizeLimits {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl PageSizeLimits {
    /// Creates limits with the given default and maximum.
    pub fn new(default_size: usize, max_size: usize) -> Self {
        Self {
            default_size,
            max_size,
        }
    }

    /// Validates a requested size against these limits.
    pub fn check(&self, size: i64) -> Result<usize, QueryError> {
        match usize::try_from(size) {
            Ok(size) if size >= 1 && size <= self.max_size => Ok(size),
            _ => Err(QueryError::InvalidPageSize {
                size,
                max: self.max_size,
            }),
        }
    }
}

/// A keyset pagination request.
///
/// Built either for the first page (no cursor) or for the page after a
/// known key. The size is always within `1..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPageRequest<K> {
    cursor: Option<K>,
    size: usize,
}

impl<K: Copy> CursorPageRequest<K> {
    /// Creates a request for the first page.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidPageSize`] if `size` is not positive or
    /// exceeds `max_size`.
    pub fn first(size: i64, max_size: usize) -> Result<Self, QueryError> {
        let size = PageSizeLimits::new(DEFAULT_PAGE_SIZE, max_size).check(size)?;
        Ok(Self { cursor: None, size })
    }

    /// Creates a request for the page following `cursor`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidPageSize`] if `size` is not positive or
    /// exceeds `max_size`.
    pub fn after_id(cursor: K, size: i64, max_size: usize) -> Result<Self, QueryError> {
        let size = PageSizeLimits::new(DEFAULT_PAGE_SIZE, max_size).check(size)?;
        Ok(Self {
            cursor: Some(cursor),
            size,
        })
    }

    /// Returns the last-seen key, if any.
    pub fn cursor(&self) -> Option<K> {
        self.cursor
    }

    /// Returns the requested page size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of rows to fetch: one more than the page size, so
    /// the extra row signals that another page exists.
    pub fn fetch_size(&self) -> usize {
        self.size + 1
    }

    /// Returns true if this is a first-page request.
    pub fn is_first_page(&self) -> bool {
        self.cursor.is_none()
    }

    /// Returns true if this request carries a cursor.
    pub fn has_cursor(&self) -> bool {
        self.cursor.is_some()
    }
}

/// Metadata describing one slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceMeta {
    /// The page size that was requested.
    pub size: usize,

    /// Whether more matching rows exist beyond this slice.
    pub has_next: bool,

    /// Cursor for the next slice (the key of the last item), when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,

    /// Number of items in this slice.
    pub count: usize,
}

impl SliceMeta {
    /// Creates metadata for a slice.
    pub fn new(size: usize, has_next: bool, next_cursor: Option<String>, count: usize) -> Self {
        Self {
            size,
            has_next,
            next_cursor,
            count,
        }
    }

    /// Creates metadata for an empty slice.
    pub fn empty(size: usize) -> Self {
        Self::new(size, false, None, 0)
    }

    /// Returns true if this is the last slice.
    pub fn is_last(&self) -> bool {
        !self.has_next
    }

    /// Returns true if a cursor for the next slice is present.
    pub fn has_cursor(&self) -> bool {
        self.next_cursor.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// One slice of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceResult<T> {
    /// The items in this slice, in keyset order.
    pub content: Vec<T>,

    /// Slice metadata.
    pub slice_meta: SliceMeta,
}

impl<T> SliceResult<T> {
    /// Creates a slice from content and metadata.
    pub fn new(content: Vec<T>, slice_meta: SliceMeta) -> Self {
        Self {
            content,
            slice_meta,
        }
    }

    /// Creates an empty slice.
    pub fn empty(size: usize) -> Self {
        Self {
            content: Vec::new(),
            slice_meta: SliceMeta::empty(size),
        }
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the slice holds no items.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns true if more rows exist.
    pub fn has_next(&self) -> bool {
        self.slice_meta.has_next
    }

    /// Returns the cursor for the next slice.
    pub fn next_cursor(&self) -> Option<&str> {
        self.slice_meta.next_cursor.as_deref()
    }

    /// Maps the items, keeping the metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> SliceResult<U> {
        SliceResult {
            content: self.content.into_iter().map(f).collect(),
            slice_meta: self.slice_meta,
        }
    }
}
