//! The repository port the slice engine reads through.

use async_trait::async_trait;

use crate::core::SliceEntity;
use crate::error::StorageResult;
use crate::types::SliceCriteria;

/// Storage port for slice queries on entity `E`.
///
/// Implementations must honor keyset semantics: rows are ordered by the
/// entity key in [`SliceEntity::ORDER`], only keys strictly after the
/// cursor are returned, and at most [`SliceCriteria::fetch_size`] rows come
/// back. Offsets are never used. Soft-deleted rows never match.
///
/// # Example
///
/// ```rust,ignore
/// let criteria = factory.create_slice_criteria::<Layer>(params)?;
/// let rows = backend.find_by_slice_criteria(&criteria).await?;
/// assert!(rows.len() <= criteria.fetch_size());
/// ```
#[async_trait]
pub trait SliceRepository<E: SliceEntity>: Send + Sync {
    /// Returns a human-readable name for this backend.
    fn backend_name(&self) -> &'static str;

    /// Fetches up to `size + 1` rows matching `criteria`, in keyset order.
    ///
    /// # Errors
    ///
    /// Returns the backend's own [`StorageError`](crate::error::StorageError);
    /// callers pass it through unchanged.
    async fn find_by_slice_criteria(&self, criteria: &SliceCriteria<E>) -> StorageResult<Vec<E>>;
}
