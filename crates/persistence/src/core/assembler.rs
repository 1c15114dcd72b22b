//! Turns over-fetched rows into a slice.

use crate::core::{EntityId, SliceEntity};
use crate::types::{SliceMeta, SliceResult};

/// Trims the probe row, derives `has_next`, and maps rows to DTOs.
///
/// Pure and deterministic: the same rows and size always give the same
/// slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct SliceAssembler;

impl SliceAssembler {
    /// Builds a slice from rows fetched with `requested_size + 1` as limit.
    ///
    /// `has_next` is true exactly when more rows than `requested_size` came
    /// back. The extra row is dropped and never exposed. When there is a
    /// next slice, its cursor is the key of the last row kept.
    pub fn to_slice_result<E: SliceEntity>(
        &self,
        mut fetched: Vec<E>,
        requested_size: usize,
    ) -> SliceResult<E::Dto> {
        if fetched.is_empty() {
            return SliceResult::empty(requested_size);
        }

        let has_next = fetched.len() > requested_size;
        if has_next {
            fetched.truncate(requested_size);
        }

        let next_cursor = if has_next {
            fetched.last().map(|row| row.id().raw().to_string())
        } else {
            None
        };

        let content: Vec<E::Dto> = fetched.iter().map(E::to_dto).collect();
        let count = content.len();

        SliceResult::new(
            content,
            SliceMeta::new(requested_size, has_next, next_cursor, count),
        )
    }
}
