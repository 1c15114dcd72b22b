//! Turns raw search parameters into slice criteria.

use tracing::trace;

use crate::core::{EntityId, SearchField, SliceEntity};
use crate::error::QueryError;
use crate::types::{
    CursorPageRequest, FilterSet, PageSizeLimits, SearchParams, SearchTerm, SliceCriteria,
};

/// Builds [`SliceCriteria`] from [`SearchParams`] for any entity.
///
/// Every failure is detected here, before a repository is called.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryFactory {
    limits: PageSizeLimits,
}

impl QueryFactory {
    /// Creates a factory enforcing the given page size limits.
    pub fn new(limits: PageSizeLimits) -> Self {
        Self { limits }
    }

    /// Returns the page size limits.
    pub fn limits(&self) -> PageSizeLimits {
        self.limits
    }

    /// Validates `params` and builds criteria for entity `E`.
    ///
    /// # Errors
    ///
    /// - [`QueryError::InvalidCursor`] if the cursor is not a numeric key
    /// - [`QueryError::InvalidPageSize`] if the size is out of bounds
    /// - [`QueryError::InvalidFilter`] if an entity filter value is unknown
    /// - [`QueryError::InvalidSearchField`] if the search field is unknown
    pub fn create_slice_criteria<E: SliceEntity>(
        &self,
        params: SearchParams<E::FilterParams>,
    ) -> Result<SliceCriteria<E>, QueryError> {
        let size = params.size.unwrap_or(self.limits.default_size as i64);
        let page = self.page_request::<E>(params.cursor.as_deref(), size)?;

        let ids = FilterSet::from_option(
            params
                .ids
                .map(|ids| ids.into_iter().map(E::Id::from_raw).collect::<Vec<_>>()),
        );
        let filter = E::build_filter(params.filters)?;
        let search = search_term::<E::SearchField>(
            params.search_field.as_deref(),
            params.search_word.as_deref(),
        )?;

        trace!(
            entity = E::NAME,
            cursor = ?page.cursor(),
            size = page.size(),
            "Built slice criteria"
        );

        Ok(SliceCriteria::new(page)
            .with_ids(ids)
            .with_filter(filter)
            .with_search(search))
    }

    fn page_request<E: SliceEntity>(
        &self,
        cursor: Option<&str>,
        size: i64,
    ) -> Result<CursorPageRequest<E::Id>, QueryError> {
        match cursor.map(str::trim).filter(|c| !c.is_empty()) {
            None => CursorPageRequest::first(size, self.limits.max_size),
            Some(raw) => {
                let key = parse_cursor::<E::Id>(raw)?;
                CursorPageRequest::after_id(key, size, self.limits.max_size)
            }
        }
    }
}

/// Parses a cursor string into a key.
///
/// # Errors
///
/// Returns [`QueryError::InvalidCursor`] if `raw` is not an integer.
pub fn parse_cursor<K: EntityId>(raw: &str) -> Result<K, QueryError> {
    raw.trim()
        .parse::<i64>()
        .map(K::from_raw)
        .map_err(|_| QueryError::InvalidCursor {
            cursor: raw.to_string(),
        })
}

/// Resolves the (field, word) pair.
///
/// A blank field means no search. A present field is always validated,
/// even when the word is missing; the search only applies when both are
/// present.
fn search_term<F: SearchField>(
    field: Option<&str>,
    word: Option<&str>,
) -> Result<Option<SearchTerm<F>>, QueryError> {
    let Some(field) = field.map(str::trim).filter(|f| !f.is_empty()) else {
        return Ok(None);
    };
    let field = F::parse(field)?;
    Ok(word
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(|word| SearchTerm::new(field, word)))
}
