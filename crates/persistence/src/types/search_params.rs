//! Raw search parameters as received from a caller.

/// Unvalidated input for one slice query.
///
/// `P` is the entity's raw filter input. Nothing here has been checked yet;
/// [`QueryFactory`](crate::core::QueryFactory) turns it into
/// [`SliceCriteria`](crate::types::SliceCriteria) or an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams<P> {
    /// Opaque cursor from the previous slice. Absent or blank means the first page.
    pub cursor: Option<String>,

    /// Requested page size. Absent means the configured default.
    pub size: Option<i64>,

    /// ID filter. `None` is unconstrained; `Some(vec![])` matches nothing.
    pub ids: Option<Vec<i64>>,

    /// Entity-specific filter input.
    pub filters: P,

    /// Search field name.
    pub search_field: Option<String>,

    /// Search word.
    pub search_word: Option<String>,
}

impl<P: Default> SearchParams<P> {
    /// Creates parameters for a first page of the given size.
    pub fn first(size: i64) -> Self {
        Self {
            size: Some(size),
            ..Default::default()
        }
    }

    /// Creates parameters for the page after `cursor`.
    pub fn after(cursor: impl Into<String>, size: i64) -> Self {
        Self {
            cursor: Some(cursor.into()),
            size: Some(size),
            ..Default::default()
        }
    }
}

impl<P> SearchParams<P> {
    /// Sets the cursor.
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Sets the ID filter.
    pub fn with_ids(mut self, ids: Option<Vec<i64>>) -> Self {
        self.ids = ids;
        self
    }

    /// Sets the entity-specific filters.
    pub fn with_filters(mut self, filters: P) -> Self {
        self.filters = filters;
        self
    }

    /// Sets the search pair.
    pub fn with_search(mut self, field: impl Into<String>, word: impl Into<String>) -> Self {
        self.search_field = Some(field.into());
        self.search_word = Some(word.into());
        self
    }

    /// Returns true when no usable cursor is present.
    pub fn is_first_page(&self) -> bool {
        self.cursor.as_deref().is_none_or(|c| c.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_after() {
        let params: SearchParams<()> = SearchParams::first(5);
        assert!(params.is_first_page());
        assert_eq!(params.size, Some(5));

        let params: SearchParams<()> = SearchParams::after("12", 5);
        assert!(!params.is_first_page());
        assert_eq!(params.cursor.as_deref(), Some("12"));
    }

    #[test]
    fn test_blank_cursor_is_first_page() {
        let params: SearchParams<()> = SearchParams::first(5).with_cursor("   ");
        assert!(params.is_first_page());
    }

    #[test]
    fn test_builders() {
        let params: SearchParams<()> = SearchParams::first(5)
            .with_ids(Some(vec![]))
            .with_search("NAME", "gear");
        assert_eq!(params.ids, Some(vec![]));
        assert_eq!(params.search_field.as_deref(), Some("NAME"));
        assert_eq!(params.search_word.as_deref(), Some("gear"));
    }
}
