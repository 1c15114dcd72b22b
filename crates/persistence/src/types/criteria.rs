//! Slice criteria: the validated filter and pagination specification
//! handed to a repository port.

use std::collections::BTreeSet;

use crate::core::{EntityId, SliceEntity};
use crate::types::CursorPageRequest;

/// A set-membership filter that distinguishes "no filter" from "empty
/// filter".
///
/// An absent list means the caller did not constrain the field. An explicit
/// list constrains it to exactly those values, so an explicit empty list
/// matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterSet<T: Ord> {
    /// No constraint.
    #[default]
    Unconstrained,
    /// Only these values match.
    Only(BTreeSet<T>),
}

impl<T: Ord> FilterSet<T> {
    /// Builds a filter from an optional list.
    pub fn from_option<I>(values: Option<I>) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        match values {
            None => FilterSet::Unconstrained,
            Some(values) => FilterSet::Only(values.into_iter().collect()),
        }
    }

    /// Builds a filter constrained to the given values.
    pub fn only<I: IntoIterator<Item = T>>(values: I) -> Self {
        FilterSet::Only(values.into_iter().collect())
    }

    /// Returns true if `value` passes this filter.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            FilterSet::Unconstrained => true,
            FilterSet::Only(set) => set.contains(value),
        }
    }

    /// Returns true if the filter constrains anything.
    pub fn is_constrained(&self) -> bool {
        matches!(self, FilterSet::Only(_))
    }

    /// Returns true if no value can pass.
    pub fn matches_nothing(&self) -> bool {
        matches!(self, FilterSet::Only(set) if set.is_empty())
    }

    /// Returns the constrained values, if any.
    pub fn values(&self) -> Option<&BTreeSet<T>> {
        match self {
            FilterSet::Unconstrained => None,
            FilterSet::Only(set) => Some(set),
        }
    }
}

/// A validated (field, word) search pair.
///
/// Holding both halves in one value makes a lone field or word
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm<F> {
    field: F,
    word: String,
}

impl<F: Copy> SearchTerm<F> {
    /// Creates a search term. The word is trimmed.
    pub fn new(field: F, word: impl AsRef<str>) -> Self {
        Self {
            field,
            word: word.as_ref().trim().to_string(),
        }
    }

    /// Returns the field searched.
    pub fn field(&self) -> F {
        self.field
    }

    /// Returns the search word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Case-insensitive substring match.
    pub fn matches(&self, text: Option<&str>) -> bool {
        text.is_some_and(|text| text.to_lowercase().contains(&self.word.to_lowercase()))
    }
}

/// Fully-resolved criteria for one slice query.
#[derive(Debug, Clone)]
pub struct SliceCriteria<E: SliceEntity> {
    ids: FilterSet<E::Id>,
    filter: E::Filter,
    search: Option<SearchTerm<E::SearchField>>,
    page: CursorPageRequest<E::Id>,
}

impl<E: SliceEntity> SliceCriteria<E> {
    /// Creates unfiltered criteria for the given page.
    pub fn new(page: CursorPageRequest<E::Id>) -> Self {
        Self {
            ids: FilterSet::Unconstrained,
            filter: E::Filter::default(),
            search: None,
            page,
        }
    }

    /// Restricts the slice to the given IDs.
    pub fn with_ids(mut self, ids: FilterSet<E::Id>) -> Self {
        self.ids = ids;
        self
    }

    /// Sets the entity-specific filter.
    pub fn with_filter(mut self, filter: E::Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the search term.
    pub fn with_search(mut self, search: Option<SearchTerm<E::SearchField>>) -> Self {
        self.search = search;
        self
    }

    /// Returns the ID filter.
    pub fn ids(&self) -> &FilterSet<E::Id> {
        &self.ids
    }

    /// Returns the entity-specific filter.
    pub fn filter(&self) -> &E::Filter {
        &self.filter
    }

    /// Returns the search term.
    pub fn search(&self) -> Option<&SearchTerm<E::SearchField>> {
        self.search.as_ref()
    }

    /// Returns the page request.
    pub fn page(&self) -> &CursorPageRequest<E::Id> {
        &self.page
    }

    /// Returns true if an ID filter is present.
    pub fn has_ids(&self) -> bool {
        self.ids.is_constrained()
    }

    /// Returns true if a search is applied.
    pub fn has_search(&self) -> bool {
        self.search.is_some()
    }

    /// Returns the page size.
    pub fn size(&self) -> usize {
        self.page.size()
    }

    /// Returns the number of rows a port should fetch.
    pub fn fetch_size(&self) -> usize {
        self.page.fetch_size()
    }

    /// Returns true if this is a first-page query.
    pub fn is_first_page(&self) -> bool {
        self.page.is_first_page()
    }

    /// Returns true if `entity` satisfies every filter and the search term.
    ///
    /// The cursor is not considered; see [`SliceCriteria::is_past_cursor`].
    pub fn matches(&self, entity: &E) -> bool {
        !entity.is_deleted()
            && self.ids.admits(&entity.id())
            && entity.matches_filter(&self.filter)
            && self
                .search
                .as_ref()
                .is_none_or(|term| term.matches(entity.search_text(term.field())))
    }

    /// Returns true if `key` lies strictly after the cursor in the entity's
    /// walk order. Always true on the first page.
    pub fn is_past_cursor(&self, key: &E::Id) -> bool {
        self.page
            .cursor()
            .is_none_or(|cursor| E::ORDER.is_after(key, &cursor))
    }

    /// Returns the raw cursor key, for diagnostics.
    pub fn raw_cursor(&self) -> Option<i64> {
        self.page.cursor().map(|c| c.raw())
    }
}
