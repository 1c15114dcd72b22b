//! The entity strategy the slice engine is generic over.
//!
//! Every listable entity implements [`SliceEntity`], supplying its key
//! extractor, its filter predicates, its search-field enumeration and its
//! DTO mapper. The engine itself never names a concrete entity.

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::Serialize;

use crate::error::QueryError;

/// A strongly-typed numeric entity key.
pub trait EntityId:
    Copy + Ord + Eq + Hash + Debug + Display + Send + Sync + 'static
{
    /// Wraps a raw key.
    fn from_raw(raw: i64) -> Self;

    /// Returns the raw key.
    fn raw(&self) -> i64;
}

/// Direction in which an entity's keyset is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyOrder {
    /// Smallest key first; the next page holds keys greater than the cursor.
    #[default]
    Ascending,
    /// Largest key first; the next page holds keys less than the cursor.
    Descending,
}

impl KeyOrder {
    /// Compares two keys in walk order.
    pub fn compare<K: Ord>(self, a: &K, b: &K) -> Ordering {
        match self {
            KeyOrder::Ascending => a.cmp(b),
            KeyOrder::Descending => b.cmp(a),
        }
    }

    /// Returns true if `key` comes strictly after `cursor` in walk order.
    pub fn is_after<K: Ord>(self, key: &K, cursor: &K) -> bool {
        self.compare(key, cursor) == Ordering::Greater
    }
}

/// A closed enumeration of searchable fields.
///
/// Parsing fails closed: anything not in [`SearchField::ALL`] is rejected.
pub trait SearchField: Copy + Eq + Debug + Send + Sync + 'static {
    /// Every recognized field.
    const ALL: &'static [Self];

    /// Canonical upper-case name of the field.
    fn name(&self) -> &'static str;

    /// Parses a field name, ignoring ASCII case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidSearchField`] for unknown names.
    fn parse(raw: &str) -> Result<Self, QueryError> {
        let trimmed = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| QueryError::InvalidSearchField {
                field: trimmed.to_string(),
                allowed: Self::ALL.iter().map(|f| f.name()).collect(),
            })
    }
}

/// Strategy for an entity the slice engine can paginate.
pub trait SliceEntity: Clone + Debug + Send + Sync + 'static {
    /// The unique, monotonic key the keyset walks.
    type Id: EntityId;

    /// Fields a search word may be matched against.
    type SearchField: SearchField;

    /// Validated entity-specific filters (foreign keys, enum sets).
    type Filter: Clone + Debug + Default + Send + Sync;

    /// Raw entity-specific filter input, as received from the caller.
    type FilterParams: Clone + Debug + Default + Send;

    /// The result shape handed back to callers.
    type Dto: Clone + Debug + Serialize + Send + Sync;

    /// Short name used in logs and storage diagnostics.
    const NAME: &'static str;

    /// Fixed walk direction for this entity.
    const ORDER: KeyOrder = KeyOrder::Ascending;

    /// Key extractor.
    fn id(&self) -> Self::Id;

    /// Validates raw filter input.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidFilter`] when a value cannot be parsed.
    fn build_filter(params: Self::FilterParams) -> Result<Self::Filter, QueryError>;

    /// Returns true if this entity satisfies every constrained filter.
    fn matches_filter(&self, filter: &Self::Filter) -> bool;

    /// Returns the text a search on `field` is matched against.
    fn search_text(&self, field: Self::SearchField) -> Option<&str>;

    /// Returns true if the row is soft-deleted and must never be listed.
    fn is_deleted(&self) -> bool {
        false
    }

    /// Maps the entity to its result DTO.
    fn to_dto(&self) -> Self::Dto;
}
