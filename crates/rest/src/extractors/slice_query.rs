//! Slice query extractor.
//!
//! Reads the raw query string so list parameters can arrive either
//! comma-separated (`ids=1,2`) or repeated (`ids=1&ids=2`), and so a present
//! but empty list (`ids=`) stays distinguishable from an absent one.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, RawQuery},
    http::request::Parts,
};
use canon_persistence::error::QueryError;
use canon_persistence::types::SearchParams;

/// Query parameter holding the cursor.
pub const CURSOR: &str = "cursor";
/// Query parameter holding the slice size.
pub const SIZE: &str = "size";
/// Query parameter holding the ID filter.
pub const IDS: &str = "ids";
/// Query parameter naming the search field.
pub const SEARCH_FIELD: &str = "searchField";
/// Query parameter holding the search word.
pub const SEARCH_WORD: &str = "searchWord";

/// Axum extractor for slice query parameters.
///
/// Extraction never fails; typed accessors report invalid values as
/// [`QueryError`]s so they surface as problem details.
///
/// # Example
///
/// ```rust,ignore
/// use canon_rest::extractors::SliceQuery;
///
/// async fn list_handler(query: SliceQuery) {
///     let ids = query.id_list("ids")?;
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SliceQuery {
    pairs: Vec<(String, String)>,
}

impl SliceQuery {
    /// Parses a raw query string.
    pub fn parse(query: &str) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// Returns the first value of a scalar parameter, trimmed. Blank values
    /// count as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Returns true if the parameter appears at all.
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == name)
    }

    /// Returns every value of a list parameter.
    ///
    /// `None` when the parameter is absent; `Some(vec![])` when it is present
    /// with no values.
    pub fn list(&self, name: &str) -> Option<Vec<String>> {
        if !self.contains(name) {
            return None;
        }
        Some(
            self.pairs
                .iter()
                .filter(|(k, _)| k == name)
                .flat_map(|(_, v)| v.split(','))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    /// Returns every value of a numeric key list.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidFilter`] naming the parameter if a value
    /// is not an integer.
    pub fn id_list(&self, name: &str) -> Result<Option<Vec<i64>>, QueryError> {
        self.list(name)
            .map(|values| {
                values
                    .into_iter()
                    .map(|value| {
                        value.parse::<i64>().map_err(|_| QueryError::InvalidFilter {
                            filter: name.to_string(),
                            value,
                        })
                    })
                    .collect()
            })
            .transpose()
    }

    /// Returns the requested slice size.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedPageSize`] if the value is not an
    /// integer. Range checks happen in the query factory.
    pub fn size(&self) -> Result<Option<i64>, QueryError> {
        self.get(SIZE)
            .map(|raw| {
                raw.parse::<i64>()
                    .map_err(|_| QueryError::MalformedPageSize {
                        value: raw.to_string(),
                    })
            })
            .transpose()
    }

    /// Builds engine search parameters around entity-specific filters.
    ///
    /// # Errors
    ///
    /// Returns the first malformed size or ID value.
    pub fn to_search_params<P>(&self, filters: P) -> Result<SearchParams<P>, QueryError> {
        Ok(SearchParams {
            cursor: self.get(CURSOR).map(String::from),
            size: self.size()?,
            ids: self.id_list(IDS)?,
            filters,
            search_field: self.get(SEARCH_FIELD).map(String::from),
            search_word: self.get(SEARCH_WORD).map(String::from),
        })
    }
}

impl<S> FromRequestParts<S> for SliceQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RawQuery(query) = RawQuery::from_request_parts(parts, state).await?;
        Ok(query.as_deref().map(SliceQuery::parse).unwrap_or_default())
    }
}
