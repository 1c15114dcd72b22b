//! Conventions: a versioned rule set attached to a module.
//!
//! Conventions are listed newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AuditInfo, CatalogEntity, ModuleId, entity_id, key_filter};
use crate::core::{KeyOrder, SearchField, SliceEntity};
use crate::error::QueryError;
use crate::types::FilterSet;

entity_id!(
    /// Convention key.
    ConventionId
);

/// A convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Convention {
    /// Key.
    pub id: ConventionId,
    /// Module the convention governs.
    pub module_id: ModuleId,
    /// Version label, e.g. `1.2.0`.
    pub version: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether this is the version in force for its module.
    #[serde(default)]
    pub active: bool,
    /// Audit columns.
    #[serde(skip)]
    pub audit: AuditInfo,
}

impl Convention {
    /// Creates an active convention row.
    pub fn new(id: i64, module_id: i64, version: impl Into<String>) -> Self {
        Self {
            id: ConventionId::new(id),
            module_id: ModuleId::new(module_id),
            version: version.into(),
            description: None,
            active: true,
            audit: AuditInfo::default(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Searchable convention fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConventionSearchField {
    /// Version label.
    Version,
    /// Description.
    Description,
}

impl SearchField for ConventionSearchField {
    const ALL: &'static [Self] = &[Self::Version, Self::Description];

    fn name(&self) -> &'static str {
        match self {
            Self::Version => "VERSION",
            Self::Description => "DESCRIPTION",
        }
    }
}

/// Raw convention filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConventionFilterParams {
    /// Module IDs.
    pub module_ids: Option<Vec<i64>>,
}

/// Validated convention filters.
#[derive(Debug, Clone, Default)]
pub struct ConventionFilter {
    /// Module constraint.
    pub module_ids: FilterSet<ModuleId>,
}

/// Convention as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConventionResult {
    /// Convention ID.
    pub id: i64,
    /// Module ID.
    pub module_id: i64,
    /// Version label.
    pub version: String,
    /// Description.
    pub description: Option<String>,
    /// Whether the version is in force.
    pub active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl SliceEntity for Convention {
    type Id = ConventionId;
    type SearchField = ConventionSearchField;
    type Filter = ConventionFilter;
    type FilterParams = ConventionFilterParams;
    type Dto = ConventionResult;

    const NAME: &'static str = "convention";
    const ORDER: KeyOrder = KeyOrder::Descending;

    fn id(&self) -> ConventionId {
        self.id
    }

    fn build_filter(params: ConventionFilterParams) -> Result<ConventionFilter, QueryError> {
        Ok(ConventionFilter {
            module_ids: key_filter(params.module_ids),
        })
    }

    fn matches_filter(&self, filter: &ConventionFilter) -> bool {
        filter.module_ids.admits(&self.module_id)
    }

    fn search_text(&self, field: ConventionSearchField) -> Option<&str> {
        match field {
            ConventionSearchField::Version => Some(&self.version),
            ConventionSearchField::Description => self.description.as_deref(),
        }
    }

    fn is_deleted(&self) -> bool {
        self.audit.is_deleted()
    }

    fn to_dto(&self) -> ConventionResult {
        ConventionResult {
            id: self.id.value(),
            module_id: self.module_id.value(),
            version: self.version.clone(),
            description: self.description.clone(),
            active: self.active,
            created_at: self.audit.created_at,
            updated_at: self.audit.updated_at,
        }
    }
}

impl CatalogEntity for Convention {
    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }
}
