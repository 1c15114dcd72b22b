//! Architectures: named architectural patterns bound to a tech stack.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AuditInfo, CatalogEntity, TechStackId, entity_id, key_filter};
use crate::core::{SearchField, SliceEntity};
use crate::error::QueryError;
use crate::types::FilterSet;

entity_id!(
    /// Architecture key.
    ArchitectureId
);

/// An architecture pattern in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Architecture {
    /// Key.
    pub id: ArchitectureId,
    /// Owning tech stack.
    pub tech_stack_id: TechStackId,
    /// Display name.
    pub name: String,
    /// Pattern family, e.g. `HEXAGONAL`.
    pub pattern_type: String,
    /// Free-form description of the pattern.
    #[serde(default)]
    pub pattern_description: Option<String>,
    /// Audit columns.
    #[serde(skip)]
    pub audit: AuditInfo,
}

impl Architecture {
    /// Creates an architecture row.
    pub fn new(
        id: i64,
        tech_stack_id: i64,
        name: impl Into<String>,
        pattern_type: impl Into<String>,
    ) -> Self {
        Self {
            id: ArchitectureId::new(id),
            tech_stack_id: TechStackId::new(tech_stack_id),
            name: name.into(),
            pattern_type: pattern_type.into(),
            pattern_description: None,
            audit: AuditInfo::default(),
        }
    }

    /// Sets the pattern description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.pattern_description = Some(description.into());
        self
    }
}

/// Searchable architecture fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchitectureSearchField {
    /// Display name.
    Name,
    /// Pattern family.
    PatternType,
}

impl SearchField for ArchitectureSearchField {
    const ALL: &'static [Self] = &[Self::Name, Self::PatternType];

    fn name(&self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::PatternType => "PATTERN_TYPE",
        }
    }
}

/// Raw architecture filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchitectureFilterParams {
    /// Tech stack IDs.
    pub tech_stack_ids: Option<Vec<i64>>,
}

/// Validated architecture filters.
#[derive(Debug, Clone, Default)]
pub struct ArchitectureFilter {
    /// Tech stack constraint.
    pub tech_stack_ids: FilterSet<TechStackId>,
}

/// Architecture as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureResult {
    /// Architecture ID.
    pub id: i64,
    /// Tech stack ID.
    pub tech_stack_id: i64,
    /// Display name.
    pub name: String,
    /// Pattern family.
    pub pattern_type: String,
    /// Pattern description.
    pub pattern_description: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl SliceEntity for Architecture {
    type Id = ArchitectureId;
    type SearchField = ArchitectureSearchField;
    type Filter = ArchitectureFilter;
    type FilterParams = ArchitectureFilterParams;
    type Dto = ArchitectureResult;

    const NAME: &'static str = "architecture";

    fn id(&self) -> ArchitectureId {
        self.id
    }

    fn build_filter(params: ArchitectureFilterParams) -> Result<ArchitectureFilter, QueryError> {
        Ok(ArchitectureFilter {
            tech_stack_ids: key_filter(params.tech_stack_ids),
        })
    }

    fn matches_filter(&self, filter: &ArchitectureFilter) -> bool {
        filter.tech_stack_ids.admits(&self.tech_stack_id)
    }

    fn search_text(&self, field: ArchitectureSearchField) -> Option<&str> {
        match field {
            ArchitectureSearchField::Name => Some(&self.name),
            ArchitectureSearchField::PatternType => Some(&self.pattern_type),
        }
    }

    fn is_deleted(&self) -> bool {
        self.audit.is_deleted()
    }

    fn to_dto(&self) -> ArchitectureResult {
        ArchitectureResult {
            id: self.id.value(),
            tech_stack_id: self.tech_stack_id.value(),
            name: self.name.clone(),
            pattern_type: self.pattern_type.clone(),
            pattern_description: self.pattern_description.clone(),
            created_at: self.audit.created_at,
            updated_at: self.audit.updated_at,
        }
    }
}

impl CatalogEntity for Architecture {
    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }
}
