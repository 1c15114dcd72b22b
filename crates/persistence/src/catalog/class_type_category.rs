//! Class type categories, grouping class types within an architecture.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ArchitectureId, AuditInfo, CatalogEntity, entity_id, key_filter};
use crate::core::{SearchField, SliceEntity};
use crate::error::QueryError;
use crate::types::FilterSet;

entity_id!(
    /// Class type category key.
    ClassTypeCategoryId
);

/// A category of class types, e.g. `DOMAIN` or `ADAPTER`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTypeCategory {
    /// Key.
    pub id: ClassTypeCategoryId,
    /// Owning architecture.
    pub architecture_id: ArchitectureId,
    /// Short code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Position within the architecture.
    #[serde(default)]
    pub order_index: i32,
    /// Audit columns.
    #[serde(skip)]
    pub audit: AuditInfo,
}

impl ClassTypeCategory {
    /// Creates a category row.
    pub fn new(
        id: i64,
        architecture_id: i64,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: ClassTypeCategoryId::new(id),
            architecture_id: ArchitectureId::new(architecture_id),
            code: code.into(),
            name: name.into(),
            description: None,
            order_index: 0,
            audit: AuditInfo::default(),
        }
    }
}

/// Searchable category fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassTypeCategorySearchField {
    /// Short code.
    Code,
    /// Display name.
    Name,
    /// Description.
    Description,
}

impl SearchField for ClassTypeCategorySearchField {
    const ALL: &'static [Self] = &[Self::Code, Self::Name, Self::Description];

    fn name(&self) -> &'static str {
        match self {
            Self::Code => "CODE",
            Self::Name => "NAME",
            Self::Description => "DESCRIPTION",
        }
    }
}

/// Raw category filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassTypeCategoryFilterParams {
    /// Architecture IDs.
    pub architecture_ids: Option<Vec<i64>>,
}

/// Validated category filters.
#[derive(Debug, Clone, Default)]
pub struct ClassTypeCategoryFilter {
    /// Architecture constraint.
    pub architecture_ids: FilterSet<ArchitectureId>,
}

/// Category as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTypeCategoryResult {
    /// Category ID.
    pub id: i64,
    /// Architecture ID.
    pub architecture_id: i64,
    /// Short code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Position within the architecture.
    pub order_index: i32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl SliceEntity for ClassTypeCategory {
    type Id = ClassTypeCategoryId;
    type SearchField = ClassTypeCategorySearchField;
    type Filter = ClassTypeCategoryFilter;
    type FilterParams = ClassTypeCategoryFilterParams;
    type Dto = ClassTypeCategoryResult;

    const NAME: &'static str = "class_type_category";

    fn id(&self) -> ClassTypeCategoryId {
        self.id
    }

    fn build_filter(
        params: ClassTypeCategoryFilterParams,
    ) -> Result<ClassTypeCategoryFilter, QueryError> {
        Ok(ClassTypeCategoryFilter {
            architecture_ids: key_filter(params.architecture_ids),
        })
    }

    fn matches_filter(&self, filter: &ClassTypeCategoryFilter) -> bool {
        filter.architecture_ids.admits(&self.architecture_id)
    }

    fn search_text(&self, field: ClassTypeCategorySearchField) -> Option<&str> {
        match field {
            ClassTypeCategorySearchField::Code => Some(&self.code),
            ClassTypeCategorySearchField::Name => Some(&self.name),
            ClassTypeCategorySearchField::Description => self.description.as_deref(),
        }
    }

    fn is_deleted(&self) -> bool {
        self.audit.is_deleted()
    }

    fn to_dto(&self) -> ClassTypeCategoryResult {
        ClassTypeCategoryResult {
            id: self.id.value(),
            architecture_id: self.architecture_id.value(),
            code: self.code.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            order_index: self.order_index,
            created_at: self.audit.created_at,
            updated_at: self.audit.updated_at,
        }
    }
}

impl CatalogEntity for ClassTypeCategory {
    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }
}
