//! Class types (aggregate, value object, adapter, ...) grouped by category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    ArchitectureId, AuditInfo, CatalogEntity, ClassTypeCategoryId, entity_id, key_filter,
};
use crate::core::{SearchField, SliceEntity};
use crate::error::QueryError;
use crate::types::FilterSet;

entity_id!(
    /// Class type key.
    ClassTypeId
);

/// A kind of class the conventions talk about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassType {
    /// Key.
    pub id: ClassTypeId,
    /// Owning category.
    pub category_id: ClassTypeCategoryId,
    /// Short code, e.g. `AGGREGATE`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Position within the category.
    #[serde(default)]
    pub order_index: i32,
    /// Audit columns.
    #[serde(skip)]
    pub audit: AuditInfo,
}

impl ClassType {
    /// Creates a class type row.
    pub fn new(
        id: i64,
        category_id: i64,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: ClassTypeId::new(id),
            category_id: ClassTypeCategoryId::new(category_id),
            code: code.into(),
            name: name.into(),
            description: None,
            order_index: 0,
            audit: AuditInfo::default(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Searchable class type fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassTypeSearchField {
    /// Short code.
    Code,
    /// Display name.
    Name,
    /// Description.
    Description,
}

impl SearchField for ClassTypeSearchField {
    const ALL: &'static [Self] = &[Self::Code, Self::Name, Self::Description];

    fn name(&self) -> &'static str {
        match self {
            Self::Code => "CODE",
            Self::Name => "NAME",
            Self::Description => "DESCRIPTION",
        }
    }
}

/// Raw class type filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassTypeFilterParams {
    /// Category IDs.
    pub category_ids: Option<Vec<i64>>,
    /// Architecture IDs, matched through the owning category.
    pub architecture_ids: Option<Vec<i64>>,
}

/// Validated class type filters.
#[derive(Debug, Clone, Default)]
pub struct ClassTypeFilter {
    /// Category constraint.
    pub category_ids: FilterSet<ClassTypeCategoryId>,
    /// Architecture constraint.
    ///
    /// A class type only knows its category, so storage resolves this
    /// against the categories of the listed architectures.
    pub architecture_ids: FilterSet<ArchitectureId>,
}

/// Class type as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTypeResult {
    /// Class type ID.
    pub id: i64,
    /// Category ID.
    pub category_id: i64,
    /// Short code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Position within the category.
    pub order_index: i32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl SliceEntity for ClassType {
    type Id = ClassTypeId;
    type SearchField = ClassTypeSearchField;
    type Filter = ClassTypeFilter;
    type FilterParams = ClassTypeFilterParams;
    type Dto = ClassTypeResult;

    const NAME: &'static str = "class_type";

    fn id(&self) -> ClassTypeId {
        self.id
    }

    fn build_filter(params: ClassTypeFilterParams) -> Result<ClassTypeFilter, QueryError> {
        Ok(ClassTypeFilter {
            category_ids: key_filter(params.category_ids),
            architecture_ids: key_filter(params.architecture_ids),
        })
    }

    fn matches_filter(&self, filter: &ClassTypeFilter) -> bool {
        // The architecture constraint needs the category table.
        filter.category_ids.admits(&self.category_id)
    }

    fn search_text(&self, field: ClassTypeSearchField) -> Option<&str> {
        match field {
            ClassTypeSearchField::Code => Some(&self.code),
            ClassTypeSearchField::Name => Some(&self.name),
            ClassTypeSearchField::Description => self.description.as_deref(),
        }
    }

    fn is_deleted(&self) -> bool {
        self.audit.is_deleted()
    }

    fn to_dto(&self) -> ClassTypeResult {
        ClassTypeResult {
            id: self.id.value(),
            category_id: self.category_id.value(),
            code: self.code.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            order_index: self.order_index,
            created_at: self.audit.created_at,
            updated_at: self.audit.updated_at,
        }
    }
}

impl CatalogEntity for ClassType {
    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_description_never_matches() {
        let class_type = ClassType::new(1, 1, "AGGREGATE", "Aggregate");
        assert_eq!(
            class_type.search_text(ClassTypeSearchField::Description),
            None
        );

        let class_type = class_type.with_description("Domain aggregate root");
        assert_eq!(
            class_type.search_text(ClassTypeSearchField::Description),
            Some("Domain aggregate root")
        );
    }

    #[test]
    fn test_category_filter() {
        let class_type = ClassType::new(1, 2, "VO", "Value Object");
        let filter = ClassType::build_filter(ClassTypeFilterParams {
            category_ids: Some(vec![1, 2]),
            ..Default::default()
        })
        .unwrap();
        assert!(class_type.matches_filter(&filter));
        assert!(!filter.architecture_ids.is_constrained());
    }
}
