//! Layers within an architecture.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ArchitectureId, AuditInfo, CatalogEntity, entity_id, key_filter};
use crate::core::{SearchField, SliceEntity};
use crate::error::QueryError;
use crate::types::FilterSet;

entity_id!(
    /// Layer key.
    LayerId
);

/// A layer of an architecture, e.g. `DOMAIN` or `ADAPTER_OUT`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Key.
    pub id: LayerId,
    /// Owning architecture.
    pub architecture_id: ArchitectureId,
    /// Short code, unique within the architecture.
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

impl Layer {
    /// Creates a layer row.
    pub fn new(
        id: i64,
        architecture_id: i64,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: LayerId::new(id),
            architecture_id: ArchitectureId::new(architecture_id),
            code: code.into(),
            name: name.into(),
            description: None,
            order_index: 0,
            audit: AuditInfo::default(),
        }
    }
}

/// Searchable layer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerSearchField {
    /// Short code.
    Code,
    /// Display name.
    Name,
}

impl SearchField for LayerSearchField {
    const ALL: &'static [Self] = &[Self::Code, Self::Name];

    fn name(&self) -> &'static str {
        match self {
            Self::Code => "CODE",
            Self::Name => "NAME",
        }
    }
}

/// Raw layer filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerFilterParams {
    /// Architecture IDs.
    pub architecture_ids: Option<Vec<i64>>,
}

/// Validated layer filters.
#[derive(Debug, Clone, Default)]
pub struct LayerFilter {
    /// Architecture constraint.
    pub architecture_ids: FilterSet<ArchitectureId>,
}

/// Layer as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerResult {
    /// Layer ID.
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

impl SliceEntity for Layer {
    type Id = LayerId;
    type SearchField = LayerSearchField;
    type Filter = LayerFilter;
    type FilterParams = LayerFilterParams;
    type Dto = LayerResult;

    const NAME: &'static str = "layer";

    fn id(&self) -> LayerId {
        self.id
    }

    fn build_filter(params: LayerFilterParams) -> Result<LayerFilter, QueryError> {
        Ok(LayerFilter {
            architecture_ids: key_filter(params.architecture_ids),
        })
    }

    fn matches_filter(&self, filter: &LayerFilter) -> bool {
        filter.architecture_ids.admits(&self.architecture_id)
    }

    fn search_text(&self, field: LayerSearchField) -> Option<&str> {
        match field {
            LayerSearchField::Code => Some(&self.code),
            LayerSearchField::Name => Some(&self.name),
        }
    }

    fn is_deleted(&self) -> bool {
        self.audit.is_deleted()
    }

    fn to_dto(&self) -> LayerResult {
        LayerResult {
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

impl CatalogEntity for Layer {
    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }
}
