//! Build modules that live in a layer.
//!
//! Modules are listed newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AuditInfo, CatalogEntity, LayerId, entity_id, key_filter};
use crate::core::{KeyOrder, SearchField, SliceEntity};
use crate::error::QueryError;
use crate::types::FilterSet;

entity_id!(
    /// Module key.
    ModuleId
);

/// A build module, e.g. a Gradle subproject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Key.
    pub id: ModuleId,
    /// Owning layer.
    pub layer_id: LayerId,
    /// Enclosing module, for nested modules.
    #[serde(default)]
    pub parent_module_id: Option<ModuleId>,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Path of the module in the repository.
    pub module_path: String,
    /// Build tool identifier, e.g. `:adapter-in:rest-api`.
    #[serde(default)]
    pub build_identifier: Option<String>,
    /// Audit columns.
    #[serde(skip)]
    pub audit: AuditInfo,
}

impl Module {
    /// Creates a module row.
    pub fn new(
        id: i64,
        layer_id: i64,
        name: impl Into<String>,
        module_path: impl Into<String>,
    ) -> Self {
        Self {
            id: ModuleId::new(id),
            layer_id: LayerId::new(layer_id),
            parent_module_id: None,
            name: name.into(),
            description: None,
            module_path: module_path.into(),
            build_identifier: None,
            audit: AuditInfo::default(),
        }
    }
}

/// Searchable module fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleSearchField {
    /// Display name.
    Name,
    /// Repository path.
    ModulePath,
}

impl SearchField for ModuleSearchField {
    const ALL: &'static [Self] = &[Self::Name, Self::ModulePath];

    fn name(&self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::ModulePath => "MODULE_PATH",
        }
    }
}

/// Raw module filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleFilterParams {
    /// Layer IDs.
    pub layer_ids: Option<Vec<i64>>,
}

/// Validated module filters.
#[derive(Debug, Clone, Default)]
pub struct ModuleFilter {
    /// Layer constraint.
    pub layer_ids: FilterSet<LayerId>,
}

/// Module as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResult {
    /// Module ID.
    pub id: i64,
    /// Layer ID.
    pub layer_id: i64,
    /// Parent module ID.
    pub parent_module_id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Repository path.
    pub module_path: String,
    /// Build tool identifier.
    pub build_identifier: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl SliceEntity for Module {
    type Id = ModuleId;
    type SearchField = ModuleSearchField;
    type Filter = ModuleFilter;
    type FilterParams = ModuleFilterParams;
    type Dto = ModuleResult;

    const NAME: &'static str = "module";
    const ORDER: KeyOrder = KeyOrder::Descending;

    fn id(&self) -> ModuleId {
        self.id
    }

    fn build_filter(params: ModuleFilterParams) -> Result<ModuleFilter, QueryError> {
        Ok(ModuleFilter {
            layer_ids: key_filter(params.layer_ids),
        })
    }

    fn matches_filter(&self, filter: &ModuleFilter) -> bool {
        filter.layer_ids.admits(&self.layer_id)
    }

    fn search_text(&self, field: ModuleSearchField) -> Option<&str> {
        match field {
            ModuleSearchField::Name => Some(&self.name),
            ModuleSearchField::ModulePath => Some(&self.module_path),
        }
    }

    fn is_deleted(&self) -> bool {
        self.audit.is_deleted()
    }

    fn to_dto(&self) -> ModuleResult {
        ModuleResult {
            id: self.id.value(),
            layer_id: self.layer_id.value(),
            parent_module_id: self.parent_module_id.map(|id| id.value()),
            name: self.name.clone(),
            description: self.description.clone(),
            module_path: self.module_path.clone(),
            build_identifier: self.build_identifier.clone(),
            created_at: self.audit.created_at,
            updated_at: self.audit.updated_at,
        }
    }
}

impl CatalogEntity for Module {
    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }
}
