//! Catalog entities.
//!
//! Each entity implements [`SliceEntity`](crate::core::SliceEntity) so the
//! generic engine can list it:
//!
//! | Entity | Order | Filters | Search fields |
//! |--------|-------|---------|---------------|
//! | [`TechStack`] | ascending | statuses, platform types | `NAME`, `LANGUAGE_TYPE`, `FRAMEWORK_TYPE` |
//! | [`Architecture`] | ascending | tech stack IDs | `NAME`, `PATTERN_TYPE` |
//! | [`Layer`] | ascending | architecture IDs | `CODE`, `NAME` |
//! | [`Module`] | descending | layer IDs | `NAME`, `MODULE_PATH` |
//! | [`Convention`] | descending | module IDs | `VERSION`, `DESCRIPTION` |
//! | [`CodingRule`] | descending | convention IDs, categories, severities | `CODE`, `NAME`, `DESCRIPTION` |
//! | [`ClassTypeCategory`] | ascending | architecture IDs | `CODE`, `NAME`, `DESCRIPTION` |
//! | [`ClassType`] | ascending | category IDs, architecture IDs | `CODE`, `NAME`, `DESCRIPTION` |

mod architecture;
mod class_type;
mod class_type_category;
mod coding_rule;
mod convention;
mod layer;
mod module;
mod tech_stack;

pub use architecture::{
    Architecture, ArchitectureFilter, ArchitectureFilterParams, ArchitectureId,
    ArchitectureResult, ArchitectureSearchField,
};
pub use class_type::{
    ClassType, ClassTypeFilter, ClassTypeFilterParams, ClassTypeId, ClassTypeResult,
    ClassTypeSearchField,
};
pub use class_type_category::{
    ClassTypeCategory, ClassTypeCategoryFilter, ClassTypeCategoryFilterParams,
    ClassTypeCategoryId, ClassTypeCategoryResult, ClassTypeCategorySearchField,
};
pub use coding_rule::{
    CodingRule, CodingRuleFilter, CodingRuleFilterParams, CodingRuleId, CodingRuleResult,
    CodingRuleSearchField, RuleCategory, RuleSeverity,
};
pub use convention::{
    Convention, ConventionFilter, ConventionFilterParams, ConventionId, ConventionResult,
    ConventionSearchField,
};
pub use layer::{Layer, LayerFilter, LayerFilterParams, LayerId, LayerResult, LayerSearchField};
pub use module::{
    Module, ModuleFilter, ModuleFilterParams, ModuleId, ModuleResult, ModuleSearchField,
};
pub use tech_stack::{
    PlatformType, TechStack, TechStackFilter, TechStackFilterParams, TechStackId,
    TechStackResult, TechStackSearchField, TechStackStatus,
};

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, SliceEntity};
use crate::error::QueryError;
use crate::types::FilterSet;

/// Declares a newtype key over `i64`.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw key.
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw key.
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl $crate::core::EntityId for $name {
            fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            fn raw(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use entity_id;

/// Audit columns carried by every catalog row.
///
/// Stamped by the storage backend from its clock, never by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInfo {
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
    /// When the row last changed.
    pub updated_at: DateTime<Utc>,
    /// When the row was soft-deleted, if it was.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Default for AuditInfo {
    fn default() -> Self {
        Self {
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
            deleted_at: None,
        }
    }
}

impl AuditInfo {
    /// Creates audit columns for a row inserted at `now`.
    pub fn created(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Marks the row deleted at `now`.
    pub fn delete(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    /// Returns true if the row is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A catalog row that can be stored.
pub trait CatalogEntity: SliceEntity + Serialize + DeserializeOwned {
    /// Returns the audit columns.
    fn audit(&self) -> &AuditInfo;

    /// Returns the audit columns mutably.
    fn audit_mut(&mut self) -> &mut AuditInfo;
}

/// Builds a key filter from an optional raw list.
pub(crate) fn key_filter<K: EntityId>(values: Option<Vec<i64>>) -> FilterSet<K> {
    FilterSet::from_option(values.map(|v| v.into_iter().map(K::from_raw).collect::<Vec<_>>()))
}

/// Builds an enum filter from an optional raw list, failing on unknown values.
pub(crate) fn enum_filter<T>(
    filter: &str,
    values: Option<Vec<String>>,
) -> Result<FilterSet<T>, QueryError>
where
    T: FromStr + Ord,
{
    let Some(values) = values else {
        return Ok(FilterSet::Unconstrained);
    };
    values
        .into_iter()
        .map(|value| {
            value.trim().parse::<T>().map_err(|_| QueryError::InvalidFilter {
                filter: filter.to_string(),
                value,
            })
        })
        .collect::<Result<_, _>>()
        .map(FilterSet::Only)
}
