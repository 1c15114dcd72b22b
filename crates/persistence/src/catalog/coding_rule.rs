//! Coding rules attached to a convention.
//!
//! Coding rules are listed newest first, so their keyset walks in
//! descending key order.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AuditInfo, CatalogEntity, ConventionId, entity_id, enum_filter, key_filter};
use crate::core::{KeyOrder, SearchField, SliceEntity};
use crate::error::QueryError;
use crate::types::FilterSet;

entity_id!(
    /// Coding rule key.
    CodingRuleId
);

/// What aspect of code a rule governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleCategory {
    /// Annotation usage.
    Annotation,
    /// Runtime behavior.
    Behavior,
    /// Naming.
    Naming,
    /// Package and class structure.
    Structure,
}

impl RuleCategory {
    /// Every category.
    pub const ALL: [RuleCategory; 4] = [
        RuleCategory::Annotation,
        RuleCategory::Behavior,
        RuleCategory::Naming,
        RuleCategory::Structure,
    ];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::Annotation => "ANNOTATION",
            RuleCategory::Behavior => "BEHAVIOR",
            RuleCategory::Naming => "NAMING",
            RuleCategory::Structure => "STRUCTURE",
        }
    }
}

impl FromStr for RuleCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How severe a violation of a rule is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleSeverity {
    /// Must never be merged.
    Blocker,
    /// Must be fixed before release.
    Critical,
    /// Should be fixed.
    Major,
    /// Nice to fix.
    Minor,
}

impl RuleSeverity {
    /// Every severity.
    pub const ALL: [RuleSeverity; 4] = [
        RuleSeverity::Blocker,
        RuleSeverity::Critical,
        RuleSeverity::Major,
        RuleSeverity::Minor,
    ];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSeverity::Blocker => "BLOCKER",
            RuleSeverity::Critical => "CRITICAL",
            RuleSeverity::Major => "MAJOR",
            RuleSeverity::Minor => "MINOR",
        }
    }
}

impl FromStr for RuleSeverity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coding rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingRule {
    /// Key.
    pub id: CodingRuleId,
    /// Owning convention.
    pub convention_id: ConventionId,
    /// Short code, e.g. `DOM-001`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Severity.
    pub severity: RuleSeverity,
    /// Category.
    pub category: RuleCategory,
    /// What the rule requires.
    pub description: String,
    /// Why the rule exists.
    #[serde(default)]
    pub rationale: Option<String>,
    /// Whether tooling can fix violations automatically.
    #[serde(default)]
    pub auto_fixable: bool,
    /// Audit columns.
    #[serde(skip)]
    pub audit: AuditInfo,
}

impl CodingRule {
    /// Creates a coding rule row.
    pub fn new(
        id: i64,
        convention_id: i64,
        code: impl Into<String>,
        name: impl Into<String>,
        severity: RuleSeverity,
        category: RuleCategory,
    ) -> Self {
        Self {
            id: CodingRuleId::new(id),
            convention_id: ConventionId::new(convention_id),
            code: code.into(),
            name: name.into(),
            severity,
            category,
            description: String::new(),
            rationale: None,
            auto_fixable: false,
            audit: AuditInfo::default(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Searchable coding rule fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodingRuleSearchField {
    /// Short code.
    Code,
    /// Display name.
    Name,
    /// Description.
    Description,
}

impl SearchField for CodingRuleSearchField {
    const ALL: &'static [Self] = &[Self::Code, Self::Name, Self::Description];

    fn name(&self) -> &'static str {
        match self {
            Self::Code => "CODE",
            Self::Name => "NAME",
            Self::Description => "DESCRIPTION",
        }
    }
}

/// Raw coding rule filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodingRuleFilterParams {
    /// Convention IDs.
    pub convention_ids: Option<Vec<i64>>,
    /// Category names.
    pub categories: Option<Vec<String>>,
    /// Severity names.
    pub severities: Option<Vec<String>>,
}

/// Validated coding rule filters.
#[derive(Debug, Clone, Default)]
pub struct CodingRuleFilter {
    /// Convention constraint.
    pub convention_ids: FilterSet<ConventionId>,
    /// Category constraint.
    pub categories: FilterSet<RuleCategory>,
    /// Severity constraint.
    pub severities: FilterSet<RuleSeverity>,
}

/// Coding rule as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingRuleResult {
    /// Coding rule ID.
    pub id: i64,
    /// Convention ID.
    pub convention_id: i64,
    /// Short code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Severity.
    pub severity: RuleSeverity,
    /// Category.
    pub category: RuleCategory,
    /// Description.
    pub description: String,
    /// Rationale.
    pub rationale: Option<String>,
    /// Whether tooling can fix violations automatically.
    pub auto_fixable: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl SliceEntity for CodingRule {
    type Id = CodingRuleId;
    type SearchField = CodingRuleSearchField;
    type Filter = CodingRuleFilter;
    type FilterParams = CodingRuleFilterParams;
    type Dto = CodingRuleResult;

    const NAME: &'static str = "coding_rule";
    const ORDER: KeyOrder = KeyOrder::Descending;

    fn id(&self) -> CodingRuleId {
        self.id
    }

    fn build_filter(params: CodingRuleFilterParams) -> Result<CodingRuleFilter, QueryError> {
        Ok(CodingRuleFilter {
            convention_ids: key_filter(params.convention_ids),
            categories: enum_filter("categories", params.categories)?,
            severities: enum_filter("severities", params.severities)?,
        })
    }

    fn matches_filter(&self, filter: &CodingRuleFilter) -> bool {
        filter.convention_ids.admits(&self.convention_id)
            && filter.categories.admits(&self.category)
            && filter.severities.admits(&self.severity)
    }

    fn search_text(&self, field: CodingRuleSearchField) -> Option<&str> {
        match field {
            CodingRuleSearchField::Code => Some(&self.code),
            CodingRuleSearchField::Name => Some(&self.name),
            CodingRuleSearchField::Description => Some(&self.description),
        }
    }

    fn is_deleted(&self) -> bool {
        self.audit.is_deleted()
    }

    fn to_dto(&self) -> CodingRuleResult {
        CodingRuleResult {
            id: self.id.value(),
            convention_id: self.convention_id.value(),
            code: self.code.clone(),
            name: self.name.clone(),
            severity: self.severity,
            category: self.category,
            description: self.description.clone(),
            rationale: self.rationale.clone(),
            auto_fixable: self.auto_fixable,
            created_at: self.audit.created_at,
            updated_at: self.audit.updated_at,
        }
    }
}

impl CatalogEntity for CodingRule {
    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }
}
