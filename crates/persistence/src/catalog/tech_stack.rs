//! Tech stacks: a language, framework and build tool combination that
//! architectures are designed for.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AuditInfo, CatalogEntity, entity_id, enum_filter};
use crate::core::{SearchField, SliceEntity};
use crate::error::QueryError;
use crate::types::FilterSet;

entity_id!(
    /// Tech stack key.
    TechStackId
);

/// Lifecycle state of a tech stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TechStackStatus {
    /// In use for new projects.
    Active,
    /// Still supported, not for new projects.
    Deprecated,
    /// Kept for reference only.
    Archived,
}

impl TechStackStatus {
    /// Every status.
    pub const ALL: [TechStackStatus; 3] = [
        TechStackStatus::Active,
        TechStackStatus::Deprecated,
        TechStackStatus::Archived,
    ];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TechStackStatus::Active => "ACTIVE",
            TechStackStatus::Deprecated => "DEPRECATED",
            TechStackStatus::Archived => "ARCHIVED",
        }
    }
}

impl FromStr for TechStackStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for TechStackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where software built on a tech stack runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlatformType {
    /// Server side.
    Backend,
    /// Browser or client side.
    Frontend,
}

impl PlatformType {
    /// Every platform.
    pub const ALL: [PlatformType; 2] = [PlatformType::Backend, PlatformType::Frontend];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformType::Backend => "BACKEND",
            PlatformType::Frontend => "FRONTEND",
        }
    }
}

impl FromStr for PlatformType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tech stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStack {
    /// Key.
    pub id: TechStackId,
    /// Display name, e.g. `Spring Boot 3 / Java 21`.
    pub name: String,
    /// Lifecycle state.
    pub status: TechStackStatus,
    /// Language, e.g. `JAVA`.
    pub language_type: String,
    /// Language version, e.g. `21`.
    pub language_version: String,
    /// Framework, e.g. `SPRING_BOOT`.
    pub framework_type: String,
    /// Framework version.
    pub framework_version: String,
    /// Target platform.
    pub platform_type: PlatformType,
    /// Build tool, e.g. `GRADLE`.
    #[serde(default)]
    pub build_tool_type: Option<String>,
    /// Audit columns.
    #[serde(skip)]
    pub audit: AuditInfo,
}

impl TechStack {
    /// Creates an active backend tech stack row.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        language_type: impl Into<String>,
        framework_type: impl Into<String>,
    ) -> Self {
        Self {
            id: TechStackId::new(id),
            name: name.into(),
            status: TechStackStatus::Active,
            language_type: language_type.into(),
            language_version: String::new(),
            framework_type: framework_type.into(),
            framework_version: String::new(),
            platform_type: PlatformType::Backend,
            build_tool_type: None,
            audit: AuditInfo::default(),
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: TechStackStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the platform.
    pub fn with_platform(mut self, platform_type: PlatformType) -> Self {
        self.platform_type = platform_type;
        self
    }
}

/// Searchable tech stack fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechStackSearchField {
    /// Display name.
    Name,
    /// Language.
    LanguageType,
    /// Framework.
    FrameworkType,
}

impl SearchField for TechStackSearchField {
    const ALL: &'static [Self] = &[Self::Name, Self::LanguageType, Self::FrameworkType];

    fn name(&self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::LanguageType => "LANGUAGE_TYPE",
            Self::FrameworkType => "FRAMEWORK_TYPE",
        }
    }
}

/// Raw tech stack filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TechStackFilterParams {
    /// Status names.
    pub statuses: Option<Vec<String>>,
    /// Platform names.
    pub platform_types: Option<Vec<String>>,
}

/// Validated tech stack filters.
#[derive(Debug, Clone, Default)]
pub struct TechStackFilter {
    /// Status constraint.
    pub statuses: FilterSet<TechStackStatus>,
    /// Platform constraint.
    pub platform_types: FilterSet<PlatformType>,
}

/// Tech stack as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStackResult {
    /// Tech stack ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Lifecycle state.
    pub status: TechStackStatus,
    /// Language.
    pub language_type: String,
    /// Language version.
    pub language_version: String,
    /// Framework.
    pub framework_type: String,
    /// Framework version.
    pub framework_version: String,
    /// Target platform.
    pub platform_type: PlatformType,
    /// Build tool.
    pub build_tool_type: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl SliceEntity for TechStack {
    type Id = TechStackId;
    type SearchField = TechStackSearchField;
    type Filter = TechStackFilter;
    type FilterParams = TechStackFilterParams;
    type Dto = TechStackResult;

    const NAME: &'static str = "tech_stack";

    fn id(&self) -> TechStackId {
        self.id
    }

    fn build_filter(params: TechStackFilterParams) -> Result<TechStackFilter, QueryError> {
        Ok(TechStackFilter {
            statuses: enum_filter("statuses", params.statuses)?,
            platform_types: enum_filter("platformTypes", params.platform_types)?,
        })
    }

    fn matches_filter(&self, filter: &TechStackFilter) -> bool {
        filter.statuses.admits(&self.status) && filter.platform_types.admits(&self.platform_type)
    }

    fn search_text(&self, field: TechStackSearchField) -> Option<&str> {
        match field {
            TechStackSearchField::Name => Some(&self.name),
            TechStackSearchField::LanguageType => Some(&self.language_type),
            TechStackSearchField::FrameworkType => Some(&self.framework_type),
        }
    }

    fn is_deleted(&self) -> bool {
        self.audit.is_deleted()
    }

    fn to_dto(&self) -> TechStackResult {
        TechStackResult {
            id: self.id.value(),
            name: self.name.clone(),
            status: self.status,
            language_type: self.language_type.clone(),
            language_version: self.language_version.clone(),
            framework_type: self.framework_type.clone(),
            framework_version: self.framework_version.clone(),
            platform_type: self.platform_type,
            build_tool_type: self.build_tool_type.clone(),
            created_at: self.audit.created_at,
            updated_at: self.audit.updated_at,
        }
    }
}

impl CatalogEntity for TechStack {
    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }
}
