//! A minimal entity used by unit tests across the crate.

use std::fmt;

use serde::Serialize;

use crate::core::{EntityId, SearchField, SliceEntity};
use crate::error::QueryError;
use crate::types::FilterSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(pub i64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl EntityId for WidgetId {
    fn from_raw(raw: i64) -> Self {
        WidgetId(raw)
    }

    fn raw(&self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetField {
    Name,
}

impl SearchField for WidgetField {
    const ALL: &'static [Self] = &[WidgetField::Name];

    fn name(&self) -> &'static str {
        "NAME"
    }
}

#[derive(Debug, Clone, Default)]
pub struct WidgetFilter {
    pub groups: FilterSet<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct WidgetFilterParams {
    pub groups: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetDto {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub id: WidgetId,
    pub group: i64,
    pub name: String,
    pub deleted: bool,
}

impl Widget {
    pub fn new(id: i64, group: i64, name: &str) -> Self {
        Self {
            id: WidgetId(id),
            group,
            name: name.to_string(),
            deleted: false,
        }
    }

    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }
}

impl SliceEntity for Widget {
    type Id = WidgetId;
    type SearchField = WidgetField;
    type Filter = WidgetFilter;
    type FilterParams = WidgetFilterParams;
    type Dto = WidgetDto;

    const NAME: &'static str = "widget";

    fn id(&self) -> WidgetId {
        self.id
    }

    fn build_filter(params: WidgetFilterParams) -> Result<WidgetFilter, QueryError> {
        let groups = params
            .groups
            .map(|values| {
                values
                    .into_iter()
                    .map(|v| {
                        v.parse::<i64>().map_err(|_| QueryError::InvalidFilter {
                            filter: "groups".to_string(),
                            value: v,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        Ok(WidgetFilter {
            groups: FilterSet::from_option(groups),
        })
    }

    fn matches_filter(&self, filter: &WidgetFilter) -> bool {
        filter.groups.admits(&self.group)
    }

    fn search_text(&self, field: WidgetField) -> Option<&str> {
        match field {
            WidgetField::Name => Some(&self.name),
        }
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn to_dto(&self) -> WidgetDto {
        WidgetDto {
            id: self.id.0,
            name: self.name.clone(),
        }
    }
}

/// Builds `count` widgets with keys `1..=count`, all in group 1.
pub fn widgets(count: i64) -> Vec<Widget> {
    (1..=count)
        .map(|i| Widget::new(i, 1, &format!("widget-{i}")))
        .collect()
}
