//! Slice listing handlers.
//!
//! One generic handler serves every catalog entity:
//! - `GET [base]/api/v1/[collection]?cursor=&size=&ids=&searchField=&searchWord=&<filters>`
//!
//! Each entity only declares how its filter parameters are read from the
//! query string.

use axum::{
    Json,
    extract::{OriginalUri, State},
    response::{IntoResponse, Response},
};
use canon_persistence::catalog::{
    Architecture, ArchitectureFilterParams, ClassType, ClassTypeCategory,
    ClassTypeCategoryFilterParams, ClassTypeFilterParams, CodingRule, CodingRuleFilterParams,
    Convention, ConventionFilterParams, Layer, LayerFilterParams, Module, ModuleFilterParams,
    TechStack, TechStackFilterParams,
};
use canon_persistence::core::{SliceEntity, SliceRepository};
use canon_persistence::error::QueryError;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::SliceQuery;
use crate::responses::{ApiResponse, SliceBody};
use crate::state::AppState;

/// A catalog entity exposed as a slice collection.
pub trait SliceResource: SliceEntity {
    /// Collection path segment under `/api/v1`.
    const COLLECTION: &'static str;

    /// Reads the entity's filter parameters from the query string.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidFilter`] for values that are not
    /// well-formed. Enum values are checked later by the entity.
    fn filter_params(query: &SliceQuery) -> Result<Self::FilterParams, QueryError>;
}

impl SliceResource for TechStack {
    const COLLECTION: &'static str = "tech-stacks";

    fn filter_params(query: &SliceQuery) -> Result<TechStackFilterParams, QueryError> {
        Ok(TechStackFilterParams {
            statuses: query.list("statuses"),
            platform_types: query.list("platformTypes"),
        })
    }
}

impl SliceResource for Architecture {
    const COLLECTION: &'static str = "architectures";

    fn filter_params(query: &SliceQuery) -> Result<ArchitectureFilterParams, QueryError> {
        Ok(ArchitectureFilterParams {
            tech_stack_ids: query.id_list("techStackIds")?,
        })
    }
}

impl SliceResource for Layer {
    const COLLECTION: &'static str = "layers";

    fn filter_params(query: &SliceQuery) -> Result<LayerFilterParams, QueryError> {
        Ok(LayerFilterParams {
            architecture_ids: query.id_list("architectureIds")?,
        })
    }
}

impl SliceResource for Module {
    const COLLECTION: &'static str = "modules";

    fn filter_params(query: &SliceQuery) -> Result<ModuleFilterParams, QueryError> {
        Ok(ModuleFilterParams {
            layer_ids: query.id_list("layerIds")?,
        })
    }
}

impl SliceResource for Convention {
    const COLLECTION: &'static str = "conventions";

    fn filter_params(query: &SliceQuery) -> Result<ConventionFilterParams, QueryError> {
        Ok(ConventionFilterParams {
            module_ids: query.id_list("moduleIds")?,
        })
    }
}

impl SliceResource for CodingRule {
    const COLLECTION: &'static str = "coding-rules";

    fn filter_params(query: &SliceQuery) -> Result<CodingRuleFilterParams, QueryError> {
        Ok(CodingRuleFilterParams {
            convention_ids: query.id_list("conventionIds")?,
            categories: query.list("categories"),
            severities: query.list("severities"),
        })
    }
}

impl SliceResource for ClassTypeCategory {
    const COLLECTION: &'static str = "class-type-categories";

    fn filter_params(query: &SliceQuery) -> Result<ClassTypeCategoryFilterParams, QueryError> {
        Ok(ClassTypeCategoryFilterParams {
            architecture_ids: query.id_list("architectureIds")?,
        })
    }
}

impl SliceResource for ClassType {
    const COLLECTION: &'static str = "class-types";

    fn filter_params(query: &SliceQuery) -> Result<ClassTypeFilterParams, QueryError> {
        Ok(ClassTypeFilterParams {
            category_ids: query.id_list("categoryIds")?,
            architecture_ids: query.id_list("architectureIds")?,
        })
    }
}

/// Handler for slice listings.
///
/// # HTTP Request
///
/// `GET [base]/api/v1/[collection]`
///
/// # Response
///
/// - `200 OK` - `{data: {content, size, hasNext, nextCursor}, timestamp}`
/// - `400 Bad Request` - invalid cursor, size, search field or filter
/// - `500` / `503` - storage failure
pub async fn slice_handler<S, E>(
    State(state): State<AppState<S>>,
    OriginalUri(uri): OriginalUri,
    query: SliceQuery,
) -> RestResult<Response>
where
    S: SliceRepository<E> + Send + Sync + 'static,
    E: SliceResource,
{
    let instance = uri.path();
    debug!(entity = E::NAME, query = uri.query().unwrap_or(""), "Processing slice request");

    let params = E::filter_params(&query)
        .and_then(|filters| query.to_search_params(filters))
        .map_err(|e| state.query_error(e, instance))?;

    let slice = state
        .service()
        .search::<E>(params)
        .await
        .map_err(|e| state.slice_error(e, instance))?;

    let body = ApiResponse::new(SliceBody::from(slice), state.now());
    Ok(Json(body).into_response())
}
