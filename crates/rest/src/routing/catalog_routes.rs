//! Catalog route configuration.
//!
//! Defines all routes for the catalog REST API.

use axum::{Router, routing::get};
use canon_persistence::catalog::{
    Architecture, ClassType, ClassTypeCategory, CodingRule, Convention, Layer, Module, TechStack,
};

use crate::handlers::{self, SliceResource};
use crate::state::{AppState, CatalogStorage};

/// Path prefix of every collection.
pub const API_PREFIX: &str = "/api/v1";

/// Creates all catalog REST API routes.
///
/// # Routes
///
/// ## System-level
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
///
/// ## Collections
/// - `GET /api/v1/tech-stacks`
/// - `GET /api/v1/architectures`
/// - `GET /api/v1/layers`
/// - `GET /api/v1/modules`
/// - `GET /api/v1/conventions`
/// - `GET /api/v1/coding-rules`
/// - `GET /api/v1/class-type-categories`
/// - `GET /api/v1/class-types`
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: CatalogStorage,
{
    let api = Router::new()
        .route(&collection::<TechStack>(), get(handlers::slice_handler::<S, TechStack>))
        .route(&collection::<Architecture>(), get(handlers::slice_handler::<S, Architecture>))
        .route(&collection::<Layer>(), get(handlers::slice_handler::<S, Layer>))
        .route(&collection::<Module>(), get(handlers::slice_handler::<S, Module>))
        .route(&collection::<Convention>(), get(handlers::slice_handler::<S, Convention>))
        .route(&collection::<CodingRule>(), get(handlers::slice_handler::<S, CodingRule>))
        .route(
            &collection::<ClassTypeCategory>(),
            get(handlers::slice_handler::<S, ClassTypeCategory>),
        )
        .route(&collection::<ClassType>(), get(handlers::slice_handler::<S, ClassType>));

    Router::new()
        // System-level routes
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        // Collections
        .nest(API_PREFIX, api)
        // State
        .with_state(state)
}

/// Returns the route of an entity's collection, relative to [`API_PREFIX`].
fn collection<E: SliceResource>() -> String {
    format!("/{}", E::COLLECTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_paths() {
        assert_eq!(collection::<CodingRule>(), "/coding-rules");
        assert_eq!(collection::<ClassType>(), "/class-types");
        assert_eq!(collection::<ClassTypeCategory>(), "/class-type-categories");
        assert_eq!(collection::<TechStack>(), "/tech-stacks");
    }
}
