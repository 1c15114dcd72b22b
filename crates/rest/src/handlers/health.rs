//! Health check endpoint handlers.
//!
//! Provides health, liveness and readiness endpoints for monitoring and
//! load balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use canon_persistence::catalog::{Layer, LayerFilterParams};
use canon_persistence::types::SearchParams;
use tracing::{debug, warn};

use crate::error::RestResult;
use crate::state::{AppState, CatalogStorage};

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` - Server is healthy
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: CatalogStorage,
{
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": state.storage().storage_name(),
        "version": crate::VERSION,
        "timestamp": state.now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}

/// Handler for the liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for the readiness probe.
///
/// Runs a one-row slice query to verify storage answers.
///
/// # HTTP Request
///
/// `GET [base]/_readiness`
///
/// # Response
///
/// - `200 OK` - Storage answered
/// - `503 Service Unavailable` - Storage failed
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: CatalogStorage,
{
    debug!("Processing readiness check request");

    let probe = state
        .service()
        .search::<Layer>(SearchParams::<LayerFilterParams>::first(1))
        .await;

    let (status, storage) = match probe {
        Ok(_) => (StatusCode::OK, "ok".to_string()),
        Err(e) => {
            warn!(error = %e, "Readiness probe failed");
            (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    };

    let response = serde_json::json!({
        "status": if status.is_success() { "ready" } else { "unavailable" },
        "backend": state.storage().storage_name(),
        "checks": {
            "storage": storage
        },
        "timestamp": state.now().to_rfc3339()
    });

    (status, Json(response)).into_response()
}
