//! Error types for the catalog REST API.
//!
//! Every failure is rendered as an [RFC 7807](https://www.rfc-editor.org/rfc/rfc7807)
//! problem detail. The HTTP status is derived from the engine's
//! [`ErrorKind`] by [`status_for`], which is the only place that mapping
//! lives:
//!
//! | Error Kind | HTTP Status | Code |
//! |------------|-------------|------|
//! | InvalidCursor | 400 | `INVALID_CURSOR` |
//! | InvalidPageSize | 400 | `INVALID_PAGE_SIZE` |
//! | InvalidSearchField | 400 | `INVALID_SEARCH_FIELD` |
//! | InvalidFilter | 400 | `INVALID_FILTER` |
//! | StorageUnavailable | 503 | `STORAGE_UNAVAILABLE` |
//! | StorageFailure | 500 | `STORAGE_FAILURE` |

use std::fmt;

use axum::{
    Json,
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use canon_persistence::error::{ErrorKind, QueryError, SliceError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Media type of problem detail bodies.
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Header carrying the machine-readable error code.
pub const X_ERROR_CODE: HeaderName = HeaderName::from_static("x-error-code");

/// Maps an error kind to its HTTP status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidCursor
        | ErrorKind::InvalidPageSize
        | ErrorKind::InvalidSearchField
        | ErrorKind::InvalidFilter => StatusCode::BAD_REQUEST,
        ErrorKind::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::StorageFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The error type for REST API operations.
///
/// Carries everything needed to render a problem detail: the kind, a
/// human-readable detail, the request path and the time of failure.
#[derive(Debug, Clone)]
pub struct RestError {
    kind: ErrorKind,
    detail: String,
    instance: String,
    timestamp: DateTime<Utc>,
}

impl RestError {
    /// Creates an error from an engine failure.
    pub fn new(err: SliceError, instance: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        let kind = err.kind();
        // Backend messages behind a 500 are not echoed to callers.
        let detail = match kind {
            ErrorKind::StorageFailure => kind.title().to_string(),
            _ => err.to_string(),
        };
        Self {
            kind,
            detail,
            instance: instance.into(),
            timestamp,
        }
    }

    /// Creates an error for a request rejected at the edge.
    pub fn query(err: QueryError, instance: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(SliceError::Query(err), instance, timestamp)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the HTTP status.
    pub fn status(&self) -> StatusCode {
        status_for(self.kind)
    }

    /// Returns the human-readable detail.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Builds the problem detail body.
    pub fn problem(&self) -> ProblemDetail {
        ProblemDetail {
            problem_type: "about:blank".to_string(),
            title: self.kind.title().to_string(),
            status: self.status().as_u16(),
            detail: self.detail.clone(),
            code: self.kind.code().to_string(),
            timestamp: self.timestamp,
            instance: self.instance.clone(),
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind.title(), self.kind.code(), self.detail)
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(
                code = self.kind.code(),
                status = status.as_u16(),
                instance = %self.instance,
                detail = %self.detail,
                "Request failed"
            );
        } else {
            warn!(
                code = self.kind.code(),
                status = status.as_u16(),
                instance = %self.instance,
                detail = %self.detail,
                "Request rejected"
            );
        }

        let mut response = (status, Json(self.problem())).into_response();
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
        headers.insert(X_ERROR_CODE, HeaderValue::from_static(self.kind.code()));
        response
    }
}

/// An RFC 7807 problem detail body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetail {
    /// Problem type URI. Always `about:blank`.
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short summary of the problem kind.
    pub title: String,
    /// HTTP status.
    pub status: u16,
    /// Explanation specific to this occurrence.
    pub detail: String,
    /// Stable machine-readable code.
    pub code: String,
    /// When the problem occurred.
    pub timestamp: DateTime<Utc>,
    /// Request path.
    pub instance: String,
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
