//! # canon-rest - Catalog Slice REST API
//!
//! This crate exposes the Canon coding-standards catalog over HTTP. Every
//! collection is listed in keyset-paginated slices: a response carries the
//! rows, the requested size, a `hasNext` flag and the cursor to continue
//! from.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use canon_rest::{create_app, ServerConfig};
//! use canon_persistence::backends::memory::MemoryBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = MemoryBackend::new();
//!     backend.load_seed_file("catalog.json").await?;
//!
//!     let app = create_app(backend);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Collection | URL | Filters | Search fields |
//! |------------|-----|---------|---------------|
//! | Tech stacks | `/api/v1/tech-stacks` | `statuses`, `platformTypes` | `NAME`, `LANGUAGE_TYPE`, `FRAMEWORK_TYPE` |
//! | Architectures | `/api/v1/architectures` | `techStackIds` | `NAME`, `PATTERN_TYPE` |
//! | Layers | `/api/v1/layers` | `architectureIds` | `CODE`, `NAME` |
//! | Modules | `/api/v1/modules` | `layerIds` | `NAME`, `MODULE_PATH` |
//! | Conventions | `/api/v1/conventions` | `moduleIds` | `VERSION`, `DESCRIPTION` |
//! | Coding rules | `/api/v1/coding-rules` | `conventionIds`, `categories`, `severities` | `CODE`, `NAME`, `DESCRIPTION` |
//! | Class type categories | `/api/v1/class-type-categories` | `architectureIds` | `CODE`, `NAME`, `DESCRIPTION` |
//! | Class types | `/api/v1/class-types` | `categoryIds`, `architectureIds` | `CODE`, `NAME`, `DESCRIPTION` |
//!
//! Every collection also accepts `cursor`, `size`, `ids`, `searchField` and
//! `searchWord`. List parameters may be comma-separated or repeated.
//! Modules, conventions and coding rules are listed newest first; the
//! other collections in ascending key order.
//!
//! ## Error Handling
//!
//! All errors are returned as `application/problem+json` bodies with an
//! `x-error-code` header; see [`error`] for the status mapping.
//!
//! ## Architecture
//!
//! - [`error`] - Problem details and the status mapping
//! - [`config`] - Server configuration
//! - [`state`] - Application state (slice service, configuration, clock)
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Query string parsing
//! - [`responses`] - Success envelopes
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::{AppState, CatalogStorage};

use std::sync::Arc;

use axum::Router;
use canon_persistence::core::{Clock, SystemClock};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates the Axum application with default configuration.
///
/// This is a convenience function that creates the app with default settings.
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: CatalogStorage,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: CatalogStorage,
{
    create_app_with_clock(storage, config, Arc::new(SystemClock))
}

/// Creates the Axum application reading response timestamps from `clock`.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use canon_rest::{create_app_with_clock, ServerConfig};
/// use canon_persistence::backends::memory::MemoryBackend;
/// use canon_persistence::core::FixedClock;
///
/// let clock = Arc::new(FixedClock::new(chrono::Utc::now()));
/// let app = create_app_with_clock(MemoryBackend::new(), ServerConfig::for_testing(), clock);
/// ```
pub fn create_app_with_clock<S>(storage: S, config: ServerConfig, clock: Arc<dyn Clock>) -> Router
where
    S: CatalogStorage,
{
    info!(
        backend = storage.storage_name(),
        default_page_size = config.default_page_size,
        max_page_size = config.max_page_size,
        "Creating REST API server"
    );

    // Create application state
    let state = AppState::with_clock(Arc::new(storage), config.clone(), clock);

    // Build the router with all catalog routes
    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    // Apply remaining middleware
    let router = router.layer(service_builder);

    // Request IDs go outermost
    if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    }
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "canon_rest={level},canon_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
