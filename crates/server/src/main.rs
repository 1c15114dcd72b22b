//! Canon catalog server.
//!
//! Serves keyset-paginated slices of the coding-standards catalog from an
//! in-memory backend, optionally preloaded from a JSON seed file.

use std::sync::Arc;

use anyhow::Context;
use canon_persistence::backends::memory::MemoryBackend;
use canon_persistence::core::SystemClock;
use canon_rest::{ServerConfig, create_app_with_config, init_logging};
use clap::Parser;
use tracing::info;

/// Creates the in-memory backend and loads the configured seed file.
async fn create_memory_backend(config: &ServerConfig) -> anyhow::Result<MemoryBackend> {
    let backend = MemoryBackend::with_clock(Arc::new(SystemClock));

    if let Some(path) = &config.seed_file {
        info!(seed_file = %path.display(), "Loading catalog seed");
        let rows = backend
            .load_seed_file(path)
            .await
            .with_context(|| format!("failed to load seed file {}", path.display()))?;
        info!(rows, "Catalog seed loaded");
    } else {
        info!("No seed file configured; starting with an empty catalog");
    }

    Ok(backend)
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        default_page_size = config.default_page_size,
        max_page_size = config.max_page_size,
        version = canon_rest::VERSION,
        "Starting Canon catalog server"
    );

    let backend = create_memory_backend(&config).await?;
    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}
