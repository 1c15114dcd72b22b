//! Application state for the catalog REST API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the storage backend, the slice service built over it,
//! the configuration and the clock every response timestamp is read from.

use std::sync::Arc;

use canon_persistence::catalog::{
    Architecture, ClassType, ClassTypeCategory, CodingRule, Convention, Layer, Module, TechStack,
};
use canon_persistence::core::{Clock, SliceRepository, SliceService, SystemClock};
use canon_persistence::error::{QueryError, SliceError};
use chrono::{DateTime, Utc};

use crate::config::ServerConfig;
use crate::error::RestError;

/// Storage able to serve slices of every catalog entity.
pub trait CatalogStorage:
    SliceRepository<TechStack>
    + SliceRepository<Architecture>
    + SliceRepository<Layer>
    + SliceRepository<Module>
    + SliceRepository<Convention>
    + SliceRepository<CodingRule>
    + SliceRepository<ClassTypeCategory>
    + SliceRepository<ClassType>
    + Send
    + Sync
    + 'static
{
    /// Returns the backend name reported by health checks.
    fn storage_name(&self) -> &'static str {
        SliceRepository::<Layer>::backend_name(self)
    }
}

impl<S> CatalogStorage for S where
    S: SliceRepository<TechStack>
        + SliceRepository<Architecture>
        + SliceRepository<Layer>
        + SliceRepository<Module>
        + SliceRepository<Convention>
        + SliceRepository<CodingRule>
        + SliceRepository<ClassTypeCategory>
        + SliceRepository<ClassType>
        + Send
        + Sync
        + 'static
{
}

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type
///
/// # Example
///
/// ```rust,ignore
/// use canon_rest::{AppState, ServerConfig};
/// use canon_persistence::backends::memory::MemoryBackend;
/// use std::sync::Arc;
///
/// let state = AppState::new(Arc::new(MemoryBackend::new()), ServerConfig::default());
/// ```
pub struct AppState<S> {
    /// The slice service over the storage backend.
    service: SliceService<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,

    /// Time source for envelopes and problem details.
    clock: Arc<dyn Clock>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            config: Arc::clone(&self.config),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S> AppState<S> {
    /// Creates a new AppState reading time from the system clock.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self::with_clock(storage, config, Arc::new(SystemClock))
    }

    /// Creates a new AppState with an explicit clock.
    pub fn with_clock(storage: Arc<S>, config: ServerConfig, clock: Arc<dyn Clock>) -> Self {
        let service = SliceService::new(storage, config.page_limits());
        Self {
            service,
            config: Arc::new(config),
            clock,
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        self.service.repository()
    }

    /// Returns the slice service.
    pub fn service(&self) -> &SliceService<S> {
        &self.service
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the current time from the configured clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns the default page size for slices.
    pub fn default_page_size(&self) -> usize {
        self.config.default_page_size
    }

    /// Returns the maximum page size for slices.
    pub fn max_page_size(&self) -> usize {
        self.config.max_page_size
    }

    /// Wraps an engine failure for the request at `instance`.
    pub fn slice_error(&self, err: SliceError, instance: &str) -> RestError {
        RestError::new(err, instance, self.now())
    }

    /// Wraps an edge validation failure for the request at `instance`.
    pub fn query_error(&self, err: QueryError, instance: &str) -> RestError {
        RestError::query(err, instance, self.now())
    }
}
