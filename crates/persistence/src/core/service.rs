//! The slice query pipeline: factory, port, assembler.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{QueryFactory, SliceAssembler, SliceEntity, SliceRepository};
use crate::error::SliceQueryResult;
use crate::types::{PageSizeLimits, SearchParams, SliceResult};

/// Runs slice queries for any entity its repository supports.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use canon_persistence::backends::memory::MemoryBackend;
/// use canon_persistence::catalog::Layer;
/// use canon_persistence::core::SliceService;
/// use canon_persistence::types::{PageSizeLimits, SearchParams};
///
/// let service = SliceService::new(Arc::new(MemoryBackend::new()), PageSizeLimits::default());
/// let slice = service.search::<Layer>(SearchParams::first(20)).await?;
/// ```
#[derive(Debug)]
pub struct SliceService<R> {
    repository: Arc<R>,
    factory: QueryFactory,
    assembler: SliceAssembler,
}

impl<R> Clone for SliceService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            factory: self.factory,
            assembler: self.assembler,
        }
    }
}

impl<R> SliceService<R> {
    /// Creates a service over `repository`.
    pub fn new(repository: Arc<R>, limits: PageSizeLimits) -> Self {
        Self {
            repository,
            factory: QueryFactory::new(limits),
            assembler: SliceAssembler,
        }
    }

    /// Returns the repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns the query factory.
    pub fn factory(&self) -> &QueryFactory {
        &self.factory
    }

    /// Runs one slice query.
    ///
    /// # Errors
    ///
    /// Criteria errors are returned before the repository is called.
    /// Storage errors are passed through unchanged.
    pub async fn search<E>(
        &self,
        params: SearchParams<E::FilterParams>,
    ) -> SliceQueryResult<SliceResult<E::Dto>>
    where
        E: SliceEntity,
        R: SliceRepository<E>,
    {
        let criteria = self
            .factory
            .create_slice_criteria::<E>(params)
            .inspect_err(|e| debug!(entity = E::NAME, error = %e, "Rejected slice query"))?;

        debug!(
            entity = E::NAME,
            backend = self.repository.backend_name(),
            cursor = ?criteria.raw_cursor(),
            size = criteria.size(),
            has_ids = criteria.has_ids(),
            has_search = criteria.has_search(),
            "Executing slice query"
        );

        let fetched = self
            .repository
            .find_by_slice_criteria(&criteria)
            .await
            .inspect_err(|e| warn!(entity = E::NAME, error = %e, "Slice query failed"))?;

        let slice = self.assembler.to_slice_result(fetched, criteria.size());

        debug!(
            entity = E::NAME,
            count = slice.len(),
            has_next = slice.has_next(),
            "Slice assembled"
        );

        Ok(slice)
    }
}
