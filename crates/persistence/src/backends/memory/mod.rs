//! In-memory catalog backend.
//!
//! Every entity lives in its own ordered table keyed by its ID, so a slice
//! query is a range scan starting just past the cursor. No offsets are
//! ever computed. The class type architecture filter is the one join: it is
//! resolved against the live categories of the listed architectures.
//!
//! # Example
//!
//! ```
//! use canon_persistence::backends::memory::MemoryBackend;
//! use canon_persistence::catalog::Layer;
//!
//! let backend = MemoryBackend::new();
//! backend.insert(Layer::new(1, 1, "DOM", "Domain")).unwrap();
//! assert_eq!(backend.len::<Layer>(), 1);
//! ```

mod seed;
mod table;

pub use seed::CatalogSeed;
pub use table::MemoryTable;

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::catalog::{
    Architecture, CatalogEntity, ClassType, ClassTypeCategory, CodingRule, Convention, Layer,
    Module, TechStack,
};
use crate::core::{Clock, EntityId, SliceRepository, SystemClock};
use crate::error::{StorageError, StorageResult};
use crate::types::SliceCriteria;

/// Gives access to the table holding entity `E`.
pub trait CatalogTable<E: CatalogEntity> {
    /// Returns the table.
    fn table(&self) -> &MemoryTable<E>;

    /// Runs a keyset scan for `criteria`.
    ///
    /// Entities whose filters reach into other tables override this.
    fn scan(&self, criteria: &SliceCriteria<E>) -> Vec<E> {
        self.table().scan(criteria)
    }
}

/// In-memory storage for the whole catalog.
pub struct MemoryBackend {
    tech_stacks: MemoryTable<TechStack>,
    architectures: MemoryTable<Architecture>,
    layers: MemoryTable<Layer>,
    modules: MemoryTable<Module>,
    conventions: MemoryTable<Convention>,
    coding_rules: MemoryTable<CodingRule>,
    class_type_categories: MemoryTable<ClassTypeCategory>,
    class_types: MemoryTable<ClassType>,
    clock: Arc<dyn Clock>,
}

impl Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("tech_stacks", &self.tech_stacks.len())
            .field("architectures", &self.architectures.len())
            .field("layers", &self.layers.len())
            .field("modules", &self.modules.len())
            .field("conventions", &self.conventions.len())
            .field("coding_rules", &self.coding_rules.len())
            .field("class_type_categories", &self.class_type_categories.len())
            .field("class_types", &self.class_types.len())
            .finish_non_exhaustive()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Creates an empty backend stamping rows from the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty backend stamping rows from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            tech_stacks: MemoryTable::new(),
            architectures: MemoryTable::new(),
            layers: MemoryTable::new(),
            modules: MemoryTable::new(),
            conventions: MemoryTable::new(),
            coding_rules: MemoryTable::new(),
            class_type_categories: MemoryTable::new(),
            class_types: MemoryTable::new(),
            clock,
        }
    }

    /// Returns the clock rows are stamped from.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Inserts a row, stamping its audit columns.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DuplicateKey`] if the key is taken.
    pub fn insert<E>(&self, mut entity: E) -> StorageResult<E>
    where
        E: CatalogEntity,
        Self: CatalogTable<E>,
    {
        let now = self.clock.now();
        let audit = entity.audit_mut();
        audit.created_at = now;
        audit.updated_at = now;
        self.table().insert(entity)
    }

    /// Returns the next unused key for `E`.
    pub fn next_id<E>(&self) -> E::Id
    where
        E: CatalogEntity,
        Self: CatalogTable<E>,
    {
        self.table().next_id()
    }

    /// Returns a live row by key.
    pub fn get<E>(&self, id: E::Id) -> Option<E>
    where
        E: CatalogEntity,
        Self: CatalogTable<E>,
    {
        self.table().get(&id).filter(|e| !e.is_deleted())
    }

    /// Soft-deletes a row. Returns false if the row is missing or already
    /// deleted.
    pub fn soft_delete<E>(&self, id: E::Id) -> bool
    where
        E: CatalogEntity,
        Self: CatalogTable<E>,
    {
        let now = self.clock.now();
        self.table().update(&id, |entity| {
            if entity.is_deleted() {
                return false;
            }
            entity.audit_mut().delete(now);
            true
        })
        .unwrap_or(false)
    }

    /// Returns the number of stored rows for `E`, deleted ones included.
    pub fn len<E>(&self) -> usize
    where
        E: CatalogEntity,
        Self: CatalogTable<E>,
    {
        self.table().len()
    }

    /// Returns true if no table holds any row.
    pub fn is_empty(&self) -> bool {
        self.tech_stacks.is_empty()
            && self.architectures.is_empty()
            && self.layers.is_empty()
            && self.modules.is_empty()
            && self.conventions.is_empty()
            && self.coding_rules.is_empty()
            && self.class_type_categories.is_empty()
            && self.class_types.is_empty()
    }

    /// Inserts every row of `seed`. Returns the number of rows inserted.
    ///
    /// All keys are checked before the first insert, so a rejected seed
    /// leaves the backend unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DuplicateKey`] if a key repeats within the
    /// seed or is already stored.
    pub fn load_seed(&self, seed: CatalogSeed) -> StorageResult<usize> {
        self.check_fresh_keys(&seed.tech_stacks)?;
        self.check_fresh_keys(&seed.architectures)?;
        self.check_fresh_keys(&seed.layers)?;
        self.check_fresh_keys(&seed.modules)?;
        self.check_fresh_keys(&seed.conventions)?;
        self.check_fresh_keys(&seed.coding_rules)?;
        self.check_fresh_keys(&seed.class_type_categories)?;
        self.check_fresh_keys(&seed.class_types)?;

        let total = seed.len();
        self.insert_all(seed.tech_stacks)?;
        self.insert_all(seed.architectures)?;
        self.insert_all(seed.layers)?;
        self.insert_all(seed.modules)?;
        self.insert_all(seed.conventions)?;
        self.insert_all(seed.coding_rules)?;
        self.insert_all(seed.class_type_categories)?;
        self.insert_all(seed.class_types)?;
        debug!(rows = total, "Loaded catalog seed");
        Ok(total)
    }

    fn check_fresh_keys<E>(&self, rows: &[E]) -> StorageResult<()>
    where
        E: CatalogEntity,
        Self: CatalogTable<E>,
    {
        let mut seen = BTreeSet::new();
        for row in rows {
            let id = row.id();
            if !seen.insert(id) || self.table().contains(&id) {
                return Err(StorageError::DuplicateKey {
                    table: E::NAME,
                    key: id.raw(),
                });
            }
        }
        Ok(())
    }

    fn insert_all<E>(&self, rows: Vec<E>) -> StorageResult<()>
    where
        E: CatalogEntity,
        Self: CatalogTable<E>,
    {
        for row in rows {
            self.insert(row)?;
        }
        Ok(())
    }

    /// Reads a JSON seed file and loads it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Internal`] if the file cannot be read or
    /// parsed, or a duplicate key error from [`MemoryBackend::load_seed`].
    pub async fn load_seed_file(&self, path: impl AsRef<std::path::Path>) -> StorageResult<usize> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let seed: CatalogSeed = serde_json::from_str(&raw)?;
        debug!(path = %path.display(), "Parsed catalog seed file");
        self.load_seed(seed)
    }
}

macro_rules! catalog_table {
    ($entity:ty, $field:ident) => {
        impl CatalogTable<$entity> for MemoryBackend {
            fn table(&self) -> &MemoryTable<$entity> {
                &self.$field
            }
        }
    };
}

catalog_table!(TechStack, tech_stacks);
catalog_table!(Architecture, architectures);
catalog_table!(Layer, layers);
catalog_table!(Module, modules);
catalog_table!(Convention, conventions);
catalog_table!(CodingRule, coding_rules);
catalog_table!(ClassTypeCategory, class_type_categories);

impl CatalogTable<ClassType> for MemoryBackend {
    fn table(&self) -> &MemoryTable<ClassType> {
        &self.class_types
    }

    fn scan(&self, criteria: &SliceCriteria<ClassType>) -> Vec<ClassType> {
        let architectures = &criteria.filter().architecture_ids;
        if !architectures.is_constrained() {
            return self.class_types.scan(criteria);
        }
        let categories = self
            .class_type_categories
            .live_keys_where(|category| architectures.admits(&category.architecture_id));
        self.class_types
            .scan_where(criteria, |class_type| categories.contains(&class_type.category_id))
    }
}

#[async_trait]
impl<E> SliceRepository<E> for MemoryBackend
where
    E: CatalogEntity,
    MemoryBackend: CatalogTable<E>,
{
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn find_by_slice_criteria(&self, criteria: &SliceCriteria<E>) -> StorageResult<Vec<E>> {
        if criteria.ids().matches_nothing() {
            return Ok(Vec::new());
        }
        Ok(CatalogTable::scan(self, criteria))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::catalog::{
        ClassTypeCategoryId, ClassTypeFilterParams, LayerId, RuleCategory, RuleSeverity,
    };
    use crate::core::{FixedClock, QueryFactory};
    use crate::types::{PageSizeLimits, SearchParams};

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        ))
    }

    fn layers(backend: &MemoryBackend, count: i64) {
        for id in 1..=count {
            backend
                .insert(Layer::new(id, 1, format!("L{id}"), format!("Layer {id}")))
                .unwrap();
        }
    }

    #[test]
    fn test_insert_stamps_audit_from_clock() {
        let clock = clock();
        let backend = MemoryBackend::with_clock(clock.clone());

        let layer = backend.insert(Layer::new(1, 1, "DOM", "Domain")).unwrap();
        assert_eq!(layer.audit.created_at, clock.now());
        assert_eq!(layer.audit.updated_at, clock.now());

        clock.advance(Duration::minutes(5));
        assert!(backend.soft_delete::<Layer>(LayerId::new(1)));
        assert!(backend.get::<Layer>(LayerId::new(1)).is_none());
        assert!(!backend.soft_delete::<Layer>(LayerId::new(1)));
        assert_eq!(backend.len::<Layer>(), 1);
    }

    #[test]
    fn test_duplicate_key() {
        let backend = MemoryBackend::new();
        backend.insert(Layer::new(1, 1, "DOM", "Domain")).unwrap();
        let err = backend.insert(Layer::new(1, 1, "APP", "Application")).unwrap_err();
        assert!(matches!(
            err,
            StorageError::DuplicateKey { table: "layer", key: 1 }
        ));
    }

    #[test]
    fn test_next_id_follows_inserts() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.next_id::<Layer>().raw(), 1);
        backend.insert(Layer::new(7, 1, "DOM", "Domain")).unwrap();
        assert_eq!(backend.next_id::<Layer>().raw(), 8);
    }

    #[tokio::test]
    async fn test_scan_fetches_one_extra() {
        let backend = MemoryBackend::new();
        layers(&backend, 5);

        let factory = QueryFactory::new(PageSizeLimits::default());
        let criteria = factory
            .create_slice_criteria::<Layer>(SearchParams::after("2", 2))
            .unwrap();
        let rows = backend.find_by_slice_criteria(&criteria).await.unwrap();
        let keys: Vec<i64> = rows.iter().map(|l| l.id.value()).collect();
        assert_eq!(keys, vec![3, 4, 5]);
    }

    #[tokio::test]
    async fn test_scan_descending() {
        let backend = MemoryBackend::new();
        for id in 1..=4 {
            backend
                .insert(CodingRule::new(
                    id,
                    1,
                    format!("R-{id}"),
                    format!("Rule {id}"),
                    RuleSeverity::Major,
                    RuleCategory::Naming,
                ))
                .unwrap();
        }

        let factory = QueryFactory::new(PageSizeLimits::default());
        let criteria = factory
            .create_slice_criteria::<CodingRule>(SearchParams::after("4", 2))
            .unwrap();
        let rows = backend.find_by_slice_criteria(&criteria).await.unwrap();
        let keys: Vec<i64> = rows.iter().map(|r| r.id.value()).collect();
        assert_eq!(keys, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_class_types_by_architecture() {
        let backend = MemoryBackend::new();
        backend
            .insert(ClassTypeCategory::new(1, 1, "DOMAIN", "Domain"))
            .unwrap();
        backend
            .insert(ClassTypeCategory::new(2, 2, "ADAPTER", "Adapter"))
            .unwrap();
        backend
            .insert(ClassTypeCategory::new(3, 2, "LEGACY", "Legacy"))
            .unwrap();
        for (id, category) in [(1, 1), (2, 2), (3, 1), (4, 3)] {
            backend
                .insert(ClassType::new(id, category, format!("T{id}"), format!("Type {id}")))
                .unwrap();
        }
        assert!(backend.soft_delete::<ClassTypeCategory>(ClassTypeCategoryId::new(3)));

        let factory = QueryFactory::new(PageSizeLimits::default());
        let by_architecture = |architecture_ids: Option<Vec<i64>>| {
            factory
                .create_slice_criteria::<ClassType>(SearchParams::first(10).with_filters(
                    ClassTypeFilterParams {
                        architecture_ids,
                        ..Default::default()
                    },
                ))
                .unwrap()
        };

        let rows = backend
            .find_by_slice_criteria(&by_architecture(Some(vec![2])))
            .await
            .unwrap();
        let keys: Vec<i64> = rows.iter().map(|c| c.id.value()).collect();
        assert_eq!(keys, vec![2]);

        let rows = backend
            .find_by_slice_criteria(&by_architecture(Some(vec![])))
            .await
            .unwrap();
        assert!(rows.is_empty());

        let rows = backend
            .find_by_slice_criteria(&by_architecture(None))
            .await
            .unwrap();
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_rejected_seed_leaves_backend_untouched() {
        let backend = MemoryBackend::new();
        let seed = CatalogSeed {
            architectures: vec![Architecture::new(1, 1, "Clean Hexagon", "HEXAGONAL")],
            layers: vec![
                Layer::new(1, 1, "DOM", "Domain"),
                Layer::new(1, 1, "APP", "Application"),
            ],
            ..Default::default()
        };

        let err = backend.load_seed(seed).unwrap_err();
        assert!(matches!(
            err,
            StorageError::DuplicateKey { table: "layer", key: 1 }
        ));
        assert!(backend.is_empty());
    }

    #[test]
    fn test_seed_clashing_with_stored_row() {
        let backend = MemoryBackend::new();
        backend.insert(Module::new(3, 1, "ports", "app/port")).unwrap();
        let seed = CatalogSeed {
            layers: vec![Layer::new(1, 1, "DOM", "Domain")],
            modules: vec![Module::new(3, 1, "ports", "app/port")],
            ..Default::default()
        };

        let err = backend.load_seed(seed).unwrap_err();
        assert!(matches!(
            err,
            StorageError::DuplicateKey { table: "module", key: 3 }
        ));
        assert_eq!(backend.len::<Layer>(), 0);
        assert_eq!(backend.len::<Module>(), 1);
    }

    #[test]
    fn test_is_empty() {
        let backend = MemoryBackend::new();
        assert!(backend.is_empty());
        layers(&backend, 1);
        assert!(!backend.is_empty());
    }
}
