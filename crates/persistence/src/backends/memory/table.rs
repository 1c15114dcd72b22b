//! A single ordered table.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;
use std::sync::atomic::{AtomicI64, Ordering};

use parking_lot::RwLock;

use crate::catalog::CatalogEntity;
use crate::core::{EntityId, KeyOrder, SliceEntity};
use crate::error::{StorageError, StorageResult};
use crate::types::SliceCriteria;

/// Rows of one entity, ordered by key.
#[derive(Debug)]
pub struct MemoryTable<E: SliceEntity> {
    rows: RwLock<BTreeMap<E::Id, E>>,
    next_id: AtomicI64,
}

impl<E: SliceEntity> Default for MemoryTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SliceEntity> MemoryTable<E> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Returns the next unused key.
    pub fn next_id(&self) -> E::Id {
        E::Id::from_raw(self.next_id.load(Ordering::SeqCst))
    }

    /// Returns true if a row, deleted or not, holds `id`.
    pub fn contains(&self, id: &E::Id) -> bool {
        self.rows.read().contains_key(id)
    }

    /// Returns the keys of live rows satisfying `pred`.
    pub fn live_keys_where(&self, pred: impl Fn(&E) -> bool) -> BTreeSet<E::Id> {
        self.rows
            .read()
            .values()
            .filter(|e| !e.is_deleted() && pred(e))
            .map(|e| e.id())
            .collect()
    }

    /// Returns a row by key, deleted or not.
    pub fn get(&self, id: &E::Id) -> Option<E> {
        self.rows.read().get(id).cloned()
    }

    /// Applies `f` to the row with key `id`, if present.
    pub fn update<T>(&self, id: &E::Id, f: impl FnOnce(&mut E) -> T) -> Option<T> {
        self.rows.write().get_mut(id).map(f)
    }

    /// Scans rows past the cursor in walk order, keeping those that match
    /// and stopping at the fetch size.
    pub fn scan(&self, criteria: &SliceCriteria<E>) -> Vec<E> {
        self.scan_where(criteria, |_| true)
    }

    /// Like [`MemoryTable::scan`], additionally requiring `pred`.
    pub fn scan_where(&self, criteria: &SliceCriteria<E>, pred: impl Fn(&E) -> bool) -> Vec<E> {
        let rows = self.rows.read();
        let cursor = criteria.page().cursor();
        let fetch = criteria.fetch_size();

        let matching = |entity: &&E| criteria.matches(entity) && pred(*entity);
        match (E::ORDER, cursor) {
            (KeyOrder::Ascending, None) => rows
                .values()
                .filter(matching)
                .take(fetch)
                .cloned()
                .collect(),
            (KeyOrder::Ascending, Some(cursor)) => rows
                .range((Bound::Excluded(cursor), Bound::Unbounded))
                .map(|(_, e)| e)
                .filter(matching)
                .take(fetch)
                .cloned()
                .collect(),
            (KeyOrder::Descending, None) => rows
                .values()
                .rev()
                .filter(matching)
                .take(fetch)
                .cloned()
                .collect(),
            (KeyOrder::Descending, Some(cursor)) => rows
                .range(..cursor)
                .rev()
                .map(|(_, e)| e)
                .filter(matching)
                .take(fetch)
                .cloned()
                .collect(),
        }
    }
}

impl<E: CatalogEntity> MemoryTable<E> {
    /// Inserts a row.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DuplicateKey`] if the key is taken.
    pub fn insert(&self, entity: E) -> StorageResult<E> {
        let id = entity.id();
        let mut rows = self.rows.write();
        match rows.entry(id) {
            Entry::Occupied(_) => Err(StorageError::DuplicateKey {
                table: E::NAME,
                key: id.raw(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(entity.clone());
                self.next_id.fetch_max(id.raw().saturating_add(1), Ordering::SeqCst);
                Ok(entity)
            }
        }
    }
}
