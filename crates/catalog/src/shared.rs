use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use pricetag_core::{DomainResult, ItemId, Money, Tag};

use crate::catalog::{Catalog, InsertOutcome};
use crate::item::ItemSnapshot;

/// Cloneable, thread-safe handle to a [`Catalog`].
///
/// A single lock guards both indexes: mutations hold the write lock for the
/// whole operation, so readers never see one index updated without the other.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Catalog>>,
}

impl SharedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    // Poisoned locks are recovered: catalog operations do not panic mid-update.
    fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn insert(&self, id: ItemId, price: Money, tags: &[Tag]) -> InsertOutcome {
        self.write().insert(id, price, tags)
    }

    pub fn find(&self, id: ItemId) -> Money {
        self.read().find(id)
    }

    pub fn item(&self, id: ItemId) -> Option<ItemSnapshot> {
        self.read().item(id)
    }

    pub fn delete(&self, id: ItemId) -> i64 {
        self.write().delete(id)
    }

    pub fn find_min_price(&self, tag: Tag) -> Money {
        self.read().find_min_price(tag)
    }

    pub fn find_max_price(&self, tag: Tag) -> Money {
        self.read().find_max_price(tag)
    }

    pub fn find_price_range(&self, tag: Tag, low: Money, high: Money) -> usize {
        self.read().find_price_range(tag, low, high)
    }

    pub fn try_find_price_range(&self, tag: Tag, low: Money, high: Money) -> DomainResult<usize> {
        self.read().try_find_price_range(tag, low, high)
    }

    pub fn price_hike(&self, low: ItemId, high: ItemId, rate_percent: f64) -> Money {
        self.write().price_hike(low, high, rate_percent)
    }

    pub fn remove_names(&self, id: ItemId, tags: &[Tag]) -> i64 {
        self.write().remove_names(id, tags)
    }

    pub fn try_remove_names(&self, id: ItemId, tags: &[Tag]) -> DomainResult<i64> {
        self.write().try_remove_names(id, tags)
    }

    pub fn check_invariants(&self) -> DomainResult<()> {
        self.read().check_invariants()
    }

    /// Run a closure against a consistent view of the catalog.
    pub fn with_read<R>(&self, f: impl FnOnce(&Catalog) -> R) -> R {
        f(&self.read())
    }
}

impl From<Catalog> for SharedCatalog {
    fn from(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }
}
