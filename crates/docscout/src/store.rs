//! Published catalog snapshots for long-lived embeddings.

use crate::types::Catalog;
use std::sync::{Arc, RwLock};

/// Holds the current catalog. A rescan builds a new catalog off to the side
/// and swaps it in with [`CatalogStore::publish`]; readers keep whatever
/// snapshot they already hold.
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The most recently published catalog.
    pub fn snapshot(&self) -> Arc<Catalog> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            // the lock only guards a pointer swap, so a poisoned value is still whole
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Replace the current catalog, returning the previous one.
    pub fn publish(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, next)
    }
}
