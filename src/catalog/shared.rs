use std::sync::Arc;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::catalog::Catalog;
use super::operations::copy_catalog;

/// A catalog shared between threads.
///
/// Catalog operations check for conflicts and then mutate, with nothing in
/// between to stop another writer. Running each whole operation under `write`
/// closes that gap; lookups after population only need `read`.
#[derive(Debug, Clone)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        SharedCatalog {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.inner.write()
    }

    /// Run `f` with exclusive access to the catalog
    pub fn with_write<T>(&self, f: impl FnOnce(&mut Catalog) -> T) -> T {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// An independent copy of the current state
    pub fn snapshot(&self) -> Catalog {
        copy_catalog(&self.inner.read())
    }
}

impl From<Catalog> for SharedCatalog {
    fn from(catalog: Catalog) -> Self {
        Self::new(catalog)
    }
}
