//! In-process catalog store.

use std::sync::RwLock;

use crate::Catalog;

use super::{CatalogStore, CatalogStoreError};

/// Catalog held in memory behind a read/write lock.
///
/// Replacing swaps the whole map under the write lock, so readers never see a
/// half-applied write. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    catalog: RwLock<Catalog>,
}

impl MemoryCatalogStore {
    /// Create a store pre-populated with `catalog`.
    pub const fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
        }
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn load(&self) -> Result<Catalog, CatalogStoreError> {
        let guard = self
            .catalog
            .read()
            .map_err(|_| CatalogStoreError::Poisoned)?;
        Ok(guard.clone())
    }

    fn len(&self) -> Result<usize, CatalogStoreError> {
        let guard = self
            .catalog
            .read()
            .map_err(|_| CatalogStoreError::Poisoned)?;
        Ok(guard.len())
    }

    fn replace_all(&self, catalog: &Catalog) -> Result<(), CatalogStoreError> {
        let replacement = catalog.clone();
        let mut guard = self
            .catalog
            .write()
            .map_err(|_| CatalogStoreError::Poisoned)?;
        *guard = replacement;
        Ok(())
    }
}
