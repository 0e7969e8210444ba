//! Data access traits for the champion catalog.
//!
//! The `CatalogStore` trait defines the read/replace-all interface shared by
//! every backend. There is deliberately no per-record update: writers hand
//! over a complete [`Catalog`] and readers always receive a complete one.

use thiserror::Error;

use crate::Catalog;

mod file;
mod memory;
#[cfg(feature = "store-sqlite")]
mod sqlite;

pub use file::{JsonFileCatalogStore, JsonFileCatalogStoreError};
pub use memory::MemoryCatalogStore;
#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteCatalogStore, SqliteCatalogStoreError};

/// Errors surfaced by any [`CatalogStore`] backend.
#[derive(Debug, Error)]
pub enum CatalogStoreError {
    /// The JSON file backend failed.
    #[error(transparent)]
    JsonFile(#[from] JsonFileCatalogStoreError),
    /// The SQLite backend failed.
    #[cfg(feature = "store-sqlite")]
    #[error(transparent)]
    Sqlite(#[from] SqliteCatalogStoreError),
    /// A thread panicked while holding the store lock.
    #[error("catalog store lock was poisoned")]
    Poisoned,
}

/// What [`CatalogStore::seed_if_empty`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and received the seed records.
    Seeded {
        /// Number of records inserted.
        records: usize,
    },
    /// The store already held records and was left untouched.
    AlreadyPopulated {
        /// Number of records found.
        records: usize,
    },
    /// The store was empty but the seed had nothing to insert.
    EmptySeed,
}

/// Read and wholesale-replace access to the persisted catalog.
///
/// Implementations must make [`CatalogStore::replace_all`] atomic with respect
/// to [`CatalogStore::load`]: a concurrent reader sees either the old catalog
/// or the new one.
///
/// # Examples
///
/// ```rust
/// use drafter_core::{Catalog, CatalogStore, ChampionRecord, MemoryCatalogStore, SeedOutcome};
///
/// let store = MemoryCatalogStore::default();
/// let mut seed = Catalog::new();
/// seed.insert("Vi", ChampionRecord::from_traits([("peeling", true)]));
///
/// let outcome = store.seed_if_empty(&seed)?;
/// assert_eq!(outcome, SeedOutcome::Seeded { records: 1 });
/// assert_eq!(store.load()?, seed);
/// # Ok::<(), drafter_core::CatalogStoreError>(())
/// ```
pub trait CatalogStore: Send + Sync {
    /// Return every stored champion.
    fn load(&self) -> Result<Catalog, CatalogStoreError>;

    /// Count the stored champions.
    fn len(&self) -> Result<usize, CatalogStoreError>;

    /// Report whether the store holds no champions.
    fn is_empty(&self) -> Result<bool, CatalogStoreError> {
        Ok(self.len()? == 0)
    }

    /// Replace the whole stored catalog with `catalog`.
    fn replace_all(&self, catalog: &Catalog) -> Result<(), CatalogStoreError>;

    /// Insert `seed` when the store is empty; do nothing otherwise.
    ///
    /// This is a one-time bootstrap, not a sync: once the store has been
    /// written to, later seeds are ignored.
    fn seed_if_empty(&self, seed: &Catalog) -> Result<SeedOutcome, CatalogStoreError> {
        let records = self.len()?;
        if records > 0 {
            return Ok(SeedOutcome::AlreadyPopulated { records });
        }
        if seed.is_empty() {
            return Ok(SeedOutcome::EmptySeed);
        }
        self.replace_all(seed)?;
        log::info!("seeded empty catalog store with {} champions", seed.len());
        Ok(SeedOutcome::Seeded {
            records: seed.len(),
        })
    }
}
