//! Catalog persisted as a single JSON document.

use std::sync::Mutex;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::{Catalog, CatalogError};

use super::{CatalogStore, CatalogStoreError};

/// Error raised when reading or writing the catalog file.
#[derive(Debug, Error)]
pub enum JsonFileCatalogStoreError {
    /// Reading the catalog file failed.
    #[error("failed to read catalog file at {path}: {source}")]
    Read {
        /// Location of the catalog file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file contents were not a valid catalog.
    #[error("catalog file at {path} is invalid: {source}")]
    Parse {
        /// Location of the catalog file.
        path: Utf8PathBuf,
        /// Decoding failure.
        #[source]
        source: CatalogError,
    },
    /// Encoding the catalog failed.
    #[error("failed to encode catalog for {path}: {source}")]
    Serialise {
        /// Location of the catalog file.
        path: Utf8PathBuf,
        /// Encoder error returned by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Swapping in the new file failed.
    #[error("failed to write catalog file at {path}: {source}")]
    Write {
        /// Location of the catalog file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Catalog stored as `{name: record}` in one JSON file.
///
/// A missing file reads as an empty catalog. Writes go to a sibling temporary
/// file that is then renamed over the target, so readers see the previous
/// document until the swap completes.
#[derive(Debug)]
pub struct JsonFileCatalogStore {
    path: Utf8PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileCatalogStore {
    /// Create a store backed by the file at `path`. The file need not exist.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn read_catalog(&self) -> Result<Catalog, JsonFileCatalogStoreError> {
        let contents = drafter_fs::read_to_string_if_exists(&self.path).map_err(|source| {
            JsonFileCatalogStoreError::Read {
                path: self.path.clone(),
                source,
            }
        })?;
        let Some(contents) = contents else {
            return Ok(Catalog::new());
        };
        if contents.trim().is_empty() {
            return Ok(Catalog::new());
        }
        Catalog::from_json_str(&contents).map_err(|source| JsonFileCatalogStoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_catalog(&self, catalog: &Catalog) -> Result<(), JsonFileCatalogStoreError> {
        let bytes = serde_json::to_vec_pretty(catalog).map_err(|source| {
            JsonFileCatalogStoreError::Serialise {
                path: self.path.clone(),
                source,
            }
        })?;
        drafter_fs::replace_file_atomically(&self.path, &bytes).map_err(|source| {
            JsonFileCatalogStoreError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }
}

impl CatalogStore for JsonFileCatalogStore {
    fn load(&self) -> Result<Catalog, CatalogStoreError> {
        Ok(self.read_catalog()?)
    }

    fn len(&self) -> Result<usize, CatalogStoreError> {
        Ok(self.read_catalog()?.len())
    }

    fn replace_all(&self, catalog: &Catalog) -> Result<(), CatalogStoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| CatalogStoreError::Poisoned)?;
        self.write_catalog(catalog)?;
        log::info!(
            "replaced catalog file {} with {} champions",
            self.path,
            catalog.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_catalog;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_store() -> (TempDir, JsonFileCatalogStore) {
        let dir = TempDir::new().expect("create temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("data/champions.json"))
            .expect("utf8 path");
        (dir, JsonFileCatalogStore::new(path))
    }

    #[rstest]
    fn missing_file_is_an_empty_catalog(temp_store: (TempDir, JsonFileCatalogStore)) {
        let (_dir, store) = temp_store;
        assert!(store.is_empty().expect("check store"));
    }

    #[rstest]
    fn replace_then_load_round_trips(temp_store: (TempDir, JsonFileCatalogStore)) {
        let (_dir, store) = temp_store;
        let catalog = sample_catalog();

        store.replace_all(&catalog).expect("replace");

        assert_eq!(store.load().expect("load"), catalog);
        assert_eq!(store.len().expect("len"), catalog.len());
    }

    #[rstest]
    fn corrupt_file_reports_parse_error(temp_store: (TempDir, JsonFileCatalogStore)) {
        let (_dir, store) = temp_store;
        drafter_fs::ensure_parent_dir(store.path()).expect("create parent");
        std::fs::write(store.path().as_std_path(), b"{\"Vi\": 3}").expect("write corrupt file");

        let err = store.load().expect_err("corrupt file should fail");
        assert!(matches!(
            err,
            CatalogStoreError::JsonFile(JsonFileCatalogStoreError::Parse {
                source: CatalogError::InvalidRecord { .. },
                ..
            })
        ));
    }
}
