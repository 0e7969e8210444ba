//! Test helpers for building handler state and reading responses.

use std::sync::Arc;

use axum::{body::Bytes, response::Response};
use camino::{Utf8Path, Utf8PathBuf};
use drafter_core::{
    Catalog, CatalogStore, CatalogStoreError, MemoryCatalogStore, test_support::sample_catalog,
};
use drafter_scorer::{Recommender, WeightedTraitScorer};
use serde_json::Value;
use tempfile::TempDir;

use super::*;

/// Handler state over an in-memory store plus the directory proposals go to.
pub(super) struct Harness {
    dir: TempDir,
    pub(super) store: Arc<MemoryCatalogStore>,
}

impl Harness {
    pub(super) fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir"),
            store: Arc::new(MemoryCatalogStore::with_catalog(sample_catalog())),
        }
    }

    pub(super) fn root(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().to_path_buf()).expect("utf-8 temp dir")
    }

    pub(super) fn proposals_dir(&self) -> Utf8PathBuf {
        self.root().join("proposals")
    }

    pub(super) fn state(&self, write_mode: WriteMode) -> AppState {
        let store: Arc<dyn CatalogStore> = self.store.clone();
        AppState::new(
            store,
            Recommender::with_default_icon(WeightedTraitScorer::default()),
            write_mode,
            ProposalRecorder::new(self.proposals_dir()),
        )
    }

    pub(super) fn stored(&self) -> Catalog {
        self.store.load().expect("load store")
    }
}

/// A store whose every operation fails.
pub(super) struct BrokenStore;

impl CatalogStore for BrokenStore {
    fn load(&self) -> Result<Catalog, CatalogStoreError> {
        Err(CatalogStoreError::Poisoned)
    }

    fn len(&self) -> Result<usize, CatalogStoreError> {
        Err(CatalogStoreError::Poisoned)
    }

    fn replace_all(&self, _catalog: &Catalog) -> Result<(), CatalogStoreError> {
        Err(CatalogStoreError::Poisoned)
    }
}

pub(super) fn body(value: &Value) -> Bytes {
    Bytes::from(serde_json::to_vec(value).expect("encode request body"))
}

pub(super) async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    drafter_fs::ensure_parent_dir(path).expect("create parent directory");
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}
