//! Seed documents used to bootstrap an empty catalog store.
//!
//! The built-in seed ships with the crate. Operators may point at their own
//! JSON dump instead; a missing file is not an error, it simply means there
//! is nothing to seed from.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::{Catalog, CatalogError};

const BUILTIN_SEED: &str = include_str!("../data/champions.json");

/// Errors raised while reading a seed document.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Reading the seed file failed.
    #[error("failed to read seed document at {path}: {source}")]
    Read {
        /// Requested seed path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The seed file did not contain a valid catalog.
    #[error("seed document at {path} is not a valid catalog: {source}")]
    Parse {
        /// Requested seed path.
        path: Utf8PathBuf,
        /// Decoding failure.
        #[source]
        source: CatalogError,
    },
    /// The embedded seed failed to decode.
    #[error("built-in seed is not a valid catalog: {0}")]
    Builtin(#[source] CatalogError),
}

/// Decode the champion table embedded in the crate.
///
/// # Errors
/// Returns [`SeedError::Builtin`] if the embedded document is malformed.
pub fn builtin_seed() -> Result<Catalog, SeedError> {
    Catalog::from_json_str(BUILTIN_SEED).map_err(SeedError::Builtin)
}

/// Load a seed document from disk, returning `None` when the file is absent.
///
/// # Errors
/// Returns [`SeedError::Read`] for I/O failures other than a missing file and
/// [`SeedError::Parse`] when the contents are not a catalog.
pub fn load_seed(path: &Utf8Path) -> Result<Option<Catalog>, SeedError> {
    let Some(contents) =
        drafter_fs::read_to_string_if_exists(path).map_err(|source| SeedError::Read {
            path: path.to_path_buf(),
            source,
        })?
    else {
        return Ok(None);
    };
    Catalog::from_json_str(&contents)
        .map(Some)
        .map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
