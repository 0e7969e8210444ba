//! Recording unapplied catalog writes for manual review.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while recording a proposal.
#[derive(Debug, Error)]
pub enum ProposalError {
    /// The proposals directory could not be created.
    #[error("failed to create proposals directory {path}: {source}")]
    CreateDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Encoding the payload failed.
    #[error("failed to encode proposal: {0}")]
    Serialise(#[source] serde_json::Error),
    /// Writing the proposal file failed.
    #[error("failed to write proposal {path}: {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes each proposal to `<dir>/champions_<UTC timestamp>.json`.
#[derive(Debug, Clone)]
pub struct ProposalRecorder {
    dir: Utf8PathBuf,
}

impl ProposalRecorder {
    /// Record proposals under `dir`, which is created on first use.
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory receiving proposal files.
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Record `payload` stamped with the current UTC time; returns the file name.
    ///
    /// # Errors
    /// Returns [`ProposalError`] when the directory or file cannot be written.
    pub fn record(&self, payload: &Map<String, Value>) -> Result<String, ProposalError> {
        self.record_at(payload, Utc::now())
    }

    /// Record `payload` under the name derived from `at`.
    ///
    /// # Errors
    /// See [`ProposalRecorder::record`].
    pub fn record_at(
        &self,
        payload: &Map<String, Value>,
        at: DateTime<Utc>,
    ) -> Result<String, ProposalError> {
        drafter_fs::ensure_dir(&self.dir).map_err(|source| ProposalError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        let file_name = proposal_file_name(at);
        let path = self.dir.join(&file_name);
        let bytes = serde_json::to_vec_pretty(payload).map_err(ProposalError::Serialise)?;
        drafter_fs::replace_file_atomically(&path, &bytes)
            .map_err(|source| ProposalError::Write { path, source })?;
        Ok(file_name)
    }
}

/// `champions_<YYYYmmddHHMMSS><microseconds>.json`
pub(crate) fn proposal_file_name(at: DateTime<Utc>) -> String {
    format!("champions_{}.json", at.format("%Y%m%d%H%M%S%6f"))
}
