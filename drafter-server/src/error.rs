//! Error types emitted while configuring and starting the server.
//!
//! Keep this error type reasonably small: every start-up helper returns
//! `Result<_, CliError>`.

use std::{net::AddrParseError, sync::Arc};

use camino::Utf8PathBuf;
use drafter_core::{CatalogStoreError, QuestionSetError, SeedError};
use thiserror::Error;

/// Errors emitted by the `wild-drafter` command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// The listen address could not be parsed.
    #[error("invalid listen address {value:?}: {source}")]
    InvalidListenAddress {
        value: String,
        #[source]
        source: AddrParseError,
    },
    /// The database URL names no supported backend.
    #[error(
        "unsupported database URL {url:?} (expected sqlite:///<path>, sqlite::memory:, \
         file://<path>, a .json path, or memory://)"
    )]
    UnsupportedDatabaseUrl { url: String },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        feature: &'static str,
        action: &'static str,
    },
    /// The directory holding the store could not be created.
    #[error("failed to prepare directory for {path:?}: {source}")]
    PrepareStoreDirectory {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite catalog store failed.
    #[cfg(feature = "store-sqlite")]
    #[error(transparent)]
    OpenSqliteStore(#[from] drafter_core::SqliteCatalogStoreError),
    /// Reading the seed document failed.
    #[error(transparent)]
    Seed(#[from] SeedError),
    /// Writing the seed into the store failed.
    #[error("failed to seed the catalog store: {0}")]
    SeedStore(#[source] CatalogStoreError),
    /// Reading the question file failed.
    #[error("failed to read questions from {path:?}: {source}")]
    ReadQuestions {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The question file was not a valid question set.
    #[error("invalid question set in {path:?}: {source}")]
    InvalidQuestions {
        path: Utf8PathBuf,
        #[source]
        source: QuestionSetError,
    },
    /// Binding the listen socket failed.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// The HTTP server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
