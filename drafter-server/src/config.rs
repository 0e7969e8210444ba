//! Layered configuration for the `serve` subcommand.

use std::{fmt, net::SocketAddr, str::FromStr, sync::Arc};

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use drafter_core::{CatalogStore, JsonFileCatalogStore, MemoryCatalogStore};
use drafter_scorer::DEFAULT_ICON;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::CliError;

pub(crate) const ARG_LISTEN: &str = "listen";
pub(crate) const ARG_DATABASE_URL: &str = "database-url";
pub(crate) const ARG_SEED: &str = "seed";
pub(crate) const ARG_QUESTIONS: &str = "questions";
pub(crate) const ARG_DEFAULT_ICON: &str = "default-icon";
pub(crate) const ARG_WRITE_MODE: &str = "write-mode";
pub(crate) const ARG_PROPOSALS_DIR: &str = "proposals-dir";
pub(crate) const ENV_DATABASE_URL_FALLBACK: &str = "DATABASE_URL";

pub(crate) const DEFAULT_LISTEN: &str = "127.0.0.1:5000";
pub(crate) const DEFAULT_DATABASE_URL: &str = "sqlite:///champions.db";
pub(crate) const DEFAULT_PROPOSALS_DIR: &str = "instance/proposals";

/// How `POST /api/champions` treats a submitted catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Replace the stored catalog immediately.
    #[default]
    Live,
    /// Record the payload for manual review and leave the store untouched.
    Proposal,
}

/// CLI arguments for the `serve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Serve champion recommendations over HTTP. Every option can \
                 come from CLI flags, configuration files, or DRAFTER_CMDS_SERVE_* \
                 environment variables; the database URL also falls back to \
                 DATABASE_URL.",
    about = "Run the recommendation web service"
)]
#[ortho_config(prefix = "DRAFTER")]
pub struct ServeArgs {
    /// Socket address to listen on (default 127.0.0.1:5000).
    #[arg(long = ARG_LISTEN, value_name = "addr")]
    #[serde(default)]
    pub(crate) listen: Option<String>,
    /// Catalog store: sqlite:///<path>, sqlite::memory:, file://<path>, <path>.json or memory://.
    #[arg(long = ARG_DATABASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) database_url: Option<String>,
    /// JSON seed document used when the store is empty (defaults to the built-in table).
    #[arg(long = ARG_SEED, value_name = "path")]
    #[serde(default)]
    pub(crate) seed: Option<Utf8PathBuf>,
    /// JSON question set replacing the default questions.
    #[arg(long = ARG_QUESTIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) questions: Option<Utf8PathBuf>,
    /// Icon URI used when a champion has no trusted icon.
    #[arg(long = ARG_DEFAULT_ICON, value_name = "uri")]
    #[serde(default)]
    pub(crate) default_icon: Option<String>,
    /// Whether catalog writes are applied (live) or recorded (proposal).
    #[arg(long = ARG_WRITE_MODE, value_enum, value_name = "mode")]
    #[serde(default)]
    pub(crate) write_mode: Option<WriteMode>,
    /// Directory receiving proposal files.
    #[arg(long = ARG_PROPOSALS_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) proposals_dir: Option<Utf8PathBuf>,
}

impl ServeArgs {
    pub(crate) fn into_config(self) -> Result<ServeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        let fallback = std::env::var(ENV_DATABASE_URL_FALLBACK).ok();
        ServeConfig::try_from(merged.with_database_url_fallback(fallback))
    }

    /// Use `fallback` (the `DATABASE_URL` value) only when no layer set a database URL.
    pub(crate) fn with_database_url_fallback(mut self, fallback: Option<String>) -> Self {
        if self.database_url.is_none() {
            self.database_url = fallback;
        }
        self
    }
}

/// Resolved `serve` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServeConfig {
    pub(crate) listen: SocketAddr,
    pub(crate) database: DatabaseUrl,
    /// `None` selects the built-in seed.
    pub(crate) seed: Option<Utf8PathBuf>,
    /// `None` selects the default questions.
    pub(crate) questions: Option<Utf8PathBuf>,
    pub(crate) default_icon: String,
    pub(crate) write_mode: WriteMode,
    pub(crate) proposals_dir: Utf8PathBuf,
}

impl TryFrom<ServeArgs> for ServeConfig {
    type Error = CliError;

    fn try_from(args: ServeArgs) -> Result<Self, Self::Error> {
        let listen_value = args.listen.unwrap_or_else(|| DEFAULT_LISTEN.to_owned());
        let listen = listen_value
            .parse()
            .map_err(|source| CliError::InvalidListenAddress {
                value: listen_value.clone(),
                source,
            })?;
        let database = args
            .database_url
            .as_deref()
            .unwrap_or(DEFAULT_DATABASE_URL)
            .parse()?;
        Ok(Self {
            listen,
            database,
            seed: args.seed,
            questions: args.questions,
            default_icon: args
                .default_icon
                .unwrap_or_else(|| DEFAULT_ICON.to_owned()),
            write_mode: args.write_mode.unwrap_or_default(),
            proposals_dir: args
                .proposals_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_PROPOSALS_DIR)),
        })
    }
}

/// Catalog backend selected by a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DatabaseUrl {
    /// `sqlite:///<relative>`, `sqlite:////<absolute>` or `sqlite://<path>`.
    Sqlite(Utf8PathBuf),
    /// `sqlite::memory:` or a bare `sqlite://`.
    SqliteMemory,
    /// `file://<path>` or a bare `.json` path.
    JsonFile(Utf8PathBuf),
    /// `memory://`
    Memory,
}

impl DatabaseUrl {
    /// Open the selected backend, creating parent directories for file stores.
    pub(crate) fn open(&self) -> Result<Arc<dyn CatalogStore>, CliError> {
        match self {
            Self::Sqlite(path) => {
                prepare_parent(path)?;
                open_sqlite(Some(path))
            }
            Self::SqliteMemory => open_sqlite(None),
            Self::JsonFile(path) => {
                prepare_parent(path)?;
                Ok(Arc::new(JsonFileCatalogStore::new(path.clone())))
            }
            Self::Memory => Ok(Arc::new(MemoryCatalogStore::default())),
        }
    }
}

impl FromStr for DatabaseUrl {
    type Err = CliError;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        let unsupported = || CliError::UnsupportedDatabaseUrl {
            url: url.to_owned(),
        };
        let trimmed = url.trim();
        match trimmed {
            "sqlite://" | "sqlite::memory:" | "sqlite://:memory:" | "sqlite:///:memory:" => {
                return Ok(Self::SqliteMemory);
            }
            "memory://" => return Ok(Self::Memory),
            _ => {}
        }
        if let Some(rest) = trimmed.strip_prefix("sqlite://") {
            // SQLAlchemy form: one slash before a relative path, two before an absolute one.
            let path = rest.strip_prefix('/').unwrap_or(rest);
            return non_empty_path(path).map(Self::Sqlite).ok_or_else(unsupported);
        }
        if let Some(path) = trimmed.strip_prefix("file://") {
            return non_empty_path(path)
                .map(Self::JsonFile)
                .ok_or_else(unsupported);
        }
        if !trimmed.contains("://") && trimmed.ends_with(".json") {
            return Ok(Self::JsonFile(Utf8PathBuf::from(trimmed)));
        }
        Err(unsupported())
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite(path) => write!(f, "sqlite:///{path}"),
            Self::SqliteMemory => f.write_str("sqlite::memory:"),
            Self::JsonFile(path) => write!(f, "file://{path}"),
            Self::Memory => f.write_str("memory://"),
        }
    }
}

fn non_empty_path(path: &str) -> Option<Utf8PathBuf> {
    (!path.trim().is_empty()).then(|| Utf8PathBuf::from(path))
}

fn prepare_parent(path: &Utf8PathBuf) -> Result<(), CliError> {
    drafter_fs::ensure_parent_dir(path).map_err(|source| CliError::PrepareStoreDirectory {
        path: path.clone(),
        source,
    })
}

#[cfg(feature = "store-sqlite")]
fn open_sqlite(path: Option<&Utf8PathBuf>) -> Result<Arc<dyn CatalogStore>, CliError> {
    use drafter_core::SqliteCatalogStore;

    let store = match path {
        Some(path) => SqliteCatalogStore::open(path.as_std_path())?,
        None => SqliteCatalogStore::open_in_memory()?,
    };
    Ok(Arc::new(store))
}

#[cfg(not(feature = "store-sqlite"))]
fn open_sqlite(_path: Option<&Utf8PathBuf>) -> Result<Arc<dyn CatalogStore>, CliError> {
    Err(CliError::MissingFeature {
        feature: "store-sqlite",
        action: "opening a SQLite catalog",
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
    database_url_fallback: Option<&str>,
) -> Result<ServeConfig, CliError> {
    let merged = ServeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ServeConfig::try_from(
        merged.with_database_url_fallback(database_url_fallback.map(str::to_owned)),
    )
}
