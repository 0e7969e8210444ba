//! SQLite-backed catalog store.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use rusqlite::{Connection, params};
use thiserror::Error;

use crate::{Catalog, ChampionRecord};

use super::{CatalogStore, CatalogStoreError};

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS champions (
    name TEXT PRIMARY KEY NOT NULL,
    data TEXT NOT NULL
)";

/// Error raised when reading or writing the champions table.
#[derive(Debug, Error)]
pub enum SqliteCatalogStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Preparing or executing a statement failed.
    #[error("failed to {operation}: {source}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A stored record was not a valid JSON object.
    #[error("failed to parse record for champion '{name}': {source}")]
    InvalidRecord {
        /// Champion whose record failed to parse.
        name: String,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A record could not be encoded for storage.
    #[error("failed to encode record for champion '{name}': {source}")]
    Serialise {
        /// Champion whose record failed to encode.
        name: String,
        /// JSON encoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The row count did not fit in `usize`.
    #[error("champion count {count} is out of range")]
    CountOutOfRange {
        /// Raw count returned by SQLite.
        count: i64,
    },
}

/// Catalog stored as one row per champion with the record as JSON text.
///
/// Writes replace every row inside a single transaction.
pub struct SqliteCatalogStore {
    connection: Mutex<Connection>,
}

impl fmt::Debug for SqliteCatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCatalogStore").finish_non_exhaustive()
    }
}

impl SqliteCatalogStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    ///
    /// # Errors
    /// Returns [`SqliteCatalogStoreError`] when the database cannot be opened
    /// or the schema cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqliteCatalogStoreError> {
        let path = path.as_ref();
        let connection =
            Connection::open(path).map_err(|source| SqliteCatalogStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_connection(connection)
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    /// See [`SqliteCatalogStore::open`].
    pub fn open_in_memory() -> Result<Self, SqliteCatalogStoreError> {
        let connection = Connection::open_in_memory().map_err(|source| {
            SqliteCatalogStoreError::OpenDatabase {
                path: PathBuf::from(":memory:"),
                source,
            }
        })?;
        Self::from_connection(connection)
    }

    fn from_connection(connection: Connection) -> Result<Self, SqliteCatalogStoreError> {
        connection
            .execute(SCHEMA_SQL, [])
            .map_err(|source| SqliteCatalogStoreError::Query {
                operation: "create champions table",
                source,
            })?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, CatalogStoreError> {
        self.connection
            .lock()
            .map_err(|_| CatalogStoreError::Poisoned)
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn load(&self) -> Result<Catalog, CatalogStoreError> {
        let connection = self.connection()?;
        Ok(load_catalog(&connection)?)
    }

    fn len(&self) -> Result<usize, CatalogStoreError> {
        let connection = self.connection()?;
        Ok(count_rows(&connection)?)
    }

    fn replace_all(&self, catalog: &Catalog) -> Result<(), CatalogStoreError> {
        let mut connection = self.connection()?;
        replace_rows(&mut connection, catalog)?;
        log::info!("replaced SQLite catalog with {} champions", catalog.len());
        Ok(())
    }
}

fn load_catalog(connection: &Connection) -> Result<Catalog, SqliteCatalogStoreError> {
    let mut statement = connection
        .prepare("SELECT name, data FROM champions ORDER BY name ASC")
        .map_err(|source| SqliteCatalogStoreError::Query {
            operation: "prepare champion selection",
            source,
        })?;
    let rows = statement
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .map_err(|source| SqliteCatalogStoreError::Query {
            operation: "query champions",
            source,
        })?;

    let mut catalog = Catalog::new();
    for row in rows {
        let (name, data) = row.map_err(|source| SqliteCatalogStoreError::Query {
            operation: "read champion row",
            source,
        })?;
        let record: ChampionRecord = match serde_json::from_str(&data) {
            Ok(record) => record,
            Err(source) => return Err(SqliteCatalogStoreError::InvalidRecord { name, source }),
        };
        catalog.insert(name, record);
    }
    Ok(catalog)
}

fn count_rows(connection: &Connection) -> Result<usize, SqliteCatalogStoreError> {
    let count: i64 = connection
        .query_row("SELECT COUNT(*) FROM champions", [], |row| row.get(0))
        .map_err(|source| SqliteCatalogStoreError::Query {
            operation: "count champions",
            source,
        })?;
    usize::try_from(count).map_err(|_| SqliteCatalogStoreError::CountOutOfRange { count })
}

fn replace_rows(
    connection: &mut Connection,
    catalog: &Catalog,
) -> Result<(), SqliteCatalogStoreError> {
    let transaction =
        connection
            .transaction()
            .map_err(|source| SqliteCatalogStoreError::Query {
                operation: "begin replace transaction",
                source,
            })?;
    transaction
        .execute("DELETE FROM champions", [])
        .map_err(|source| SqliteCatalogStoreError::Query {
            operation: "clear champions",
            source,
        })?;
    {
        let mut insert = transaction
            .prepare("INSERT INTO champions (name, data) VALUES (?1, ?2)")
            .map_err(|source| SqliteCatalogStoreError::Query {
                operation: "prepare champion insert",
                source,
            })?;
        for (name, record) in catalog.iter() {
            let data = serde_json::to_string(record).map_err(|source| {
                SqliteCatalogStoreError::Serialise {
                    name: name.to_owned(),
                    source,
                }
            })?;
            insert
                .execute(params![name, data])
                .map_err(|source| SqliteCatalogStoreError::Query {
                    operation: "insert champion",
                    source,
                })?;
        }
    }
    transaction
        .commit()
        .map_err(|source| SqliteCatalogStoreError::Query {
            operation: "commit replace transaction",
            source,
        })
}
