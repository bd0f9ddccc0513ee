//! Database initialization and record storage
//!
//! PC records live in a single SQLite table. The [`Store`] handle only
//! remembers where the database file is: every operation opens its own
//! short-lived connection, runs one statement, and drops it. Uniqueness and
//! atomicity come from SQLite itself, not from locks in this process.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use rusqlite::{params, Connection};
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{timestamp, PcRecord};

/// Table holding one row per PC record
///
/// `id` is the client-supplied primary key; `created_at` is a fixed-width
/// RFC 3339 string so ordering on the text is chronological.
pub const CREATE_PCS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS pcs (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    cpu TEXT NOT NULL,
    ram INTEGER NOT NULL,
    storage INTEGER NOT NULL,
    purpose TEXT NOT NULL,
    note TEXT,
    created_at TEXT NOT NULL
)
";

/// Index backing the newest-first listing
pub const CREATE_CREATED_AT_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_pcs_created_at ON pcs(created_at DESC)
";

/// All schema statements, in creation order
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_PCS_TABLE, CREATE_CREATED_AT_INDEX];

/// How long a connection waits on a locked database before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors raised by the record store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open or create the database file.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Failed to create the directory that holds the database.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record with this id already exists; nothing was written.
    #[error("record '{0}' already exists")]
    DuplicateId(String),

    /// A query failed.
    #[error("database query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// Handle to the PC record store
///
/// Cheap to clone; clones point at the same database file.
#[derive(Debug, Clone)]
pub struct Store {
    path: Arc<PathBuf>,
}

impl Store {
    /// Opens (or creates) the store at `path` and ensures the schema exists
    ///
    /// Missing parent directories are created first.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use pc_catalog::database::Store;
    /// let store = Store::open("data/pc_catalog.db").expect("Failed to open store");
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let store = Self {
            path: Arc::new(path),
        };
        store.initialize()?;

        info!("Database ready at {}", store.path.display());
        Ok(store)
    }

    /// Path to the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the table and index if they are missing. Safe to call repeatedly.
    pub fn initialize(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;

        // WAL lets readers proceed while a writer holds the lock.
        let mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
        debug!("journal_mode = {mode}");

        for statement in SCHEMA_STATEMENTS {
            conn.execute(statement, [])?;
        }
        Ok(())
    }

    /// Returns every record, newest first.
    ///
    /// Records sharing a timestamp come back in reverse insertion order.
    pub fn list(&self) -> Result<Vec<PcRecord>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            r"
            SELECT id, name, cpu, ram, storage, purpose, note, created_at
            FROM pcs
            ORDER BY created_at DESC, rowid DESC
            ",
        )?;

        let records = stmt
            .query_map([], row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Listed {} pc records", records.len());
        Ok(records)
    }

    /// Persists a validated record.
    ///
    /// Fails with [`StoreError::DuplicateId`] if the id is taken, leaving the
    /// existing row untouched.
    pub fn insert(&self, record: PcRecord) -> Result<PcRecord, StoreError> {
        let conn = self.connect()?;
        let created_at = timestamp::format(&record.created_at);

        let result = conn.execute(
            r"
            INSERT INTO pcs (id, name, cpu, ram, storage, purpose, note, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
            params![
                record.id,
                record.name,
                record.cpu,
                record.ram,
                record.storage,
                record.purpose,
                record.note,
                created_at,
            ],
        );

        match result {
            Ok(_) => {
                debug!(id = %record.id, "Inserted pc record");
                Ok(record)
            }
            Err(err) if is_primary_key_violation(&err) => Err(StoreError::DuplicateId(record.id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Deletes the record with `id`.
    ///
    /// Returns `true` if a row was removed, `false` if no such record existed.
    pub fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.connect()?;
        let affected = conn.execute("DELETE FROM pcs WHERE id = ?1", [id])?;

        debug!(id, affected, "Deleted pc record");
        Ok(affected > 0)
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(self.path.as_path()).map_err(|source| {
            StoreError::DatabaseOpen {
                path: self.path.to_path_buf(),
                source,
            }
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<PcRecord> {
    let created_at_str: String = row.get(7)?;
    let created_at = timestamp::parse(&created_at_str).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(err))
    })?;

    Ok(PcRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        cpu: row.get(2)?,
        ram: row.get(3)?,
        storage: row.get(4)?,
        purpose: row.get(5)?,
        note: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        created_at,
    })
}
