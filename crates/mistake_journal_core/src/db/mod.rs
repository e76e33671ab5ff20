//! SQLite bootstrap for the local journal storage medium.
//!
//! # Responsibility
//! - Open and configure SQLite connections backing the key/value slots.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Storage code must not touch `kv_store` before migrations succeed.
//! - Every failure names the bootstrap step it came from.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening, migrating or querying the journal database.
#[derive(Debug)]
pub enum DbError {
    /// The connection itself could not be established.
    Open {
        mode: &'static str,
        source: rusqlite::Error,
    },
    /// Connection pragmas could not be applied or read.
    Configure(rusqlite::Error),
    /// Migration `version` failed; the transaction was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A statement against the `kv_store` slots failed.
    Query(rusqlite::Error),
}

impl DbError {
    /// Stable code used in `db_open` and storage log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Open { .. } => "db_open_failed",
            Self::Configure(_) => "db_configure_failed",
            Self::Migration { .. } => "db_migration_failed",
            Self::UnsupportedSchemaVersion { .. } => "db_schema_too_new",
            Self::Query(_) => "kv_query_failed",
        }
    }

    fn sqlite(&self) -> Option<&rusqlite::Error> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } => Some(source),
            Self::Configure(err) | Self::Query(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { mode, source } => {
                write!(f, "cannot open {mode} journal database: {source}")
            }
            Self::Configure(err) => write!(f, "cannot configure journal database: {err}"),
            Self::Migration { version, source } => {
                write!(f, "journal migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "journal database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Query(err) => write!(f, "journal slot query failed: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.sqlite().map(|err| err as &(dyn Error + 'static))
    }
}

/// Bare SQLite errors come from slot statements; bootstrap steps wrap
/// theirs explicitly.
impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Query(value)
    }
}
