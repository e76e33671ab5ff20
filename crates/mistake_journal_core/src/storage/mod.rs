//! Injectable key/value storage medium.
//!
//! # Responsibility
//! - Define the string slot contract used by the draft and entry stores.
//! - Classify medium failures (unavailable, quota, corrupt payload).
//!
//! # Invariants
//! - Implementations are single-writer and process-local.
//! - `remove_item` on a missing key is not an error.
//! - Error messages never carry slot payloads.

use crate::db::DbError;
use serde_json::error::Category;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod events;
pub mod memory;
pub mod sqlite;

pub type StorageResult<T> = Result<T, StorageError>;

/// Coarse failure class reported on the event channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFailureKind {
    Unavailable,
    QuotaExceeded,
    Corrupt,
}

/// Failure raised by a storage medium or while decoding its payload.
#[derive(Debug)]
pub enum StorageError {
    Unavailable(String),
    QuotaExceeded { key: String, bytes: usize, limit: usize },
    Corrupt { key: String, message: String },
    Db(DbError),
}

impl StorageError {
    pub fn kind(&self) -> StorageFailureKind {
        match self {
            Self::Unavailable(_) | Self::Db(_) => StorageFailureKind::Unavailable,
            Self::QuotaExceeded { .. } => StorageFailureKind::QuotaExceeded,
            Self::Corrupt { .. } => StorageFailureKind::Corrupt,
        }
    }

    /// Wraps a payload codec failure.
    ///
    /// Only the failure class and position are kept: serde_json quotes
    /// offending string values in its message, and those are journal text.
    pub(crate) fn corrupt(key: &str, err: &serde_json::Error) -> Self {
        let class = match err.classify() {
            Category::Io => "io failure",
            Category::Syntax => "malformed json",
            Category::Data => "unexpected payload shape",
            Category::Eof => "truncated json",
        };
        Self::Corrupt {
            key: key.to_string(),
            message: format!("{class} at line {} column {}", err.line(), err.column()),
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::QuotaExceeded { key, bytes, limit } => write!(
                f,
                "storage quota exceeded writing `{key}`: {bytes} bytes over limit {limit}"
            ),
            Self::Corrupt { key, message } => {
                write!(f, "corrupt payload in `{key}`: {message}")
            }
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::from(value))
    }
}

/// String slot storage, modelled on browser local storage.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}
