//! SQLite-backed key/value storage.
//!
//! # Invariants
//! - Slots live in the migrated `kv_store` table.
//! - `set_item` is an upsert and refreshes `updated_at`.

use super::{KeyValueStorage, StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Key/value slots persisted in one SQLite connection.
pub struct SqliteStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStorage<'conn> {
    /// Wraps a connection opened through `db::open_db*`.
    ///
    /// # Errors
    /// - `Unavailable` when the `kv_store` table is missing, meaning the
    ///   connection skipped migrations.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let exists: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_store';",
                [],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(StorageError::Unavailable(
                "kv_store table missing; open the database with open_db".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl KeyValueStorage for SqliteStorage<'_> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}
