//! SQLite-backed key-value store.
//!
//! # Invariants
//! - Callers must pass a connection opened through `db::open_db*` so the
//!   `kv_entries` table exists.

use super::{KeyValueStore, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store persisting entries into the `kv_entries` table.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Wraps an already-migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Returns the underlying connection.
    pub fn into_inner(self) -> Connection {
        self.conn
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}
