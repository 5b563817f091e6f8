//! SQLite-backed key-value storage.
//!
//! # Invariants
//! - Exactly one row per key; writes are upserts.
//! - Unreadable blobs are kept under `<key>.unreadable`.
//! - The connection handed in must already be migrated (see `db::open_db`).

use super::{DocumentStorage, StorageResult, STORAGE_KEY, UNREADABLE_KEY_SUFFIX};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub struct SqliteStorage {
    conn: Connection,
    key: String,
}

impl SqliteStorage {
    /// Wraps an already migrated connection, storing under `STORAGE_KEY`.
    pub fn new(conn: Connection) -> Self {
        Self::with_key(conn, STORAGE_KEY)
    }

    /// Wraps an already migrated connection with a custom key.
    pub fn with_key(conn: Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    /// Opens (or creates) a storage file and applies migrations.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Exposes the underlying connection for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SqliteStorage {
    /// Reads the copy kept by `save_unreadable`, if any.
    pub fn load_unreadable(&self) -> StorageResult<Option<String>> {
        self.read_key(&self.unreadable_key())
    }

    fn unreadable_key(&self) -> String {
        format!("{}{UNREADABLE_KEY_SUFFIX}", self.key)
    }

    fn read_key(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_key(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

impl DocumentStorage for SqliteStorage {
    fn load(&self) -> StorageResult<Option<String>> {
        self.read_key(&self.key)
    }

    fn save(&self, blob: &str) -> StorageResult<()> {
        self.write_key(&self.key, blob)
    }

    fn save_unreadable(&self, blob: &str) -> StorageResult<()> {
        self.write_key(&self.unreadable_key(), blob)
    }
}
