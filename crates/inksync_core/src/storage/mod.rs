//! Durable storage contracts for the serialized document collection.
//!
//! # Responsibility
//! - Define the `load`/`save` seam the document store persists through.
//! - Keep backend details (SQLite, in-process doubles) out of the store.
//!
//! # Invariants
//! - Backends store one opaque blob under `STORAGE_KEY`; they never parse it.
//! - `load` returns `Ok(None)` when nothing has been saved yet.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory_storage;
mod sqlite_storage;

pub use memory_storage::MemoryStorage;
pub use sqlite_storage::SqliteStorage;

/// Fixed application key the collection blob is stored under.
pub const STORAGE_KEY: &str = "inksync_data";
/// Suffix of the key holding the last blob that could not be fully read.
pub const UNREADABLE_KEY_SUFFIX: &str = ".unreadable";

pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends.
#[derive(Debug)]
pub enum StorageError {
    /// SQLite open, migration or query failure.
    Sqlite(rusqlite::Error),
    /// The storage file was written by a newer build.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// Backend refused the write (used by test doubles and read-only stores).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "drafts file uses schema v{found}, this build reads up to v{supported}"
            ),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Key-value persistence for the serialized document collection.
pub trait DocumentStorage {
    /// Reads the stored blob, or `None` when nothing was saved yet.
    fn load(&self) -> StorageResult<Option<String>>;
    /// Replaces the stored blob.
    fn save(&self, blob: &str) -> StorageResult<()>;
    /// Keeps a copy of a blob the store could not fully read, next to the
    /// main key, before the main key is rewritten.
    fn save_unreadable(&self, blob: &str) -> StorageResult<()>;
}

impl<S: DocumentStorage + ?Sized> DocumentStorage for Box<S> {
    fn load(&self) -> StorageResult<Option<String>> {
        (**self).load()
    }

    fn save(&self, blob: &str) -> StorageResult<()> {
        (**self).save(blob)
    }

    fn save_unreadable(&self, blob: &str) -> StorageResult<()> {
        (**self).save_unreadable(blob)
    }
}
