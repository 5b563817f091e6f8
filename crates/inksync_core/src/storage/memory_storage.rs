//! In-process storage double.
//!
//! Clones share one slot, so a test can hand a clone to the store and keep
//! another to inspect what was persisted.

use super::{DocumentStorage, StorageError, StorageResult};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Slot {
    blob: Option<String>,
    unreadable: Option<String>,
    fail_saves: bool,
    save_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Slot>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with a raw blob.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.lock().blob = Some(blob.into());
        storage
    }

    /// Returns the last saved (or seeded) blob.
    pub fn blob(&self) -> Option<String> {
        self.lock().blob.clone()
    }

    /// Returns the blob kept by `save_unreadable`.
    pub fn unreadable_blob(&self) -> Option<String> {
        self.lock().unreadable.clone()
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    /// Makes subsequent saves fail until switched off again.
    pub fn set_fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // A poisoned slot still holds a consistent string; keep using it.
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DocumentStorage for MemoryStorage {
    fn load(&self) -> StorageResult<Option<String>> {
        Ok(self.lock().blob.clone())
    }

    fn save(&self, blob: &str) -> StorageResult<()> {
        let mut slot = self.lock();
        if slot.fail_saves {
            return Err(StorageError::Unavailable(
                "memory storage configured to reject writes".to_string(),
            ));
        }
        slot.blob = Some(blob.to_string());
        slot.save_count += 1;
        Ok(())
    }

    fn save_unreadable(&self, blob: &str) -> StorageResult<()> {
        let mut slot = self.lock();
        if slot.fail_saves {
            return Err(StorageError::Unavailable(
                "memory storage configured to reject writes".to_string(),
            ));
        }
        slot.unreadable = Some(blob.to_string());
        Ok(())
    }
}
