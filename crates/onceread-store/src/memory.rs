use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use onceread_gate::SanitizedContent;
use onceread_types::EntryKey;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::EntryStore;

/// In-memory, HashMap-based entry store.
///
/// Intended for tests and embedding. `take` is a single `HashMap::remove`
/// under the mutex, so presence check and removal cannot interleave with
/// another caller. Contents do not survive the process.
pub struct InMemoryEntryStore {
    entries: Mutex<HashMap<EntryKey, SanitizedContent>>,
}

impl InMemoryEntryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<EntryKey, SanitizedContent>>> {
        self.entries.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryStore for InMemoryEntryStore {
    fn insert(&self, key: &EntryKey, content: &SanitizedContent) -> StoreResult<()> {
        match self.lock()?.entry(key.clone()) {
            Entry::Occupied(_) => Err(StoreError::Collision(key.clone())),
            Entry::Vacant(slot) => {
                slot.insert(content.clone());
                Ok(())
            }
        }
    }

    fn take(&self, key: &EntryKey) -> StoreResult<Option<SanitizedContent>> {
        let taken = self.lock()?.remove(key);
        if taken.is_none() {
            debug!(key = key.short(), "no live entry");
        }
        Ok(taken)
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.len())
    }
}

impl std::fmt::Debug for InMemoryEntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.lock().map(|m| m.len()).ok();
        f.debug_struct("InMemoryEntryStore")
            .field("entry_count", &count)
            .finish()
    }
}
