use std::path::Path;

use onceread_gate::SanitizedContent;
use onceread_types::{EntryKey, KeyGenerator};
use tracing::{debug, error};

use crate::error::StoreResult;
use crate::fs::FileEntryStore;
use crate::memory::InMemoryEntryStore;
use crate::traits::EntryStore;

/// Front door to an [`EntryStore`].
///
/// `create` mints a fresh key and stores the content under it;
/// `consume_once` hands the content to exactly one caller per key. Malformed
/// keys are turned away before the backend is touched, and look the same
/// as keys that never existed.
#[derive(Debug)]
pub struct Vault<S = Box<dyn EntryStore>> {
    store: S,
}

impl Vault<InMemoryEntryStore> {
    /// A vault over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(InMemoryEntryStore::new())
    }
}

impl Vault<FileEntryStore> {
    /// A vault over a directory, created if needed.
    pub fn open_dir(root: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(FileEntryStore::open(root)?))
    }
}

impl<S: EntryStore> Vault<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store `content` under a newly generated key and return the key.
    pub fn create(&self, content: &SanitizedContent) -> StoreResult<EntryKey> {
        let key = KeyGenerator::os().generate();
        self.store.insert(&key, content).inspect_err(|e| {
            error!(key = key.short(), error = %e, "create failed");
        })?;
        debug!(key = key.short(), "entry created");
        Ok(key)
    }

    /// Retrieve and destroy the entry under `key`.
    ///
    /// `Ok(None)` means a miss: malformed, unknown, already consumed, or
    /// lost to a concurrent consumer. Errors are storage failures only.
    pub fn consume_once(&self, key: &str) -> StoreResult<Option<SanitizedContent>> {
        let Ok(key) = EntryKey::parse(key) else {
            debug!("rejected malformed key");
            return Ok(None);
        };
        self.store.take(&key).inspect_err(|e| {
            error!(key = key.short(), error = %e, "consume failed");
        })
    }
}
