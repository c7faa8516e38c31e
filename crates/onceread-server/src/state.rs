use std::sync::Arc;

use onceread_gate::Sanitizer;
use onceread_store::{EntryStore, InMemoryEntryStore, Vault};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub vault: Arc<Vault>,
    pub sanitizer: Arc<Sanitizer>,
    pub backend_kind: &'static str,
}

impl AppState {
    pub fn new(vault: Vault, sanitizer: Sanitizer, backend_kind: &'static str) -> Self {
        Self {
            vault: Arc::new(vault),
            sanitizer: Arc::new(sanitizer),
            backend_kind,
        }
    }

    /// In-memory state with default limits.
    pub fn in_memory() -> Self {
        let store: Box<dyn EntryStore> = Box::new(InMemoryEntryStore::new());
        Self::new(Vault::new(store), Sanitizer::default(), "memory")
    }
}
