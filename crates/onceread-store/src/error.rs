use std::path::PathBuf;

use onceread_types::EntryKey;

/// Errors from entry store operations.
///
/// Every variant is a storage failure: the caller should report a server
/// error without exposing the detail.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing medium could not be prepared at startup.
    #[error("storage unavailable at {path}: {reason}")]
    Unavailable { path: PathBuf, reason: String },

    /// A live entry already exists under this key.
    #[error("key collision on {0:?}")]
    Collision(EntryKey),

    /// A claimed entry could not be decoded.
    #[error("corrupt entry {key:?}: {reason}")]
    CorruptEntry { key: EntryKey, reason: String },

    /// A thread panicked while holding the store lock.
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
