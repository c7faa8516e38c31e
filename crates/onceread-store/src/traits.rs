use std::sync::Arc;

use onceread_gate::SanitizedContent;
use onceread_types::EntryKey;

use crate::error::StoreResult;

/// Backing medium for entries.
///
/// All implementations must satisfy these invariants:
/// - For any key, across all concurrent and sequential calls to `take`, at
///   most one call returns content. The removal itself picks the winner;
///   there is no separate existence check.
/// - Content is captured before or atomically with removal, so the winner
///   always gets it.
/// - An insert is either fully visible to `take` or not visible at all.
/// - Operations on different keys never affect each other.
/// - All I/O errors are propagated, never reported as a miss.
pub trait EntryStore: Send + Sync {
    /// Persist `content` under `key`.
    ///
    /// Returns `StoreError::Collision` if a live entry already holds `key`.
    fn insert(&self, key: &EntryKey, content: &SanitizedContent) -> StoreResult<()>;

    /// Atomically remove and return the entry under `key`.
    ///
    /// Returns `Ok(None)` if there is no live entry, whether it never
    /// existed, was consumed earlier, or another caller won a race for it.
    fn take(&self, key: &EntryKey) -> StoreResult<Option<SanitizedContent>>;

    /// Number of live entries.
    fn len(&self) -> StoreResult<usize>;

    /// Returns `true` if there are no live entries.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<T: EntryStore + ?Sized> EntryStore for Box<T> {
    fn insert(&self, key: &EntryKey, content: &SanitizedContent) -> StoreResult<()> {
        (**self).insert(key, content)
    }

    fn take(&self, key: &EntryKey) -> StoreResult<Option<SanitizedContent>> {
        (**self).take(key)
    }

    fn len(&self) -> StoreResult<usize> {
        (**self).len()
    }
}

impl<T: EntryStore + ?Sized> EntryStore for Arc<T> {
    fn insert(&self, key: &EntryKey, content: &SanitizedContent) -> StoreResult<()> {
        (**self).insert(key, content)
    }

    fn take(&self, key: &EntryKey) -> StoreResult<Option<SanitizedContent>> {
        (**self).take(key)
    }

    fn len(&self) -> StoreResult<usize> {
        (**self).len()
    }
}
