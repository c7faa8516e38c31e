//! Filesystem backend: one file per entry, named by the key verbatim.
//!
//! Layout under the root directory:
//!
//! ```text
//! <key>                         live entry (sanitized UTF-8 content)
//! .tmp-XXXXXX                   insert in progress
//! .claim-<unix_ms>-<uuid>       entry claimed by a consumer, about to be read
//! ```
//!
//! Keys never start with `.`, so the three namespaces cannot collide.
//!
//! An insert writes a temp file, fsyncs it, and links it into place with a
//! no-clobber persist, so a reader sees either the whole entry or nothing.
//! A take renames the entry file to a fresh claim name. `rename(2)` is atomic
//! within a directory: of any number of racing takes, in this process or
//! another, exactly one moves the file and every other one gets `NotFound`.
//! The winner then reads and deletes its claim.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use onceread_gate::SanitizedContent;
use onceread_types::{is_well_formed, EntryKey};
use tempfile::Builder;
use tracing::{debug, error, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::EntryStore;

const TEMP_PREFIX: &str = ".tmp-";
const CLAIM_PREFIX: &str = ".claim-";

/// Leftover temp and claim files older than this are removed on open.
const STALE_AFTER: Duration = Duration::from_secs(300);

/// Entry store backed by a directory.
pub struct FileEntryStore {
    root: PathBuf,
}

impl FileEntryStore {
    /// Open (or create) a store rooted at `root`.
    ///
    /// Fails with [`StoreError::Unavailable`] if the directory cannot be
    /// created or written. Removes stale temp and claim files left behind
    /// by a crash.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        let unavailable = |e: io::Error| StoreError::Unavailable {
            path: root.clone(),
            reason: e.to_string(),
        };

        fs::create_dir_all(&root).map_err(unavailable)?;
        // Writability check; the file is removed on drop.
        Builder::new()
            .prefix(TEMP_PREFIX)
            .tempfile_in(&root)
            .map_err(unavailable)?;

        let store = Self { root };
        let swept = store.sweep(SystemTime::now())?;
        info!(root = %store.root.display(), swept, "opened file entry store");
        Ok(store)
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &EntryKey) -> PathBuf {
        self.root.join(key.as_str())
    }

    fn claim_path(&self) -> PathBuf {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        self.root
            .join(format!("{CLAIM_PREFIX}{now_ms}-{}", uuid::Uuid::new_v4()))
    }

    /// Best-effort directory fsync so the rename/link itself is durable.
    fn sync_dir(&self) {
        if let Ok(dir) = File::open(&self.root) {
            let _ = dir.sync_all();
        }
    }

    /// Remove temp and claim files older than [`STALE_AFTER`].
    fn sweep(&self, now: SystemTime) -> StoreResult<usize> {
        let mut swept = 0;
        for dirent in fs::read_dir(&self.root)? {
            let dirent = dirent?;
            let name = dirent.file_name();
            let Some(name) = name.to_str() else { continue };

            let created = if let Some(rest) = name.strip_prefix(CLAIM_PREFIX) {
                rest.split('-')
                    .next()
                    .and_then(|ms| ms.parse::<u64>().ok())
                    .map(|ms| UNIX_EPOCH + Duration::from_millis(ms))
            } else if name.starts_with(TEMP_PREFIX) {
                dirent.metadata()?.modified().ok()
            } else {
                continue;
            };
            // Unparseable leftovers are always stale; future timestamps never are.
            let stale = match created {
                Some(t) => now.duration_since(t).is_ok_and(|age| age > STALE_AFTER),
                None => true,
            };
            if !stale {
                continue;
            }

            match fs::remove_file(dirent.path()) {
                Ok(()) => {
                    warn!(file = name, "removed leftover file");
                    swept += 1;
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(swept)
    }
}

impl EntryStore for FileEntryStore {
    fn insert(&self, key: &EntryKey, content: &SanitizedContent) -> StoreResult<()> {
        let mut tmp = Builder::new().prefix(TEMP_PREFIX).tempfile_in(&self.root)?;
        tmp.write_all(content.as_str().as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist_noclobber(self.entry_path(key)).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                StoreError::Collision(key.clone())
            } else {
                StoreError::Io(e.error)
            }
        })?;
        self.sync_dir();
        debug!(key = key.short(), bytes = content.as_str().len(), "entry written");
        Ok(())
    }

    fn take(&self, key: &EntryKey) -> StoreResult<Option<SanitizedContent>> {
        let claim = self.claim_path();
        match fs::rename(self.entry_path(key), &claim) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if !self.root.is_dir() {
                    return Err(StoreError::Unavailable {
                        path: self.root.clone(),
                        reason: "store directory is gone".into(),
                    });
                }
                // Absent, already consumed, or another taker got there first.
                debug!(key = key.short(), "no live entry");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }

        let read = fs::read(&claim);
        if let Err(e) = fs::remove_file(&claim) {
            warn!(key = key.short(), error = %e, "claim file not removed");
        }
        self.sync_dir();

        let bytes = read.map_err(|e| {
            error!(key = key.short(), error = %e, "claimed entry unreadable");
            StoreError::Io(e)
        })?;
        let text = String::from_utf8(bytes).map_err(|e| StoreError::CorruptEntry {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        debug!(key = key.short(), "entry consumed");
        Ok(Some(SanitizedContent::from_stored(text)))
    }

    fn len(&self) -> StoreResult<usize> {
        let mut count = 0;
        for dirent in fs::read_dir(&self.root)? {
            if dirent?.file_name().to_str().is_some_and(is_well_formed) {
                count += 1;
            }
        }
        Ok(count)
    }
}

impl std::fmt::Debug for FileEntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileEntryStore")
            .field("root", &self.root)
            .finish()
    }
}
