//! Consume-once entry storage for onceread.
//!
//! An entry is created once, read by at most one successful consume, and
//! then gone for good. Whether a key never existed or was already consumed
//! is not observable from outside: both are a miss.
//!
//! # Storage Backends
//!
//! All backends implement the [`EntryStore`] trait:
//!
//! - [`InMemoryEntryStore`] -- `HashMap` behind a mutex, for tests and embedding
//! - [`FileEntryStore`] -- one file per key under a root directory
//!
//! [`Vault`] sits in front of a backend and is what callers use: it mints
//! keys, screens malformed keys, and maps backend outcomes to the
//! content-or-miss interface. [`is_well_formed`] lets a gateway screen
//! keys itself before calling in.
//!
//! # Design Rules
//!
//! 1. `take` is the only way content leaves a store, and it removes the
//!    entry in the same atomic step that decides the winner.
//! 2. A miss is `Ok(None)`, never an error.
//! 3. Storage failures are propagated, never folded into a miss.
//! 4. Content reaching a store is always [`SanitizedContent`](onceread_gate::SanitizedContent).
//! 5. Entries are never mutated in place.

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;
pub mod vault;

#[cfg(test)]
pub(crate) mod conformance;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use fs::FileEntryStore;
pub use memory::InMemoryEntryStore;
pub use traits::EntryStore;
pub use vault::Vault;

/// Structural key check, re-exported so gateways need only this crate.
pub use onceread_types::is_well_formed;
