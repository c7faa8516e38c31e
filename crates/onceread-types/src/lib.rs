//! Foundation types for onceread.
//!
//! Every stored entry is addressed by an [`EntryKey`]: an unguessable,
//! fixed-format token that doubles as the capability a reader needs to
//! retrieve the entry. Keys are minted by [`KeyGenerator`] and can only be
//! constructed from text after passing [`is_well_formed`], so any value of
//! type `EntryKey` is safe to use as a storage address.
//!
//! # Key Types
//!
//! - [`EntryKey`] — Validated entry identifier (canonical UUIDv4 text)
//! - [`KeyGenerator`] — Entropy-backed key factory
//! - [`TypeError`] — Parse failures

pub mod error;
pub mod generator;
pub mod key;

pub use error::TypeError;
pub use generator::KeyGenerator;
pub use key::{is_well_formed, EntryKey, KEY_LEN};
