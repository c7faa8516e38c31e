//! Content gate for onceread.
//!
//! Untrusted input passes through the [`Sanitizer`] exactly once before it
//! may be stored. The gate has two halves:
//!
//! - **acceptability**: reject non-text, blank, or oversized input with a
//!   [`ValidationError`] the gateway can turn into a client error;
//! - **sanitization**: trim, bound to the configured length, and escape
//!   markup-significant characters, producing a [`SanitizedContent`].
//!
//! `SanitizedContent` is the only content type the store accepts, so
//! unsanitized text cannot reach storage by construction.

pub mod config;
pub mod content;
pub mod error;
pub mod escape;
pub mod sanitizer;

pub use config::{GateConfig, DEFAULT_MAX_CHARS};
pub use content::SanitizedContent;
pub use error::ValidationError;
pub use escape::escape_markup;
pub use sanitizer::Sanitizer;
