use std::fmt;

use serde::Serialize;

/// Text that has been through the [`Sanitizer`](crate::Sanitizer).
///
/// Trimmed, markup-escaped, and encoding at most the configured number of
/// source characters. The store only accepts this type.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SanitizedContent(String);

impl SanitizedContent {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    /// Rewrap text a storage backend previously persisted from a
    /// `SanitizedContent`. Not for untrusted input.
    pub fn from_stored(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn len_chars(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for SanitizedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SanitizedContent")
            .field("len", &self.0.len())
            .finish()
    }
}

impl fmt::Display for SanitizedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SanitizedContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
