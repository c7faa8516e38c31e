use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Length of a textual entry key.
pub const KEY_LEN: usize = 36;

/// Byte offsets of the `-` separators in a key.
const HYPHENS: [usize; 4] = [8, 13, 18, 23];
/// Offset of the version nibble (always `4`).
const VERSION_POS: usize = 14;
/// Offset of the variant nibble (one of `8`, `9`, `a`, `b`).
const VARIANT_POS: usize = 19;

/// Structural check for a candidate key.
///
/// Accepts exactly the canonical lowercase hyphenated form of a version 4
/// UUID. This is a gate against key injection (path separators, dots,
/// arbitrary lengths) and runs before any storage lookup; it says nothing
/// about whether an entry exists.
///
/// ```
/// use onceread_types::is_well_formed;
///
/// assert!(is_well_formed("3f2b8c1e-9d4a-4c7b-8e21-5a6f0d9c3b7e"));
/// assert!(!is_well_formed("../etc/passwd"));
/// assert!(!is_well_formed(""));
/// ```
pub fn is_well_formed(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    if bytes.len() != KEY_LEN {
        return false;
    }
    bytes.iter().enumerate().all(|(i, &b)| match i {
        _ if HYPHENS.contains(&i) => b == b'-',
        VERSION_POS => b == b'4',
        VARIANT_POS => matches!(b, b'8' | b'9' | b'a' | b'b'),
        _ => matches!(b, b'0'..=b'9' | b'a'..=b'f'),
    })
}

/// Identifier of a stored entry.
///
/// The inner string is guaranteed to satisfy [`is_well_formed`]. A key is
/// both the storage address of an entry and the token handed to its reader,
/// so `Debug` and [`EntryKey::short`] only reveal the first block.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryKey(String);

impl EntryKey {
    /// Parse and validate a textual key.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.len() != KEY_LEN {
            return Err(TypeError::InvalidLength {
                expected: KEY_LEN,
                actual: s.len(),
            });
        }
        if !is_well_formed(s) {
            return Err(TypeError::MalformedKey);
        }
        Ok(Self(s.to_owned()))
    }

    /// Wrap text already known to be well-formed.
    pub(crate) fn from_canonical(s: String) -> Self {
        debug_assert!(is_well_formed(&s));
        Self(s)
    }

    /// The full key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, suitable for logs.
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl fmt::Debug for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryKey({}…)", self.short())
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntryKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EntryKey {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<EntryKey> for String {
    fn from(key: EntryKey) -> Self {
        key.0
    }
}

impl AsRef<str> for EntryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
