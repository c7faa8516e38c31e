use tracing::debug;

use crate::config::GateConfig;
use crate::content::SanitizedContent;
use crate::error::ValidationError;
use crate::escape::escape_markup;

/// Validates and cleans untrusted content before it is stored.
///
/// Callers must sanitize each raw input exactly once; escaping is not
/// idempotent.
#[derive(Clone, Debug, Default)]
pub struct Sanitizer {
    config: GateConfig,
}

impl Sanitizer {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Maximum accepted length in characters.
    pub fn max_chars(&self) -> usize {
        self.config.max_chars
    }

    /// `true` if `raw` would pass [`check`](Self::check).
    pub fn is_acceptable(&self, raw: &str) -> bool {
        self.check(raw).is_ok()
    }

    /// Reject blank input and input longer than the limit after trimming.
    pub fn check(&self, raw: &str) -> Result<(), ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }
        let actual = trimmed.chars().count();
        if actual > self.config.max_chars {
            return Err(ValidationError::TooLong {
                max: self.config.max_chars,
                actual,
            });
        }
        Ok(())
    }

    /// Like [`check`](Self::check) but starting from raw bytes; anything
    /// that is not UTF-8 is rejected as non-text.
    pub fn check_bytes<'a>(&self, raw: &'a [u8]) -> Result<&'a str, ValidationError> {
        let text = std::str::from_utf8(raw).map_err(|_| ValidationError::NotText)?;
        self.check(text)?;
        Ok(text)
    }

    /// Trim, bound, and escape `raw`.
    ///
    /// The trimmed text is cut to `max_chars` characters before escaping,
    /// so input that passed [`check`](Self::check) is never shortened. The
    /// cut only fires for callers that skipped the check. The escaped form
    /// may be longer than `max_chars`; it still encodes at most `max_chars`
    /// source characters.
    pub fn sanitize(&self, raw: &str) -> SanitizedContent {
        let trimmed = raw.trim();
        let bounded = truncate_chars(trimmed, self.config.max_chars);
        if bounded.len() < trimmed.len() {
            debug!(
                from = trimmed.len(),
                to = bounded.len(),
                "truncated unchecked content"
            );
        }
        SanitizedContent::new(escape_markup(bounded))
    }

    /// Check then sanitize: the path the gateway takes for every new entry.
    pub fn admit(&self, raw: &str) -> Result<SanitizedContent, ValidationError> {
        self.check(raw)?;
        Ok(self.sanitize(raw))
    }
}

/// First `max_chars` characters of `text`.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}
