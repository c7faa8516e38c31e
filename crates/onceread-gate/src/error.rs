use thiserror::Error;

/// Input rejected by the content gate.
///
/// These are client errors: the gateway reports them and nothing is stored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input was not valid UTF-8 text.
    #[error("content is not text")]
    NotText,

    /// Input was empty or whitespace only.
    #[error("content is empty")]
    Empty,

    /// Input exceeded the configured length limit.
    #[error("content too long: {actual} characters (max {max})")]
    TooLong { max: usize, actual: usize },

    /// A key failed the structural check.
    #[error("malformed key")]
    MalformedKey,
}
