use serde::{Deserialize, Serialize};

/// Default upper bound on content length, in characters.
pub const DEFAULT_MAX_CHARS: usize = 10_000;

/// Configuration for the content gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Maximum accepted content length in characters, measured after
    /// trimming and before escaping.
    pub max_chars: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit() {
        assert_eq!(GateConfig::default().max_chars, 10_000);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c: GateConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c, GateConfig::default());
        let c: GateConfig = serde_json::from_str(r#"{"max_chars": 64}"#).unwrap();
        assert_eq!(c.max_chars, 64);
    }
}
