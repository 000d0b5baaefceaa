//! Limits and display settings.
//!
//! Every field has a default, so a config file only names what it changes:
//!
//! ```toml
//! error_text = "E"
//!
//! [eval]
//! max_depth = 16
//! ```

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DEPTH: usize = 64;
/// Larger `max_depth` settings are lowered to this, since each level of
/// parentheses costs the parser a few stack frames.
pub const MAX_DEPTH_LIMIT: usize = 256;
pub const DEFAULT_MAX_INPUT_LEN: usize = 4096;
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 10;
pub const DEFAULT_ERROR_TEXT: &str = "ERROR";

/// Settings for a single `evaluate_with` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// Deepest allowed nesting of parentheses, at most `MAX_DEPTH_LIMIT`.
    pub max_depth: usize,
    /// Longest accepted input, in bytes.
    pub max_input_len: usize,
    /// Significant digits kept when a result is shown.
    pub significant_digits: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
        }
    }
}

/// Settings for a `Calculator` session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub eval: EvalConfig,
    /// Shown in place of a result when evaluation fails.
    pub error_text: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            eval: EvalConfig::default(),
            error_text: DEFAULT_ERROR_TEXT.to_owned(),
        }
    }
}
