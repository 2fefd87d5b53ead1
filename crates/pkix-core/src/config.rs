//! # Decode Limits
//!
//! Bounds applied while parsing untrusted DER. Master lists are published
//! through directories and arrive from outside the trust boundary, so the
//! decoder refuses inputs beyond these sizes before allocating for them.
//!
//! Limits serialize as JSON so deployments can ship them alongside other
//! configuration:
//!
//! ```json
//! { "max_depth": 16, "max_input_len": 4194304, "max_set_members": 1024 }
//! ```
//!
//! Missing keys fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::{PkixError, Result};

/// Default upper bound on TLV nesting, top-level value included.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default upper bound on a single DER input, in bytes.
pub const DEFAULT_MAX_INPUT_LEN: usize = 16 * 1024 * 1024;

/// Default upper bound on SET OF members in a decoded collection.
pub const DEFAULT_MAX_SET_MEMBERS: usize = 4096;

/// Size bounds enforced while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeLimits {
    /// Deepest accepted nesting of values.
    pub max_depth: usize,
    /// Largest accepted top-level input.
    pub max_input_len: usize,
    /// Largest accepted SET OF member count.
    pub max_set_members: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            max_set_members: DEFAULT_MAX_SET_MEMBERS,
        }
    }
}

impl DecodeLimits {
    /// Load limits from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let limits: Self =
            serde_json::from_str(json).map_err(|e| PkixError::Config(e.to_string()))?;
        if limits.max_input_len == 0 {
            return Err(PkixError::Config(
                "max_input_len must be greater than zero".to_string(),
            ));
        }
        if limits.max_depth == 0 {
            return Err(PkixError::Config(
                "max_depth must be greater than zero".to_string(),
            ));
        }
        Ok(limits)
    }
}
