//! Adapter configuration
//!
//! JS hosts pass a plain object; every field is optional.

use serde::{Deserialize, Serialize};

/// Left, up, right, down
pub const ARROW_KEY_CODES: [u32; 4] = [37, 38, 39, 40];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncConfig {
    /// Class name marking an element as an editor block
    pub block_class: String,

    /// Selector used by `attach()` to find the editable root
    pub editor_selector: String,

    /// Key codes left to the platform on keydown; all others are suppressed
    pub passthrough_keys: Vec<u32>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            block_class: "block".to_string(),
            editor_selector: ".editor".to_string(),
            passthrough_keys: ARROW_KEY_CODES.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.block_class, "block");
        assert_eq!(config.editor_selector, ".editor");
        assert_eq!(config.passthrough_keys, vec![37, 38, 39, 40]);
    }

    #[test]
    fn test_partial_object_keeps_remaining_defaults() {
        let config: SyncConfig =
            serde_json::from_str(r#"{"blockClass":"paragraph"}"#).unwrap();
        assert_eq!(config.block_class, "paragraph");
        assert_eq!(config.editor_selector, ".editor");
        assert_eq!(config.passthrough_keys, ARROW_KEY_CODES.to_vec());
    }
}
