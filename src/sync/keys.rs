//! Keydown policy for the editable root
//!
//! Arrow keys keep their native behavior so the platform moves the caret
//! and the reader sees the result. Every other key is suppressed; text
//! changes go through the model's command path instead of contentEditable.

use crate::config::SyncConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Let the platform handle the key
    Native,
    /// `preventDefault()`
    Suppress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPolicy {
    passthrough: Vec<u32>,
}

impl KeyPolicy {
    pub fn new(passthrough: impl IntoIterator<Item = u32>) -> Self {
        Self {
            passthrough: passthrough.into_iter().collect(),
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.passthrough_keys.iter().copied())
    }

    pub fn disposition(&self, key_code: u32) -> KeyDisposition {
        if self.passthrough.contains(&key_code) {
            KeyDisposition::Native
        } else {
            KeyDisposition::Suppress
        }
    }
}

impl Default for KeyPolicy {
    fn default() -> Self {
        Self::from_config(&SyncConfig::default())
    }
}
