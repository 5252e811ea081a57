//! Selection descriptors exchanged with the editor model
//!
//! Both types are ephemeral: built fresh for every notification or
//! instruction, handed across the boundary, then dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a rendered block (the element's `id` attribute)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Normalized view of the native selection, sent to the model on every
/// selection change inside the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionDescriptor {
    /// Block holding the anchor endpoint, `None` when outside any block
    pub anchor_key: Option<BlockId>,

    /// Block holding the focus endpoint, `None` when outside any block
    pub focus_key: Option<BlockId>,

    /// Character offset of the anchor inside its node
    pub anchor_offset: u32,

    /// Character offset of the focus inside its node
    pub focus_offset: u32,

    /// Anchor and focus denote the same point
    pub is_collapsed: bool,

    /// Focus precedes anchor in document order
    pub is_backward: bool,
}

impl SelectionDescriptor {
    /// A caret at `offset` inside `block`
    pub fn caret(block: impl Into<BlockId>, offset: u32) -> Self {
        let block = block.into();
        Self {
            anchor_key: Some(block.clone()),
            focus_key: Some(block),
            anchor_offset: offset,
            focus_offset: offset,
            is_collapsed: true,
            is_backward: false,
        }
    }

    /// Both endpoints resolved to a block
    pub fn is_resolved(&self) -> bool {
        self.anchor_key.is_some() && self.focus_key.is_some()
    }
}

/// Where the model wants the caret after a render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreRequest {
    pub block_id: BlockId,
    pub offset: u32,
}

impl RestoreRequest {
    pub fn new(block_id: impl Into<BlockId>, offset: u32) -> Self {
        Self {
            block_id: block_id.into(),
            offset,
        }
    }
}
