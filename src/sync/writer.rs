//! Model restore request → native selection
//!
//! Runs inside a scheduled frame task, after the render that produced the
//! target block has committed.

use crate::dom::Dom;
use crate::error::SyncError;
use crate::models::RestoreRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The caret now sits at the requested block/offset
    Applied,
    /// The target block left the DOM before the frame ran; nothing changed
    StaleTarget,
}

/// Place a collapsed caret at `request.offset` inside the target block's
/// first child. A block without children takes the caret itself.
pub fn apply_restore<D: Dom>(dom: &D, request: &RestoreRequest) -> Result<RestoreOutcome, SyncError> {
    let Some(block) = dom.element_by_id(request.block_id.as_str()) else {
        return Ok(RestoreOutcome::StaleTarget);
    };

    let start = dom.first_child(&block).unwrap_or(block);
    dom.collapse_to(&start, request.offset)?;
    Ok(RestoreOutcome::Applied)
}
