//! Block lookup for arbitrary DOM nodes

use crate::dom::Dom;
use crate::models::BlockId;

/// Nearest element at or above `node` carrying `block_class`.
///
/// Selection endpoints usually sit on text nodes, so the walk starts at
/// `node` itself and skips anything that is not an element.
pub fn locate_block<D: Dom>(dom: &D, node: &D::Node, block_class: &str) -> Option<BlockId> {
    let mut current = Some(node.clone());
    while let Some(node) = current {
        if dom.is_element(&node) && dom.has_class(&node, block_class) {
            return dom.element_id(&node).map(BlockId::from);
        }
        current = dom.parent(&node);
    }
    None
}
