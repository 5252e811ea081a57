//! Native selection → model descriptor

use crate::dom::{Dom, SelectionSnapshot};
use crate::models::SelectionDescriptor;

/// Build the descriptor for one selection snapshot.
///
/// Backward when the platform reports the focus node as preceding the
/// anchor node (an ancestor focus counts, the platform sets PRECEDING for
/// it), or when both endpoints share a node and the anchor offset is past
/// the focus offset. Endpoints outside any block come through as `None`.
pub fn read_selection<D: Dom>(
    dom: &D,
    snapshot: &SelectionSnapshot<D::Node>,
    block_class: &str,
) -> SelectionDescriptor {
    let SelectionSnapshot {
        anchor_node,
        anchor_offset,
        focus_node,
        focus_offset,
        is_collapsed,
    } = snapshot;

    let position = dom.compare_document_position(anchor_node, focus_node);
    let is_backward = if position.precedes() {
        true
    } else {
        position.is_same() && anchor_offset > focus_offset
    };

    SelectionDescriptor {
        anchor_key: super::locate_block(dom, anchor_node, block_class),
        focus_key: super::locate_block(dom, focus_node, block_class),
        anchor_offset: *anchor_offset,
        focus_offset: *focus_offset,
        is_collapsed: *is_collapsed,
        is_backward,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDom, MemoryNode};
    use crate::models::BlockId;

    struct Doc {
        dom: MemoryDom,
        b1_text: MemoryNode,
        b2_text: MemoryNode,
        b1: MemoryNode,
    }

    fn hello_world() -> Doc {
        let dom = MemoryDom::new();
        let editor = dom.append_element(dom.document(), "div", None, &["editor"]);
        let b1 = dom.append_element(editor, "div", Some("b1"), &["block"]);
        let b1_text = dom.append_text(b1, "Hello");
        let b2 = dom.append_element(editor, "div", Some("b2"), &["block"]);
        let b2_text = dom.append_text(b2, "World");
        Doc { dom, b1_text, b2_text, b1 }
    }

    fn read(doc: &Doc) -> SelectionDescriptor {
        let snapshot = doc.dom.selection().unwrap();
        read_selection(&doc.dom, &snapshot, "block")
    }

    #[test]
    fn test_forward_across_blocks() {
        let doc = hello_world();
        doc.dom.set_selection(doc.b1_text, 2, doc.b2_text, 3);

        assert_eq!(
            read(&doc),
            SelectionDescriptor {
                anchor_key: Some(BlockId::new("b1")),
                focus_key: Some(BlockId::new("b2")),
                anchor_offset: 2,
                focus_offset: 3,
                is_collapsed: false,
                is_backward: false,
            }
        );
    }

    #[test]
    fn test_backward_across_blocks() {
        let doc = hello_world();
        doc.dom.set_selection(doc.b2_text, 3, doc.b1_text, 2);

        assert_eq!(
            read(&doc),
            SelectionDescriptor {
                anchor_key: Some(BlockId::new("b2")),
                focus_key: Some(BlockId::new("b1")),
                anchor_offset: 3,
                focus_offset: 2,
                is_collapsed: false,
                is_backward: true,
            }
        );
    }

    #[test]
    fn test_same_node_offsets_decide_direction() {
        let doc = hello_world();

        doc.dom.set_selection(doc.b1_text, 4, doc.b1_text, 1);
        assert!(read(&doc).is_backward);

        doc.dom.set_selection(doc.b1_text, 1, doc.b1_text, 4);
        assert!(!read(&doc).is_backward);

        doc.dom.set_selection(doc.b1_text, 3, doc.b1_text, 3);
        let caret = read(&doc);
        assert!(!caret.is_backward);
        assert_eq!(caret, SelectionDescriptor::caret("b1", 3));
    }

    #[test]
    fn test_focus_on_ancestor_block_is_backward() {
        let doc = hello_world();
        doc.dom.set_selection(doc.b1_text, 2, doc.b1, 0);

        let descriptor = read(&doc);
        assert!(descriptor.is_backward);
        assert_eq!(descriptor.anchor_key, descriptor.focus_key);
    }

    #[test]
    fn test_unresolvable_endpoint_is_absent() {
        let doc = hello_world();
        let stray = doc.dom.append_text(doc.dom.document(), "stray");
        doc.dom.set_selection(doc.b1_text, 1, stray, 2);

        let descriptor = read(&doc);
        assert_eq!(descriptor.anchor_key, Some(BlockId::new("b1")));
        assert_eq!(descriptor.focus_key, None);
        assert!(!descriptor.is_resolved());
    }
}
