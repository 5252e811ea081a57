//! Editor boundary check for incoming selection changes

use crate::dom::Dom;

/// True when `root` is a strict ancestor of `child`.
///
/// The walk starts at `child`'s parent, so the root itself is not its own
/// descendant.
pub fn is_descendant<D: Dom>(dom: &D, child: &D::Node, root: &D::Node) -> bool {
    let mut current = dom.parent(child);
    while let Some(node) = current {
        if node == *root {
            return true;
        }
        current = dom.parent(&node);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    #[test]
    fn test_descendant_checks() {
        let dom = MemoryDom::new();
        let body = dom.append_element(dom.document(), "body", None, &[]);
        let toolbar = dom.append_element(body, "div", None, &["toolbar"]);
        let button = dom.append_text(toolbar, "B");
        let editor = dom.append_element(body, "div", None, &["editor"]);
        let block = dom.append_element(editor, "div", Some("b1"), &["block"]);
        let text = dom.append_text(block, "Hello");

        assert!(is_descendant(&dom, &text, &editor));
        assert!(is_descendant(&dom, &block, &editor));
        assert!(!is_descendant(&dom, &button, &editor));
        assert!(!is_descendant(&dom, &editor, &editor));
    }

    #[test]
    fn test_detached_node_is_outside() {
        let dom = MemoryDom::new();
        let editor = dom.append_element(dom.document(), "div", None, &["editor"]);
        let orphan = dom.create_text("gone");

        assert!(!is_descendant(&dom, &orphan, &editor));
    }
}
