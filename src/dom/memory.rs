//! In-memory DOM
//!
//! An arena-backed tree with just enough of the platform's behavior for the
//! sync core: parent links, classes and ids, document-order comparison, a
//! single selection range, and a keydown listener slot. Used by headless
//! hosts and by the test suite.

use std::cell::RefCell;
use std::rc::Rc;

use super::{Dom, DocumentPosition, EventHost, SelectionSnapshot};
use crate::error::SyncError;
use crate::sync::keys::{KeyDisposition, KeyPolicy};

/// Handle into a `MemoryDom` arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryNode(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Element {
        tag: String,
        id: Option<String>,
        classes: Vec<String>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<usize>,
    children: Vec<usize>,
}

#[derive(Debug, Clone)]
struct Listeners {
    root: MemoryNode,
    keys: KeyPolicy,
}

#[derive(Debug)]
pub struct MemoryDom {
    nodes: RefCell<Vec<NodeData>>,
    selection: RefCell<Option<SelectionSnapshot<MemoryNode>>>,
    listeners: RefCell<Option<Listeners>>,
}

impl MemoryDom {
    /// Empty document; node 0 is the document node
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }]),
            selection: RefCell::new(None),
            listeners: RefCell::new(None),
        }
    }

    pub fn document(&self) -> MemoryNode {
        MemoryNode(0)
    }

    // ========================================================================
    // Tree construction
    // ========================================================================

    pub fn create_element(&self, tag: &str) -> MemoryNode {
        self.push(NodeKind::Element {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
        })
    }

    pub fn create_text(&self, text: &str) -> MemoryNode {
        self.push(NodeKind::Text(text.to_string()))
    }

    /// Append `child` under `parent`, detaching it from any previous parent
    pub fn append_child(&self, parent: MemoryNode, child: MemoryNode) {
        self.remove(child);
        let mut nodes = self.nodes.borrow_mut();
        nodes[parent.0].children.push(child.0);
        nodes[child.0].parent = Some(parent.0);
    }

    /// Detach `node` (and its subtree) from the tree
    pub fn remove(&self, node: MemoryNode) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[node.0].parent.take() {
            nodes[parent].children.retain(|&c| c != node.0);
        }
    }

    pub fn set_id(&self, node: MemoryNode, value: &str) {
        if let NodeKind::Element { id, .. } = &mut self.nodes.borrow_mut()[node.0].kind {
            *id = Some(value.to_string());
        }
    }

    pub fn add_class(&self, node: MemoryNode, class: &str) {
        if let NodeKind::Element { classes, .. } = &mut self.nodes.borrow_mut()[node.0].kind {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        }
    }

    /// `<tag id=.. class=..>` appended to `parent`
    pub fn append_element(&self, parent: MemoryNode, tag: &str, id: Option<&str>, classes: &[&str]) -> MemoryNode {
        let element = self.create_element(tag);
        if let Some(id) = id {
            self.set_id(element, id);
        }
        for class in classes {
            self.add_class(element, class);
        }
        self.append_child(parent, element);
        element
    }

    pub fn append_text(&self, parent: MemoryNode, text: &str) -> MemoryNode {
        let node = self.create_text(text);
        self.append_child(parent, node);
        node
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Set the native selection as a user drag from anchor to focus would
    pub fn set_selection(&self, anchor: MemoryNode, anchor_offset: u32, focus: MemoryNode, focus_offset: u32) {
        *self.selection.borrow_mut() = Some(SelectionSnapshot {
            anchor_node: anchor,
            anchor_offset,
            focus_node: focus,
            focus_offset,
            is_collapsed: anchor == focus && anchor_offset == focus_offset,
        });
    }

    pub fn clear_selection(&self) {
        *self.selection.borrow_mut() = None;
    }

    pub fn range_count(&self) -> usize {
        usize::from(self.selection.borrow().is_some())
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub fn is_listening(&self) -> bool {
        self.listeners.borrow().is_some()
    }

    /// Deliver a keydown to `target`. Returns the disposition the listener
    /// chose, or `None` when no listener sits on an ancestor of `target`.
    pub fn dispatch_keydown(&self, target: MemoryNode, key_code: u32) -> Option<KeyDisposition> {
        let listeners = self.listeners.borrow().clone()?;
        let mut node = Some(target);
        while let Some(current) = node {
            if current == listeners.root {
                return Some(listeners.keys.disposition(key_code));
            }
            node = self.parent(&current);
        }
        None
    }

    /// Event host writing into this document's listener slot
    pub fn event_host(self: &Rc<Self>) -> MemoryEventHost {
        MemoryEventHost { dom: Rc::clone(self) }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn push(&self, kind: NodeKind) -> MemoryNode {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        MemoryNode(nodes.len() - 1)
    }

    /// Path from the tree's top down to `node`, inclusive
    fn path_from_top(&self, node: MemoryNode) -> Vec<usize> {
        let nodes = self.nodes.borrow();
        let mut path = vec![node.0];
        let mut current = node.0;
        while let Some(parent) = nodes[current].parent {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    fn is_connected(&self, node: MemoryNode) -> bool {
        self.path_from_top(node).first() == Some(&0)
    }

    /// Pre-order walk of the connected tree
    fn walk_connected(&self, mut visit: impl FnMut(&NodeData) -> bool) -> Option<MemoryNode> {
        let nodes = self.nodes.borrow();
        let mut stack = vec![0];
        while let Some(index) = stack.pop() {
            if visit(&nodes[index]) {
                return Some(MemoryNode(index));
            }
            stack.extend(nodes[index].children.iter().rev());
        }
        None
    }

    fn node_length(&self, node: MemoryNode) -> u32 {
        let nodes = self.nodes.borrow();
        let len = match &nodes[node.0].kind {
            NodeKind::Text(text) => text.encode_utf16().count(),
            _ => nodes[node.0].children.len(),
        };
        u32::try_from(len).unwrap_or(u32::MAX)
    }
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for MemoryDom {
    type Node = MemoryNode;

    fn parent(&self, node: &MemoryNode) -> Option<MemoryNode> {
        self.nodes.borrow()[node.0].parent.map(MemoryNode)
    }

    fn is_element(&self, node: &MemoryNode) -> bool {
        matches!(self.nodes.borrow()[node.0].kind, NodeKind::Element { .. })
    }

    fn has_class(&self, node: &MemoryNode, class: &str) -> bool {
        match &self.nodes.borrow()[node.0].kind {
            NodeKind::Element { classes, .. } => classes.iter().any(|c| c == class),
            _ => false,
        }
    }

    fn element_id(&self, node: &MemoryNode) -> Option<String> {
        match &self.nodes.borrow()[node.0].kind {
            NodeKind::Element { id, .. } => Some(id.clone().unwrap_or_default()),
            _ => None,
        }
    }

    fn compare_document_position(&self, reference: &MemoryNode, other: &MemoryNode) -> DocumentPosition {
        if reference == other {
            return DocumentPosition::SAME;
        }

        let ref_path = self.path_from_top(*reference);
        let other_path = self.path_from_top(*other);

        if ref_path[0] != other_path[0] {
            // Platforms pick a consistent but arbitrary order here
            let order = if other.0 < reference.0 {
                DocumentPosition::PRECEDING
            } else {
                DocumentPosition::FOLLOWING
            };
            return DocumentPosition::DISCONNECTED | DocumentPosition::IMPLEMENTATION_SPECIFIC | order;
        }

        if ref_path.contains(&other.0) {
            return DocumentPosition::CONTAINS | DocumentPosition::PRECEDING;
        }
        if other_path.contains(&reference.0) {
            return DocumentPosition::CONTAINED_BY | DocumentPosition::FOLLOWING;
        }

        // First point where the two paths split; both sides are siblings there
        let split = ref_path
            .iter()
            .zip(other_path.iter())
            .take_while(|(a, b)| a == b)
            .count();
        let parent = ref_path[split - 1];
        let nodes = self.nodes.borrow();
        let siblings = &nodes[parent].children;
        let ref_index = siblings.iter().position(|&c| c == ref_path[split]);
        let other_index = siblings.iter().position(|&c| c == other_path[split]);

        if other_index < ref_index {
            DocumentPosition::PRECEDING
        } else {
            DocumentPosition::FOLLOWING
        }
    }

    fn element_by_id(&self, id: &str) -> Option<MemoryNode> {
        self.walk_connected(|data| {
            matches!(&data.kind, NodeKind::Element { id: Some(found), .. } if found == id)
        })
    }

    fn first_child(&self, node: &MemoryNode) -> Option<MemoryNode> {
        self.nodes.borrow()[node.0].children.first().copied().map(MemoryNode)
    }

    /// Supports a single `.class`, `#id` or `tag` selector
    fn query_selector(&self, selector: &str) -> Option<MemoryNode> {
        let selector = selector.trim();
        self.walk_connected(|data| match &data.kind {
            NodeKind::Element { tag, id, classes } => {
                if let Some(class) = selector.strip_prefix('.') {
                    classes.iter().any(|c| c == class)
                } else if let Some(wanted) = selector.strip_prefix('#') {
                    id.as_deref() == Some(wanted)
                } else {
                    tag.eq_ignore_ascii_case(selector)
                }
            }
            _ => false,
        })
    }

    fn selection(&self) -> Option<SelectionSnapshot<MemoryNode>> {
        self.selection.borrow().clone()
    }

    fn collapse_to(&self, node: &MemoryNode, offset: u32) -> Result<(), SyncError> {
        if !self.is_connected(*node) {
            return Err(SyncError::Platform("InvalidNodeTypeError: node is not in the document".to_string()));
        }
        let length = self.node_length(*node);
        if offset > length {
            return Err(SyncError::Platform(format!(
                "IndexSizeError: offset {} exceeds node length {}",
                offset, length
            )));
        }
        self.set_selection(*node, offset, *node, offset);
        Ok(())
    }
}

/// `EventHost` for a shared `MemoryDom`
pub struct MemoryEventHost {
    dom: Rc<MemoryDom>,
}

impl EventHost<MemoryNode> for MemoryEventHost {
    fn listen(&mut self, root: &MemoryNode, keys: &KeyPolicy) -> Result<(), SyncError> {
        *self.dom.listeners.borrow_mut() = Some(Listeners {
            root: *root,
            keys: keys.clone(),
        });
        Ok(())
    }

    fn unlisten(&mut self) {
        self.dom.listeners.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_paragraphs() -> (MemoryDom, MemoryNode, MemoryNode, MemoryNode) {
        let dom = MemoryDom::new();
        let body = dom.append_element(dom.document(), "body", None, &[]);
        let p1 = dom.append_element(body, "p", Some("p1"), &[]);
        let t1 = dom.append_text(p1, "one");
        let p2 = dom.append_element(body, "p", Some("p2"), &[]);
        let t2 = dom.append_text(p2, "two");
        (dom, body, t1, t2)
    }

    #[test]
    fn test_compare_siblings_in_document_order() {
        let (dom, _, t1, t2) = two_paragraphs();
        assert_eq!(dom.compare_document_position(&t1, &t2), DocumentPosition::FOLLOWING);
        assert_eq!(dom.compare_document_position(&t2, &t1), DocumentPosition::PRECEDING);
        assert!(dom.compare_document_position(&t1, &t1).is_same());
    }

    #[test]
    fn test_compare_ancestor_and_descendant() {
        let (dom, body, t1, _) = two_paragraphs();
        assert_eq!(
            dom.compare_document_position(&t1, &body),
            DocumentPosition::CONTAINS | DocumentPosition::PRECEDING
        );
        assert_eq!(
            dom.compare_document_position(&body, &t1),
            DocumentPosition::CONTAINED_BY | DocumentPosition::FOLLOWING
        );
    }

    #[test]
    fn test_compare_disconnected() {
        let (dom, _, t1, _) = two_paragraphs();
        let orphan = dom.create_element("div");
        let pos = dom.compare_document_position(&t1, &orphan);
        assert!(pos.contains(DocumentPosition::DISCONNECTED));
        assert!(pos.contains(DocumentPosition::IMPLEMENTATION_SPECIFIC));
    }

    #[test]
    fn test_element_by_id_ignores_removed_nodes() {
        let (dom, _, _, _) = two_paragraphs();
        let p2 = dom.element_by_id("p2").unwrap();
        dom.remove(p2);
        assert_eq!(dom.element_by_id("p2"), None);
        assert!(dom.element_by_id("p1").is_some());
    }

    #[test]
    fn test_query_selector_forms() {
        let dom = MemoryDom::new();
        let root = dom.append_element(dom.document(), "div", Some("main"), &["editor"]);
        assert_eq!(dom.query_selector(".editor"), Some(root));
        assert_eq!(dom.query_selector("#main"), Some(root));
        assert_eq!(dom.query_selector("DIV"), Some(root));
        assert_eq!(dom.query_selector(".toolbar"), None);
    }

    #[test]
    fn test_collapse_to_validates_utf16_length() {
        let dom = MemoryDom::new();
        let p = dom.append_element(dom.document(), "p", None, &[]);
        let text = dom.append_text(p, "a😀");

        assert!(dom.collapse_to(&text, 3).is_ok());
        let snapshot = dom.selection().unwrap();
        assert!(snapshot.is_collapsed);
        assert_eq!(snapshot.anchor_offset, 3);

        assert!(matches!(dom.collapse_to(&text, 4), Err(SyncError::Platform(_))));
        assert_eq!(dom.range_count(), 1);
    }

    #[test]
    fn test_set_selection_collapsed_flag() {
        let (dom, _, t1, t2) = two_paragraphs();
        dom.set_selection(t1, 1, t2, 1);
        assert!(!dom.selection().unwrap().is_collapsed);
        dom.set_selection(t1, 1, t1, 1);
        assert!(dom.selection().unwrap().is_collapsed);
        dom.clear_selection();
        assert_eq!(dom.range_count(), 0);
    }
}
