//! Browser bindings for the platform ports
//!
//! Thin web-sys wrappers. Every call here is one synchronous DOM operation;
//! nothing holds the native selection across a frame.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, Node, Window};

use super::{Dom, DocumentPosition, EventHost, FrameScheduler, FrameTask, SelectionSnapshot};
use crate::error::SyncError;
use crate::sync::keys::{KeyDisposition, KeyPolicy};

// ============================================================================
// DOM
// ============================================================================

pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new() -> Result<Self, SyncError> {
        let window = web_sys::window().ok_or_else(|| SyncError::Platform("no global window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| SyncError::Platform("window has no document".to_string()))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn native_selection(&self) -> Option<web_sys::Selection> {
        match self.window.get_selection() {
            Ok(selection) => selection,
            Err(e) => {
                log::warn!("getSelection failed: {:?}", e);
                None
            }
        }
    }
}

impl Dom for WebDom {
    type Node = Node;

    fn parent(&self, node: &Node) -> Option<Node> {
        node.parent_node()
    }

    fn is_element(&self, node: &Node) -> bool {
        node.node_type() == Node::ELEMENT_NODE
    }

    fn has_class(&self, node: &Node, class: &str) -> bool {
        node.dyn_ref::<Element>()
            .map_or(false, |element| element.class_list().contains(class))
    }

    fn element_id(&self, node: &Node) -> Option<String> {
        node.dyn_ref::<Element>().map(Element::id)
    }

    fn compare_document_position(&self, reference: &Node, other: &Node) -> DocumentPosition {
        DocumentPosition::from_bits(reference.compare_document_position(other))
    }

    fn element_by_id(&self, id: &str) -> Option<Node> {
        self.document.get_element_by_id(id).map(Node::from)
    }

    fn first_child(&self, node: &Node) -> Option<Node> {
        node.first_child()
    }

    fn query_selector(&self, selector: &str) -> Option<Node> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(Node::from),
            Err(e) => {
                log::warn!("Invalid selector '{}': {:?}", selector, e);
                None
            }
        }
    }

    fn selection(&self) -> Option<SelectionSnapshot<Node>> {
        let selection = self.native_selection()?;
        if selection.range_count() == 0 {
            return None;
        }
        Some(SelectionSnapshot {
            anchor_node: selection.anchor_node()?,
            anchor_offset: selection.anchor_offset(),
            focus_node: selection.focus_node()?,
            focus_offset: selection.focus_offset(),
            is_collapsed: selection.is_collapsed(),
        })
    }

    fn collapse_to(&self, node: &Node, offset: u32) -> Result<(), SyncError> {
        let range = self
            .document
            .create_range()
            .map_err(|e| SyncError::platform("createRange", e))?;
        range
            .set_start(node, offset)
            .map_err(|e| SyncError::platform("Range.setStart", e))?;

        let selection = self
            .native_selection()
            .ok_or_else(|| SyncError::Platform("no native selection".to_string()))?;
        selection
            .remove_all_ranges()
            .map_err(|e| SyncError::platform("Selection.removeAllRanges", e))?;
        selection
            .add_range(&range)
            .map_err(|e| SyncError::platform("Selection.addRange", e))
    }
}

// ============================================================================
// Scheduler
// ============================================================================

/// Runs tasks from `requestAnimationFrame`, i.e. after the current render
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, task: FrameTask) {
        let callback = Closure::once_into_js(move || task());
        if let Err(e) = self.window.request_animation_frame(callback.unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }
}

// ============================================================================
// Events
// ============================================================================

type Listener = Closure<dyn FnMut(Event)>;

/// Owns the `selectionchange` and `keydown` closures while they are
/// registered. Dropping the host deregisters both.
pub struct WebEventHost {
    document: Document,
    on_selection_change: Listener,
    keydown: Option<(EventTarget, Listener)>,
}

impl WebEventHost {
    pub fn new(document: Document, mut on_selection_change: impl FnMut() + 'static) -> Self {
        Self {
            document,
            on_selection_change: Closure::new(move |_event: Event| on_selection_change()),
            keydown: None,
        }
    }
}

impl EventHost<Node> for WebEventHost {
    fn listen(&mut self, root: &Node, keys: &KeyPolicy) -> Result<(), SyncError> {
        self.unlisten();

        let keys = keys.clone();
        let on_keydown: Listener = Closure::new(move |event: Event| {
            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if keys.disposition(key_event.key_code()) == KeyDisposition::Suppress {
                event.prevent_default();
            }
        });

        let target: EventTarget = root.clone().into();
        target
            .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())
            .map_err(|e| SyncError::platform("addEventListener(keydown)", e))?;
        self.keydown = Some((target, on_keydown));

        self.document
            .add_event_listener_with_callback("selectionchange", self.on_selection_change.as_ref().unchecked_ref())
            .map_err(|e| SyncError::platform("addEventListener(selectionchange)", e))
    }

    fn unlisten(&mut self) {
        if let Some((target, on_keydown)) = self.keydown.take() {
            if let Err(e) = target.remove_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref()) {
                log::warn!("removeEventListener(keydown) failed: {:?}", e);
            }
        }
        // Removing a listener that was never added is a no-op in the DOM
        if let Err(e) = self
            .document
            .remove_event_listener_with_callback("selectionchange", self.on_selection_change.as_ref().unchecked_ref())
        {
            log::warn!("removeEventListener(selectionchange) failed: {:?}", e);
        }
    }
}

impl Drop for WebEventHost {
    fn drop(&mut self) {
        self.unlisten();
    }
}
