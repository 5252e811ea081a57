//! Platform ports
//!
//! The sync core never calls web-sys directly. It talks to the DOM, the
//! frame scheduler and the event system through the traits below, so the
//! same logic runs against the browser (`web`) or the arena DOM (`memory`).
//!
//! # Module Structure
//!
//! - `position`: compareDocumentPosition flags
//! - `scheduler`: "run after the next render commits" capability
//! - `memory`: in-memory DOM for headless hosts and tests
//! - `web`: web-sys bindings

pub mod memory;
pub mod position;
pub mod scheduler;
pub mod web;

pub use memory::{MemoryDom, MemoryEventHost, MemoryNode};
pub use position::DocumentPosition;
pub use scheduler::{FrameScheduler, FrameTask, ManualScheduler};

use crate::error::SyncError;
use crate::sync::keys::KeyPolicy;
use std::fmt::Debug;

/// A snapshot of the native selection taken inside one callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot<N> {
    pub anchor_node: N,
    pub anchor_offset: u32,
    pub focus_node: N,
    pub focus_offset: u32,
    pub is_collapsed: bool,
}

/// The slice of the DOM the adapter reads and writes
pub trait Dom {
    /// Node handle; equality is node identity
    type Node: Clone + PartialEq + Debug + 'static;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn is_element(&self, node: &Self::Node) -> bool;

    /// Always false for non-element nodes
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// The `id` attribute, `None` for non-elements
    fn element_id(&self, node: &Self::Node) -> Option<String>;

    /// Position of `other` relative to `reference`
    fn compare_document_position(&self, reference: &Self::Node, other: &Self::Node) -> DocumentPosition;

    /// Connected element with the given id
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn first_child(&self, node: &Self::Node) -> Option<Self::Node>;

    fn query_selector(&self, selector: &str) -> Option<Self::Node>;

    /// `None` when the document has no selection range
    fn selection(&self) -> Option<SelectionSnapshot<Self::Node>>;

    /// Replace every selection range with one collapsed range at `node`/`offset`
    fn collapse_to(&self, node: &Self::Node, offset: u32) -> Result<(), SyncError>;
}

/// Registration of the adapter's listeners on the editor root
pub trait EventHost<N> {
    fn listen(&mut self, root: &N, keys: &KeyPolicy) -> Result<(), SyncError>;

    fn unlisten(&mut self);
}
