//! Selection sync adapter
//!
//! Owns the platform ports, the outbound sink and the attach/detach
//! lifecycle. Nothing is registered on the page until `attach` (or the
//! first restore request) runs, and `detach` removes it all again.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::SyncConfig;
use crate::dom::{Dom, EventHost, FrameScheduler};
use crate::error::SyncError;
use crate::models::{RestoreRequest, SelectionDescriptor};

use super::guard::is_descendant;
use super::keys::{KeyDisposition, KeyPolicy};
use super::reader::read_selection;
use super::writer::{apply_restore, RestoreOutcome};

/// Outbound channel to the editor model
pub trait SelectionSink {
    fn selection_changed(&self, descriptor: &SelectionDescriptor);
}

impl<F: Fn(&SelectionDescriptor)> SelectionSink for F {
    fn selection_changed(&self, descriptor: &SelectionDescriptor) {
        self(descriptor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle<N> {
    Uninitialized,
    Attached { root: N },
}

pub struct SelectionSync<D: Dom, S, O, H> {
    dom: Rc<D>,
    scheduler: S,
    sink: Rc<O>,
    host: H,
    config: SyncConfig,
    keys: KeyPolicy,
    lifecycle: Lifecycle<D::Node>,
}

impl<D, S, O, H> SelectionSync<D, S, O, H>
where
    D: Dom + 'static,
    S: FrameScheduler,
    O: SelectionSink,
    H: EventHost<D::Node>,
{
    pub fn new(dom: Rc<D>, scheduler: S, sink: O, host: H, config: SyncConfig) -> Self {
        let keys = KeyPolicy::from_config(&config);
        Self {
            dom,
            scheduler,
            sink: Rc::new(sink),
            host,
            config,
            keys,
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Shared handle on the outbound sink, usable after the adapter's
    /// borrow is released
    pub fn sink(&self) -> Rc<O> {
        Rc::clone(&self.sink)
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> &Lifecycle<D::Node> {
        &self.lifecycle
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Attached { .. })
    }

    pub fn root(&self) -> Option<&D::Node> {
        match &self.lifecycle {
            Lifecycle::Attached { root } => Some(root),
            Lifecycle::Uninitialized => None,
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Find the editor root with the configured selector and attach to it.
    /// No-op when already attached.
    pub fn attach(&mut self) -> Result<(), SyncError> {
        if self.is_attached() {
            return Ok(());
        }
        let root = self
            .dom
            .query_selector(&self.config.editor_selector)
            .ok_or_else(|| SyncError::EditorRootNotFound {
                selector: self.config.editor_selector.clone(),
            })?;
        self.attach_to(root)
    }

    /// Attach to an explicit root, moving off any previous one
    pub fn attach_to(&mut self, root: D::Node) -> Result<(), SyncError> {
        if self.root() == Some(&root) {
            return Ok(());
        }
        self.detach();

        self.host.listen(&root, &self.keys)?;
        log::info!("Selection sync attached to {:?}", root);
        self.lifecycle = Lifecycle::Attached { root };
        Ok(())
    }

    pub fn detach(&mut self) {
        if let Lifecycle::Attached { root } = std::mem::replace(&mut self.lifecycle, Lifecycle::Uninitialized) {
            self.host.unlisten();
            log::info!("Selection sync detached from {:?}", root);
        }
    }

    // ========================================================================
    // Read path
    // ========================================================================

    /// Run the boundary guard and the reader on the current selection.
    ///
    /// Returns `None` when the notification should be dropped: not
    /// attached, no selection, or an anchor outside the editor root. Only
    /// the anchor is checked. Nothing is sent to the sink.
    pub fn read_selection_change(&self) -> Option<SelectionDescriptor> {
        let root = self.root()?;
        let snapshot = self.dom.selection()?;

        if !is_descendant(&*self.dom, &snapshot.anchor_node, root) {
            log::trace!("Ignoring selection outside the editor: {:?}", snapshot.anchor_node);
            return None;
        }

        let descriptor = read_selection(&*self.dom, &snapshot, &self.config.block_class);
        if !descriptor.is_resolved() {
            log::debug!("Selection endpoint outside any block: {:?}", descriptor);
        }
        log::debug!("selectionChange {:?}", descriptor);
        Some(descriptor)
    }

    /// Handle one native selectionchange notification and send the result
    /// to the sink. Returns the descriptor that was sent.
    pub fn handle_selection_change(&self) -> Option<SelectionDescriptor> {
        let descriptor = self.read_selection_change()?;
        self.sink.selection_changed(&descriptor);
        Some(descriptor)
    }

    pub fn handle_keydown(&self, key_code: u32) -> KeyDisposition {
        self.keys.disposition(key_code)
    }

    // ========================================================================
    // Write path
    // ========================================================================

    /// Queue a caret restore for the next frame.
    ///
    /// The first request on an uninitialized adapter attaches it. The only
    /// error is a failed attach; a stale target or a platform failure inside
    /// the frame is logged and never reaches the caller.
    pub fn restore_selection(&mut self, request: RestoreRequest) -> Result<(), SyncError> {
        log::debug!("renderSelection {:?}", request);
        self.attach()?;

        let dom = Rc::clone(&self.dom);
        self.scheduler.request_frame(Box::new(move || {
            match apply_restore(&*dom, &request) {
                Ok(RestoreOutcome::Applied) => {}
                Ok(RestoreOutcome::StaleTarget) => {
                    log::debug!("Block '{}' is gone, skipping selection restore", request.block_id);
                }
                Err(e) => log::error!("Failed to restore selection to {:?}: {}", request, e),
            }
        }));
        Ok(())
    }
}

/// Selection change on an adapter shared through `RefCell`.
///
/// The borrow ends before the sink runs, so the sink may call back into the
/// adapter (restore, detach). A notification arriving while the adapter is
/// already mutably borrowed is dropped.
pub fn dispatch_selection_change<D, S, O, H>(
    sync: &RefCell<SelectionSync<D, S, O, H>>,
) -> Option<SelectionDescriptor>
where
    D: Dom + 'static,
    S: FrameScheduler,
    O: SelectionSink,
    H: EventHost<D::Node>,
{
    let (descriptor, sink) = match sync.try_borrow() {
        Ok(sync) => (sync.read_selection_change()?, sync.sink()),
        Err(_) => {
            log::warn!("selectionchange arrived while the adapter was busy, dropped");
            return None;
        }
    };
    sink.selection_changed(&descriptor);
    Some(descriptor)
}
