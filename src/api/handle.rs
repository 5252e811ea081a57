//! Exported selection sync handle
//!
//! ```js
//! const sync = new SelectionSyncHandle(state => app.ports.selectionChange.send(state));
//! app.ports.renderSelection.subscribe(req => sync.restoreSelection(req));
//! ```

use std::cell::{RefCell, RefMut};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, deserialize_or_default, serialize, to_js_error};
use crate::config::SyncConfig;
use crate::dom::web::{AnimationFrameScheduler, WebDom, WebEventHost};
use crate::error::SyncError;
use crate::models::{RestoreRequest, SelectionDescriptor};
use crate::sync::{dispatch_selection_change, locate_block, SelectionSink, SelectionSync};

/// Forwards descriptors to a JS function as plain objects
pub struct JsCallbackSink {
    callback: js_sys::Function,
}

impl JsCallbackSink {
    pub fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }
}

impl SelectionSink for JsCallbackSink {
    fn selection_changed(&self, descriptor: &SelectionDescriptor) {
        let Ok(value) = serialize(descriptor, "Failed to serialize selection descriptor") else {
            return;
        };
        if let Err(e) = self.callback.call1(&JsValue::NULL, &value) {
            log::error!("selectionChange callback threw: {:?}", e);
        }
    }
}

type WebSync = SelectionSync<WebDom, AnimationFrameScheduler, JsCallbackSink, WebEventHost>;

#[wasm_bindgen]
pub struct SelectionSyncHandle {
    inner: Rc<RefCell<WebSync>>,
}

#[wasm_bindgen]
impl SelectionSyncHandle {
    /// `config` is optional; see `SyncConfig` for the accepted keys
    #[wasm_bindgen(constructor)]
    pub fn new(on_selection_change: js_sys::Function, config: JsValue) -> Result<SelectionSyncHandle, JsValue> {
        let config: SyncConfig =
            deserialize_or_default(config, "Invalid selection sync config").map_err(to_js_error)?;
        let dom = Rc::new(WebDom::new().map_err(to_js_error)?);
        let scheduler = AnimationFrameScheduler::new(dom.window().clone());
        let document = dom.document().clone();
        let sink = JsCallbackSink::new(on_selection_change);

        let inner = Rc::new_cyclic(|weak: &Weak<RefCell<WebSync>>| {
            let weak = weak.clone();
            let host = WebEventHost::new(document, move || {
                let Some(sync) = weak.upgrade() else {
                    return;
                };
                dispatch_selection_change(&sync);
            });
            RefCell::new(SelectionSync::new(dom, scheduler, sink, host, config))
        });

        Ok(Self { inner })
    }

    /// Attach to the element matching the configured editor selector
    pub fn attach(&self) -> Result<(), JsValue> {
        self.sync_mut("attach")?.attach().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = attachTo)]
    pub fn attach_to(&self, root: &web_sys::Element) -> Result<(), JsValue> {
        self.sync_mut("attachTo")?
            .attach_to(root.clone().into())
            .map_err(to_js_error)
    }

    pub fn detach(&self) -> Result<(), JsValue> {
        self.sync_mut("detach")?.detach();
        Ok(())
    }

    #[wasm_bindgen(js_name = isAttached)]
    pub fn is_attached(&self) -> bool {
        self.inner.try_borrow().map_or(false, |sync| sync.is_attached())
    }

    /// `{ blockId, offset }`; applied on the next animation frame
    #[wasm_bindgen(js_name = restoreSelection)]
    pub fn restore_selection(&self, request: JsValue) -> Result<(), JsValue> {
        let request: RestoreRequest =
            deserialize(request, "Invalid selection restore request").map_err(to_js_error)?;
        self.sync_mut("restoreSelection")?
            .restore_selection(request)
            .map_err(to_js_error)
    }

    /// Read the current selection now, as a selectionchange would.
    /// Returns the emitted descriptor, or `null` when it was filtered out.
    #[wasm_bindgen(js_name = handleSelectionChange)]
    pub fn handle_selection_change(&self) -> Result<JsValue, JsValue> {
        match dispatch_selection_change(&self.inner) {
            Some(descriptor) => serialize(&descriptor, "Failed to serialize selection descriptor").map_err(to_js_error),
            None => Ok(JsValue::NULL),
        }
    }
}

impl SelectionSyncHandle {
    fn sync_mut(&self, operation: &str) -> Result<RefMut<'_, WebSync>, JsValue> {
        self.inner
            .try_borrow_mut()
            .map_err(|_| to_js_error(SyncError::Busy(operation.to_string())))
    }
}

/// Block id of the nearest block at or above `node`
#[wasm_bindgen(js_name = locateBlock)]
pub fn locate_block_for_node(node: &web_sys::Node, block_class: Option<String>) -> Result<Option<String>, JsValue> {
    let dom = WebDom::new().map_err(to_js_error)?;
    let block_class = block_class.unwrap_or_else(|| SyncConfig::default().block_class);
    Ok(locate_block(&dom, node, &block_class).map(|id| id.as_str().to_string()))
}
