//! Selection Sync WASM API
//!
//! The JavaScript-facing surface. The editor model drives it through a
//! `SelectionSyncHandle`: descriptors go out through the callback passed to
//! the constructor, restore requests come in through `restoreSelection`.
//!
//! # Module Structure
//!
//! - `helpers`: conversion across the JS boundary and error reporting
//! - `handle`: the exported handle and its browser-side wiring

pub mod handle;
pub mod helpers;

pub use handle::{locate_block_for_node, JsCallbackSink, SelectionSyncHandle};
