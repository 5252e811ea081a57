//! Selection synchronization core
//!
//! Two decoupled paths between the native selection and the model:
//!
//! - read: selectionchange → `guard` → `reader` → descriptor to the model
//! - write: restore request → frame scheduler → `writer` → native selection
//!
//! `adapter` ties both paths to an explicit attach/detach lifecycle.

pub mod adapter;
pub mod guard;
pub mod keys;
pub mod locator;
pub mod reader;
pub mod writer;

pub use adapter::{dispatch_selection_change, Lifecycle, SelectionSink, SelectionSync};
pub use guard::is_descendant;
pub use keys::{KeyDisposition, KeyPolicy};
pub use locator::locate_block;
pub use reader::read_selection;
pub use writer::{apply_restore, RestoreOutcome};
