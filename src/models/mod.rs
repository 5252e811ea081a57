//! Models module for the selection adapter
//!
//! Plain data exchanged with the editor model. Nothing here touches the DOM.

pub mod selection;

pub use selection::{BlockId, RestoreRequest, SelectionDescriptor};
