//! Selection Sync WASM Module
//!
//! Keeps the browser's native text selection and a block-based editor
//! model in step. Native selection changes inside the editor become
//! `SelectionDescriptor`s for the model; the model's restore requests
//! become a collapsed native range on the next animation frame.

pub mod api;
pub mod config;
pub mod dom;
pub mod error;
pub mod models;
pub mod sync;

// Re-export commonly used types
pub use config::SyncConfig;
pub use error::SyncError;
pub use models::*;
pub use sync::{SelectionSink, SelectionSync};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Selection sync WASM module initialized");
}
