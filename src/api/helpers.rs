//! Shared helpers for the JS-facing API
//!
//! Conversion of values across the wasm-bindgen boundary, with the
//! failure logged before it is handed back to JavaScript.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::SyncError;

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, SyncError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        SyncError::Serialization(msg)
    })
}

/// Like `deserialize`, but `undefined`/`null` yield the type's default
pub fn deserialize_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    error_context: &str,
) -> Result<T, SyncError> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    deserialize(value, error_context)
}

/// Serialize a value to a plain JS object. `None` becomes `null`, not
/// `undefined`, so absent keys survive JSON round trips on the model side.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, SyncError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| {
            let msg = format!("{}: {}", error_context, e);
            log::error!("{}", msg);
            SyncError::Serialization(msg)
        })
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Log a sync error and convert it for JavaScript
pub fn to_js_error(err: SyncError) -> JsValue {
    log::error!("{}", err);
    err.into()
}
