//! Error types for the selection adapter
//!
//! Stale restore targets and unresolvable endpoints are not errors; they
//! are handled in-band. What remains is setup failure and platform failure.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// No element matched the editor selector at attach time
    #[error("Editor root not found for selector '{selector}'")]
    EditorRootNotFound { selector: String },

    /// A DOM call threw (range construction, selection update, listeners)
    #[error("Platform error: {0}")]
    Platform(String),

    /// The adapter was already borrowed by an outer call on the same stack
    #[error("Selection sync is busy: {0}")]
    Busy(String),

    /// A value could not cross the JS boundary
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SyncError {
    pub fn platform(context: &str, err: impl std::fmt::Debug) -> Self {
        Self::Platform(format!("{}: {:?}", context, err))
    }
}

impl From<SyncError> for JsValue {
    fn from(err: SyncError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
