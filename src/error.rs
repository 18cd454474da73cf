//! Structured error types for sheetview.
//!
//! Absent data (no cell, no label mapping, no size override) is never an
//! error; these variants cover malformed input and failed required lookups.

/// All errors that can occur while caching, navigating and rendering a viewport.
#[derive(Debug, thiserror::Error)]
pub enum SheetviewError {
    /// Invalid cell, column or row reference text.
    #[error("Invalid reference: {0}")]
    Reference(String),

    /// Invalid selection text or an unsupported selection for an operation.
    #[error("Invalid selection: {0}")]
    Selection(String),

    /// A required resolution failed, e.g. a label that must map to cells.
    #[error("Illegal argument: {0}")]
    Argument(String),

    /// Malformed history token.
    #[error("Invalid history token: {0}")]
    HistoryToken(String),

    /// A fetch could not be issued or completed.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// JSON (de)serialization of a delta, metadata or config payload.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// DOM backend failure.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Invalid find dialog field.
    #[error("Find: {0}")]
    Find(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SheetviewError>;

impl From<String> for SheetviewError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for SheetviewError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<SheetviewError> for wasm_bindgen::JsValue {
    fn from(e: SheetviewError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SheetviewError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
