//! sheetview - spreadsheet viewport client for the web
//!
//! The client-side layer of a browser spreadsheet, compiled to WebAssembly:
//! - A windowed cache of cells, columns, rows, sizes and labels fed by
//!   partial server deltas
//! - Pure keyboard/mouse navigation with anchored, hidden-aware extension
//! - An incremental DOM table that only rebuilds when the visible columns
//!   or rows change
//! - Request coalescing and stale response dropping for viewport loads
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { WebViewport } from 'sheetview';
//! await init();
//! const viewport = new WebViewport(container, callbacks, config);
//! viewport.onHistoryToken(location.hash);
//! viewport.setWidthAndHeight(width, height);
//! ```

// Model
pub mod cache;
pub mod cell_ref;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod types;

// Navigation and rendering
pub mod find;
pub mod layout;
pub mod render;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use cache::ViewportCache;
pub use config::ViewportConfig;
pub use error::{Result, SheetviewError};
pub use history::{HistoryToken, TokenAction};
pub use viewer::ViewportComponent;

#[cfg(target_arch = "wasm32")]
pub use viewer::WebViewport;

pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
