//! DOM backend trait for pluggable output targets.
//!
//! Components never touch the DOM directly. They compute a view, diff it
//! against what they last wrote, and send only the changes through
//! [`DomBackend`]. The browser implementation lives in `render::web`; the
//! recording implementation in `render::memory` backs tests and the CLI.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{ColumnReference, RowReference};

/// One entry of the formatter context menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenuItem {
    /// Text shown to the user
    pub label: String,
    /// Format pattern applied when the entry is chosen
    pub pattern: String,
}

impl ContextMenuItem {
    pub fn new(label: &str, pattern: &str) -> Self {
        Self {
            label: label.to_string(),
            pattern: pattern.to_string(),
        }
    }
}

/// Element-level operations issued by the render tree.
///
/// Elements are addressed by the ids built in [`super::ids`].
pub trait DomBackend {
    /// Recreate the table skeleton: the select-all corner, one header per
    /// column, and one row header plus one cell per column for every row.
    /// Every table element written before is discarded.
    fn rebuild_table(&mut self, columns: &[ColumnReference], rows: &[RowReference])
        -> Result<()>;

    /// Replace the inline style.
    fn set_style(&mut self, id: &str, css: &str) -> Result<()>;

    /// Replace the content with plain text (or the value of an input).
    fn set_text(&mut self, id: &str, text: &str) -> Result<()>;

    /// Replace the content with a chooser offering `choices`.
    fn set_chooser(&mut self, id: &str, choices: &[String], selected: &str) -> Result<()>;

    /// Attach a tooltip, or detach it with `None`.
    fn set_tooltip(&mut self, id: &str, tooltip: Option<&str>) -> Result<()>;

    /// Point the element's link at `href`.
    fn set_link(&mut self, id: &str, href: &str) -> Result<()>;

    fn set_disabled(&mut self, id: &str, disabled: bool) -> Result<()>;

    /// Position and size a scrollbar.
    fn set_scrollbar(&mut self, id: &str, value: f64, max: f64, visible: bool) -> Result<()>;

    fn focus(&mut self, id: &str) -> Result<()>;

    /// Show the context menu next to the element `anchor_id`.
    fn show_context_menu(&mut self, anchor_id: &str, items: &[ContextMenuItem]) -> Result<()>;

    fn hide_context_menu(&mut self) -> Result<()>;
}
