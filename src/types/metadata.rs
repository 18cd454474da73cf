use std::fmt;

use serde::{Deserialize, Serialize};

use super::{TextStyle, ViewportSelection};

/// Default column width in pixels when neither metadata nor an override says otherwise.
pub const DEFAULT_CELL_WIDTH: f64 = 100.0;

/// Default row height in pixels when neither metadata nor an override says otherwise.
pub const DEFAULT_CELL_HEIGHT: f64 = 30.0;

/// Server-assigned spreadsheet id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpreadsheetId(pub u64);

impl fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

/// Spreadsheet-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpreadsheetMetadata {
    pub id: Option<SpreadsheetId>,
    pub name: String,
    pub default_width: f64,
    pub default_height: f64,
    pub show_grid_lines: bool,
    /// Show raw formula text instead of formatted values.
    pub show_formulas: bool,
    /// Render cells whose value is numerically zero as blank.
    pub hide_zero_values: bool,
    pub auto_hide_scrollbars: bool,
    pub show_formula_editor: bool,
    pub viewport: Option<ViewportSelection>,
    /// Default cell style, applied beneath every cell's own style.
    pub style: TextStyle,
}

impl Default for SpreadsheetMetadata {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            default_width: DEFAULT_CELL_WIDTH,
            default_height: DEFAULT_CELL_HEIGHT,
            show_grid_lines: true,
            show_formulas: false,
            hide_zero_values: false,
            auto_hide_scrollbars: false,
            show_formula_editor: true,
            viewport: None,
            style: TextStyle::default(),
        }
    }
}

impl SpreadsheetMetadata {
    /// Parse metadata from its JSON form.
    ///
    /// # Errors
    /// Returns [`crate::error::SheetviewError::Json`] on malformed input.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
