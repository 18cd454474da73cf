//! Viewport configuration: header sizes, chrome allowances and styles.
//!
//! Every field has a default, so hosts only pass the values they change:
//!
//! ```json
//! { "rowHeaderWidth": 60, "styles": { "selectedCell": { "background-color": "#ddf" } } }
//! ```

use serde::{Deserialize, Serialize};

use crate::types::TextStyle;

/// Layout allowances subtracted from the viewport to size the cell grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewportConfig {
    /// Width of row headers in pixels
    pub row_header_width: f64,
    /// Height of column headers in pixels
    pub column_header_height: f64,
    /// Height of the formula bar when the formula editor is shown
    pub formula_bar_height: f64,
    /// Thickness of each scrollbar
    pub scrollbar_size: f64,
    pub styles: ViewportStyles,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            row_header_width: 80.0,
            column_header_height: 30.0,
            formula_bar_height: 40.0,
            scrollbar_size: 16.0,
            styles: ViewportStyles::default(),
        }
    }
}

impl ViewportConfig {
    /// Parse a (partial) config from JSON.
    ///
    /// # Errors
    /// Returns [`crate::error::SheetviewError::Json`] on malformed input.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Styles layered by the render tree. Selected variants are merged over
/// their plain counterparts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewportStyles {
    pub cell: TextStyle,
    pub selected_cell: TextStyle,
    pub column_header: TextStyle,
    pub selected_column_header: TextStyle,
    pub row_header: TextStyle,
    pub selected_row_header: TextStyle,
    /// Applied to cells whose value is zero while zero values are hidden.
    pub hide_zero: TextStyle,
    /// Applied to every cell while formulas are shown.
    pub show_formulas: TextStyle,
    pub formula: TextStyle,
}

impl Default for ViewportStyles {
    fn default() -> Self {
        let header = TextStyle::new()
            .set("background-color", "#F3F3F3")
            .set("color", "#595959")
            .set("border", "1px solid #CCCCCC")
            .set("text-align", "center");
        Self {
            cell: TextStyle::new()
                .set("box-sizing", "border-box")
                .set("border", "1px solid #E0E0E0")
                .set("overflow", "hidden")
                .set("white-space", "nowrap"),
            selected_cell: TextStyle::new().set("background-color", "#CFD8E8"),
            column_header: header.clone(),
            selected_column_header: TextStyle::new().set("background-color", "#CFD8E8"),
            row_header: header,
            selected_row_header: TextStyle::new().set("background-color", "#CFD8E8"),
            hide_zero: TextStyle::new().set("color", "transparent"),
            show_formulas: TextStyle::new()
                .set("font-family", "monospace")
                .set("text-align", "left"),
            formula: TextStyle::new().set("width", "100%"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ViewportConfig::from_json(r#"{"rowHeaderWidth": 60}"#).unwrap();
        assert_eq!(config.row_header_width, 60.0);
        assert_eq!(config.column_header_height, 30.0);
        assert_eq!(config.styles, ViewportStyles::default());
    }
}
