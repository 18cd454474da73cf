//! Viewport geometry: the home cell plus the pixel size of the grid.

use serde::{Deserialize, Serialize};

use super::NavigationContext;
use crate::types::{AnchoredSelection, CellRange, CellReference, ColumnReference, RowReference};

/// The visible area of the spreadsheet: the top-left cell and the pixel
/// size available for cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportRectangle {
    /// Top-left visible cell; this is the scroll position.
    pub home: CellReference,
    /// Grid width in pixels, headers excluded.
    pub width: f64,
    /// Grid height in pixels, headers excluded.
    pub height: f64,
}

impl ViewportRectangle {
    pub fn new(home: CellReference, width: f64, height: f64) -> Self {
        Self {
            home,
            width,
            height,
        }
    }

    /// Visible columns from home until the width is covered. Hidden columns
    /// are skipped; a partially visible last column is included.
    pub fn visible_columns(&self, ctx: &impl NavigationContext) -> Vec<ColumnReference> {
        let mut columns = Vec::new();
        let mut x = 0.0;
        let mut column = Some(self.home.column());
        while let Some(c) = column {
            if x >= self.width && !columns.is_empty() {
                break;
            }
            if !ctx.is_column_hidden(c) {
                columns.push(c);
                x += ctx.column_width(c);
            }
            column = c.next();
        }
        columns
    }

    /// Visible rows from home until the height is covered.
    pub fn visible_rows(&self, ctx: &impl NavigationContext) -> Vec<RowReference> {
        let mut rows = Vec::new();
        let mut y = 0.0;
        let mut row = Some(self.home.row());
        while let Some(r) = row {
            if y >= self.height && !rows.is_empty() {
                break;
            }
            if !ctx.is_row_hidden(r) {
                rows.push(r);
                y += ctx.row_height(r);
            }
            row = r.next();
        }
        rows
    }

    /// The cell range covered by the visible columns and rows.
    pub fn range(&self, ctx: &impl NavigationContext) -> CellRange {
        let columns = self.visible_columns(ctx);
        let rows = self.visible_rows(ctx);
        let begin = CellReference::new(
            columns.first().copied().unwrap_or(self.home.column()),
            rows.first().copied().unwrap_or(self.home.row()),
        );
        let end = CellReference::new(
            columns.last().copied().unwrap_or(self.home.column()),
            rows.last().copied().unwrap_or(self.home.row()),
        );
        CellRange::new(begin, end)
    }

    /// Whether the grid has room for at least one pixel in both directions.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

impl Default for ViewportRectangle {
    fn default() -> Self {
        Self::new(CellReference::home(), 0.0, 0.0)
    }
}

/// Home, size and selection: everything navigation reads and produces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub rectangle: ViewportRectangle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<AnchoredSelection>,
}

impl Viewport {
    pub fn new(rectangle: ViewportRectangle, selection: Option<AnchoredSelection>) -> Self {
        Self {
            rectangle,
            selection,
        }
    }

    #[must_use]
    pub fn with_home(self, home: CellReference) -> Self {
        Self {
            rectangle: ViewportRectangle { home, ..self.rectangle },
            ..self
        }
    }
}
