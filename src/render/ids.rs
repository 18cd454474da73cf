//! Deterministic element ids: `viewport-<kind>-<REFERENCE>`.
//!
//! Other widgets locate and focus viewport elements through these, so the
//! format is part of the public surface.

use crate::types::{AnchoredSelection, CellReference, ColumnReference, RowReference, Selection};

pub const PREFIX: &str = "viewport";
pub const SELECT_ALL_ID: &str = "viewport-select-all-cells";
pub const FORMULA_ID: &str = "viewport-formula";
pub const HORIZONTAL_SCROLLBAR_ID: &str = "viewport-horizontal-scrollbar";
pub const VERTICAL_SCROLLBAR_ID: &str = "viewport-vertical-scrollbar";
pub const CONTEXT_MENU_ID: &str = "viewport-context-menu";

pub fn cell_id(cell: CellReference) -> String {
    format!("{PREFIX}-cell-{cell}")
}

pub fn column_id(column: ColumnReference) -> String {
    format!("{PREFIX}-column-{column}")
}

pub fn row_id(row: RowReference) -> String {
    format!("{PREFIX}-row-{row}")
}

/// Id of the link inside a header element.
pub fn link_id(id: &str) -> String {
    format!("{id}-link")
}

/// Whether `id` names an element created by [`super::DomBackend::rebuild_table`].
pub fn is_table_id(id: &str) -> bool {
    id == SELECT_ALL_ID
        || ["cell-", "column-", "row-"]
            .iter()
            .any(|kind| id.strip_prefix("viewport-").is_some_and(|rest| rest.starts_with(kind)))
}

/// The element that receives focus for `selection`: the cell, column or row
/// at the end opposite the anchor. Labels have no element of their own and
/// must be resolved first.
pub fn selection_id(selection: &AnchoredSelection) -> Option<String> {
    let anchor = selection.anchor;
    match &selection.selection {
        Selection::Cell(cell) => Some(cell_id(*cell)),
        Selection::CellRange(range) => {
            let column = if anchor.is_left() {
                range.end().column()
            } else {
                range.begin().column()
            };
            let row = if anchor.is_top() {
                range.end().row()
            } else {
                range.begin().row()
            };
            Some(cell_id(CellReference::new(column, row)))
        }
        Selection::Column(column) => Some(column_id(*column)),
        Selection::ColumnRange(range) => Some(column_id(if anchor.is_left() {
            range.end()
        } else {
            range.begin()
        })),
        Selection::Row(row) => Some(row_id(*row)),
        Selection::RowRange(range) => Some(row_id(if anchor.is_top() {
            range.end()
        } else {
            range.begin()
        })),
        Selection::Label(_) => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Anchor;

    #[test]
    fn test_ids() {
        assert_eq!(cell_id(CellReference::at(0, 0)), "viewport-cell-A1");
        assert_eq!(column_id(ColumnReference::new(1)), "viewport-column-B");
        assert_eq!(row_id(RowReference::new(2)), "viewport-row-3");
        assert!(is_table_id("viewport-cell-A1"));
        assert!(is_table_id(SELECT_ALL_ID));
        assert!(!is_table_id(FORMULA_ID));
    }

    #[test]
    fn test_selection_id_uses_moving_end() {
        let range: Selection = "B2:C3".parse().unwrap();
        let top_left = AnchoredSelection::new(range.clone(), Anchor::TopLeft);
        let bottom_right = AnchoredSelection::new(range, Anchor::BottomRight);
        assert_eq!(selection_id(&top_left).unwrap(), "viewport-cell-C3");
        assert_eq!(selection_id(&bottom_right).unwrap(), "viewport-cell-B2");
    }
}
