use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{
    AnchoredSelection, Cell, CellReference, Column, ColumnReference, LabelName, Row,
    RowReference, Selection, Window,
};

/// A label and the selection it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelMapping {
    pub label: LabelName,
    pub reference: Selection,
}

impl LabelMapping {
    pub fn new(label: LabelName, reference: Selection) -> Self {
        Self { label, reference }
    }
}

/// Scroll position (home) plus the selection the server settled on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportSelection {
    pub home: CellReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<AnchoredSelection>,
}

/// Partial server update: additions, removals and the window they apply to.
///
/// Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpreadsheetDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<ViewportSelection>,
    pub cells: Vec<Cell>,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub labels: Vec<LabelMapping>,
    pub deleted_cells: BTreeSet<CellReference>,
    pub deleted_columns: BTreeSet<ColumnReference>,
    pub deleted_rows: BTreeSet<RowReference>,
    pub deleted_labels: BTreeSet<LabelName>,
    pub column_widths: BTreeMap<ColumnReference, f64>,
    pub row_heights: BTreeMap<RowReference, f64>,
    pub window: Window,
    /// Highest populated column count, used to size the horizontal scrollbar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u32>,
}

impl SpreadsheetDelta {
    /// Parse a delta from its JSON form.
    ///
    /// # Errors
    /// Returns [`crate::error::SheetviewError::Json`] on malformed input.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
