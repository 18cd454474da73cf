//! Client-side snapshot of the windowed part of a spreadsheet.
//!
//! The cache is the single store shared by the viewport, formula bar and
//! table components. It is only mutated through [`ViewportCache::on_spreadsheet_delta`],
//! [`ViewportCache::on_spreadsheet_metadata`] and [`ViewportCache::clear`];
//! every read is a pure lookup with a documented fallback.

use std::collections::{BTreeSet, HashMap};

use crate::error::{Result, SheetviewError};
use crate::types::{
    Cell, CellReference, Column, ColumnReference, LabelName, Row, RowReference, Selection,
    SelectionSummary, SpreadsheetDelta, SpreadsheetMetadata, Window, DEFAULT_CELL_HEIGHT,
    DEFAULT_CELL_WIDTH,
};

/// Sparse cells, columns, rows, sizes and label indexes for the current window.
#[derive(Debug, Clone)]
pub struct ViewportCache {
    cells: HashMap<CellReference, Cell>,
    columns: HashMap<ColumnReference, Column>,
    rows: HashMap<RowReference, Row>,
    column_widths: HashMap<ColumnReference, f64>,
    row_heights: HashMap<RowReference, f64>,
    /// cell -> labels naming it (directly or through a range)
    cell_to_labels: HashMap<CellReference, BTreeSet<LabelName>>,
    /// label -> resolved non-label selection
    label_to_selection: HashMap<LabelName, Selection>,
    window: Window,
    column_count: Option<u32>,
    row_count: Option<u32>,
    default_width: f64,
    default_height: f64,
}

impl Default for ViewportCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportCache {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
            columns: HashMap::new(),
            rows: HashMap::new(),
            column_widths: HashMap::new(),
            row_heights: HashMap::new(),
            cell_to_labels: HashMap::new(),
            label_to_selection: HashMap::new(),
            window: Window::default(),
            column_count: None,
            row_count: None,
            default_width: DEFAULT_CELL_WIDTH,
            default_height: DEFAULT_CELL_HEIGHT,
        }
    }

    /// Apply a partial update from the server.
    ///
    /// Order matters: window invalidation, then deletes, then upserts, then
    /// label indexing. A reference both deleted and upserted by the same
    /// delta therefore ends up present.
    pub fn on_spreadsheet_delta(&mut self, delta: &SpreadsheetDelta) {
        if !delta.window.is_empty() && delta.window != self.window {
            log::debug!("viewport cache: window {} -> {}", self.window, delta.window);
            self.clear_entries();
            self.window = delta.window.clone();
        }

        for cell in &delta.deleted_cells {
            self.cells.remove(cell);
            self.cell_to_labels.remove(cell);
        }
        for column in &delta.deleted_columns {
            self.columns.remove(column);
            self.column_widths.remove(column);
        }
        for row in &delta.deleted_rows {
            self.rows.remove(row);
            self.row_heights.remove(row);
        }
        for label in &delta.deleted_labels {
            self.remove_label(label);
        }

        for cell in &delta.cells {
            self.cell_to_labels.remove(&cell.reference);
            self.cells.insert(cell.reference, cell.clone());
        }
        for column in &delta.columns {
            self.columns.insert(column.reference, column.clone());
        }
        for row in &delta.rows {
            self.rows.insert(row.reference, row.clone());
        }
        self.column_widths
            .extend(delta.column_widths.iter().map(|(c, w)| (*c, *w)));
        self.row_heights
            .extend(delta.row_heights.iter().map(|(r, h)| (*r, *h)));

        for mapping in &delta.labels {
            self.index_label(&mapping.label, &mapping.reference);
        }

        if let Some(count) = delta.column_count {
            self.column_count = Some(count);
        }
        if let Some(count) = delta.row_count {
            self.row_count = Some(count);
        }

        log::debug!(
            "viewport cache: applied delta cells={} deleted={} labels={} window={}",
            delta.cells.len(),
            delta.deleted_cells.len(),
            delta.labels.len(),
            self.window
        );
    }

    /// Capture the default cell size used when no override exists.
    pub fn on_spreadsheet_metadata(&mut self, metadata: &SpreadsheetMetadata) {
        self.default_width = metadata.default_width;
        self.default_height = metadata.default_height;
    }

    /// Reset every entry, index, watermark and the window. Default sizes survive.
    pub fn clear(&mut self) {
        self.clear_entries();
        self.window = Window::default();
        self.column_count = None;
        self.row_count = None;
    }

    fn clear_entries(&mut self) {
        self.cells.clear();
        self.columns.clear();
        self.rows.clear();
        self.column_widths.clear();
        self.row_heights.clear();
        self.cell_to_labels.clear();
        self.label_to_selection.clear();
    }

    fn remove_label(&mut self, label: &LabelName) {
        self.label_to_selection.remove(label);
        self.cell_to_labels.retain(|_, labels| {
            labels.remove(label);
            !labels.is_empty()
        });
    }

    /// Replace whatever `label` named before with `target`.
    fn index_label(&mut self, label: &LabelName, target: &Selection) {
        self.remove_label(label);
        // Labels naming other labels are not chased.
        if target.is_label() {
            log::debug!("viewport cache: skipping label chain {label} -> {target}");
            return;
        }
        if !self.window.intersects(target) {
            return;
        }
        self.label_to_selection.insert(label.clone(), target.clone());
        if let Some(range) = target.to_cell_range() {
            for cell in self.window.cells_of(range) {
                self.cell_to_labels
                    .entry(cell)
                    .or_default()
                    .insert(label.clone());
            }
        }
    }

    pub fn cell(&self, reference: CellReference) -> Option<&Cell> {
        self.cells.get(&reference)
    }

    pub fn column(&self, reference: ColumnReference) -> Option<&Column> {
        self.columns.get(&reference)
    }

    pub fn row(&self, reference: RowReference) -> Option<&Row> {
        self.rows.get(&reference)
    }

    /// Width of `column`, falling back to the metadata default.
    pub fn column_width(&self, column: ColumnReference) -> f64 {
        self.column_widths
            .get(&column)
            .copied()
            .unwrap_or(self.default_width)
    }

    /// Height of `row`, falling back to the metadata default.
    pub fn row_height(&self, row: RowReference) -> f64 {
        self.row_heights
            .get(&row)
            .copied()
            .unwrap_or(self.default_height)
    }

    pub fn default_width(&self) -> f64 {
        self.default_width
    }

    pub fn default_height(&self) -> f64 {
        self.default_height
    }

    /// Unknown columns are visible.
    pub fn is_column_hidden(&self, column: ColumnReference) -> bool {
        self.columns.get(&column).is_some_and(|c| c.hidden)
    }

    /// Unknown rows are visible.
    pub fn is_row_hidden(&self, row: RowReference) -> bool {
        self.rows.get(&row).is_some_and(|r| r.hidden)
    }

    /// Labels naming `cell`; empty when none are known.
    ///
    /// Cells without an index entry (upserted since indexing, or never
    /// expanded because there was no window) are answered from the label
    /// targets.
    pub fn labels(&self, cell: CellReference) -> BTreeSet<LabelName> {
        if let Some(labels) = self.cell_to_labels.get(&cell) {
            return labels.clone();
        }
        if !self.window.contains(cell) {
            return BTreeSet::new();
        }
        self.label_to_selection
            .iter()
            .filter(|(_, target)| target.to_cell_range().is_some_and(|r| r.contains(cell)))
            .map(|(label, _)| label.clone())
            .collect()
    }

    /// Identity for non-label selections; one hop through the label index
    /// for labels. `None` when the label is unknown or outside the window.
    pub fn non_label_selection(&self, selection: &Selection) -> Option<Selection> {
        match selection {
            Selection::Label(label) => self.label_to_selection.get(label).cloned(),
            other => Some(other.clone()),
        }
    }

    /// Like [`Self::non_label_selection`] for callers that cannot continue
    /// without a resolution.
    ///
    /// # Errors
    /// Returns [`SheetviewError::Argument`] when the label is unresolved.
    pub fn require_non_label_selection(&self, selection: &Selection) -> Result<Selection> {
        self.non_label_selection(selection).ok_or_else(|| {
            SheetviewError::Argument(format!("Unable to resolve label {selection}"))
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Highest populated column count seen so far.
    pub fn column_count(&self) -> Option<u32> {
        self.column_count
    }

    /// Highest populated row count seen so far.
    pub fn row_count(&self) -> Option<u32> {
        self.row_count
    }

    /// Cached cells covered by `selection` (labels resolved first), row-major.
    pub fn cells_in(&self, selection: &Selection) -> Vec<&Cell> {
        let Some(selection) = self.non_label_selection(selection) else {
            return Vec::new();
        };
        let mut cells: Vec<&Cell> = self
            .cells
            .values()
            .filter(|cell| selection.test_cell(cell.reference))
            .collect();
        cells.sort_by_key(|cell| cell.reference);
        cells
    }

    /// Common formatter, parser and style of the selected cells.
    pub fn selection_summary(&self, selection: &Selection) -> SelectionSummary {
        SelectionSummary::from_cells(self.cells_in(selection))
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn label_count(&self) -> usize {
        self.label_to_selection.len()
    }
}
