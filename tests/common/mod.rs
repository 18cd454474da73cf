//! Common test utilities: delta builders and recording service fakes.
//!
//! Fetchers never complete on their own; tests feed responses back through
//! the component's `on_*_loaded` methods, in whatever order they need.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

use std::cell::RefCell;
use std::rc::Rc;

use sheetview::config::ViewportConfig;
use sheetview::render::MemoryDom;
use sheetview::viewer::{
    CellsFetcher, CellsRequest, FormatterMenuFetcher, HistoryTokenSink, MetadataFetcher,
    ViewportComponent, ViewportServices,
};
use sheetview::{
    AnchoredSelection, Cell, CellReference, CellValue, Column, HistoryToken, LabelMapping,
    LabelName, Row, Selection, SheetviewError, SpreadsheetDelta, SpreadsheetId,
    SpreadsheetMetadata, TextNode,
};

// ============================================================================
// Delta Builders
// ============================================================================

/// An empty delta covering `window`, e.g. `"A1:B2"`.
#[must_use]
pub fn delta(window: &str) -> SpreadsheetDelta {
    SpreadsheetDelta {
        window: window.parse().expect("window"),
        ..SpreadsheetDelta::default()
    }
}

#[must_use]
pub fn cell_ref(text: &str) -> CellReference {
    text.parse().expect("cell reference")
}

#[must_use]
pub fn selection(text: &str) -> AnchoredSelection {
    AnchoredSelection::with_default_anchor(text.parse().expect("selection"))
}

/// A cell showing `formatted` for `formula`, with a numeric value when the
/// formatted text parses as one.
#[must_use]
pub fn cell(reference: &str, formula: &str, formatted: &str) -> Cell {
    let mut cell = Cell::new(cell_ref(reference), formula);
    cell.formula.value = formatted.parse::<f64>().ok().map(CellValue::Number);
    cell.formatted_value = Some(TextNode::text(formatted));
    cell
}

#[must_use]
pub fn hidden_column(letters: &str) -> Column {
    Column {
        reference: letters.parse().expect("column"),
        hidden: true,
    }
}

#[must_use]
pub fn hidden_row(row: &str) -> Row {
    Row {
        reference: row.parse().expect("row"),
        hidden: true,
    }
}

#[must_use]
pub fn label(name: &str, target: &str) -> LabelMapping {
    LabelMapping::new(
        LabelName::new(name).expect("label"),
        target.parse::<Selection>().expect("label target"),
    )
}

#[must_use]
pub fn metadata(id: u64) -> SpreadsheetMetadata {
    SpreadsheetMetadata {
        id: Some(SpreadsheetId(id)),
        name: format!("Sheet{id}"),
        ..SpreadsheetMetadata::default()
    }
}

// ============================================================================
// Recording Services
// ============================================================================

/// Everything the component asked its collaborators for.
#[derive(Debug, Default)]
pub struct ServiceLog {
    pub cells: Vec<CellsRequest>,
    pub metadata: Vec<SpreadsheetId>,
    pub menus: Vec<Selection>,
    pub tokens: Vec<HistoryToken>,
    /// Make the next fetches fail to send.
    pub fail_cells: bool,
    pub fail_metadata: bool,
}

#[derive(Clone)]
pub struct Recorder(pub Rc<RefCell<ServiceLog>>);

impl CellsFetcher for Recorder {
    fn load_cells(&self, request: CellsRequest) -> sheetview::Result<()> {
        let mut log = self.0.borrow_mut();
        if log.fail_cells {
            return Err(SheetviewError::Fetch("offline".to_string()));
        }
        log.cells.push(request);
        Ok(())
    }
}

impl MetadataFetcher for Recorder {
    fn load_metadata(&self, id: SpreadsheetId) -> sheetview::Result<()> {
        let mut log = self.0.borrow_mut();
        if log.fail_metadata {
            return Err(SheetviewError::Fetch("offline".to_string()));
        }
        log.metadata.push(id);
        Ok(())
    }
}

impl FormatterMenuFetcher for Recorder {
    fn load_formatter_menu(&self, selection: Selection) -> sheetview::Result<()> {
        self.0.borrow_mut().menus.push(selection);
        Ok(())
    }
}

impl HistoryTokenSink for Recorder {
    fn push_history_token(&self, token: HistoryToken) {
        self.0.borrow_mut().tokens.push(token);
    }
}

pub type TestComponent = ViewportComponent<MemoryDom>;

/// A fresh component over a [`MemoryDom`] plus the log of its requests.
#[must_use]
pub fn component() -> (TestComponent, Rc<RefCell<ServiceLog>>) {
    let log = Rc::new(RefCell::new(ServiceLog::default()));
    let recorder = Recorder(Rc::clone(&log));
    let services = ViewportServices {
        cells: Box::new(recorder.clone()),
        metadata: Box::new(recorder.clone()),
        formatter_menu: Box::new(recorder.clone()),
        history: Box::new(recorder),
    };
    (
        ViewportComponent::new(MemoryDom::new(), services, ViewportConfig::default()),
        log,
    )
}

/// Outer size giving a 400x300 grid with the default config: four default
/// columns by ten default rows.
pub const WIDTH: f64 = 496.0;
pub const HEIGHT: f64 = 386.0;

/// A component with metadata for spreadsheet 1 loaded and a size set, so
/// the first cells request (generation 1) is in flight.
#[must_use]
pub fn loaded_component() -> (TestComponent, Rc<RefCell<ServiceLog>>) {
    let (mut component, log) = component();
    component.on_metadata_loaded(Ok(metadata(1)));
    component.set_width_and_height(WIDTH, HEIGHT);
    assert_eq!(log.borrow().cells.len(), 1, "first load issued");
    (component, log)
}

/// [`loaded_component`] with `delta` delivered for the first request.
#[must_use]
pub fn component_with(delta: SpreadsheetDelta) -> (TestComponent, Rc<RefCell<ServiceLog>>) {
    let (mut component, log) = loaded_component();
    component.on_cells_loaded(component.generation(), Ok(delta));
    (component, log)
}

/// Token for spreadsheet 1 selecting `text`.
#[must_use]
pub fn token(component: &TestComponent, text: &str) -> HistoryToken {
    component
        .history_token()
        .with_selection(Some(selection(text)))
}
