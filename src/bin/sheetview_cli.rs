//! CLI tool for sheetview - renders a delta into a text grid
//!
//! Usage:
//!   sheetview_cli <delta.json>                          # Render with default metadata
//!   sheetview_cli <delta.json> <metadata.json>          # Render with spreadsheet settings
//!   sheetview_cli <delta.json> --selection B2:C3        # Highlight a selection
//!   sheetview_cli <delta.json> --size 800x400           # Viewport size in pixels

#![allow(clippy::exit)]

use std::env;
use std::fs;
use std::process;

use sheetview::config::ViewportConfig;
use sheetview::render::{ids, MemoryDom};
use sheetview::viewer::{
    CellsFetcher, CellsRequest, FormatterMenuFetcher, HistoryTokenSink, MetadataFetcher,
    ViewportComponent, ViewportServices,
};
use sheetview::{
    AnchoredSelection, HistoryToken, Selection, SpreadsheetDelta, SpreadsheetId,
    SpreadsheetMetadata,
};

/// Services for a component fed directly from files.
struct Offline;

impl CellsFetcher for Offline {
    fn load_cells(&self, request: CellsRequest) -> sheetview::Result<()> {
        log::debug!("offline: cells request {}", request.generation);
        Ok(())
    }
}

impl MetadataFetcher for Offline {
    fn load_metadata(&self, _id: SpreadsheetId) -> sheetview::Result<()> {
        Ok(())
    }
}

impl FormatterMenuFetcher for Offline {
    fn load_formatter_menu(&self, _selection: Selection) -> sheetview::Result<()> {
        Ok(())
    }
}

impl HistoryTokenSink for Offline {
    fn push_history_token(&self, _token: HistoryToken) {}
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    process::exit(1);
}

fn read(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| fail(&format!("Error reading {path}: {e}")))
}

fn parse_size(text: &str) -> Option<(f64, f64)> {
    let (width, height) = text.split_once('x')?;
    Some((width.parse().ok()?, height.parse().ok()?))
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        fail("Usage: sheetview_cli <delta.json> [metadata.json] [--selection A1] [--size WxH]");
    }
    if sheetview::logging::init(log::LevelFilter::Warn).is_err() {
        eprintln!("logger already installed");
    }

    let mut files = Vec::new();
    let mut selection = None;
    let mut size = (800.0, 400.0);
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--selection" => {
                let text = iter
                    .next()
                    .unwrap_or_else(|| fail("--selection needs a value"));
                let parsed: Selection = text
                    .parse()
                    .unwrap_or_else(|e| fail(&format!("Bad selection {text}: {e}")));
                selection = Some(AnchoredSelection::with_default_anchor(parsed));
            }
            "--size" => {
                let text = iter.next().unwrap_or_else(|| fail("--size needs a value"));
                size = parse_size(text).unwrap_or_else(|| fail(&format!("Bad size {text}")));
            }
            path => files.push(path.to_string()),
        }
    }

    let Some(delta_path) = files.first() else {
        fail("Missing delta.json");
    };
    let delta = SpreadsheetDelta::from_json(&read(delta_path))
        .unwrap_or_else(|e| fail(&format!("Error parsing {delta_path}: {e}")));
    let metadata = match files.get(1) {
        Some(path) => SpreadsheetMetadata::from_json(&read(path))
            .unwrap_or_else(|e| fail(&format!("Error parsing {path}: {e}"))),
        None => SpreadsheetMetadata::default(),
    };

    let services = ViewportServices {
        cells: Box::new(Offline),
        metadata: Box::new(Offline),
        formatter_menu: Box::new(Offline),
        history: Box::new(Offline),
    };
    let mut component =
        ViewportComponent::new(MemoryDom::new(), services, ViewportConfig::default());
    component.on_metadata_loaded(Ok(metadata));
    component.set_width_and_height(size.0, size.1);
    if selection.is_some() {
        let token = component.history_token().with_selection(selection);
        component.on_history_token(token);
    }
    let generation = component.generation();
    component.on_cells_loaded(generation, Ok(delta));

    print!("{}", component.dom().render_text());
    if let Some(formula) = component
        .dom()
        .element(ids::FORMULA_ID)
        .filter(|formula| !formula.disabled)
    {
        println!("formula: {}", formula.text);
    }
    match serde_json::to_string(component.selection_summary()) {
        Ok(summary) => println!("summary: {summary}"),
        Err(e) => fail(&format!("Error serializing summary: {e}")),
    }
}
