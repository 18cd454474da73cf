//! ViewportComponent orchestration tests
//!
//! Fetchers are recording fakes: each test decides when (and whether) a
//! response arrives, which makes request coalescing, stale response
//! dropping and failure recovery observable.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{
    cell, cell_ref, component, component_with, delta, label, loaded_component, metadata,
    selection, token, HEIGHT, WIDTH,
};
use sheetview::layout::Navigation;
use sheetview::render::{ids, ContextMenuItem};
use sheetview::viewer::ScrollbarAxis;
use sheetview::{
    HistoryToken, Selection, SheetviewError, SpreadsheetDelta, SpreadsheetId,
    SpreadsheetMetadata, TokenAction, ViewportSelection,
};

fn sample() -> SpreadsheetDelta {
    let mut d = delta("A1:D10");
    d.cells.push(cell("A1", "=1+1", "2"));
    d.cells.push(cell("B2", "=A1*2", "4"));
    d
}

// =============================================================================
// LOADING
// =============================================================================

#[test]
fn test_no_load_before_metadata() {
    let (mut component, log) = component();
    component.set_width_and_height(WIDTH, HEIGHT);
    assert!(log.borrow().cells.is_empty());
    assert_eq!(component.dom().rebuild_count(), 0);

    component.on_metadata_loaded(Ok(metadata(1)));
    assert_eq!(log.borrow().cells.len(), 1);
}

#[test]
fn test_no_load_without_area() {
    let (mut component, log) = component();
    component.on_metadata_loaded(Ok(metadata(1)));
    assert!(log.borrow().cells.is_empty());
    assert!(component.is_reload());
}

#[test]
fn test_first_request_describes_viewport() {
    let (component, log) = loaded_component();
    let log = log.borrow();
    let request = &log.cells[0];
    assert_eq!(request.generation, 1);
    assert_eq!(request.spreadsheet_id, SpreadsheetId(1));
    assert_eq!(request.rectangle.width, 400.0);
    assert_eq!(request.rectangle.height, 300.0);
    assert!(request.navigations.is_empty());
    assert_eq!(component.waiting_count(), 1);
    assert!(!component.is_reload());
}

#[test]
fn test_metadata_pushes_spreadsheet_token() {
    let (component, log) = loaded_component();
    assert_eq!(component.history_token().to_string(), "/1/Sheet1");
    assert_eq!(log.borrow().tokens.len(), 1);
}

#[test]
fn test_hidden_formula_editor_grows_grid() {
    let (mut component, _log) = component();
    component.on_metadata_loaded(Ok(SpreadsheetMetadata {
        show_formula_editor: false,
        ..metadata(1)
    }));
    component.set_width_and_height(WIDTH, HEIGHT);
    assert_eq!(component.rectangle().height, 340.0);
}

#[test]
fn test_bursts_coalesce_into_one_request() {
    let (mut component, log) = loaded_component();

    component.on_navigation(Navigation::Down);
    component.on_navigation(Navigation::Right);
    component.set_width_and_height(WIDTH + 100.0, HEIGHT);
    assert_eq!(log.borrow().cells.len(), 1, "nothing sent while waiting");
    assert_eq!(component.pending_navigations().len(), 2);

    component.on_cells_loaded(1, Ok(sample()));

    let log = log.borrow();
    assert_eq!(log.cells.len(), 2);
    let request = &log.cells[1];
    assert_eq!(request.generation, 2);
    assert_eq!(request.navigations, [Navigation::Down, Navigation::Right]);
    // the server replays the navigations from where they started
    assert_eq!(request.selection, None);
    assert_eq!(request.rectangle.home, cell_ref("A1"));
    assert_eq!(request.rectangle.width, 500.0);
    assert!(component.pending_navigations().is_empty());
}

#[test]
fn test_navigation_applied_before_response() {
    let (mut component, _log) = component_with(sample());
    component.on_history_token(token(&component, "B2"));

    component.on_navigation(Navigation::Right);

    assert_eq!(
        component.history_token().selection,
        Some(selection("C2"))
    );
    assert!(component
        .table()
        .cell(cell_ref("C2"))
        .unwrap()
        .state()
        .is_selected());
}

#[test]
fn test_delta_applied_and_rendered() {
    let (component, _log) = component_with(sample());
    let cache = component.spreadsheet_viewport_cache();
    assert_eq!(cache.cell(cell_ref("A1")).unwrap().formula.text, "=1+1");
    assert_eq!(component.waiting_count(), 0);
    assert_eq!(component.dom().element("viewport-cell-B2").unwrap().text, "4");
    assert_eq!(component.dom().rebuild_count(), 1);
}

// =============================================================================
// STALE AND FAILED RESPONSES
// =============================================================================

#[test]
fn test_stale_generation_dropped() {
    let (mut component, _log) = loaded_component();

    component.on_cells_loaded(0, Ok(sample()));

    assert!(component.spreadsheet_viewport_cache().cell(cell_ref("A1")).is_none());
    assert_eq!(component.waiting_count(), 1);
}

#[test]
fn test_response_for_previous_spreadsheet_dropped() {
    let (mut component, log) = loaded_component();

    component.on_metadata_loaded(Ok(metadata(2)));
    assert_eq!(log.borrow().cells.len(), 2);
    assert_eq!(log.borrow().cells[1].spreadsheet_id, SpreadsheetId(2));
    assert_eq!(component.history_token().to_string(), "/2/Sheet2");

    // the response to the spreadsheet 1 request arrives late
    component.on_cells_loaded(1, Ok(sample()));
    assert_eq!(component.spreadsheet_viewport_cache().cell_count(), 0);
    assert_eq!(component.waiting_count(), 1);

    let current = component.generation();
    component.on_cells_loaded(current, Ok(sample()));
    assert_eq!(component.spreadsheet_viewport_cache().cell_count(), 2);
}

#[test]
fn test_failed_load_sets_reload_without_retrying() {
    let (mut component, log) = loaded_component();

    component.on_cells_loaded(1, Err(SheetviewError::Fetch("503".to_string())));

    assert!(component.is_reload());
    assert_eq!(component.waiting_count(), 0);
    assert_eq!(log.borrow().cells.len(), 1);

    // the next event retries
    component.set_width_and_height(WIDTH, HEIGHT);
    assert_eq!(log.borrow().cells.len(), 2);
}

#[test]
fn test_unsent_request_keeps_reload() {
    let (mut component, log) = component();
    log.borrow_mut().fail_cells = true;
    component.on_metadata_loaded(Ok(metadata(1)));
    component.set_width_and_height(WIDTH, HEIGHT);

    assert!(component.is_reload());
    assert_eq!(component.waiting_count(), 0);
    assert_eq!(component.generation(), 0);

    log.borrow_mut().fail_cells = false;
    component.load_viewport_cells();
    assert_eq!(log.borrow().cells.len(), 1);
    assert_eq!(log.borrow().cells[0].generation, 1);
}

#[test]
fn test_failed_metadata_sets_reload() {
    let (mut component, log) = component();
    component.on_metadata_loaded(Err(SheetviewError::Fetch("timeout".to_string())));
    assert!(component.is_reload());
    assert!(component.metadata().is_none());

    component.set_width_and_height(WIDTH, HEIGHT);
    assert!(log.borrow().cells.is_empty());
}

// =============================================================================
// SERVER VIEWPORT
// =============================================================================

#[test]
fn test_moved_home_reloads_metadata() {
    let mut d = sample();
    d.viewport = Some(ViewportSelection {
        home: cell_ref("C5"),
        selection: None,
    });
    let (component, log) = component_with(d);

    assert_eq!(component.rectangle().home, cell_ref("C5"));
    assert_eq!(log.borrow().metadata, [SpreadsheetId(1)]);
    assert_eq!(component.table().columns().first().unwrap().to_string(), "C");
}

#[test]
fn test_same_home_keeps_metadata() {
    let mut d = sample();
    d.viewport = Some(ViewportSelection {
        home: cell_ref("A1"),
        selection: None,
    });
    let (_component, log) = component_with(d);
    assert!(log.borrow().metadata.is_empty());
}

#[test]
fn test_server_selection_adopted() {
    let mut d = sample();
    d.viewport = Some(ViewportSelection {
        home: cell_ref("A1"),
        selection: Some(selection("B2")),
    });
    let (component, log) = component_with(d);

    assert_eq!(component.history_token().selection, Some(selection("B2")));
    assert_eq!(
        log.borrow().tokens.last().unwrap().to_string(),
        "/1/Sheet1/cell/B2"
    );
    assert_eq!(component.dom().focused(), Some("viewport-cell-B2"));
}

#[test]
fn test_pending_navigation_survives_older_response() {
    let (mut component, log) = loaded_component();
    component.on_history_token(token(&component, "B2"));
    component.on_navigation(Navigation::Right);
    assert_eq!(component.history_token().selection, Some(selection("C2")));

    // the response to the request sent before the move still names B2
    let mut d = sample();
    d.viewport = Some(ViewportSelection {
        home: cell_ref("C5"),
        selection: Some(selection("B2")),
    });
    component.on_cells_loaded(1, Ok(d));

    assert_eq!(component.history_token().selection, Some(selection("C2")));
    assert_eq!(component.rectangle().home, cell_ref("A1"));
    assert_eq!(component.dom().focused(), Some("viewport-cell-C2"));
    assert!(log.borrow().metadata.is_empty());

    let log = log.borrow();
    assert_eq!(log.cells.len(), 2);
    assert_eq!(log.cells[1].navigations, [Navigation::Right]);
    assert_eq!(log.cells[1].selection, Some(selection("B2")));
}

// =============================================================================
// HISTORY TOKENS, FOCUS AND MENUS
// =============================================================================

#[test]
fn test_new_spreadsheet_token_loads_metadata() {
    let (mut component, log) = component();
    component.on_history_token("/1f/Budget".parse().unwrap());
    assert_eq!(log.borrow().metadata, [SpreadsheetId(0x1f)]);
}

#[test]
fn test_metadata_for_previous_spreadsheet_dropped() {
    let (mut component, log) = component_with(sample());
    component.on_history_token("/2/Budget".parse().unwrap());
    assert_eq!(log.borrow().metadata, [SpreadsheetId(2)]);

    // a late answer for spreadsheet 1
    component.on_metadata_loaded(Ok(metadata(1)));
    assert_eq!(component.history_token().to_string(), "/2/Budget");
    assert_eq!(component.spreadsheet_viewport_cache().cell_count(), 2);

    component.on_metadata_loaded(Ok(metadata(2)));
    assert_eq!(component.history_token().to_string(), "/2/Budget");
    assert_eq!(component.spreadsheet_viewport_cache().cell_count(), 0);
    assert_eq!(
        log.borrow().cells.last().unwrap().spreadsheet_id,
        SpreadsheetId(2)
    );
}

#[test]
fn test_selection_token_focuses_element() {
    let (mut component, _log) = component_with(sample());

    component.on_history_token(token(&component, "B2"));
    assert_eq!(component.dom().focused(), Some("viewport-cell-B2"));

    component.on_history_token(token(&component, "C"));
    assert_eq!(component.dom().focused(), Some("viewport-column-C"));

    component.on_history_token(token(&component, "3:4"));
    assert_eq!(component.dom().focused(), Some("viewport-row-4"));
}

#[test]
fn test_label_token_focuses_moving_end() {
    let mut d = sample();
    d.labels.push(label("Block", "B2:C3"));
    let (mut component, _log) = component_with(d);

    component.on_history_token(token(&component, "Block"));

    assert_eq!(component.dom().focused(), Some("viewport-cell-C3"));
    assert!(component
        .table()
        .cell(cell_ref("B3"))
        .unwrap()
        .state()
        .is_selected());
}

#[test]
fn test_repeated_token_ignored() {
    let (mut component, log) = component_with(sample());
    component.on_history_token(token(&component, "B2"));
    component.dom_mut().take_writes();
    let pushed = log.borrow().tokens.len();

    component.on_history_token(token(&component, "B2"));

    assert!(component.dom().writes().is_empty());
    assert_eq!(log.borrow().tokens.len(), pushed);
}

#[test]
fn test_selection_summary_follows_selection() {
    let mut d = delta("A1:D10");
    for (reference, pattern) in [("A1", "0.00"), ("B1", "0.00"), ("C1", "0")] {
        let mut c = cell(reference, "=1", "1");
        c.format_pattern = Some(pattern.to_string());
        d.cells.push(c);
    }
    let (mut component, _log) = component_with(d);

    component.on_history_token(token(&component, "A1:B1"));
    assert_eq!(
        component.selection_summary().format_pattern.as_deref(),
        Some("0.00")
    );

    component.on_history_token(token(&component, "A1:C1"));
    assert_eq!(component.selection_summary().format_pattern, None);
}

#[test]
fn test_context_menu_round_trip() {
    let (mut component, log) = component_with(sample());
    component.on_history_token(token(&component, "B2"));

    component.on_context_menu();
    assert_eq!(component.history_token().action, TokenAction::Menu);
    assert_eq!(
        component.history_token().to_string(),
        "/1/Sheet1/cell/B2/menu"
    );
    assert_eq!(log.borrow().menus, [Selection::Cell(cell_ref("B2"))]);

    component.on_formatter_menu_loaded(Ok(vec![
        ContextMenuItem::new("General", "General"),
        ContextMenuItem::new("Number", "#,##0.00"),
    ]));
    let (anchor, items) = component.dom().context_menu().unwrap();
    assert_eq!(anchor, "viewport-cell-B2");
    assert_eq!(items.len(), 2);

    assert!(component.on_key_down("Escape", false));
    assert_eq!(component.history_token().action, TokenAction::None);
    assert!(component.dom().context_menu().is_none());
}

#[test]
fn test_selecting_elsewhere_closes_menu() {
    let (mut component, _log) = component_with(sample());
    component.on_history_token(token(&component, "B2"));
    component.on_context_menu();
    component.on_formatter_menu_loaded(Ok(vec![ContextMenuItem::new("General", "General")]));

    component.on_cell_click(cell_ref("C3"), false);

    assert!(component.dom().context_menu().is_none());
    assert_eq!(component.history_token().selection, Some(selection("C3")));
}

#[test]
fn test_menu_arriving_after_close_ignored() {
    let (mut component, _log) = component_with(sample());
    component.on_history_token(token(&component, "B2"));
    component.on_context_menu();
    component.on_key_down("Escape", false);

    component.on_formatter_menu_loaded(Ok(vec![ContextMenuItem::new("General", "General")]));
    assert!(component.dom().context_menu().is_none());
}

#[test]
fn test_context_menu_needs_selection() {
    let (mut component, log) = component_with(sample());
    component.on_context_menu();
    assert_eq!(component.history_token().action, TokenAction::None);
    assert!(log.borrow().menus.is_empty());
}

// =============================================================================
// KEYBOARD, WHEEL AND CLICKS
// =============================================================================

#[test]
fn test_arrow_keys_move_and_extend() {
    let (mut component, log) = component_with(sample());
    component.on_history_token(token(&component, "B2"));

    assert!(component.on_key_down("ArrowRight", false));
    assert_eq!(component.history_token().selection, Some(selection("C2")));
    assert_eq!(component.dom().focused(), Some("viewport-cell-C2"));

    assert!(component.on_key_down("ArrowDown", true));
    assert_eq!(component.history_token().selection, Some(selection("C2:C3")));
    assert!(component.is_shift_key_down());
    component.on_key_up("Shift", false);
    assert!(!component.is_shift_key_down());

    assert_eq!(
        log.borrow().tokens.last().unwrap().to_string(),
        "/1/Sheet1/cell/C2:C3"
    );
}

#[test]
fn test_unhandled_key_ignored() {
    let (mut component, _log) = component_with(sample());
    assert!(!component.on_key_down("x", false));
    assert!(!component.on_key_down("Escape", false));
    assert!(component.pending_navigations().is_empty());
}

#[test]
fn test_page_down_scrolls_one_screen() {
    let (mut component, _log) = component_with(sample());
    component.on_key_down("PageDown", false);
    assert_eq!(component.rectangle().home, cell_ref("A11"));
    assert_eq!(component.table().rows().first().unwrap().to_string(), "11");
}

#[test]
fn test_wheel_scrolls_by_pixels() {
    let (mut component, _log) = component_with(sample());
    assert!(component.on_wheel(0.0, 60.0));
    assert_eq!(component.rectangle().home, cell_ref("A3"));
    assert!(component.on_wheel(0.0, -30.0));
    assert_eq!(component.rectangle().home, cell_ref("A2"));
    assert!(!component.on_wheel(0.0, 0.0));
}

#[test]
fn test_shift_click_extends() {
    let (mut component, _log) = component_with(sample());
    component.on_cell_click(cell_ref("B2"), false);
    component.on_cell_click(cell_ref("C4"), true);
    assert_eq!(component.history_token().selection, Some(selection("B2:C4")));

    component.on_column_click("D".parse().unwrap(), true);
    assert_eq!(component.history_token().selection, Some(selection("B:D")));

    component.on_row_click("7".parse().unwrap(), false);
    assert_eq!(component.history_token().selection, Some(selection("7")));
}

#[test]
fn test_shift_key_rewrites_header_links_only() {
    let (mut component, _log) = component_with(sample());
    component.on_history_token(token(&component, "B2"));
    component.dom_mut().take_writes();

    component.set_shift_key_down(true);
    let writes = component.dom_mut().take_writes();
    assert!(writes.iter().any(|id| id == "viewport-column-D"));
    assert!(writes.iter().all(|id| !id.starts_with("viewport-cell-")));
    assert_eq!(
        component
            .dom()
            .element("viewport-column-D")
            .unwrap()
            .link
            .as_deref(),
        Some("#/1/Sheet1/column/B:D")
    );

    component.set_shift_key_down(true);
    assert!(component.dom().writes().is_empty());
}

// =============================================================================
// SCROLLBARS AND FORMULA BAR
// =============================================================================

#[test]
fn test_scrollbars_track_home_and_extent() {
    let mut d = sample();
    d.column_count = Some(20);
    d.row_count = Some(100);
    let (mut component, _log) = component_with(d);

    assert_eq!(
        component.scrollbar(ScrollbarAxis::Horizontal).position(),
        Some((0.0, 20.0, true))
    );
    assert_eq!(
        component.scrollbar(ScrollbarAxis::Vertical).position(),
        Some((0.0, 100.0, true))
    );

    component.on_wheel(0.0, 60.0);
    let (value, _, _) = component
        .dom()
        .element(ids::VERTICAL_SCROLLBAR_ID)
        .unwrap()
        .scrollbar
        .unwrap();
    assert_eq!(value, 2.0);
}

#[test]
fn test_formula_bar_shows_selected_formula() {
    let (mut component, _log) = component_with(sample());
    component.on_history_token(token(&component, "B2"));
    assert_eq!(component.formula().text(), Some("=A1*2"));
    assert_eq!(
        component.dom().element(ids::FORMULA_ID).unwrap().text,
        "=A1*2"
    );
}

#[test]
fn test_history_token_text_round_trips() {
    let (mut component, _log) = component_with(sample());
    component.on_history_token(token(&component, "B2:C3"));
    let text = component.history_token().to_string();
    let parsed: HistoryToken = text.parse().unwrap();
    assert_eq!(&parsed, component.history_token());
}
