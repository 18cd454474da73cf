//! Find dialog tests: field validation and match ordering
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use common::{cell, delta};
use sheetview::find::{FindDialog, FindField, FindPath, ValueType};
use sheetview::SheetviewError;
use test_case::test_case;

fn two_by_two() -> sheetview::SpreadsheetDelta {
    let mut d = delta("A1:C3");
    for reference in ["B2", "A1", "A2", "B1", "C3"] {
        d.cells.push(cell(reference, &format!("=\"{reference}\""), reference));
    }
    d
}

#[test_case("LRTD", &["A1", "B1", "A2", "B2"] ; "rows left to right downwards")]
#[test_case("RLBU", &["B2", "A2", "B1", "A1"] ; "rows right to left upwards")]
#[test_case("TDLR", &["A1", "A2", "B1", "B2"] ; "columns downwards left to right")]
#[test_case("BURL", &["B2", "B1", "A2", "A1"] ; "columns upwards right to left")]
fn test_matches_follow_path(path: &str, expected: &[&str]) {
    let mut dialog = FindDialog::new();
    dialog.set_field(FindField::Range, "A1:B2");
    dialog.set_field(FindField::Path, path);
    let request = dialog.validate().unwrap();

    let found: Vec<String> = FindDialog::matches(&request, &two_by_two())
        .iter()
        .map(|m| m.reference.to_string())
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_match_lists_formula_and_formatted_text() {
    let mut dialog = FindDialog::new();
    dialog.set_field(FindField::Range, "C3");
    let request = dialog.validate().unwrap();

    let found = FindDialog::matches(&request, &two_by_two());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].formula, "=\"C3\"");
    assert_eq!(found[0].formatted, "C3");
}

#[test_case(FindField::Range, "A1:" ; "bad range")]
#[test_case(FindField::Path, "ZZZZ" ; "bad path")]
#[test_case(FindField::Offset, "-1" ; "negative offset")]
#[test_case(FindField::Count, "many" ; "bad count")]
#[test_case(FindField::ValueType, "date" ; "bad value type")]
fn test_invalid_field_rejected(field: FindField, value: &str) {
    let mut dialog = FindDialog::new();
    dialog.set_field(field, value);
    assert!(matches!(dialog.validate(), Err(SheetviewError::Find(_))));
}

#[test]
fn test_fields_are_trimmed_and_case_insensitive() {
    let mut dialog = FindDialog::new();
    dialog.set_field(FindField::Path, " tdrl ");
    dialog.set_field(FindField::ValueType, "number");
    dialog.set_field(FindField::Offset, " 20 ");
    let request = dialog.validate().unwrap();

    assert_eq!(request.path, FindPath::Tdrl);
    assert_eq!(request.value_type, ValueType::Number);
    assert_eq!(request.offset, 20);
    assert_eq!(
        request.query_string(),
        "cell-range-path=TDRL&offset=20&count=100&value-type=number"
    );
    assert_eq!(dialog.field(FindField::Path), " tdrl ");
}
