//! Utilities for parsing and formatting spreadsheet reference text.
//!
//! Indices are 0-based; `$` marks an absolute component.

/// Number of columns addressable in a spreadsheet (`A` through `XFD`).
pub const MAX_COLUMNS: u32 = 16_384;

/// Number of rows addressable in a spreadsheet.
pub const MAX_ROWS: u32 = 1_048_576;

/// Convert a 0-based column index to column letters (A, B, ..., Z, AA, AB, ...)
pub fn column_to_letters(col: u32) -> String {
    let mut result = String::new();
    let mut n = col.saturating_add(1);
    while n > 0 {
        n -= 1;
        if let Some(c) = char::from_u32(u32::from(b'A') + n % 26) {
            result.insert(0, c);
        }
        n /= 26;
    }
    result
}

/// Parse column letters like "AB" into a 0-based index.
pub fn letters_to_column(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = u32::from(ch.to_ascii_uppercase()) - u32::from('A') + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }
    let col = col - 1;
    (col < MAX_COLUMNS).then_some(col)
}

/// Parse column text like "B" or "$B" into (index, absolute).
pub fn parse_column(text: &str) -> Option<(u32, bool)> {
    let (absolute, rest) = split_dollar(text.trim());
    letters_to_column(rest).map(|col| (col, absolute))
}

/// Parse row text like "3" or "$3" into (0-based index, absolute).
pub fn parse_row(text: &str) -> Option<(u32, bool)> {
    let (absolute, rest) = split_dollar(text.trim());
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row: u32 = rest.parse().ok()?;
    if row == 0 || row > MAX_ROWS {
        return None;
    }
    Some((row - 1, absolute))
}

/// Parse a cell reference like "A1" or "$A$1" into its column and row parts.
pub fn parse_cell(text: &str) -> Option<((u32, bool), (u32, bool))> {
    let text = text.trim();
    let split = text
        .char_indices()
        .skip(1)
        .find(|&(_, ch)| ch == '$' || ch.is_ascii_digit())
        .map(|(i, _)| i)?;
    let (column, row) = text.split_at(split);
    Some((parse_column(column)?, parse_row(row)?))
}

fn split_dollar(text: &str) -> (bool, &str) {
    match text.strip_prefix('$') {
        Some(rest) => (true, rest),
        None => (false, text),
    }
}
