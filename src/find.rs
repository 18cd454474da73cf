//! Find dialog: form validation, the server query and match listing.
//!
//! The dialog keeps raw field text the way a form does; [`FindDialog::validate`]
//! turns it into a [`FindRequest`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, SheetviewError};
use crate::types::{CellRange, CellReference, SpreadsheetDelta};

pub const DEFAULT_COUNT: u32 = 100;

/// Order in which a range is searched. The first pair names the direction
/// within a line, the second how lines advance: `LRTD` reads rows left to
/// right, top to bottom; `TDLR` reads columns top to bottom, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FindPath {
    #[default]
    Lrtd,
    Lrbu,
    Rltd,
    Rlbu,
    Tdlr,
    Tdrl,
    Bulr,
    Burl,
}

impl FindPath {
    pub const ALL: [FindPath; 8] = [
        Self::Lrtd,
        Self::Lrbu,
        Self::Rltd,
        Self::Rlbu,
        Self::Tdlr,
        Self::Tdrl,
        Self::Bulr,
        Self::Burl,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Lrtd => "LRTD",
            Self::Lrbu => "LRBU",
            Self::Rltd => "RLTD",
            Self::Rlbu => "RLBU",
            Self::Tdlr => "TDLR",
            Self::Tdrl => "TDRL",
            Self::Bulr => "BULR",
            Self::Burl => "BURL",
        }
    }

    /// `(row_major, columns_ascending, rows_ascending)`
    fn axes(self) -> (bool, bool, bool) {
        match self {
            Self::Lrtd => (true, true, true),
            Self::Lrbu => (true, true, false),
            Self::Rltd => (true, false, true),
            Self::Rlbu => (true, false, false),
            Self::Tdlr => (false, true, true),
            Self::Tdrl => (false, false, true),
            Self::Bulr => (false, true, false),
            Self::Burl => (false, false, false),
        }
    }

    /// Compare two cells by their position along this path.
    pub fn compare(self, a: CellReference, b: CellReference) -> Ordering {
        let (row_major, columns_ascending, rows_ascending) = self.axes();
        let columns = if columns_ascending {
            a.column().cmp(&b.column())
        } else {
            b.column().cmp(&a.column())
        };
        let rows = if rows_ascending {
            a.row().cmp(&b.row())
        } else {
            b.row().cmp(&a.row())
        };
        if row_major {
            rows.then(columns)
        } else {
            columns.then(rows)
        }
    }
}

impl fmt::Display for FindPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FindPath {
    type Err = SheetviewError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|path| path.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SheetviewError::Find(format!("Unknown path {s:?}")))
    }
}

/// Restricts matches to cells whose value has this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueType {
    #[default]
    Any,
    Number,
    Text,
    Boolean,
    Error,
}

impl ValueType {
    pub fn code(self) -> &'static str {
        match self {
            Self::Any => "*",
            Self::Number => "number",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ValueType {
    type Err = SheetviewError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" | "*" => Ok(Self::Any),
            "number" => Ok(Self::Number),
            "text" => Ok(Self::Text),
            "boolean" => Ok(Self::Boolean),
            "error" => Ok(Self::Error),
            other => Err(SheetviewError::Find(format!("Unknown value type {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindRequest {
    pub range: CellRange,
    pub path: FindPath,
    pub offset: u32,
    pub count: u32,
    pub value_type: ValueType,
    pub query: String,
}

impl FindRequest {
    /// Request path, relative to the spreadsheet.
    pub fn path(&self) -> String {
        format!("/cell/{}/find", self.range)
    }

    /// Query string (without the leading `?`).
    pub fn query_string(&self) -> String {
        let mut params = vec![
            ("cell-range-path", self.path.code().to_string()),
            ("offset", self.offset.to_string()),
            ("count", self.count.to_string()),
            ("value-type", self.value_type.code().to_string()),
        ];
        if !self.query.is_empty() {
            params.push(("query", self.query.clone()));
        }
        params
            .iter()
            .map(|(name, value)| format!("{name}={}", encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Percent-encode everything outside the URL unreserved set.
fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~' | b'*') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// A form field of the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindField {
    Range,
    Path,
    Offset,
    Count,
    ValueType,
    Query,
}

/// One listed match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatch {
    pub reference: CellReference,
    pub formula: String,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindDialog {
    range: String,
    path: String,
    offset: String,
    count: String,
    value_type: String,
    query: String,
}

impl Default for FindDialog {
    fn default() -> Self {
        Self {
            range: String::new(),
            path: FindPath::default().to_string(),
            offset: "0".to_string(),
            count: DEFAULT_COUNT.to_string(),
            value_type: ValueType::default().to_string(),
            query: String::new(),
        }
    }
}

impl FindDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: FindField) -> &str {
        match field {
            FindField::Range => &self.range,
            FindField::Path => &self.path,
            FindField::Offset => &self.offset,
            FindField::Count => &self.count,
            FindField::ValueType => &self.value_type,
            FindField::Query => &self.query,
        }
    }

    pub fn set_field(&mut self, field: FindField, value: &str) {
        let slot = match field {
            FindField::Range => &mut self.range,
            FindField::Path => &mut self.path,
            FindField::Offset => &mut self.offset,
            FindField::Count => &mut self.count,
            FindField::ValueType => &mut self.value_type,
            FindField::Query => &mut self.query,
        };
        *slot = value.to_string();
    }

    /// Check every field and build the request.
    ///
    /// # Errors
    /// Returns [`SheetviewError::Find`] naming the first invalid field.
    pub fn validate(&self) -> Result<FindRequest> {
        let range = match self.range.trim() {
            "" => CellRange::all(),
            text => text
                .parse()
                .map_err(|_| SheetviewError::Find(format!("Invalid cell range {text:?}")))?,
        };
        let offset: u32 = self
            .offset
            .trim()
            .parse()
            .map_err(|_| SheetviewError::Find(format!("Invalid offset {:?}", self.offset)))?;
        let count: u32 = self
            .count
            .trim()
            .parse()
            .ok()
            .filter(|count| *count > 0)
            .ok_or_else(|| SheetviewError::Find(format!("Invalid count {:?}", self.count)))?;
        Ok(FindRequest {
            range,
            path: self.path.parse()?,
            offset,
            count,
            value_type: self.value_type.parse()?,
            query: self.query.clone(),
        })
    }

    /// Cells of `delta` inside the request range, in path order.
    pub fn matches(request: &FindRequest, delta: &SpreadsheetDelta) -> Vec<FindMatch> {
        let mut cells: Vec<_> = delta
            .cells
            .iter()
            .filter(|cell| request.range.contains(cell.reference))
            .collect();
        cells.sort_by(|a, b| request.path.compare(a.reference, b.reference));
        cells
            .into_iter()
            .map(|cell| FindMatch {
                reference: cell.reference,
                formula: cell.formula.text.clone(),
                formatted: cell.formatted_text().to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let request = FindDialog::new().validate().unwrap();
        assert_eq!(request.range, CellRange::all());
        assert_eq!(request.count, DEFAULT_COUNT);
        assert_eq!(
            request.query_string(),
            "cell-range-path=LRTD&offset=0&count=100&value-type=*"
        );
    }

    #[test]
    fn test_query_is_encoded() {
        let mut dialog = FindDialog::new();
        dialog.set_field(FindField::Query, "a b&c");
        dialog.set_field(FindField::Range, "B2:C3");
        let request = dialog.validate().unwrap();
        assert_eq!(request.path(), "/cell/B2:C3/find");
        assert!(request.query_string().ends_with("&query=a%20b%26c"));
    }

    #[test]
    fn test_zero_count_rejected() {
        let mut dialog = FindDialog::new();
        dialog.set_field(FindField::Count, "0");
        assert!(matches!(dialog.validate(), Err(SheetviewError::Find(_))));
    }
}
