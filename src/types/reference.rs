//! Column, row and cell references plus their ranges.
//!
//! Equality, hashing and ordering ignore the [`ReferenceKind`]: `$A$1` and
//! `A1` address the same cell and share a cache entry.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::cell_ref::{
    column_to_letters, parse_cell, parse_column, parse_row, MAX_COLUMNS, MAX_ROWS,
};
use crate::error::{Result, SheetviewError};

/// Whether a reference component is absolute (`$A`) or relative (`A`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReferenceKind {
    Absolute,
    #[default]
    Relative,
}

impl ReferenceKind {
    fn from_absolute(absolute: bool) -> Self {
        if absolute {
            Self::Absolute
        } else {
            Self::Relative
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Self::Absolute => "$",
            Self::Relative => "",
        }
    }
}

/// Implements equality, hashing and ordering on the index alone.
macro_rules! reference_impls {
    ($ty:ident) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.value == other.value
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.value.hash(state);
            }
        }

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> Ordering {
                self.value.cmp(&other.value)
            }
        }
    };
}

/// Implements `Serialize`/`Deserialize` through `Display`/`FromStr`.
macro_rules! string_serde {
    ($ty:ident) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use string_serde;

/// A column, e.g. `B` or `$B`.
#[derive(Debug, Clone, Copy)]
pub struct ColumnReference {
    value: u32,
    kind: ReferenceKind,
}

reference_impls!(ColumnReference);
string_serde!(ColumnReference);

impl ColumnReference {
    /// Relative column at a 0-based index, clamped to the last column.
    pub fn new(value: u32) -> Self {
        Self {
            value: value.min(MAX_COLUMNS - 1),
            kind: ReferenceKind::Relative,
        }
    }

    pub fn value(self) -> u32 {
        self.value
    }

    pub fn kind(self) -> ReferenceKind {
        self.kind
    }

    pub fn with_kind(self, kind: ReferenceKind) -> Self {
        Self { kind, ..self }
    }

    /// The next column to the right, or `None` past the last column.
    pub fn next(self) -> Option<Self> {
        (self.value + 1 < MAX_COLUMNS).then(|| Self::new(self.value + 1))
    }

    /// The previous column to the left, or `None` before `A`.
    pub fn previous(self) -> Option<Self> {
        self.value.checked_sub(1).map(Self::new)
    }

    /// The cell where this column meets `row`.
    pub fn set_row(self, row: RowReference) -> CellReference {
        CellReference::new(self, row)
    }
}

impl fmt::Display for ColumnReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), column_to_letters(self.value))
    }
}

impl FromStr for ColumnReference {
    type Err = SheetviewError;

    fn from_str(s: &str) -> Result<Self> {
        let (value, absolute) =
            parse_column(s).ok_or_else(|| SheetviewError::Reference(format!("column {s:?}")))?;
        Ok(Self::new(value).with_kind(ReferenceKind::from_absolute(absolute)))
    }
}

/// A row, e.g. `3` or `$3`. Stored 0-based, displayed 1-based.
#[derive(Debug, Clone, Copy)]
pub struct RowReference {
    value: u32,
    kind: ReferenceKind,
}

reference_impls!(RowReference);
string_serde!(RowReference);

impl RowReference {
    /// Relative row at a 0-based index, clamped to the last row.
    pub fn new(value: u32) -> Self {
        Self {
            value: value.min(MAX_ROWS - 1),
            kind: ReferenceKind::Relative,
        }
    }

    pub fn value(self) -> u32 {
        self.value
    }

    pub fn kind(self) -> ReferenceKind {
        self.kind
    }

    pub fn with_kind(self, kind: ReferenceKind) -> Self {
        Self { kind, ..self }
    }

    pub fn next(self) -> Option<Self> {
        (self.value + 1 < MAX_ROWS).then(|| Self::new(self.value + 1))
    }

    pub fn previous(self) -> Option<Self> {
        self.value.checked_sub(1).map(Self::new)
    }

    pub fn set_column(self, column: ColumnReference) -> CellReference {
        CellReference::new(column, self)
    }
}

impl fmt::Display for RowReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.value + 1)
    }
}

impl FromStr for RowReference {
    type Err = SheetviewError;

    fn from_str(s: &str) -> Result<Self> {
        let (value, absolute) =
            parse_row(s).ok_or_else(|| SheetviewError::Reference(format!("row {s:?}")))?;
        Ok(Self::new(value).with_kind(ReferenceKind::from_absolute(absolute)))
    }
}

/// A single cell. Ordered row-major: by row, then by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellReference {
    column: ColumnReference,
    row: RowReference,
}

string_serde!(CellReference);

impl CellReference {
    pub fn new(column: ColumnReference, row: RowReference) -> Self {
        Self { column, row }
    }

    /// Cell at 0-based (column, row) indices.
    pub fn at(column: u32, row: u32) -> Self {
        Self::new(ColumnReference::new(column), RowReference::new(row))
    }

    /// `A1`.
    pub fn home() -> Self {
        Self::at(0, 0)
    }

    pub fn column(self) -> ColumnReference {
        self.column
    }

    pub fn row(self) -> RowReference {
        self.row
    }

    pub fn set_column(self, column: ColumnReference) -> Self {
        Self { column, ..self }
    }

    pub fn set_row(self, row: RowReference) -> Self {
        Self { row, ..self }
    }
}

impl PartialOrd for CellReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellReference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl FromStr for CellReference {
    type Err = SheetviewError;

    fn from_str(s: &str) -> Result<Self> {
        let ((column, column_absolute), (row, row_absolute)) =
            parse_cell(s).ok_or_else(|| SheetviewError::Reference(format!("cell {s:?}")))?;
        Ok(Self::new(
            ColumnReference::new(column).with_kind(ReferenceKind::from_absolute(column_absolute)),
            RowReference::new(row).with_kind(ReferenceKind::from_absolute(row_absolute)),
        ))
    }
}

/// Inclusive rectangle of cells, normalized so `begin` is top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    begin: CellReference,
    end: CellReference,
}

string_serde!(CellRange);

impl CellRange {
    /// Range spanning two corners given in any order.
    pub fn new(a: CellReference, b: CellReference) -> Self {
        let left = a.column().min(b.column());
        let right = a.column().max(b.column());
        let top = a.row().min(b.row());
        let bottom = a.row().max(b.row());
        Self {
            begin: CellReference::new(left, top),
            end: CellReference::new(right, bottom),
        }
    }

    /// Every cell of the spreadsheet.
    pub fn all() -> Self {
        Self::new(
            CellReference::home(),
            CellReference::at(MAX_COLUMNS - 1, MAX_ROWS - 1),
        )
    }

    pub fn begin(self) -> CellReference {
        self.begin
    }

    pub fn end(self) -> CellReference {
        self.end
    }

    pub fn is_single_cell(self) -> bool {
        self.begin == self.end
    }

    pub fn columns(self) -> ColumnRange {
        ColumnRange::new(self.begin.column(), self.end.column())
    }

    pub fn rows(self) -> RowRange {
        RowRange::new(self.begin.row(), self.end.row())
    }

    pub fn contains(self, cell: CellReference) -> bool {
        self.columns().contains(cell.column()) && self.rows().contains(cell.row())
    }

    pub fn intersects(self, other: CellRange) -> bool {
        self.columns().intersects(other.columns()) && self.rows().intersects(other.rows())
    }

    /// The overlapping rectangle, if any.
    pub fn intersection(self, other: CellRange) -> Option<CellRange> {
        if !self.intersects(other) {
            return None;
        }
        Some(CellRange::new(
            CellReference::new(
                self.begin.column().max(other.begin.column()),
                self.begin.row().max(other.begin.row()),
            ),
            CellReference::new(
                self.end.column().min(other.end.column()),
                self.end.row().min(other.end.row()),
            ),
        ))
    }

    /// Cells in row-major order.
    pub fn cells(self) -> impl Iterator<Item = CellReference> {
        let columns = self.columns();
        self.rows()
            .iter()
            .flat_map(move |row| columns.iter().map(move |column| row.set_column(column)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_cell() {
            write!(f, "{}", self.begin)
        } else {
            write!(f, "{}:{}", self.begin, self.end)
        }
    }
}

impl FromStr for CellRange {
    type Err = SheetviewError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((begin, end)) => Ok(Self::new(begin.parse()?, end.parse()?)),
            None => {
                let cell: CellReference = s.parse()?;
                Ok(Self::new(cell, cell))
            }
        }
    }
}

/// Implements the shared shape of [`ColumnRange`] and [`RowRange`].
macro_rules! axis_range {
    ($name:ident, $reference:ident, $label:literal) => {
        #[doc = concat!("Inclusive range of ", $label, "s, normalized so begin <= end.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            begin: $reference,
            end: $reference,
        }

        string_serde!($name);

        impl $name {
            pub fn new(a: $reference, b: $reference) -> Self {
                Self {
                    begin: a.min(b),
                    end: a.max(b),
                }
            }

            pub fn begin(self) -> $reference {
                self.begin
            }

            pub fn end(self) -> $reference {
                self.end
            }

            pub fn is_single(self) -> bool {
                self.begin == self.end
            }

            pub fn contains(self, reference: $reference) -> bool {
                self.begin <= reference && reference <= self.end
            }

            pub fn intersects(self, other: Self) -> bool {
                self.begin <= other.end && other.begin <= self.end
            }

            pub fn len(self) -> u32 {
                self.end.value() - self.begin.value() + 1
            }

            pub fn is_empty(self) -> bool {
                false
            }

            pub fn iter(self) -> impl Iterator<Item = $reference> {
                (self.begin.value()..=self.end.value()).map($reference::new)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_single() {
                    write!(f, "{}", self.begin)
                } else {
                    write!(f, "{}:{}", self.begin, self.end)
                }
            }
        }

        impl FromStr for $name {
            type Err = SheetviewError;

            fn from_str(s: &str) -> Result<Self> {
                match s.split_once(':') {
                    Some((begin, end)) => Ok(Self::new(begin.parse()?, end.parse()?)),
                    None => {
                        let single: $reference = s.parse()?;
                        Ok(Self::new(single, single))
                    }
                }
            }
        }
    };
}

axis_range!(ColumnRange, ColumnReference, "column");
axis_range!(RowRange, RowReference, "row");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ignored_for_equality() {
        let absolute: CellReference = "$A$1".parse().unwrap();
        assert_eq!(absolute, CellReference::home());
        assert_eq!(absolute.to_string(), "$A$1");
    }

    #[test]
    fn test_cell_order_is_row_major() {
        let b1 = CellReference::at(1, 0);
        let a2 = CellReference::at(0, 1);
        assert!(b1 < a2);
    }

    #[test]
    fn test_range_normalizes_corners() {
        let range = CellRange::new(CellReference::at(2, 5), CellReference::at(0, 1));
        assert_eq!(range.to_string(), "A2:C6");
        assert_eq!(range.cells().count(), 15);
    }

    #[test]
    fn test_range_intersection() {
        let a = CellRange::new(CellReference::at(0, 0), CellReference::at(3, 3));
        let b = CellRange::new(CellReference::at(2, 2), CellReference::at(5, 5));
        let overlap = a.intersection(b).map(|r| r.to_string());
        assert_eq!(overlap.as_deref(), Some("C3:D4"));
        let c = CellRange::new(CellReference::at(9, 9), CellReference::at(9, 9));
        assert!(a.intersection(c).is_none());
    }
}
