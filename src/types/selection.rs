use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::reference::{
    string_serde, CellRange, CellReference, ColumnRange, ColumnReference, RowRange, RowReference,
};
use crate::cell_ref::parse_cell;
use crate::error::{Result, SheetviewError};

/// Maximum length of a label name.
pub const MAX_LABEL_LENGTH: usize = 255;

/// A name bound to a cell or range. Compared case-insensitively.
#[derive(Debug, Clone)]
pub struct LabelName(String);

string_serde!(LabelName);

impl LabelName {
    /// Validate and wrap a label name.
    ///
    /// # Errors
    /// Returns [`SheetviewError::Selection`] for empty, overlong or
    /// cell-reference-shaped names, or names with invalid characters.
    pub fn new(name: &str) -> Result<Self> {
        let invalid = |why: &str| SheetviewError::Selection(format!("label {name:?}: {why}"));
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
            Some(_) => return Err(invalid("must start with a letter or underscore")),
            None => return Err(invalid("empty")),
        }
        if name.len() > MAX_LABEL_LENGTH {
            return Err(invalid("too long"));
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
            return Err(invalid("invalid character"));
        }
        if parse_cell(name).is_some() {
            return Err(invalid("looks like a cell reference"));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for LabelName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for LabelName {}

impl Hash for LabelName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl PartialOrd for LabelName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LabelName {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = self.0.bytes().map(|b| b.to_ascii_lowercase());
        let b = other.0.bytes().map(|b| b.to_ascii_lowercase());
        a.cmp(b)
    }
}

impl fmt::Display for LabelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LabelName {
    type Err = SheetviewError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// What is selected: a closed set of kinds, matched exhaustively by the
/// few places that care (styling, geometry, extension).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection {
    Cell(CellReference),
    CellRange(CellRange),
    Column(ColumnReference),
    ColumnRange(ColumnRange),
    Row(RowReference),
    RowRange(RowRange),
    Label(LabelName),
}

string_serde!(Selection);

impl Selection {
    /// Collapse single-element ranges to their single form.
    pub fn cell_range(range: CellRange) -> Self {
        if range.is_single_cell() {
            Self::Cell(range.begin())
        } else {
            Self::CellRange(range)
        }
    }

    pub fn column_range(range: ColumnRange) -> Self {
        if range.is_single() {
            Self::Column(range.begin())
        } else {
            Self::ColumnRange(range)
        }
    }

    pub fn row_range(range: RowRange) -> Self {
        if range.is_single() {
            Self::Row(range.begin())
        } else {
            Self::RowRange(range)
        }
    }

    /// Kind name used in element ids and history tokens.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cell(_) | Self::CellRange(_) => "cell",
            Self::Column(_) | Self::ColumnRange(_) => "column",
            Self::Row(_) | Self::RowRange(_) => "row",
            Self::Label(_) => "label",
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self, Self::Label(_))
    }

    /// The anchor a fresh selection of this kind starts with.
    pub fn default_anchor(&self) -> Anchor {
        match self {
            Self::Cell(_) | Self::Label(_) => Anchor::None,
            Self::CellRange(_) => Anchor::TopLeft,
            Self::Column(_) | Self::ColumnRange(_) => Anchor::Left,
            Self::Row(_) | Self::RowRange(_) => Anchor::Top,
        }
    }

    /// Whether `cell` is part of this selection. Labels never match;
    /// resolve them through the cache first.
    pub fn test_cell(&self, cell: CellReference) -> bool {
        match self {
            Self::Cell(c) => *c == cell,
            Self::CellRange(r) => r.contains(cell),
            Self::Column(c) => *c == cell.column(),
            Self::ColumnRange(r) => r.contains(cell.column()),
            Self::Row(r) => *r == cell.row(),
            Self::RowRange(r) => r.contains(cell.row()),
            Self::Label(_) => false,
        }
    }

    /// Whether the header of `column` should show as selected.
    pub fn test_column(&self, column: ColumnReference) -> bool {
        match self {
            Self::Cell(c) => c.column() == column,
            Self::CellRange(r) => r.columns().contains(column),
            Self::Column(c) => *c == column,
            Self::ColumnRange(r) => r.contains(column),
            Self::Row(_) | Self::RowRange(_) | Self::Label(_) => false,
        }
    }

    /// Whether the header of `row` should show as selected.
    pub fn test_row(&self, row: RowReference) -> bool {
        match self {
            Self::Cell(c) => c.row() == row,
            Self::CellRange(r) => r.rows().contains(row),
            Self::Row(r) => *r == row,
            Self::RowRange(r) => r.contains(row),
            Self::Column(_) | Self::ColumnRange(_) | Self::Label(_) => false,
        }
    }

    /// The single cell of a cell selection, if that is what this is.
    pub fn as_cell(&self) -> Option<CellReference> {
        match self {
            Self::Cell(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&LabelName> {
        match self {
            Self::Label(l) => Some(l),
            _ => None,
        }
    }

    /// The rectangle covered by a cell or cell-range selection.
    pub fn to_cell_range(&self) -> Option<CellRange> {
        match self {
            Self::Cell(c) => Some(CellRange::new(*c, *c)),
            Self::CellRange(r) => Some(*r),
            _ => None,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell(c) => c.fmt(f),
            Self::CellRange(r) => r.fmt(f),
            Self::Column(c) => c.fmt(f),
            Self::ColumnRange(r) => r.fmt(f),
            Self::Row(r) => r.fmt(f),
            Self::RowRange(r) => r.fmt(f),
            Self::Label(l) => l.fmt(f),
        }
    }
}

impl FromStr for Selection {
    type Err = SheetviewError;

    /// Parse `A1`, `A1:B2`, `B`, `B:D`, `3`, `3:5`, falling back to a label.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(range) = s.parse::<CellRange>() {
            return Ok(Self::cell_range(range));
        }
        if let Ok(range) = s.parse::<ColumnRange>() {
            return Ok(Self::column_range(range));
        }
        if let Ok(range) = s.parse::<RowRange>() {
            return Ok(Self::row_range(range));
        }
        LabelName::new(s).map(Self::Label)
    }
}

impl From<CellReference> for Selection {
    fn from(cell: CellReference) -> Self {
        Self::Cell(cell)
    }
}

impl From<ColumnReference> for Selection {
    fn from(column: ColumnReference) -> Self {
        Self::Column(column)
    }
}

impl From<RowReference> for Selection {
    fn from(row: RowReference) -> Self {
        Self::Row(row)
    }
}

/// The fixed corner or edge of a selection; extension moves the opposite one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    #[default]
    None,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Left,
    Right,
    Top,
    Bottom,
}

string_serde!(Anchor);

impl Anchor {
    const NAMES: [(Anchor, &'static str); 9] = [
        (Anchor::None, "none"),
        (Anchor::TopLeft, "top-left"),
        (Anchor::TopRight, "top-right"),
        (Anchor::BottomLeft, "bottom-left"),
        (Anchor::BottomRight, "bottom-right"),
        (Anchor::Left, "left"),
        (Anchor::Right, "right"),
        (Anchor::Top, "top"),
        (Anchor::Bottom, "bottom"),
    ];

    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(anchor, _)| *anchor == self)
            .map_or("none", |(_, name)| name)
    }

    /// Whether the anchor sits on the left edge (or has no horizontal bias).
    pub fn is_left(self) -> bool {
        !matches!(self, Self::TopRight | Self::BottomRight | Self::Right)
    }

    /// Whether the anchor sits on the top edge (or has no vertical bias).
    pub fn is_top(self) -> bool {
        !matches!(self, Self::BottomLeft | Self::BottomRight | Self::Bottom)
    }

    /// Corner anchor from edge flags.
    pub fn corner(left: bool, top: bool) -> Self {
        match (left, top) {
            (true, true) => Self::TopLeft,
            (false, true) => Self::TopRight,
            (true, false) => Self::BottomLeft,
            (false, false) => Self::BottomRight,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Anchor {
    type Err = SheetviewError;

    fn from_str(s: &str) -> Result<Self> {
        Self::NAMES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s))
            .map(|(anchor, _)| *anchor)
            .ok_or_else(|| SheetviewError::Selection(format!("anchor {s:?}")))
    }
}

/// A selection plus the anchor used as the pivot for extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchoredSelection {
    pub selection: Selection,
    #[serde(default)]
    pub anchor: Anchor,
}

impl AnchoredSelection {
    pub fn new(selection: Selection, anchor: Anchor) -> Self {
        Self { selection, anchor }
    }

    /// Wrap a selection with the anchor its kind starts with.
    pub fn with_default_anchor(selection: Selection) -> Self {
        let anchor = selection.default_anchor();
        Self { selection, anchor }
    }
}

impl fmt::Display for AnchoredSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.anchor {
            Anchor::None => write!(f, "{}", self.selection),
            anchor => write!(f, "{} {}", self.selection, anchor),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection_kinds() {
        let test_cases = [
            ("A1", "cell"),
            ("A1:B2", "cell"),
            ("B", "column"),
            ("B:D", "column"),
            ("3", "row"),
            ("3:5", "row"),
            ("Sales", "label"),
        ];
        for (text, kind) in test_cases {
            let selection: Selection = text.parse().unwrap();
            assert_eq!(selection.kind(), kind, "{text}");
            assert_eq!(selection.to_string(), text);
        }
    }

    #[test]
    fn test_single_ranges_collapse() {
        assert_eq!(
            "B2:B2".parse::<Selection>().unwrap(),
            Selection::Cell(CellReference::at(1, 1))
        );
        assert_eq!(
            "C:C".parse::<Selection>().unwrap(),
            Selection::Column(ColumnReference::new(2))
        );
    }

    #[test]
    fn test_label_validation() {
        assert!(LabelName::new("Total_2024").is_ok());
        assert!(LabelName::new("A1").is_err());
        assert!(LabelName::new("1abc").is_err());
        assert!(LabelName::new("has space").is_err());
        assert_eq!(
            LabelName::new("sales").unwrap(),
            LabelName::new("SALES").unwrap()
        );
    }

    #[test]
    fn test_header_predicates() {
        let range: Selection = "B2:C3".parse().unwrap();
        assert!(range.test_column(ColumnReference::new(2)));
        assert!(!range.test_column(ColumnReference::new(3)));
        assert!(range.test_row(RowReference::new(1)));
        let column: Selection = "B".parse().unwrap();
        assert!(!column.test_row(RowReference::new(0)));
        assert!(column.test_cell(CellReference::at(1, 500)));
    }

    #[test]
    fn test_anchor_names_round_trip() {
        for (anchor, name) in Anchor::NAMES {
            assert_eq!(anchor.to_string(), name);
            assert_eq!(name.parse::<Anchor>().unwrap(), anchor);
        }
    }
}
