use std::fmt;
use std::str::FromStr;

use super::reference::string_serde;
use super::{CellRange, CellReference, Selection};
use crate::error::{Result, SheetviewError};

/// The cell ranges currently observed by the cache. Cache entries are only
/// trustworthy inside the window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Window(Vec<CellRange>);

string_serde!(Window);

impl Window {
    pub fn new(ranges: Vec<CellRange>) -> Self {
        Self(ranges)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ranges(&self) -> &[CellRange] {
        &self.0
    }

    /// Cells inside the window. An empty window contains everything: with
    /// no window nothing has been narrowed yet.
    pub fn contains(&self, cell: CellReference) -> bool {
        self.0.is_empty() || self.0.iter().any(|r| r.contains(cell))
    }

    /// Whether any part of a (non-label) selection falls inside the window.
    pub fn intersects(&self, selection: &Selection) -> bool {
        if self.0.is_empty() {
            return true;
        }
        match selection {
            Selection::Cell(c) => self.contains(*c),
            Selection::CellRange(range) => self.0.iter().any(|r| r.intersects(*range)),
            Selection::Column(c) => self.0.iter().any(|r| r.columns().contains(*c)),
            Selection::ColumnRange(columns) => {
                self.0.iter().any(|r| r.columns().intersects(*columns))
            }
            Selection::Row(row) => self.0.iter().any(|r| r.rows().contains(*row)),
            Selection::RowRange(rows) => self.0.iter().any(|r| r.rows().intersects(*rows)),
            Selection::Label(_) => false,
        }
    }

    /// Cells of `range` that lie in the window, without duplicates. An empty
    /// window expands nothing, since the range could span the whole sheet.
    pub fn cells_of(&self, range: CellRange) -> Vec<CellReference> {
        if self.0.is_empty() {
            return Vec::new();
        }
        let mut cells: Vec<CellReference> = self
            .0
            .iter()
            .filter_map(|r| r.intersection(range))
            .flat_map(CellRange::cells)
            .collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}

impl FromStr for Window {
    type Err = SheetviewError;

    /// Comma separated ranges, e.g. `A1:B2,D1:E2`. Empty text is the empty window.
    fn from_str(s: &str) -> Result<Self> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<CellRange>>>()
            .map(Self)
    }
}
