use serde::{Deserialize, Serialize};

use super::{Cell, TextStyle};

/// Formatter, parser and style shared by every cell of a selection, for
/// toolbar and menu display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "TextStyle::is_empty")]
    pub style: TextStyle,
}

impl SelectionSummary {
    pub const EMPTY: SelectionSummary = SelectionSummary {
        format_pattern: None,
        parse_pattern: None,
        style: TextStyle::EMPTY,
    };

    /// Aggregate the common settings of `cells`. A pattern survives only if
    /// every cell carries the same one.
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Self {
        let mut cells = cells.into_iter();
        let Some(first) = cells.next() else {
            return Self::EMPTY;
        };
        let mut summary = Self {
            format_pattern: first.format_pattern.clone(),
            parse_pattern: first.parse_pattern.clone(),
            style: first.style.clone(),
        };
        for cell in cells {
            if summary.format_pattern != cell.format_pattern {
                summary.format_pattern = None;
            }
            if summary.parse_pattern != cell.parse_pattern {
                summary.parse_pattern = None;
            }
            summary.style = summary.style.intersect(&cell.style);
        }
        summary
    }
}
