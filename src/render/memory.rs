//! In-memory DOM that records every write.
//!
//! Used by the test suite to assert on DOM churn and by the CLI to print
//! the rendered grid.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::backend::{ContextMenuItem, DomBackend};
use super::ids;
use crate::error::Result;
use crate::types::{CellReference, ColumnReference, RowReference};

/// Last written state of one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementState {
    pub style: String,
    pub text: String,
    pub choices: Option<Vec<String>>,
    pub tooltip: Option<String>,
    pub link: Option<String>,
    pub disabled: bool,
    /// `(value, max, visible)` for scrollbars
    pub scrollbar: Option<(f64, f64, bool)>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDom {
    elements: BTreeMap<String, ElementState>,
    columns: Vec<ColumnReference>,
    rows: Vec<RowReference>,
    /// ids written since the last `take_writes`, in write order
    writes: Vec<String>,
    rebuilds: usize,
    focused: Option<String>,
    context_menu: Option<(String, Vec<ContextMenuItem>)>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self, id: &str) -> Option<&ElementState> {
        self.elements.get(id)
    }

    /// Drain the write log.
    pub fn take_writes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.writes)
    }

    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn context_menu(&self) -> Option<&(String, Vec<ContextMenuItem>)> {
        self.context_menu.as_ref()
    }

    pub fn columns(&self) -> &[ColumnReference] {
        &self.columns
    }

    pub fn rows(&self) -> &[RowReference] {
        &self.rows
    }

    fn write(&mut self, id: &str) -> &mut ElementState {
        self.writes.push(id.to_string());
        self.elements.entry(id.to_string()).or_default()
    }

    /// The table as aligned plain text: a header line of column names, then
    /// one line per row. Choosers show their selected value in brackets.
    pub fn render_text(&self) -> String {
        let text_of = |id: &str| -> String {
            self.elements.get(id).map_or(String::new(), |element| {
                if element.choices.is_some() {
                    format!("[{}]", element.text)
                } else {
                    element.text.clone()
                }
            })
        };

        let mut grid: Vec<Vec<String>> = Vec::with_capacity(self.rows.len() + 1);
        let mut header = vec![String::new()];
        header.extend(self.columns.iter().map(|c| text_of(&ids::column_id(*c))));
        grid.push(header);
        for row in &self.rows {
            let mut line = vec![text_of(&ids::row_id(*row))];
            line.extend(
                self.columns
                    .iter()
                    .map(|c| text_of(&ids::cell_id(CellReference::new(*c, *row)))),
            );
            grid.push(line);
        }

        let mut widths: Vec<usize> = Vec::new();
        for line in &grid {
            for (i, text) in line.iter().enumerate() {
                let len = text.chars().count();
                match widths.get_mut(i) {
                    Some(width) => *width = (*width).max(len),
                    None => widths.push(len),
                }
            }
        }

        let mut out = String::new();
        for line in &grid {
            let cells: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(text, width)| format!("{text:<width$}"))
                .collect();
            let _ = writeln!(out, "{}", cells.join(" | ").trim_end());
        }
        out
    }
}

impl DomBackend for MemoryDom {
    fn rebuild_table(
        &mut self,
        columns: &[ColumnReference],
        rows: &[RowReference],
    ) -> Result<()> {
        self.elements.retain(|id, _| !ids::is_table_id(id));
        self.columns = columns.to_vec();
        self.rows = rows.to_vec();
        self.rebuilds += 1;
        Ok(())
    }

    fn set_style(&mut self, id: &str, css: &str) -> Result<()> {
        self.write(id).style = css.to_string();
        Ok(())
    }

    fn set_text(&mut self, id: &str, text: &str) -> Result<()> {
        let element = self.write(id);
        element.text = text.to_string();
        element.choices = None;
        Ok(())
    }

    fn set_chooser(&mut self, id: &str, choices: &[String], selected: &str) -> Result<()> {
        let element = self.write(id);
        element.text = selected.to_string();
        element.choices = Some(choices.to_vec());
        Ok(())
    }

    fn set_tooltip(&mut self, id: &str, tooltip: Option<&str>) -> Result<()> {
        self.write(id).tooltip = tooltip.map(str::to_string);
        Ok(())
    }

    fn set_link(&mut self, id: &str, href: &str) -> Result<()> {
        self.write(id).link = Some(href.to_string());
        Ok(())
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) -> Result<()> {
        self.write(id).disabled = disabled;
        Ok(())
    }

    fn set_scrollbar(&mut self, id: &str, value: f64, max: f64, visible: bool) -> Result<()> {
        self.write(id).scrollbar = Some((value, max, visible));
        Ok(())
    }

    fn focus(&mut self, id: &str) -> Result<()> {
        self.focused = Some(id.to_string());
        Ok(())
    }

    fn show_context_menu(&mut self, anchor_id: &str, items: &[ContextMenuItem]) -> Result<()> {
        self.context_menu = Some((anchor_id.to_string(), items.to_vec()));
        Ok(())
    }

    fn hide_context_menu(&mut self) -> Result<()> {
        self.context_menu = None;
        Ok(())
    }
}
