//! The table: headers plus one row component per visible row.

use super::backend::DomBackend;
use super::cell::CellComponent;
use super::header::{HeaderComponent, HeaderTarget};
use super::RenderContext;
use crate::error::Result;
use crate::layout::ViewportRectangle;
use crate::types::{CellReference, ColumnReference, RowReference};

/// A row header followed by the row's cells.
#[derive(Debug, Clone)]
pub struct RowComponent {
    header: HeaderComponent,
    cells: Vec<CellComponent>,
}

impl RowComponent {
    pub fn new(row: RowReference, columns: &[ColumnReference]) -> Self {
        Self {
            header: HeaderComponent::new(HeaderTarget::Row(row)),
            cells: columns
                .iter()
                .map(|column| CellComponent::new(CellReference::new(*column, row)))
                .collect(),
        }
    }

    pub fn header(&self) -> &HeaderComponent {
        &self.header
    }

    pub fn cells(&self) -> &[CellComponent] {
        &self.cells
    }

    /// Refresh the header and every cell; returns how many components wrote.
    pub fn refresh(&mut self, ctx: &RenderContext<'_>, dom: &mut impl DomBackend) -> Result<usize> {
        let mut written = usize::from(self.header.refresh(ctx, dom)?);
        for cell in &mut self.cells {
            written += usize::from(cell.refresh(ctx, dom)?);
        }
        Ok(written)
    }
}

#[derive(Debug, Clone)]
pub struct TableComponent {
    columns: Vec<ColumnReference>,
    rows: Vec<RowReference>,
    select_all: HeaderComponent,
    column_headers: Vec<HeaderComponent>,
    row_components: Vec<RowComponent>,
    rebuilds: usize,
}

impl Default for TableComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl TableComponent {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            select_all: HeaderComponent::new(HeaderTarget::SelectAll),
            column_headers: Vec::new(),
            row_components: Vec::new(),
            rebuilds: 0,
        }
    }

    pub fn columns(&self) -> &[ColumnReference] {
        &self.columns
    }

    pub fn rows(&self) -> &[RowReference] {
        &self.rows
    }

    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    pub fn row_components(&self) -> &[RowComponent] {
        &self.row_components
    }

    pub fn column_headers(&self) -> &[HeaderComponent] {
        &self.column_headers
    }

    pub fn select_all(&self) -> &HeaderComponent {
        &self.select_all
    }

    pub fn cell(&self, reference: CellReference) -> Option<&CellComponent> {
        self.row_components
            .iter()
            .flat_map(|row| row.cells.iter())
            .find(|cell| cell.reference() == reference)
    }

    /// Render the table for `rectangle`. The DOM structure is rebuilt only
    /// when the visible column or row list changed; otherwise existing
    /// components refresh in place. Returns how many components wrote.
    pub fn refresh(
        &mut self,
        rectangle: &ViewportRectangle,
        ctx: &RenderContext<'_>,
        dom: &mut impl DomBackend,
    ) -> Result<usize> {
        let columns = rectangle.visible_columns(ctx.cache);
        let rows = rectangle.visible_rows(ctx.cache);

        if columns != self.columns || rows != self.rows {
            log::debug!(
                "table: rebuild {} columns x {} rows from {}",
                columns.len(),
                rows.len(),
                rectangle.home
            );
            dom.rebuild_table(&columns, &rows)?;
            self.select_all = HeaderComponent::new(HeaderTarget::SelectAll);
            self.column_headers = columns
                .iter()
                .map(|c| HeaderComponent::new(HeaderTarget::Column(*c)))
                .collect();
            self.row_components = rows.iter().map(|r| RowComponent::new(*r, &columns)).collect();
            self.columns = columns;
            self.rows = rows;
            self.rebuilds += 1;
        }

        let mut written = usize::from(self.select_all.refresh(ctx, dom)?);
        for header in &mut self.column_headers {
            written += usize::from(header.refresh(ctx, dom)?);
        }
        for row in &mut self.row_components {
            written += row.refresh(ctx, dom)?;
        }
        Ok(written)
    }
}
