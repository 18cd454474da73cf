//! Column, row and select-all headers.
//!
//! Headers style themselves like cells, keyed by column or row. Each also
//! carries a link whose target depends on the shift key: plain links select
//! the header, extend links grow the current selection up to it.

use super::backend::DomBackend;
use super::{ids, ComponentState, RenderContext};
use crate::error::Result;
use crate::layout::{extend_to_column, extend_to_row};
use crate::types::{AnchoredSelection, CellRange, ColumnReference, RowReference, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderTarget {
    Column(ColumnReference),
    Row(RowReference),
    SelectAll,
}

impl HeaderTarget {
    pub fn id(self) -> String {
        match self {
            Self::Column(column) => ids::column_id(column),
            Self::Row(row) => ids::row_id(row),
            Self::SelectAll => ids::SELECT_ALL_ID.to_string(),
        }
    }

    fn is_selected(self, selection: Option<&Selection>) -> bool {
        let Some(selection) = selection else {
            return false;
        };
        match self {
            Self::Column(column) => selection.test_column(column),
            Self::Row(row) => selection.test_row(row),
            Self::SelectAll => *selection == Selection::CellRange(CellRange::all()),
        }
    }

    /// The selection the header link leads to.
    pub fn link_target(
        self,
        current: Option<&AnchoredSelection>,
        extend: bool,
    ) -> AnchoredSelection {
        match (self, extend) {
            (Self::Column(column), true) => extend_to_column(current, column),
            (Self::Row(row), true) => extend_to_row(current, row),
            (Self::Column(column), false) => AnchoredSelection::with_default_anchor(column.into()),
            (Self::Row(row), false) => AnchoredSelection::with_default_anchor(row.into()),
            (Self::SelectAll, _) => {
                AnchoredSelection::with_default_anchor(Selection::CellRange(CellRange::all()))
            }
        }
    }

    fn text(self) -> String {
        match self {
            Self::Column(column) => column.to_string(),
            Self::Row(row) => row.to_string(),
            Self::SelectAll => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub css: String,
    pub text: String,
    pub link: String,
}

#[derive(Debug, Clone)]
pub struct HeaderComponent {
    target: HeaderTarget,
    id: String,
    state: ComponentState,
    view: Option<HeaderView>,
}

impl HeaderComponent {
    pub fn new(target: HeaderTarget) -> Self {
        Self {
            target,
            id: target.id(),
            state: ComponentState::Uninitialized,
            view: None,
        }
    }

    pub fn target(&self) -> HeaderTarget {
        self.target
    }

    pub fn state(&self) -> ComponentState {
        self.state
    }

    pub fn view(&self) -> Option<&HeaderView> {
        self.view.as_ref()
    }

    fn compute(&self, ctx: &RenderContext<'_>) -> (bool, HeaderView) {
        let config = ctx.config;
        let styles = &config.styles;
        let selected = self.target.is_selected(ctx.selection());

        let (base, highlight, width, height) = match self.target {
            HeaderTarget::Column(column) => (
                &styles.column_header,
                &styles.selected_column_header,
                ctx.cache.column_width(column),
                config.column_header_height,
            ),
            HeaderTarget::Row(row) => (
                &styles.row_header,
                &styles.selected_row_header,
                config.row_header_width,
                ctx.cache.row_height(row),
            ),
            HeaderTarget::SelectAll => (
                &styles.column_header,
                &styles.selected_column_header,
                config.row_header_width,
                config.column_header_height,
            ),
        };
        let style = if selected { base.merge(highlight) } else { base.clone() };

        let target = self.target.link_target(ctx.selection, ctx.shift_key_down);
        let link = format!("#{}", ctx.history.with_selection(Some(target)));

        (
            selected,
            HeaderView {
                css: style.with_size(width, height).css_text(),
                text: self.target.text(),
                link,
            },
        )
    }

    /// Recompute and write whatever changed. Returns whether the DOM was touched.
    pub fn refresh(&mut self, ctx: &RenderContext<'_>, dom: &mut impl DomBackend) -> Result<bool> {
        let (selected, view) = self.compute(ctx);
        self.state = ComponentState::from_selected(selected);

        let previous = self.view.as_ref();
        let mut wrote = false;
        if previous.map(|p| &p.css) != Some(&view.css) {
            dom.set_style(&self.id, &view.css)?;
            wrote = true;
        }
        if previous.map(|p| &p.text) != Some(&view.text) {
            dom.set_text(&self.id, &view.text)?;
            wrote = true;
        }
        if previous.map(|p| &p.link) != Some(&view.link) {
            dom.set_link(&self.id, &view.link)?;
            wrote = true;
        }

        self.view = Some(view);
        Ok(wrote)
    }
}
