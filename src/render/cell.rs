//! A single table cell.

use super::backend::DomBackend;
use super::{ids, ComponentState, RenderContext};
use crate::error::Result;
use crate::types::CellReference;

#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Text(String),
    /// Validation choices, shown only while the cell is selected.
    Chooser { choices: Vec<String>, selected: String },
}

/// Computed output of a cell; compared against the previous one to decide
/// which DOM writes are needed.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub css: String,
    pub content: CellContent,
    pub tooltip: Option<String>,
}

impl CellView {
    /// Compute the view of `reference`, returning whether it is selected.
    ///
    /// Style layers, later wins: viewport cell style and spreadsheet style,
    /// selected-cell style, the cell's own style and formatted style,
    /// hide-zero style, show-formulas style. Width and height always come
    /// from the cache.
    pub fn compute(reference: CellReference, ctx: &RenderContext<'_>) -> (bool, Self) {
        let styles = &ctx.config.styles;
        let selected = ctx.selection().is_some_and(|s| s.test_cell(reference));

        let mut style = styles.cell.merge(&ctx.metadata.style);
        if !ctx.metadata.show_grid_lines {
            style = style.set("border", "none");
        }
        if selected {
            style = style.merge(&styles.selected_cell);
        }

        let mut text = String::new();
        let mut tooltip = None;
        let mut choices = None;
        if let Some(cell) = ctx.cache.cell(reference) {
            style = style.merge(&cell.style);
            if let Some(node) = &cell.formatted_value {
                style = style.merge(&node.style);
                tooltip = node.badge.clone();
            }
            text = cell.formatted_text().to_string();
            if ctx.metadata.hide_zero_values && cell.is_zero() {
                style = style.merge(&styles.hide_zero);
                text.clear();
            }
            if ctx.metadata.show_formulas {
                style = style.merge(&styles.show_formulas);
                text.clone_from(&cell.formula.text);
            }
            if tooltip.is_none() {
                tooltip = cell.formula.error.as_ref().map(|e| e.message.clone());
            }
            choices = cell
                .validation_choices
                .as_ref()
                .filter(|choices| selected && !choices.is_empty());
        }

        let css = style
            .with_size(
                ctx.cache.column_width(reference.column()),
                ctx.cache.row_height(reference.row()),
            )
            .css_text();
        let content = match choices {
            Some(choices) => CellContent::Chooser {
                choices: choices.clone(),
                selected: text,
            },
            None => CellContent::Text(text),
        };
        (
            selected,
            Self {
                css,
                content,
                tooltip,
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct CellComponent {
    reference: CellReference,
    id: String,
    state: ComponentState,
    view: Option<CellView>,
}

impl CellComponent {
    pub fn new(reference: CellReference) -> Self {
        Self {
            reference,
            id: ids::cell_id(reference),
            state: ComponentState::Uninitialized,
            view: None,
        }
    }

    pub fn reference(&self) -> CellReference {
        self.reference
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> ComponentState {
        self.state
    }

    pub fn view(&self) -> Option<&CellView> {
        self.view.as_ref()
    }

    /// Recompute and write whatever changed. Returns whether the DOM was touched.
    pub fn refresh(&mut self, ctx: &RenderContext<'_>, dom: &mut impl DomBackend) -> Result<bool> {
        let (selected, view) = CellView::compute(self.reference, ctx);
        self.state = ComponentState::from_selected(selected);

        let previous = self.view.as_ref();
        let mut wrote = false;
        if previous.map(|p| &p.css) != Some(&view.css) {
            dom.set_style(&self.id, &view.css)?;
            wrote = true;
        }
        if previous.map(|p| &p.content) != Some(&view.content) {
            match &view.content {
                CellContent::Text(text) => dom.set_text(&self.id, text)?,
                CellContent::Chooser { choices, selected } => {
                    dom.set_chooser(&self.id, choices, selected)?;
                }
            }
            wrote = true;
        }
        // a fresh element has no tooltip to detach
        let previous_tooltip = previous.and_then(|p| p.tooltip.as_ref());
        if previous_tooltip != view.tooltip.as_ref() {
            dom.set_tooltip(&self.id, view.tooltip.as_deref())?;
            wrote = true;
        }

        self.view = Some(view);
        Ok(wrote)
    }
}
