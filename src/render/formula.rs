//! Formula bar: the formula text of a single selected cell.

use super::backend::DomBackend;
use super::{ids, RenderContext};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
struct FormulaView {
    css: String,
    text: String,
    disabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FormulaComponent {
    view: Option<FormulaView>,
}

impl FormulaComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently shown, if rendered.
    pub fn text(&self) -> Option<&str> {
        self.view.as_ref().map(|v| v.text.as_str())
    }

    pub fn is_disabled(&self) -> bool {
        self.view.as_ref().map_or(true, |v| v.disabled)
    }

    fn compute(ctx: &RenderContext<'_>) -> FormulaView {
        let mut style = ctx.config.styles.formula.clone();
        if !ctx.metadata.show_formula_editor {
            style = style.set("display", "none");
        }
        let cell = ctx.selection().and_then(|s| s.as_cell());
        let text = cell
            .and_then(|c| ctx.cache.cell(c))
            .map(|c| c.formula.text.clone())
            .unwrap_or_default();
        FormulaView {
            css: style.css_text(),
            text,
            disabled: cell.is_none(),
        }
    }

    pub fn refresh(&mut self, ctx: &RenderContext<'_>, dom: &mut impl DomBackend) -> Result<bool> {
        let view = Self::compute(ctx);
        let previous = self.view.as_ref();
        let mut wrote = false;
        if previous.map(|p| &p.css) != Some(&view.css) {
            dom.set_style(ids::FORMULA_ID, &view.css)?;
            wrote = true;
        }
        if previous.map(|p| &p.text) != Some(&view.text) {
            dom.set_text(ids::FORMULA_ID, &view.text)?;
            wrote = true;
        }
        if previous.map(|p| p.disabled) != Some(view.disabled) {
            dom.set_disabled(ids::FORMULA_ID, view.disabled)?;
            wrote = true;
        }
        self.view = Some(view);
        Ok(wrote)
    }
}
