//! Browser DOM backend built on `web_sys`.
//!
//! The table skeleton lives inside a host-supplied container. The formula
//! input, scrollbars and context menu are host elements found by id.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlOptionElement};

use super::backend::{ContextMenuItem, DomBackend};
use super::ids;
use crate::error::{Result, SheetviewError};
use crate::types::{CellReference, ColumnReference, RowReference};

pub struct WebDom {
    document: Document,
    container: HtmlElement,
}

impl WebDom {
    pub fn new(container: HtmlElement) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| SheetviewError::Dom("no document".to_string()))?;
        Ok(Self {
            document,
            container,
        })
    }

    fn element(&self, id: &str) -> Result<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| SheetviewError::Dom(format!("missing element {id}")))
    }

    fn html_element(&self, id: &str) -> Result<HtmlElement> {
        self.element(id)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SheetviewError::Dom(format!("{id} is not an html element")))
    }

    /// A `th` with a focusable link child for header text and targets.
    fn header_cell(&self, id: &str) -> Result<Element> {
        let th = self.document.create_element("th")?;
        th.set_id(id);
        th.set_attribute("tabindex", "0")?;
        let link = self.document.create_element("a")?;
        link.set_id(&ids::link_id(id));
        th.append_child(&link)?;
        Ok(th)
    }
}

impl DomBackend for WebDom {
    fn rebuild_table(
        &mut self,
        columns: &[ColumnReference],
        rows: &[RowReference],
    ) -> Result<()> {
        let table = self.document.create_element("table")?;
        let _ = table.set_attribute("style", "border-collapse: collapse; table-layout: fixed;");

        let header = self.document.create_element("tr")?;
        header.append_child(&self.header_cell(ids::SELECT_ALL_ID)?)?;
        for column in columns {
            header.append_child(&self.header_cell(&ids::column_id(*column))?)?;
        }
        table.append_child(&header)?;

        for row in rows {
            let tr = self.document.create_element("tr")?;
            tr.append_child(&self.header_cell(&ids::row_id(*row))?)?;
            for column in columns {
                let td = self.document.create_element("td")?;
                td.set_id(&ids::cell_id(CellReference::new(*column, *row)));
                td.set_attribute("tabindex", "0")?;
                tr.append_child(&td)?;
            }
            table.append_child(&tr)?;
        }

        self.container.set_inner_html("");
        self.container.append_child(&table)?;
        Ok(())
    }

    fn set_style(&mut self, id: &str, css: &str) -> Result<()> {
        self.element(id)?.set_attribute("style", css)?;
        Ok(())
    }

    fn set_text(&mut self, id: &str, text: &str) -> Result<()> {
        let element = self.element(id)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(text);
        } else if let Some(link) = self.document.get_element_by_id(&ids::link_id(id)) {
            link.set_text_content(Some(text));
        } else {
            element.set_text_content(Some(text));
        }
        Ok(())
    }

    fn set_chooser(&mut self, id: &str, choices: &[String], selected: &str) -> Result<()> {
        let element = self.element(id)?;
        let select = self.document.create_element("select")?;
        for choice in choices {
            let option = HtmlOptionElement::new_with_text_and_value(choice, choice)?;
            option.set_selected(choice == selected);
            select.append_child(&option)?;
        }
        element.set_text_content(None);
        element.append_child(&select)?;
        Ok(())
    }

    fn set_tooltip(&mut self, id: &str, tooltip: Option<&str>) -> Result<()> {
        let element = self.element(id)?;
        match tooltip {
            Some(text) => element.set_attribute("title", text)?,
            None => element.remove_attribute("title")?,
        }
        Ok(())
    }

    fn set_link(&mut self, id: &str, href: &str) -> Result<()> {
        let link = self
            .document
            .get_element_by_id(&ids::link_id(id))
            .map_or_else(|| self.element(id), Ok)?;
        link.set_attribute("href", href)?;
        Ok(())
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) -> Result<()> {
        let element = self.element(id)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if disabled {
            element.set_attribute("disabled", "")?;
        } else {
            element.remove_attribute("disabled")?;
        }
        Ok(())
    }

    fn set_scrollbar(&mut self, id: &str, value: f64, max: f64, visible: bool) -> Result<()> {
        let element = self.html_element(id)?;
        element.set_attribute("max", &max.to_string())?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(&value.to_string());
        } else {
            element.set_attribute("value", &value.to_string())?;
        }
        element
            .style()
            .set_property("visibility", if visible { "visible" } else { "hidden" })?;
        Ok(())
    }

    fn focus(&mut self, id: &str) -> Result<()> {
        self.html_element(id)?.focus()?;
        Ok(())
    }

    fn show_context_menu(&mut self, anchor_id: &str, items: &[ContextMenuItem]) -> Result<()> {
        let rect = self.element(anchor_id)?.get_bounding_client_rect();
        let menu = self.html_element(ids::CONTEXT_MENU_ID)?;
        menu.set_inner_html("");
        for item in items {
            let entry = self.document.create_element("a")?;
            entry.set_text_content(Some(&item.label));
            entry.set_attribute("data-pattern", &item.pattern)?;
            menu.append_child(&entry)?;
        }
        let style = menu.style();
        style.set_property("left", &format!("{}px", rect.left()))?;
        style.set_property("top", &format!("{}px", rect.bottom()))?;
        style.set_property("display", "block")?;
        Ok(())
    }

    fn hide_context_menu(&mut self) -> Result<()> {
        self.html_element(ids::CONTEXT_MENU_ID)?
            .style()
            .set_property("display", "none")?;
        Ok(())
    }
}
