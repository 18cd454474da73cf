//! Keyboard, wheel and click handlers for `ViewportComponent`.
//!
//! Each handler maps the raw event onto a [`Navigation`] or a history token
//! change and returns whether the event was consumed.

use super::ViewportComponent;
use crate::history::TokenAction;
use crate::layout::Navigation;
use crate::render::DomBackend;
use crate::types::{CellReference, ColumnReference, RowReference};

impl<D: DomBackend> ViewportComponent<D> {
    /// Header links depend on the shift key; re-render when it flips.
    pub fn set_shift_key_down(&mut self, shift: bool) {
        if self.shift_key_down != shift {
            self.shift_key_down = shift;
            self.render_logged();
        }
    }

    pub fn on_key_down(&mut self, key: &str, shift: bool) -> bool {
        self.set_shift_key_down(shift);
        let navigation = match (key, shift) {
            ("ArrowLeft", false) => Navigation::Left,
            ("ArrowRight", false) => Navigation::Right,
            ("ArrowUp", false) => Navigation::Up,
            ("ArrowDown", false) => Navigation::Down,
            ("ArrowLeft", true) => Navigation::ExtendLeft,
            ("ArrowRight", true) => Navigation::ExtendRight,
            ("ArrowUp", true) => Navigation::ExtendUp,
            ("ArrowDown", true) => Navigation::ExtendDown,
            ("PageUp", _) => Navigation::ScrollUp(self.rectangle.height),
            ("PageDown", _) => Navigation::ScrollDown(self.rectangle.height),
            ("Home", _) => Navigation::Home,
            ("Escape", _) if self.history.action != TokenAction::None => {
                self.close_action();
                return true;
            }
            _ => return false,
        };
        self.on_navigation(navigation);
        true
    }

    pub fn on_key_up(&mut self, _key: &str, shift: bool) {
        self.set_shift_key_down(shift);
    }

    /// Wheel deltas in pixels; positive is right/down.
    pub fn on_wheel(&mut self, delta_x: f64, delta_y: f64) -> bool {
        let mut handled = false;
        if delta_x > 0.0 {
            self.on_navigation(Navigation::ScrollRight(delta_x));
            handled = true;
        } else if delta_x < 0.0 {
            self.on_navigation(Navigation::ScrollLeft(-delta_x));
            handled = true;
        }
        if delta_y > 0.0 {
            self.on_navigation(Navigation::ScrollDown(delta_y));
            handled = true;
        } else if delta_y < 0.0 {
            self.on_navigation(Navigation::ScrollUp(-delta_y));
            handled = true;
        }
        handled
    }

    /// A click on a cell selects it, or extends to it with shift held.
    pub fn on_cell_click(&mut self, cell: CellReference, shift: bool) {
        self.set_shift_key_down(shift);
        self.on_navigation(if shift {
            Navigation::ExtendToCell(cell)
        } else {
            Navigation::SelectCell(cell)
        });
    }

    pub fn on_column_click(&mut self, column: ColumnReference, shift: bool) {
        self.set_shift_key_down(shift);
        self.on_navigation(if shift {
            Navigation::ExtendToColumn(column)
        } else {
            Navigation::SelectColumn(column)
        });
    }

    pub fn on_row_click(&mut self, row: RowReference, shift: bool) {
        self.set_shift_key_down(shift);
        self.on_navigation(if shift {
            Navigation::ExtendToRow(row)
        } else {
            Navigation::SelectRow(row)
        });
    }

    /// Open the formatter menu on the current selection.
    pub fn on_context_menu(&mut self) {
        if self.history.selection.is_none() {
            return;
        }
        let token = self.history.with_action(TokenAction::Menu);
        self.services.history.push_history_token(token.clone());
        self.on_history_token(token);
    }

    fn close_action(&mut self) {
        let token = self.history.with_action(TokenAction::None);
        self.services.history.push_history_token(token.clone());
        self.on_history_token(token);
    }
}
