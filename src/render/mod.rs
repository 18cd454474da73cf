//! Incremental render tree for the viewport table.
//!
//! This module provides:
//! - The [`DomBackend`] trait and its in-memory and browser implementations
//! - Cell, header and formula bar components that diff their own output
//! - [`TableComponent`], which only rebuilds structure when the visible
//!   columns or rows change
//!
//! # Component state machine
//!
//! Every cell and header component starts [`ComponentState::Uninitialized`].
//! Each `refresh` evaluates the selection predicate against the
//! label-resolved selection and moves to `Selected` or `Unselected`:
//!
//! ```text
//! Uninitialized --refresh--> Unselected <--refresh--> Selected
//!              \--refresh-------------------------------^
//! ```
//!
//! Only the first refresh writes unconditionally; later refreshes write the
//! parts of the view that changed.

pub mod backend;
pub mod cell;
pub mod formula;
pub mod header;
pub mod ids;
pub mod memory;
pub mod table;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use backend::{ContextMenuItem, DomBackend};
pub use cell::{CellComponent, CellContent, CellView};
pub use formula::FormulaComponent;
pub use header::{HeaderComponent, HeaderTarget};
pub use memory::{ElementState, MemoryDom};
pub use table::{RowComponent, TableComponent};

#[cfg(target_arch = "wasm32")]
pub use web::WebDom;

use crate::cache::ViewportCache;
use crate::config::ViewportConfig;
use crate::history::HistoryToken;
use crate::types::{AnchoredSelection, Selection, SpreadsheetMetadata};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComponentState {
    /// Nothing written yet.
    #[default]
    Uninitialized,
    Unselected,
    Selected,
}

impl ComponentState {
    pub fn from_selected(selected: bool) -> Self {
        if selected {
            Self::Selected
        } else {
            Self::Unselected
        }
    }

    pub fn is_selected(self) -> bool {
        self == Self::Selected
    }
}

/// Everything a component reads during `refresh`.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub cache: &'a ViewportCache,
    pub metadata: &'a SpreadsheetMetadata,
    pub config: &'a ViewportConfig,
    /// Current selection with labels already resolved through the cache.
    pub selection: Option<&'a AnchoredSelection>,
    /// Base for header link targets.
    pub history: &'a HistoryToken,
    pub shift_key_down: bool,
}

impl RenderContext<'_> {
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.map(|s| &s.selection)
    }
}
