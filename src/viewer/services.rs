//! Collaborators of the viewport, one capability trait each.
//!
//! Fetchers are fire-and-forget: they return once the request is issued and
//! deliver the response later through the matching `on_*_loaded` method of
//! [`super::ViewportComponent`]. An `Err` means the request was never sent.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::history::HistoryToken;
use crate::layout::{Navigation, ViewportRectangle};
use crate::types::{AnchoredSelection, Selection, SpreadsheetId};

/// A viewport cells load. `navigations` are applied by the server, in
/// order, to `rectangle` and `selection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellsRequest {
    /// Echoed back with the response; stale generations are dropped.
    pub generation: u64,
    pub spreadsheet_id: SpreadsheetId,
    pub rectangle: ViewportRectangle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<AnchoredSelection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub navigations: Vec<Navigation>,
}

pub trait CellsFetcher {
    fn load_cells(&self, request: CellsRequest) -> Result<()>;
}

pub trait MetadataFetcher {
    fn load_metadata(&self, id: SpreadsheetId) -> Result<()>;
}

pub trait FormatterMenuFetcher {
    fn load_formatter_menu(&self, selection: Selection) -> Result<()>;
}

pub trait HistoryTokenSink {
    fn push_history_token(&self, token: HistoryToken);
}

pub struct ViewportServices {
    pub cells: Box<dyn CellsFetcher>,
    pub metadata: Box<dyn MetadataFetcher>,
    pub formatter_menu: Box<dyn FormatterMenuFetcher>,
    pub history: Box<dyn HistoryTokenSink>,
}
