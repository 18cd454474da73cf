//! `ViewportComponent`: orchestrates fetching, caching and rendering.
//!
//! The component owns the [`ViewportCache`], the render tree and a
//! [`DomBackend`]. External events (resize, navigation, history token
//! changes, fetch completions) arrive through its methods; every handler
//! runs to completion synchronously.
//!
//! # State
//!
//! - `reload`: more cells may be needed. Set by growth, navigation, failed
//!   fetches and metadata loads; cleared once a cells request is accepted.
//! - `waiting`: cells requests in flight. At most one is issued at a time,
//!   so bursts of resizes and navigations coalesce into one round trip.
//! - `generation`: stamp of the latest cells request. Responses carrying
//!   another stamp are dropped, as are all responses issued before the
//!   spreadsheet changed.
//! - `navigations`: navigations not yet sent. They are applied locally at
//!   once and replayed by the server against `navigation_base`. While any
//!   are pending, the viewport carried by older responses is ignored.
//! - `metadata_request`: the spreadsheet whose metadata was last requested.
//!   Metadata for any other spreadsheet arriving meanwhile is dropped.
//!
//! A load is issued only when nothing is waiting, `reload` is set, the grid
//! has area and metadata has arrived.

mod events;
mod scroll;
mod services;

#[cfg(target_arch = "wasm32")]
mod web;

pub use scroll::{ScrollbarAxis, ScrollbarComponent};
pub use services::{
    CellsFetcher, CellsRequest, FormatterMenuFetcher, HistoryTokenSink, MetadataFetcher,
    ViewportServices,
};

#[cfg(target_arch = "wasm32")]
pub use web::WebViewport;

use crate::cache::ViewportCache;
use crate::config::ViewportConfig;
use crate::error::Result;
use crate::history::{HistoryToken, TokenAction};
use crate::layout::{navigate, Navigation, Viewport, ViewportRectangle};
use crate::render::{
    ids, ContextMenuItem, DomBackend, FormulaComponent, RenderContext, TableComponent,
};
use crate::types::{
    Anchor, AnchoredSelection, SelectionSummary, SpreadsheetDelta, SpreadsheetId,
    SpreadsheetMetadata,
};

pub struct ViewportComponent<D: DomBackend> {
    dom: D,
    services: ViewportServices,
    config: ViewportConfig,
    cache: ViewportCache,
    metadata: SpreadsheetMetadata,
    metadata_loaded: bool,
    metadata_request: Option<SpreadsheetId>,
    table: TableComponent,
    formula: FormulaComponent,
    horizontal: ScrollbarComponent,
    vertical: ScrollbarComponent,
    /// Outer size in pixels, chrome included.
    width: f64,
    height: f64,
    /// Home plus grid size.
    rectangle: ViewportRectangle,
    reload: bool,
    waiting: u32,
    generation: u64,
    navigations: Vec<Navigation>,
    /// Viewport the unsent navigations start from.
    navigation_base: Option<Viewport>,
    history: HistoryToken,
    shift_key_down: bool,
    summary: SelectionSummary,
}

impl<D: DomBackend> ViewportComponent<D> {
    pub fn new(dom: D, services: ViewportServices, config: ViewportConfig) -> Self {
        Self {
            dom,
            services,
            config,
            cache: ViewportCache::new(),
            metadata: SpreadsheetMetadata::default(),
            metadata_loaded: false,
            metadata_request: None,
            table: TableComponent::new(),
            formula: FormulaComponent::new(),
            horizontal: ScrollbarComponent::new(ScrollbarAxis::Horizontal),
            vertical: ScrollbarComponent::new(ScrollbarAxis::Vertical),
            width: 0.0,
            height: 0.0,
            rectangle: ViewportRectangle::default(),
            reload: false,
            waiting: 0,
            generation: 0,
            navigations: Vec::new(),
            navigation_base: None,
            history: HistoryToken::default(),
            shift_key_down: false,
            summary: SelectionSummary::EMPTY,
        }
    }

    pub fn spreadsheet_viewport_cache(&self) -> &ViewportCache {
        &self.cache
    }

    /// Common formatter, parser and style of the selected cells.
    pub fn selection_summary(&self) -> &SelectionSummary {
        &self.summary
    }

    pub fn history_token(&self) -> &HistoryToken {
        &self.history
    }

    pub fn metadata(&self) -> Option<&SpreadsheetMetadata> {
        self.metadata_loaded.then_some(&self.metadata)
    }

    pub fn rectangle(&self) -> ViewportRectangle {
        self.rectangle
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn table(&self) -> &TableComponent {
        &self.table
    }

    pub fn formula(&self) -> &FormulaComponent {
        &self.formula
    }

    pub fn scrollbar(&self, axis: ScrollbarAxis) -> &ScrollbarComponent {
        match axis {
            ScrollbarAxis::Horizontal => &self.horizontal,
            ScrollbarAxis::Vertical => &self.vertical,
        }
    }

    pub fn is_reload(&self) -> bool {
        self.reload
    }

    pub fn waiting_count(&self) -> u32 {
        self.waiting
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_navigations(&self) -> &[Navigation] {
        &self.navigations
    }

    pub fn is_shift_key_down(&self) -> bool {
        self.shift_key_down
    }

    /// Grid size left after headers, formula bar and scrollbars.
    fn grid_size(&self) -> (f64, f64) {
        let config = &self.config;
        let formula = if self.metadata.show_formula_editor {
            config.formula_bar_height
        } else {
            0.0
        };
        (
            (self.width - config.row_header_width - config.scrollbar_size).max(0.0),
            (self.height - config.column_header_height - formula - config.scrollbar_size).max(0.0),
        )
    }

    fn apply_grid_size(&mut self) -> bool {
        let (width, height) = self.grid_size();
        let grew = width > self.rectangle.width || height > self.rectangle.height;
        self.rectangle.width = width;
        self.rectangle.height = height;
        grew
    }

    /// New outer size. Growth may reveal uncached cells, so it requests a load.
    pub fn set_width_and_height(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        if self.apply_grid_size() {
            self.reload = true;
        }
        self.render_logged();
        self.load_viewport_cells_if_necessary();
    }

    /// Apply `navigation` locally and queue it for the next cells request.
    pub fn on_navigation(&mut self, navigation: Navigation) {
        log::debug!("viewport: navigation {navigation}");
        let selection = self.resolved_selection_logged();
        let current = Viewport::new(self.rectangle, selection);
        if self.navigations.is_empty() {
            self.navigation_base = Some(Viewport::new(
                self.rectangle,
                self.history.selection.clone(),
            ));
        }
        let next = navigate(&current, &navigation, &self.cache);
        self.navigations.push(navigation);
        self.reload = true;
        self.rectangle = next.rectangle;

        if next.selection != current.selection {
            self.push_selection(next.selection);
        } else {
            self.render_logged();
        }
        self.load_viewport_cells_if_necessary();
    }

    /// Request cells for the current viewport regardless of `reload`.
    pub fn load_viewport_cells(&mut self) {
        self.reload = true;
        self.load_viewport_cells_if_necessary();
    }

    pub fn load_viewport_cells_if_necessary(&mut self) {
        if self.waiting > 0 {
            log::debug!("viewport: load deferred, {} request(s) waiting", self.waiting);
            return;
        }
        if !self.reload || !self.rectangle.has_area() || !self.metadata_loaded {
            return;
        }
        let Some(spreadsheet_id) = self.metadata.id.or_else(|| self.history.spreadsheet_id())
        else {
            log::debug!("viewport: load skipped, no spreadsheet");
            return;
        };

        let (rectangle, selection) = match &self.navigation_base {
            Some(base) if !self.navigations.is_empty() => (
                ViewportRectangle {
                    width: self.rectangle.width,
                    height: self.rectangle.height,
                    ..base.rectangle
                },
                base.selection.clone(),
            ),
            _ => (self.rectangle, self.history.selection.clone()),
        };
        let request = CellsRequest {
            generation: self.generation + 1,
            spreadsheet_id,
            rectangle,
            selection,
            navigations: self.navigations.clone(),
        };

        match self.services.cells.load_cells(request) {
            Ok(()) => {
                self.generation += 1;
                self.waiting += 1;
                self.reload = false;
                self.navigations.clear();
                self.navigation_base = None;
                log::debug!("viewport: cells request {} sent", self.generation);
            }
            Err(e) => log::warn!("viewport: cells request failed: {e}"),
        }
    }

    /// Completion of a cells request.
    pub fn on_cells_loaded(&mut self, generation: u64, result: Result<SpreadsheetDelta>) {
        if generation != self.generation {
            log::warn!(
                "viewport: dropping stale cells response {generation}, current {}",
                self.generation
            );
            return;
        }
        self.waiting = self.waiting.saturating_sub(1);

        let delta = match result {
            Ok(delta) => delta,
            Err(e) => {
                log::warn!("viewport: cells load failed: {e}");
                self.reload = true;
                return;
            }
        };
        self.cache.on_spreadsheet_delta(&delta);

        let local_moves = !self.navigations.is_empty();
        if local_moves && delta.viewport.is_some() {
            log::debug!(
                "viewport: keeping local viewport, {} navigation(s) not yet sent",
                self.navigations.len()
            );
        }
        if let Some(viewport) = delta.viewport.as_ref().filter(|_| !local_moves) {
            if viewport.home != self.rectangle.home {
                log::debug!(
                    "viewport: server moved home {} -> {}",
                    self.rectangle.home,
                    viewport.home
                );
                self.rectangle.home = viewport.home;
                if let Some(id) = self.metadata.id {
                    self.load_metadata(id);
                }
            }
            if viewport.selection != self.history.selection {
                self.push_selection(viewport.selection.clone());
            }
        }

        self.summary = self.compute_summary();
        self.render_logged();
        self.load_viewport_cells_if_necessary();
    }

    /// Completion of a metadata request.
    pub fn on_metadata_loaded(&mut self, result: Result<SpreadsheetMetadata>) {
        let metadata = match result {
            Ok(metadata) => metadata,
            Err(e) => {
                log::warn!("viewport: metadata load failed: {e}");
                self.reload = true;
                return;
            }
        };
        if let Some(requested) = self.metadata_request {
            if metadata.id != Some(requested) {
                log::warn!(
                    "viewport: dropping metadata for another spreadsheet, waiting for {requested}"
                );
                return;
            }
        }
        self.metadata_request = None;

        if self.metadata_loaded && metadata.id != self.metadata.id {
            log::debug!("viewport: spreadsheet changed, clearing cache");
            self.cache.clear();
            self.generation += 1;
            self.waiting = 0;
            self.navigations.clear();
            self.navigation_base = None;
        }
        self.cache.on_spreadsheet_metadata(&metadata);

        let mut token = self.history.clone();
        if let Some(id) = metadata.id {
            if token.spreadsheet_id() != Some(id) {
                token = HistoryToken::spreadsheet(id, &metadata.name);
            }
        }
        if let Some(viewport) = &metadata.viewport {
            self.rectangle.home = viewport.home;
            if token.selection.is_none() && viewport.selection.is_some() {
                token = token.with_selection(viewport.selection.clone());
            }
        }
        if token != self.history {
            self.services.history.push_history_token(token.clone());
            self.history = token;
        }

        self.metadata = metadata;
        self.metadata_loaded = true;
        self.apply_grid_size();
        self.reload = true;
        self.summary = self.compute_summary();
        self.render_logged();
        self.load_viewport_cells_if_necessary();
    }

    /// React to the application state changing.
    ///
    /// A new spreadsheet requests its metadata; a new selection re-renders
    /// and focuses the selected element; a `menu` action requests the
    /// formatter menu.
    pub fn on_history_token(&mut self, token: HistoryToken) {
        if token == self.history {
            return;
        }
        let previous = std::mem::replace(&mut self.history, token);

        if self.history.spreadsheet_id() != previous.spreadsheet_id() {
            if let Some(id) = self.history.spreadsheet_id() {
                self.load_metadata(id);
            }
            return;
        }

        let selection_changed = self.history.selection != previous.selection;
        if selection_changed {
            self.on_selection_changed();
        }
        if selection_changed || self.history.action != previous.action {
            match self.history.action {
                TokenAction::Menu => self.request_formatter_menu(),
                _ if previous.action == TokenAction::Menu => {
                    if let Err(e) = self.dom.hide_context_menu() {
                        log::warn!("viewport: hide context menu: {e}");
                    }
                }
                _ => {}
            }
        }
    }

    /// Completion of a formatter menu request; shown next to the selection.
    pub fn on_formatter_menu_loaded(&mut self, result: Result<Vec<ContextMenuItem>>) {
        if self.history.action != TokenAction::Menu {
            log::debug!("viewport: formatter menu arrived after the menu closed");
            return;
        }
        let items = match result {
            Ok(items) => items,
            Err(e) => {
                log::warn!("viewport: formatter menu load failed: {e}");
                return;
            }
        };
        let Some(anchor) = self
            .resolved_selection_logged()
            .as_ref()
            .and_then(ids::selection_id)
        else {
            return;
        };
        if let Err(e) = self.dom.show_context_menu(&anchor, &items) {
            log::warn!("viewport: show context menu: {e}");
        }
    }

    /// Render the whole tree. Components write only what changed.
    ///
    /// # Errors
    /// Returns the first DOM failure.
    pub fn render(&mut self) -> Result<()> {
        if !self.metadata_loaded || !self.rectangle.has_area() {
            return Ok(());
        }
        let selection = self.resolved_selection_logged();
        let ctx = RenderContext {
            cache: &self.cache,
            metadata: &self.metadata,
            config: &self.config,
            selection: selection.as_ref(),
            history: &self.history,
            shift_key_down: self.shift_key_down,
        };
        let written = self.table.refresh(&self.rectangle, &ctx, &mut self.dom)?;
        self.formula.refresh(&ctx, &mut self.dom)?;
        self.horizontal
            .refresh(&self.rectangle, &self.cache, &self.metadata, &mut self.dom)?;
        self.vertical
            .refresh(&self.rectangle, &self.cache, &self.metadata, &mut self.dom)?;
        log::debug!("viewport: rendered, {written} table component(s) written");
        Ok(())
    }

    fn render_logged(&mut self) {
        if let Err(e) = self.render() {
            log::warn!("viewport: render failed: {e}");
        }
    }

    /// The history selection with labels resolved through the cache.
    ///
    /// # Errors
    /// Returns [`crate::error::SheetviewError::Argument`] when the selection
    /// is a label the cache cannot resolve.
    pub fn resolved_selection(&self) -> Result<Option<AnchoredSelection>> {
        let Some(selection) = &self.history.selection else {
            return Ok(None);
        };
        if !selection.selection.is_label() {
            return Ok(Some(selection.clone()));
        }
        let resolved = self
            .cache
            .require_non_label_selection(&selection.selection)?;
        let anchor = match selection.anchor {
            Anchor::None => resolved.default_anchor(),
            anchor => anchor,
        };
        Ok(Some(AnchoredSelection::new(resolved, anchor)))
    }

    fn resolved_selection_logged(&self) -> Option<AnchoredSelection> {
        self.resolved_selection().unwrap_or_else(|e| {
            log::debug!("viewport: {e}");
            None
        })
    }

    fn compute_summary(&self) -> SelectionSummary {
        self.resolved_selection_logged()
            .map_or(SelectionSummary::EMPTY, |s| {
                self.cache.selection_summary(&s.selection)
            })
    }

    /// Publish `selection` and react to it as to any other token change.
    fn push_selection(&mut self, selection: Option<AnchoredSelection>) {
        let token = self.history.with_selection(selection);
        self.services.history.push_history_token(token.clone());
        self.on_history_token(token);
    }

    fn on_selection_changed(&mut self) {
        self.summary = self.compute_summary();
        self.render_logged();
        let Some(id) = self
            .resolved_selection_logged()
            .as_ref()
            .and_then(ids::selection_id)
        else {
            return;
        };
        if let Err(e) = self.dom.focus(&id) {
            log::debug!("viewport: focus {id}: {e}");
        }
    }

    fn request_formatter_menu(&mut self) {
        let Some(selection) = self.resolved_selection_logged() else {
            return;
        };
        if let Err(e) = self
            .services
            .formatter_menu
            .load_formatter_menu(selection.selection)
        {
            log::warn!("viewport: formatter menu request failed: {e}");
        }
    }

    fn load_metadata(&mut self, id: SpreadsheetId) {
        match self.services.metadata.load_metadata(id) {
            Ok(()) => self.metadata_request = Some(id),
            Err(e) => {
                log::warn!("viewport: metadata request failed: {e}");
                self.reload = true;
            }
        }
    }
}
