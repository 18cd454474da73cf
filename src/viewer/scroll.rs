//! Scrollbar state for the viewport.
//!
//! Scrollbars are positioned in whole columns and rows: the value is the
//! home column (or row) and the maximum is the populated extent, widened to
//! include whatever is currently visible.

use crate::cache::ViewportCache;
use crate::error::Result;
use crate::layout::ViewportRectangle;
use crate::render::{ids, DomBackend};
use crate::types::SpreadsheetMetadata;

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollbarView {
    value: f64,
    max: f64,
    visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollbarAxis {
    Horizontal,
    Vertical,
}

impl ScrollbarAxis {
    fn id(self) -> &'static str {
        match self {
            Self::Horizontal => ids::HORIZONTAL_SCROLLBAR_ID,
            Self::Vertical => ids::VERTICAL_SCROLLBAR_ID,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrollbarComponent {
    axis: ScrollbarAxis,
    view: Option<ScrollbarView>,
}

impl ScrollbarComponent {
    pub fn new(axis: ScrollbarAxis) -> Self {
        Self { axis, view: None }
    }

    /// `(value, max, visible)` as last written.
    pub fn position(&self) -> Option<(f64, f64, bool)> {
        self.view.map(|v| (v.value, v.max, v.visible))
    }

    fn compute(
        &self,
        rectangle: &ViewportRectangle,
        cache: &ViewportCache,
        metadata: &SpreadsheetMetadata,
    ) -> ScrollbarView {
        let (home, visible, count) = match self.axis {
            ScrollbarAxis::Horizontal => (
                rectangle.home.column().value(),
                rectangle.visible_columns(cache).len(),
                cache.column_count(),
            ),
            ScrollbarAxis::Vertical => (
                rectangle.home.row().value(),
                rectangle.visible_rows(cache).len(),
                cache.row_count(),
            ),
        };
        let shown_end = u64::from(home) + visible as u64;
        let max = u64::from(count.unwrap_or(0)).max(shown_end);
        // Auto-hidden scrollbars only show when there is something to scroll to.
        let scrollable = home > 0 || max > shown_end;
        ScrollbarView {
            value: f64::from(home),
            max: max as f64,
            visible: !metadata.auto_hide_scrollbars || scrollable,
        }
    }

    pub fn refresh(
        &mut self,
        rectangle: &ViewportRectangle,
        cache: &ViewportCache,
        metadata: &SpreadsheetMetadata,
        dom: &mut impl DomBackend,
    ) -> Result<bool> {
        let view = self.compute(rectangle, cache, metadata);
        if self.view == Some(view) {
            return Ok(false);
        }
        dom.set_scrollbar(self.axis.id(), view.value, view.max, view.visible)?;
        self.view = Some(view);
        Ok(true)
    }
}
