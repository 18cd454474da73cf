//! Selection movement, extension and scrolling.
//!
//! Everything here is a pure function of the current [`Viewport`], the
//! requested [`Navigation`] and a [`NavigationContext`]; callers resolve
//! labels before navigating.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Viewport, ViewportRectangle};
use crate::cache::ViewportCache;
use crate::types::{
    Anchor, AnchoredSelection, CellRange, CellReference, ColumnRange, ColumnReference, RowRange,
    RowReference, Selection,
};

/// Hidden-state and geometry lookups navigation needs.
pub trait NavigationContext {
    fn is_column_hidden(&self, column: ColumnReference) -> bool;
    fn is_row_hidden(&self, row: RowReference) -> bool;
    fn column_width(&self, column: ColumnReference) -> f64;
    fn row_height(&self, row: RowReference) -> f64;
}

impl NavigationContext for ViewportCache {
    fn is_column_hidden(&self, column: ColumnReference) -> bool {
        ViewportCache::is_column_hidden(self, column)
    }

    fn is_row_hidden(&self, row: RowReference) -> bool {
        ViewportCache::is_row_hidden(self, row)
    }

    fn column_width(&self, column: ColumnReference) -> f64 {
        ViewportCache::column_width(self, column)
    }

    fn row_height(&self, row: RowReference) -> f64 {
        ViewportCache::row_height(self, row)
    }
}

/// A requested viewport change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Navigation {
    Left,
    Right,
    Up,
    Down,
    ExtendLeft,
    ExtendRight,
    ExtendUp,
    ExtendDown,
    SelectCell(CellReference),
    SelectColumn(ColumnReference),
    SelectRow(RowReference),
    ExtendToCell(CellReference),
    ExtendToColumn(ColumnReference),
    ExtendToRow(RowReference),
    ScrollLeft(f64),
    ScrollRight(f64),
    ScrollUp(f64),
    ScrollDown(f64),
    Home,
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::ExtendLeft => f.write_str("extend-left"),
            Self::ExtendRight => f.write_str("extend-right"),
            Self::ExtendUp => f.write_str("extend-up"),
            Self::ExtendDown => f.write_str("extend-down"),
            Self::SelectCell(c) => write!(f, "select cell {c}"),
            Self::SelectColumn(c) => write!(f, "select column {c}"),
            Self::SelectRow(r) => write!(f, "select row {r}"),
            Self::ExtendToCell(c) => write!(f, "extend-to cell {c}"),
            Self::ExtendToColumn(c) => write!(f, "extend-to column {c}"),
            Self::ExtendToRow(r) => write!(f, "extend-to row {r}"),
            Self::ScrollLeft(px) => write!(f, "scroll-left {px}px"),
            Self::ScrollRight(px) => write!(f, "scroll-right {px}px"),
            Self::ScrollUp(px) => write!(f, "scroll-up {px}px"),
            Self::ScrollDown(px) => write!(f, "scroll-down {px}px"),
            Self::Home => f.write_str("home"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// The next visible column leftwards or rightwards, skipping hidden ones.
pub fn next_visible_column(
    column: ColumnReference,
    leftwards: bool,
    ctx: &impl NavigationContext,
) -> Option<ColumnReference> {
    let mut candidate = step_column(column, leftwards);
    while let Some(c) = candidate {
        if !ctx.is_column_hidden(c) {
            return Some(c);
        }
        candidate = step_column(c, leftwards);
    }
    None
}

/// The next visible row upwards or downwards, skipping hidden ones.
pub fn next_visible_row(
    row: RowReference,
    upwards: bool,
    ctx: &impl NavigationContext,
) -> Option<RowReference> {
    let mut candidate = step_row(row, upwards);
    while let Some(r) = candidate {
        if !ctx.is_row_hidden(r) {
            return Some(r);
        }
        candidate = step_row(r, upwards);
    }
    None
}

fn step_column(column: ColumnReference, leftwards: bool) -> Option<ColumnReference> {
    if leftwards {
        column.previous()
    } else {
        column.next()
    }
}

fn step_row(row: RowReference, upwards: bool) -> Option<RowReference> {
    if upwards {
        row.previous()
    } else {
        row.next()
    }
}

fn step_cell(
    cell: CellReference,
    direction: Direction,
    ctx: &impl NavigationContext,
) -> Option<CellReference> {
    match direction {
        Direction::Left => next_visible_column(cell.column(), true, ctx).map(|c| cell.set_column(c)),
        Direction::Right => {
            next_visible_column(cell.column(), false, ctx).map(|c| cell.set_column(c))
        }
        Direction::Up => next_visible_row(cell.row(), true, ctx).map(|r| cell.set_row(r)),
        Direction::Down => next_visible_row(cell.row(), false, ctx).map(|r| cell.set_row(r)),
    }
}

/// The fixed corner and the moving corner of a cell or cell-range selection.
fn cell_corners(range: CellRange, anchor: Anchor) -> (CellReference, CellReference) {
    let (anchor_column, moving_column) = if anchor.is_left() {
        (range.begin().column(), range.end().column())
    } else {
        (range.end().column(), range.begin().column())
    };
    let (anchor_row, moving_row) = if anchor.is_top() {
        (range.begin().row(), range.end().row())
    } else {
        (range.end().row(), range.begin().row())
    };
    (
        CellReference::new(anchor_column, anchor_row),
        CellReference::new(moving_column, moving_row),
    )
}

fn column_ends(range: ColumnRange, anchor: Anchor) -> (ColumnReference, ColumnReference) {
    if anchor.is_left() {
        (range.begin(), range.end())
    } else {
        (range.end(), range.begin())
    }
}

fn row_ends(range: RowRange, anchor: Anchor) -> (RowReference, RowReference) {
    if anchor.is_top() {
        (range.begin(), range.end())
    } else {
        (range.end(), range.begin())
    }
}

/// Build the selection spanning a fixed and a moving cell.
fn cells_between(fixed: CellReference, moving: CellReference) -> AnchoredSelection {
    let range = CellRange::new(fixed, moving);
    if range.is_single_cell() {
        return AnchoredSelection::new(Selection::Cell(fixed), Anchor::None);
    }
    let anchor = Anchor::corner(
        fixed.column() <= moving.column(),
        fixed.row() <= moving.row(),
    );
    AnchoredSelection::new(Selection::CellRange(range), anchor)
}

fn columns_between(fixed: ColumnReference, moving: ColumnReference) -> AnchoredSelection {
    let anchor = if fixed <= moving {
        Anchor::Left
    } else {
        Anchor::Right
    };
    AnchoredSelection::new(
        Selection::column_range(ColumnRange::new(fixed, moving)),
        anchor,
    )
}

fn rows_between(fixed: RowReference, moving: RowReference) -> AnchoredSelection {
    let anchor = if fixed <= moving {
        Anchor::Top
    } else {
        Anchor::Bottom
    };
    AnchoredSelection::new(Selection::row_range(RowRange::new(fixed, moving)), anchor)
}

/// Where a selection is pinned and where it moves from.
enum Ends {
    Cells(CellReference, CellReference),
    Columns(ColumnReference, ColumnReference),
    Rows(RowReference, RowReference),
}

fn ends(selection: &AnchoredSelection) -> Option<Ends> {
    let anchor = selection.anchor;
    match &selection.selection {
        Selection::Cell(c) => Some(Ends::Cells(*c, *c)),
        Selection::CellRange(r) => {
            let (fixed, moving) = cell_corners(*r, anchor);
            Some(Ends::Cells(fixed, moving))
        }
        Selection::Column(c) => Some(Ends::Columns(*c, *c)),
        Selection::ColumnRange(r) => {
            let (fixed, moving) = column_ends(*r, anchor);
            Some(Ends::Columns(fixed, moving))
        }
        Selection::Row(r) => Some(Ends::Rows(*r, *r)),
        Selection::RowRange(r) => {
            let (fixed, moving) = row_ends(*r, anchor);
            Some(Ends::Rows(fixed, moving))
        }
        Selection::Label(_) => None,
    }
}

/// Move the selection one step, collapsing ranges to their moving end.
fn move_selection(
    selection: &AnchoredSelection,
    direction: Direction,
    ctx: &impl NavigationContext,
) -> Option<AnchoredSelection> {
    match ends(selection)? {
        Ends::Cells(_, moving) => step_cell(moving, direction, ctx)
            .map(|c| AnchoredSelection::with_default_anchor(Selection::Cell(c))),
        Ends::Columns(_, moving) if direction.is_horizontal() => {
            next_visible_column(moving, direction == Direction::Left, ctx)
                .map(|c| AnchoredSelection::with_default_anchor(Selection::Column(c)))
        }
        Ends::Rows(_, moving) if !direction.is_horizontal() => {
            next_visible_row(moving, direction == Direction::Up, ctx)
                .map(|r| AnchoredSelection::with_default_anchor(Selection::Row(r)))
        }
        Ends::Columns(..) | Ends::Rows(..) => None,
    }
}

/// Extend the selection one step: the anchor stays, the opposite edge moves
/// to the next visible column or row.
fn extend_selection(
    selection: &AnchoredSelection,
    direction: Direction,
    ctx: &impl NavigationContext,
) -> Option<AnchoredSelection> {
    match ends(selection)? {
        Ends::Cells(fixed, moving) => {
            step_cell(moving, direction, ctx).map(|moved| cells_between(fixed, moved))
        }
        Ends::Columns(fixed, moving) if direction.is_horizontal() => {
            next_visible_column(moving, direction == Direction::Left, ctx)
                .map(|moved| columns_between(fixed, moved))
        }
        Ends::Rows(fixed, moving) if !direction.is_horizontal() => {
            next_visible_row(moving, direction == Direction::Up, ctx)
                .map(|moved| rows_between(fixed, moved))
        }
        Ends::Columns(..) | Ends::Rows(..) => None,
    }
}

/// Extend to `target`, keeping the current anchor. Without a compatible
/// current selection the target alone is selected.
pub fn extend_to_cell(
    selection: Option<&AnchoredSelection>,
    target: CellReference,
) -> AnchoredSelection {
    match selection.and_then(ends) {
        Some(Ends::Cells(fixed, _)) => cells_between(fixed, target),
        _ => AnchoredSelection::with_default_anchor(Selection::Cell(target)),
    }
}

pub fn extend_to_column(
    selection: Option<&AnchoredSelection>,
    target: ColumnReference,
) -> AnchoredSelection {
    match selection.and_then(ends) {
        Some(Ends::Columns(fixed, _)) => columns_between(fixed, target),
        Some(Ends::Cells(fixed, _)) => columns_between(fixed.column(), target),
        _ => AnchoredSelection::with_default_anchor(Selection::Column(target)),
    }
}

pub fn extend_to_row(
    selection: Option<&AnchoredSelection>,
    target: RowReference,
) -> AnchoredSelection {
    match selection.and_then(ends) {
        Some(Ends::Rows(fixed, _)) => rows_between(fixed, target),
        Some(Ends::Cells(fixed, _)) => rows_between(fixed.row(), target),
        _ => AnchoredSelection::with_default_anchor(Selection::Row(target)),
    }
}

/// Move home by a pixel delta, whole columns/rows at a time.
fn scroll(
    rectangle: ViewportRectangle,
    direction: Direction,
    pixels: f64,
    ctx: &impl NavigationContext,
) -> CellReference {
    let mut remaining = pixels.max(0.0);
    let home = rectangle.home;
    match direction {
        Direction::Left | Direction::Right => {
            let leftwards = direction == Direction::Left;
            let mut column = home.column();
            while let Some(next) = next_visible_column(column, leftwards, ctx) {
                let width = ctx.column_width(if leftwards { next } else { column });
                if remaining < width || width <= 0.0 {
                    break;
                }
                remaining -= width;
                column = next;
            }
            home.set_column(column)
        }
        Direction::Up | Direction::Down => {
            let upwards = direction == Direction::Up;
            let mut row = home.row();
            while let Some(next) = next_visible_row(row, upwards, ctx) {
                let height = ctx.row_height(if upwards { next } else { row });
                if remaining < height || height <= 0.0 {
                    break;
                }
                remaining -= height;
                row = next;
            }
            home.set_row(row)
        }
    }
}

/// The earliest home column that still shows `target` in `width` pixels.
fn home_column_showing(
    target: ColumnReference,
    width: f64,
    ctx: &impl NavigationContext,
) -> ColumnReference {
    let mut home = target;
    let mut used = ctx.column_width(target);
    while let Some(previous) = next_visible_column(home, true, ctx) {
        used += ctx.column_width(previous);
        if used > width {
            break;
        }
        home = previous;
    }
    home
}

fn home_row_showing(target: RowReference, height: f64, ctx: &impl NavigationContext) -> RowReference {
    let mut home = target;
    let mut used = ctx.row_height(target);
    while let Some(previous) = next_visible_row(home, true, ctx) {
        used += ctx.row_height(previous);
        if used > height {
            break;
        }
        home = previous;
    }
    home
}

/// Adjust home so the moving end of `selection` is visible.
fn scroll_into_view(
    rectangle: ViewportRectangle,
    selection: &AnchoredSelection,
    ctx: &impl NavigationContext,
) -> CellReference {
    let mut home = rectangle.home;
    let (column, row) = match ends(selection) {
        Some(Ends::Cells(_, moving)) => (Some(moving.column()), Some(moving.row())),
        Some(Ends::Columns(_, moving)) => (Some(moving), None),
        Some(Ends::Rows(_, moving)) => (None, Some(moving)),
        None => (None, None),
    };
    if let Some(column) = column {
        if column < home.column() {
            home = home.set_column(column);
        } else if !rectangle.visible_columns(ctx).contains(&column) {
            home = home.set_column(home_column_showing(column, rectangle.width, ctx));
        }
    }
    if let Some(row) = row {
        if row < home.row() {
            home = home.set_row(row);
        } else if !rectangle.visible_rows(ctx).contains(&row) {
            home = home.set_row(home_row_showing(row, rectangle.height, ctx));
        }
    }
    home
}

/// Apply `navigation` to `viewport`. A navigation with no valid target
/// (edge of sheet, only hidden columns beyond) returns the viewport unchanged.
pub fn navigate(
    viewport: &Viewport,
    navigation: &Navigation,
    ctx: &impl NavigationContext,
) -> Viewport {
    let rectangle = viewport.rectangle;
    let current = viewport.selection.as_ref();
    let home_selection =
        || AnchoredSelection::with_default_anchor(Selection::Cell(rectangle.home));

    let selected = match navigation {
        Navigation::Left | Navigation::Right | Navigation::Up | Navigation::Down => {
            let direction = direction_of(navigation);
            match current {
                Some(selection) => move_selection(selection, direction, ctx),
                None => Some(home_selection()),
            }
        }
        Navigation::ExtendLeft
        | Navigation::ExtendRight
        | Navigation::ExtendUp
        | Navigation::ExtendDown => {
            let direction = direction_of(navigation);
            match current {
                Some(selection) => extend_selection(selection, direction, ctx),
                None => Some(home_selection()),
            }
        }
        Navigation::SelectCell(c) => Some(AnchoredSelection::with_default_anchor((*c).into())),
        Navigation::SelectColumn(c) => {
            Some(AnchoredSelection::with_default_anchor((*c).into()))
        }
        Navigation::SelectRow(r) => Some(AnchoredSelection::with_default_anchor((*r).into())),
        Navigation::ExtendToCell(c) => Some(extend_to_cell(current, *c)),
        Navigation::ExtendToColumn(c) => Some(extend_to_column(current, *c)),
        Navigation::ExtendToRow(r) => Some(extend_to_row(current, *r)),
        Navigation::ScrollLeft(px)
        | Navigation::ScrollRight(px)
        | Navigation::ScrollUp(px)
        | Navigation::ScrollDown(px) => {
            let home = scroll(rectangle, direction_of(navigation), *px, ctx);
            return viewport.clone().with_home(home);
        }
        Navigation::Home => {
            let column = if ctx.is_column_hidden(ColumnReference::new(0)) {
                next_visible_column(ColumnReference::new(0), false, ctx)
            } else {
                Some(ColumnReference::new(0))
            };
            let row = if ctx.is_row_hidden(RowReference::new(0)) {
                next_visible_row(RowReference::new(0), false, ctx)
            } else {
                Some(RowReference::new(0))
            };
            let home = CellReference::new(
                column.unwrap_or(ColumnReference::new(0)),
                row.unwrap_or(RowReference::new(0)),
            );
            return Viewport::new(
                ViewportRectangle { home, ..rectangle },
                Some(AnchoredSelection::with_default_anchor(Selection::Cell(home))),
            );
        }
    };

    match selected {
        Some(selection) => {
            let home = scroll_into_view(rectangle, &selection, ctx);
            Viewport::new(ViewportRectangle { home, ..rectangle }, Some(selection))
        }
        None => viewport.clone(),
    }
}

fn direction_of(navigation: &Navigation) -> Direction {
    match navigation {
        Navigation::Left | Navigation::ExtendLeft | Navigation::ScrollLeft(_) => Direction::Left,
        Navigation::Up | Navigation::ExtendUp | Navigation::ScrollUp(_) => Direction::Up,
        Navigation::Down | Navigation::ExtendDown | Navigation::ScrollDown(_) => Direction::Down,
        _ => Direction::Right,
    }
}
