//! Viewport geometry and navigation.
//!
//! This module handles:
//! - Computing the visible columns/rows from the home cell and pixel size
//! - Moving, extending and scrolling selections while skipping hidden columns/rows
//! - Keeping the moving end of a selection inside the visible rectangle

mod navigation;
mod viewport;

pub use navigation::{
    extend_to_cell, extend_to_column, extend_to_row, navigate, next_visible_column,
    next_visible_row, Navigation, NavigationContext,
};
pub use viewport::{Viewport, ViewportRectangle};
