//! Data types for the spreadsheet viewport.

mod cell;
mod delta;
mod metadata;
mod reference;
mod selection;
mod style;
mod summary;
mod window;

pub use cell::*;
pub use delta::*;
pub use metadata::*;
pub use reference::*;
pub use selection::*;
pub use style::*;
pub use summary::*;
pub use window::*;
