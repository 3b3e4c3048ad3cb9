//! Terminal presentation of the search controller.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render_viewmodel → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`format`]: Sizes, relative dates and path splitting for result rows
//! - [`viewmodel`]: Windowed rows, search bar, empty state and menu overlay
//! - [`renderer`]: ANSI frame assembly

pub mod format;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use viewmodel::{
    compute_viewmodel, ContextMenuView, DisplayItem, EmptyState, SearchBarInfo, UIViewModel, LIST_TOP,
};
