//! Display-ready view of [`AppState`].
//!
//! The view model is recomputed on every redraw and is also what the host uses
//! for pointer hit testing, so row positions here are the single source of
//! truth for "which result is under the mouse".
//!
//! # Layout
//!
//! ```text
//! row 0   search bar (query + loading indicator)
//! row 1   separator
//! row 2.. result rows, windowed around the selection
//! ```

use super::format;
use crate::app::{AppState, MenuItem};
use crate::domain::SearchResult;

/// Terminal row of the first result.
pub const LIST_TOP: usize = 2;

/// Complete view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Visible rows, top to bottom.
    pub display_items: Vec<DisplayItem>,

    /// Position of the selected row within `display_items`.
    pub selected_index: usize,

    /// Query line.
    pub search_bar: SearchBarInfo,

    /// Shown instead of rows when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Context menu overlay, when open.
    pub context_menu: Option<ContextMenuView>,
}

/// One visible result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Index of the result in the full result set.
    pub index: usize,

    /// File name, or `= value` for calculator results.
    pub name: String,

    /// Secondary line: `dir • size • date`, or a copy hint for calculator results.
    pub meta: String,

    /// Whether this row is the current selection.
    pub is_selected: bool,

    /// Whether this row is a calculator result.
    pub is_calculation: bool,
}

/// Search input state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current query text.
    pub query: String,
    /// A search is scheduled or in flight.
    pub loading: bool,
}

/// Message displayed when the list is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

/// Context menu overlay in terminal cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenuView {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
    /// Entries top to bottom.
    pub items: Vec<MenuItem>,
    /// Name of the result the menu acts on.
    pub target_name: String,
}

impl UIViewModel {
    /// Result index rendered at terminal row `row`, if any.
    #[must_use]
    pub fn result_at_row(&self, row: usize) -> Option<usize> {
        let offset = row.checked_sub(LIST_TOP)?;
        self.display_items.get(offset).map(|item| item.index)
    }
}

/// Computes the view model for a `rows` × `cols` surface.
///
/// # Parameters
///
/// * `state` - Application state to present
/// * `rows` - Surface height in cells
/// * `cols` - Surface width in cells, used to truncate long names and paths
/// * `now` - Current time in epoch seconds, for relative dates
///
/// # Windowing
///
/// When there are more results than rows, the window is centred on the
/// selection and shifted to stay full near either end of the list.
#[must_use]
pub fn compute_viewmodel(state: &AppState, rows: usize, cols: usize, now: i64) -> UIViewModel {
    let search_bar = SearchBarInfo {
        query: state.query.clone(),
        loading: state.results.loading,
    };
    let context_menu = compute_context_menu(state);

    let total = state.results.len();
    if total == 0 {
        return UIViewModel {
            display_items: Vec::new(),
            selected_index: 0,
            search_bar,
            empty_state: Some(empty_state(state)),
            context_menu,
        };
    }

    let available = rows.saturating_sub(LIST_TOP).max(1);
    let mut start = state.selected_index.saturating_sub(available / 2);
    let end = (start + available).min(total);
    if end - start < available && total >= available {
        start = end.saturating_sub(available);
    }

    let display_items = state.results.items()[start..end]
        .iter()
        .enumerate()
        .map(|(offset, result)| {
            let index = start + offset;
            display_item(result, index, index == state.selected_index, cols, now)
        })
        .collect();

    UIViewModel {
        display_items,
        selected_index: state.selected_index.saturating_sub(start),
        search_bar,
        empty_state: None,
        context_menu,
    }
}

fn display_item(result: &SearchResult, index: usize, is_selected: bool, cols: usize, now: i64) -> DisplayItem {
    let width = cols.saturating_sub(4).max(8);

    if result.is_calculation() {
        return DisplayItem {
            index,
            name: format::truncate(&result.name, width),
            meta: "Calculator · Enter copies the value".to_string(),
            is_selected,
            is_calculation: true,
        };
    }

    let meta = format!(
        "{} • {} • {}",
        format::parent_dir(&result.path),
        format::format_size(result.size),
        format::format_modified(result.modified, now)
    );
    DisplayItem {
        index,
        name: format::truncate(format::file_name(&result.path), width),
        meta: format::truncate(&meta, width),
        is_selected,
        is_calculation: false,
    }
}

fn empty_state(state: &AppState) -> EmptyState {
    let message = if state.query.trim().is_empty() {
        "Type to search files, or enter arithmetic like 5*6"
    } else if state.results.loading {
        "Searching..."
    } else {
        "No results"
    };
    EmptyState {
        message: message.to_string(),
    }
}

fn compute_context_menu(state: &AppState) -> Option<ContextMenuView> {
    let menu = &state.context_menu;
    let target = menu.target().filter(|_| menu.is_visible())?;
    let geometry = menu.geometry();

    Some(ContextMenuView {
        left: menu.left(),
        top: menu.top(),
        width: geometry.width,
        height: geometry.height,
        items: MenuItem::ALL.to_vec(),
        target_name: target.name.clone(),
    })
}
