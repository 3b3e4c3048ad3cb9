//! Application state for the search controller.
//!
//! This module defines [`AppState`], the single source of truth for transient
//! UI state: the query, the displayed result set, the selection index, the
//! context menu and the generation bookkeeping that keeps stale search
//! responses off the screen.
//!
//! # State Components
//!
//! - **Query**: raw input text, mutated only by `QueryChanged` events
//! - **Results**: merged display list with its loading flag
//! - **Selection**: clamped cursor into the results
//! - **Context menu**: overlay keyed to one result
//! - **Generation**: counter identifying the latest scheduled search
//!
//! # Example
//!
//! ```rust
//! use flashfind::app::{AppState, ResultSet};
//! use flashfind::domain::SearchResult;
//!
//! let mut state = AppState::default();
//! state.apply_results(ResultSet::merge(None, vec![
//!     SearchResult::file("/tmp/a.txt", 1, 0, 2),
//!     SearchResult::file("/tmp/b.txt", 1, 0, 1),
//! ]));
//! state.move_selection_down();
//! assert_eq!(state.selected_index, 1);
//! ```

use super::context_menu::{ContextMenu, MenuGeometry, Viewport};
use super::results::ResultSet;
use crate::domain::SearchResult;

/// Search dispatched to the service and not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    /// Generation the response must carry to be accepted.
    pub generation: u64,

    /// Calculator answer computed when the debounce timer fired.
    pub calc: Option<SearchResult>,
}

/// Central application state container.
///
/// Mutated only by [`handle_event`](super::handle_event); never shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Current raw query text.
    pub query: String,

    /// Results currently on screen.
    pub results: ResultSet,

    /// Zero-based index into `results`.
    ///
    /// Always within `[0, len - 1]`, or `0` when the list is empty.
    pub selected_index: usize,

    /// Context menu overlay.
    pub context_menu: ContextMenu,

    /// Size of the host surface, used to clamp the context menu.
    pub viewport: Viewport,

    /// Generation of the most recently scheduled search.
    ///
    /// Bumped on every query change and reset so that only the latest
    /// response may mutate `results`.
    pub generation: u64,

    /// Search waiting for its service response, if any.
    pub pending: Option<PendingSearch>,
}

impl AppState {
    /// Creates an empty state with the given context menu size estimate.
    #[must_use]
    pub fn new(menu_geometry: MenuGeometry, viewport: Viewport) -> Self {
        Self {
            context_menu: ContextMenu::new(menu_geometry),
            viewport,
            ..Self::default()
        }
    }

    /// Moves the selection down by one, stopping at the last row.
    ///
    /// No-op on an empty list (the index stays `0`).
    pub fn move_selection_down(&mut self) {
        self.selected_index = self.results.clamp_index(self.selected_index.saturating_add(1));
    }

    /// Moves the selection up by one, stopping at the first row.
    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Selects the row at `index` if it exists.
    ///
    /// Returns `true` when the selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.results.len() || index == self.selected_index {
            return false;
        }
        self.selected_index = index;
        true
    }

    /// Returns the currently selected result, if any.
    #[must_use]
    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.results.get(self.selected_index)
    }

    /// Replaces the displayed results and re-clamps the selection.
    pub fn apply_results(&mut self, results: ResultSet) {
        self.results = results;
        self.selected_index = self.results.clamp_index(self.selected_index);
        tracing::debug!(
            result_count = self.results.len(),
            selected_index = self.selected_index,
            "result set replaced"
        );
    }

    /// Starts a new generation and returns it.
    ///
    /// Any response tagged with an older generation is stale from here on.
    pub fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
        self.generation
    }

    /// Returns `true` if `generation` identifies the latest scheduled search.
    #[must_use]
    pub const fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Clears results and selection without touching the query.
    ///
    /// Invalidates any in-flight search.
    pub fn clear_results(&mut self) {
        self.next_generation();
        self.apply_results(ResultSet::default());
        self.selected_index = 0;
    }

    /// Resets query, results and selection to their empty state.
    pub fn reset(&mut self) {
        self.query.clear();
        self.clear_results();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(n: usize) -> AppState {
        let mut state = AppState::default();
        let items = (0..n)
            .map(|i| SearchResult::file(format!("/r/{i}.txt"), 0, 0, 0))
            .collect();
        state.apply_results(ResultSet::merge(None, items));
        state
    }

    #[test]
    fn arrow_down_clamps_at_end() {
        let mut state = state_with(3);
        state.selected_index = 2;
        state.move_selection_down();
        assert_eq!(state.selected_index, 2);
    }

    #[test]
    fn arrows_are_safe_on_empty_list() {
        let mut state = AppState::default();
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
        assert!(state.selected_result().is_none());
    }

    #[test]
    fn arrow_up_stops_at_first_row() {
        let mut state = state_with(2);
        state.move_selection_down();
        state.move_selection_up();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn apply_results_reclamps_selection() {
        let mut state = state_with(5);
        state.selected_index = 4;
        state.apply_results(ResultSet::merge(
            None,
            vec![SearchResult::file("/only.txt", 0, 0, 0)],
        ));
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn select_ignores_out_of_range_rows() {
        let mut state = state_with(2);
        assert!(state.select(1));
        assert!(!state.select(1));
        assert!(!state.select(5));
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn reset_bumps_generation_and_clears_everything() {
        let mut state = state_with(3);
        state.query = "abc".to_string();
        state.selected_index = 2;
        let before = state.generation;
        state.reset();
        assert!(state.query.is_empty());
        assert!(state.results.is_empty());
        assert_eq!(state.selected_index, 0);
        assert!(!state.is_current(before));
    }
}
