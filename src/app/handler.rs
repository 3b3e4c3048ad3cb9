//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes keystrokes, pointer
//! input, timer expiry and collaborator completions, translating them into
//! state changes and action sequences.
//!
//! # Architecture
//!
//! 1. Events arrive from the host (keys, pointer, query edits) or from the
//!    dispatcher (timer expiry, search responses, action completions)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Query**: `QueryChanged`
//! - **Search lifecycle**: `DebounceElapsed`, `SearchCompleted`, `SearchFailed`
//! - **Navigation**: `ArrowDown`, `ArrowUp`, `Enter`, `Escape`, `Hover`, `Click`
//! - **Context menu**: `ContextMenuRequested`, `MenuSelected`, `PointerDown`, `GlobalClick`
//! - **Completions**: `OpenFinished`, `RevealFinished`, `CopyFinished`
//!
//! # Stale responses
//!
//! Every query change starts a new generation. Timer expiries and search
//! responses carry the generation they were scheduled under and are dropped
//! unless it is still the latest one, regardless of arrival order.
//!
//! # Example
//!
//! ```rust
//! use flashfind::app::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (render, actions) = handle_event(&mut state, &Event::QueryChanged("report".into()))?;
//! assert!(render);
//! assert!(state.results.loading);
//! assert_eq!(actions, vec![Action::ScheduleSearch { generation: state.generation }]);
//! # Ok::<(), flashfind::FlashfindError>(())
//! ```

use super::context_menu::{MenuItem, Viewport};
use super::results::ResultSet;
use super::state::PendingSearch;
use crate::app::{Action, AppState};
use crate::domain::calculator;
use crate::domain::error::Result;
use crate::domain::SearchResult;

/// Events triggered by user input, timers, or collaborator completions.
///
/// Each event is a discrete occurrence processed sequentially by
/// [`handle_event`], so state transitions are deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The query text changed to the given value.
    QueryChanged(String),

    /// The debounce timer armed for `generation` elapsed.
    DebounceElapsed {
        /// Generation the timer was armed for.
        generation: u64,
    },

    /// The search service answered.
    SearchCompleted {
        /// Generation the search was dispatched under.
        generation: u64,
        /// Results in the service's own order.
        results: Vec<SearchResult>,
    },

    /// The search service failed or timed out.
    SearchFailed {
        /// Generation the search was dispatched under.
        generation: u64,
        /// Human-readable failure description.
        error: String,
    },

    /// Moves the selection down one row.
    ArrowDown,
    /// Moves the selection up one row.
    ArrowUp,
    /// Commits the selected row.
    Enter,
    /// Hides the window and clears query, results and selection.
    Escape,

    /// Pointer moved over the row at this index.
    Hover(usize),
    /// Row at this index was clicked.
    Click(usize),

    /// Secondary click over the row at `index`, at viewport position `(x, y)`.
    ContextMenuRequested {
        /// Pointer x coordinate.
        x: u32,
        /// Pointer y coordinate.
        y: u32,
        /// Row under the pointer.
        index: usize,
    },

    /// An entry of the open context menu was chosen.
    MenuSelected(MenuItem),

    /// Pointer pressed at `(x, y)`; closes the menu if outside its bounds.
    PointerDown {
        /// Pointer x coordinate.
        x: u32,
        /// Pointer y coordinate.
        y: u32,
    },

    /// A click anywhere in the window; closes the menu.
    GlobalClick,

    /// The host surface was resized.
    Resized(Viewport),

    /// The file-open collaborator finished.
    OpenFinished {
        /// Path that was opened.
        path: String,
        /// Failure message, `None` on success.
        error: Option<String>,
    },

    /// The reveal-in-folder collaborator finished.
    RevealFinished {
        /// Path that was revealed.
        path: String,
        /// Failure message, `None` on success.
        error: Option<String>,
    },

    /// The clipboard collaborator finished.
    CopyFinished {
        /// Text that was written.
        text: String,
        /// Whether the copy committed a calculator result.
        commit: bool,
        /// Failure message, `None` on success.
        error: Option<String>,
    },
}

impl Event {
    /// Short name used as a tracing field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::QueryChanged(_) => "query_changed",
            Self::DebounceElapsed { .. } => "debounce_elapsed",
            Self::SearchCompleted { .. } => "search_completed",
            Self::SearchFailed { .. } => "search_failed",
            Self::ArrowDown => "arrow_down",
            Self::ArrowUp => "arrow_up",
            Self::Enter => "enter",
            Self::Escape => "escape",
            Self::Hover(_) => "hover",
            Self::Click(_) => "click",
            Self::ContextMenuRequested { .. } => "context_menu_requested",
            Self::MenuSelected(_) => "menu_selected",
            Self::PointerDown { .. } => "pointer_down",
            Self::GlobalClick => "global_click",
            Self::Resized(_) => "resized",
            Self::OpenFinished { .. } => "open_finished",
            Self::RevealFinished { .. } => "reveal_finished",
            Self::CopyFinished { .. } => "copy_finished",
        }
    }

    /// Whether the host must suppress its default handling of the input.
    ///
    /// Arrow keys would move the text caret and Enter would submit; both are
    /// consumed by the result list instead.
    #[must_use]
    pub const fn suppresses_default(&self) -> bool {
        matches!(self, Self::ArrowDown | Self::ArrowUp | Self::Enter)
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// A `(render, actions)` pair. `render` is `true` when visible state changed;
/// `actions` are side effects to run in order.
///
/// # Errors
///
/// Reserved for transitions that cannot be completed; every current
/// transition degrades to a safe state instead of failing.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event kind.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.kind()).entered();

    match event {
        Event::QueryChanged(query) => {
            state.query.clone_from(query);
            let generation = state.next_generation();

            if query.trim().is_empty() {
                tracing::debug!(generation, "query cleared");
                state.clear_results();
                return Ok((true, vec![Action::CancelSearch]));
            }

            state.results.loading = true;
            tracing::trace!(generation, query = %query, "search scheduled");
            Ok((true, vec![Action::ScheduleSearch { generation }]))
        }
        Event::DebounceElapsed { generation } => {
            if !state.is_current(*generation) {
                tracing::debug!(generation, latest = state.generation, "ignoring stale timer");
                return Ok((false, vec![]));
            }

            let calc = calculator::evaluate_query(&state.query);
            state.pending = Some(PendingSearch {
                generation: *generation,
                calc,
            });

            Ok((false, vec![Action::DispatchSearch {
                generation: *generation,
                query: state.query.clone(),
            }]))
        }
        Event::SearchCompleted { generation, results } => {
            let Some(pending) = take_pending(state, *generation) else {
                tracing::debug!(generation, latest = state.generation, "discarding stale search response");
                return Ok((false, vec![]));
            };

            tracing::debug!(generation, service_results = results.len(), has_calc = pending.calc.is_some(), "search completed");
            state.selected_index = 0;
            state.apply_results(ResultSet::merge(pending.calc, results.clone()));
            Ok((true, vec![]))
        }
        Event::SearchFailed { generation, error } => {
            let Some(pending) = take_pending(state, *generation) else {
                tracing::debug!(generation, error = %error, "discarding stale search failure");
                return Ok((false, vec![]));
            };

            tracing::warn!(generation, error = %error, "search failed, falling back to calculator result");
            state.selected_index = 0;
            state.apply_results(ResultSet::merge(pending.calc, Vec::new()));
            Ok((true, vec![]))
        }
        Event::ArrowDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::ArrowUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::Enter => {
            let Some(result) = state.selected_result().cloned() else {
                tracing::debug!("enter with empty result list");
                return Ok((false, vec![]));
            };
            Ok((false, vec![commit(&result)]))
        }
        Event::Escape => {
            state.context_menu.close();
            state.reset();
            tracing::debug!("escape: hiding window and clearing query");
            Ok((true, vec![Action::CancelSearch, Action::HideWindow]))
        }
        Event::Hover(index) => Ok((state.select(*index), vec![])),
        Event::Click(index) => {
            let Some(result) = state.results.get(*index).cloned() else {
                return Ok((false, vec![]));
            };
            state.selected_index = *index;
            Ok((true, vec![commit(&result)]))
        }
        Event::ContextMenuRequested { x, y, index } => {
            let Some(result) = state.results.get(*index).cloned() else {
                tracing::debug!(index, "context menu requested outside the result list");
                return Ok((false, vec![]));
            };
            let viewport = state.viewport;
            state.context_menu.open(*x, *y, result, viewport);
            Ok((true, vec![]))
        }
        Event::MenuSelected(item) => {
            let Some(target) = state.context_menu.target().cloned() else {
                return Ok((false, vec![]));
            };
            state.context_menu.close();

            let actions = match item {
                MenuItem::Open => vec![commit(&target)],
                MenuItem::ShowInFolder if target.is_calculation() => {
                    tracing::debug!("show in folder is not available for calculator results");
                    vec![]
                }
                MenuItem::ShowInFolder => vec![Action::ShowInFolder { path: target.path }],
                MenuItem::CopyPath => vec![Action::CopyText {
                    text: target.path,
                    commit: false,
                }],
            };
            Ok((true, actions))
        }
        Event::PointerDown { x, y } => {
            if state.context_menu.is_visible() && !state.context_menu.contains(*x, *y) {
                return Ok((state.context_menu.close(), vec![]));
            }
            Ok((false, vec![]))
        }
        Event::GlobalClick => Ok((state.context_menu.close(), vec![])),
        Event::Resized(viewport) => {
            state.viewport = *viewport;
            Ok((true, vec![]))
        }
        Event::OpenFinished { path, error } => match error {
            None => {
                tracing::info!(path = %path, "opened");
                state.reset();
                Ok((true, vec![Action::CancelSearch, Action::HideWindow]))
            }
            Some(error) => {
                tracing::warn!(path = %path, error = %error, "failed to open, keeping window");
                Ok((false, vec![]))
            }
        },
        Event::RevealFinished { path, error } => {
            if let Some(error) = error {
                tracing::warn!(path = %path, error = %error, "failed to show in folder");
            } else {
                tracing::debug!(path = %path, "revealed in file manager");
            }
            Ok((false, vec![]))
        }
        Event::CopyFinished { text, commit, error } => match (error, commit) {
            (Some(error), _) => {
                tracing::warn!(error = %error, "failed to copy to clipboard");
                Ok((false, vec![]))
            }
            (None, true) => {
                tracing::info!(value = %text, "calculator result copied");
                state.reset();
                Ok((true, vec![Action::CancelSearch, Action::HideWindow]))
            }
            (None, false) => {
                tracing::debug!(len = text.len(), "path copied");
                Ok((false, vec![]))
            }
        },
    }
}

/// Action committing `result`: calculator values are copied, files are opened.
fn commit(result: &SearchResult) -> Action {
    if result.is_calculation() {
        Action::CopyText {
            text: result.path.clone(),
            commit: true,
        }
    } else {
        Action::OpenFile {
            path: result.path.clone(),
        }
    }
}

/// Takes the pending search if `generation` is the one it was dispatched under.
fn take_pending(state: &mut AppState, generation: u64) -> Option<PendingSearch> {
    if !state.is_current(generation) {
        return None;
    }
    match state.pending.take() {
        Some(pending) if pending.generation == generation => Some(pending),
        other => {
            state.pending = other;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::context_menu::{MenuGeometry, DEFAULT_MENU_WIDTH};

    fn file(path: &str) -> SearchResult {
        SearchResult::file(path, 1024, 1_700_000_000, 10)
    }

    fn handle(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    /// Drives a query through the debounce and response steps.
    fn settle(state: &mut AppState, query: &str, results: Vec<SearchResult>) {
        handle(state, Event::QueryChanged(query.to_string()));
        let generation = state.generation;
        handle(state, Event::DebounceElapsed { generation });
        handle(state, Event::SearchCompleted { generation, results });
    }

    #[test]
    fn whitespace_query_clears_synchronously_without_dispatch() {
        let mut state = AppState::default();
        settle(&mut state, "rep", vec![file("/a/report.pdf")]);

        let (render, actions) = handle(&mut state, Event::QueryChanged("   ".into()));
        assert!(render);
        assert_eq!(actions, vec![Action::CancelSearch]);
        assert!(state.results.is_empty());
        assert!(!state.results.loading);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn query_change_sets_loading_and_schedules() {
        let mut state = AppState::default();
        let (_, actions) = handle(&mut state, Event::QueryChanged("rep".into()));
        assert!(state.results.loading);
        assert_eq!(actions, vec![Action::ScheduleSearch { generation: state.generation }]);
    }

    #[test]
    fn timer_for_old_generation_does_not_dispatch() {
        let mut state = AppState::default();
        handle(&mut state, Event::QueryChanged("r".into()));
        let old = state.generation;
        handle(&mut state, Event::QueryChanged("re".into()));

        let (_, actions) = handle(&mut state, Event::DebounceElapsed { generation: old });
        assert!(actions.is_empty());

        let generation = state.generation;
        let (_, actions) = handle(&mut state, Event::DebounceElapsed { generation });
        assert_eq!(actions, vec![Action::DispatchSearch {
            generation,
            query: "re".into(),
        }]);
    }

    #[test]
    fn stale_response_is_discarded_even_if_it_arrives_last() {
        let mut state = AppState::default();
        handle(&mut state, Event::QueryChanged("a".into()));
        let first = state.generation;
        handle(&mut state, Event::DebounceElapsed { generation: first });

        handle(&mut state, Event::QueryChanged("ab".into()));
        let second = state.generation;
        handle(&mut state, Event::DebounceElapsed { generation: second });

        handle(&mut state, Event::SearchCompleted { generation: second, results: vec![file("/ab.txt")] });
        let (render, _) = handle(&mut state, Event::SearchCompleted { generation: first, results: vec![file("/a.txt")] });

        assert!(!render);
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results.get(0).unwrap().path, "/ab.txt");
    }

    #[test]
    fn response_after_clearing_query_is_ignored() {
        let mut state = AppState::default();
        handle(&mut state, Event::QueryChanged("doc".into()));
        let generation = state.generation;
        handle(&mut state, Event::DebounceElapsed { generation });
        handle(&mut state, Event::QueryChanged(String::new()));

        handle(&mut state, Event::SearchCompleted { generation, results: vec![file("/doc.txt")] });
        assert!(state.results.is_empty());
    }

    #[test]
    fn calculator_result_is_merged_first() {
        let mut state = AppState::default();
        let service = vec![file("/1"), file("/2"), file("/3"), file("/4")];
        settle(&mut state, "5*6", service);

        assert_eq!(state.results.len(), 5);
        assert_eq!(state.results.get(0).unwrap().name, "= 30");
        assert!(!state.results.loading);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn failure_falls_back_to_calculator_only() {
        let mut state = AppState::default();
        handle(&mut state, Event::QueryChanged("1+1".into()));
        let generation = state.generation;
        handle(&mut state, Event::DebounceElapsed { generation });
        handle(&mut state, Event::SearchFailed { generation, error: "ipc closed".into() });

        assert!(!state.results.loading);
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results.get(0).unwrap().path, "2");
    }

    #[test]
    fn failure_without_calculator_leaves_empty_list() {
        let mut state = AppState::default();
        handle(&mut state, Event::QueryChanged("notes".into()));
        let generation = state.generation;
        handle(&mut state, Event::DebounceElapsed { generation });
        handle(&mut state, Event::SearchFailed { generation, error: "boom".into() });
        assert!(state.results.is_empty());
        assert!(!state.results.loading);
    }

    #[test]
    fn enter_on_empty_list_is_a_noop() {
        let mut state = AppState::default();
        let (render, actions) = handle(&mut state, Event::Enter);
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn enter_opens_files_and_copies_calculations() {
        let mut state = AppState::default();
        settle(&mut state, "2+2", vec![file("C:\\docs\\report.pdf")]);

        let (_, actions) = handle(&mut state, Event::Enter);
        assert_eq!(actions, vec![Action::CopyText { text: "4".into(), commit: true }]);

        handle(&mut state, Event::ArrowDown);
        let (_, actions) = handle(&mut state, Event::Enter);
        assert_eq!(actions, vec![Action::OpenFile { path: "C:\\docs\\report.pdf".into() }]);
    }

    #[test]
    fn open_success_hides_and_resets_but_failure_preserves_state() {
        let mut state = AppState::default();
        settle(&mut state, "report", vec![file("/docs/report.pdf")]);

        let (_, actions) = handle(&mut state, Event::OpenFinished {
            path: "/docs/report.pdf".into(),
            error: Some("no handler".into()),
        });
        assert!(actions.is_empty());
        assert_eq!(state.query, "report");
        assert_eq!(state.results.len(), 1);

        let (_, actions) = handle(&mut state, Event::OpenFinished {
            path: "/docs/report.pdf".into(),
            error: None,
        });
        assert_eq!(actions, vec![Action::CancelSearch, Action::HideWindow]);
        assert!(state.query.is_empty());
        assert!(state.results.is_empty());
    }

    #[test]
    fn escape_is_unconditional() {
        let mut state = AppState::default();
        let (_, actions) = handle(&mut state, Event::Escape);
        assert_eq!(actions, vec![Action::CancelSearch, Action::HideWindow]);

        settle(&mut state, "report", vec![file("/a"), file("/b")]);
        state.context_menu.open(1, 1, file("/a"), Viewport { width: 800, height: 600 });
        handle(&mut state, Event::ArrowDown);
        let (_, actions) = handle(&mut state, Event::Escape);
        assert_eq!(actions, vec![Action::CancelSearch, Action::HideWindow]);
        assert!(state.query.is_empty());
        assert!(state.results.is_empty());
        assert_eq!(state.selected_index, 0);
        assert!(!state.context_menu.is_visible());
    }

    #[test]
    fn hover_selects_and_click_commits_row() {
        let mut state = AppState::default();
        settle(&mut state, "x", vec![file("/a"), file("/b"), file("/c")]);

        let (render, _) = handle(&mut state, Event::Hover(2));
        assert!(render);
        assert_eq!(state.selected_index, 2);
        let (render, _) = handle(&mut state, Event::Hover(9));
        assert!(!render);

        let (_, actions) = handle(&mut state, Event::Click(1));
        assert_eq!(state.selected_index, 1);
        assert_eq!(actions, vec![Action::OpenFile { path: "/b".into() }]);
    }

    #[test]
    fn context_menu_actions() {
        let mut state = AppState::new(MenuGeometry::default(), Viewport { width: 800, height: 600 });
        settle(&mut state, "1+2", vec![file("/docs/a.txt")]);

        handle(&mut state, Event::ContextMenuRequested { x: 795, y: 10, index: 1 });
        assert!(state.context_menu.is_visible());
        assert!(state.context_menu.left() <= 800 - DEFAULT_MENU_WIDTH);

        let (_, actions) = handle(&mut state, Event::MenuSelected(MenuItem::ShowInFolder));
        assert_eq!(actions, vec![Action::ShowInFolder { path: "/docs/a.txt".into() }]);
        assert!(!state.context_menu.is_visible());
        assert_eq!(state.query, "1+2");

        handle(&mut state, Event::ContextMenuRequested { x: 5, y: 5, index: 0 });
        let (_, actions) = handle(&mut state, Event::MenuSelected(MenuItem::ShowInFolder));
        assert!(actions.is_empty());

        handle(&mut state, Event::ContextMenuRequested { x: 5, y: 5, index: 0 });
        let (_, actions) = handle(&mut state, Event::MenuSelected(MenuItem::CopyPath));
        assert_eq!(actions, vec![Action::CopyText { text: "3".into(), commit: false }]);

        handle(&mut state, Event::ContextMenuRequested { x: 5, y: 5, index: 1 });
        let (_, actions) = handle(&mut state, Event::MenuSelected(MenuItem::Open));
        assert_eq!(actions, vec![Action::OpenFile { path: "/docs/a.txt".into() }]);
    }

    #[test]
    fn pointer_down_outside_and_global_click_close_menu() {
        let mut state = AppState::new(MenuGeometry::default(), Viewport { width: 800, height: 600 });
        settle(&mut state, "notes", vec![file("/notes.md")]);

        handle(&mut state, Event::ContextMenuRequested { x: 100, y: 100, index: 0 });
        let (render, _) = handle(&mut state, Event::PointerDown { x: 150, y: 150 });
        assert!(!render);
        assert!(state.context_menu.is_visible());

        let (render, _) = handle(&mut state, Event::PointerDown { x: 10, y: 10 });
        assert!(render);
        assert!(!state.context_menu.is_visible());

        handle(&mut state, Event::ContextMenuRequested { x: 100, y: 100, index: 0 });
        let (render, _) = handle(&mut state, Event::GlobalClick);
        assert!(render);
        let (render, _) = handle(&mut state, Event::GlobalClick);
        assert!(!render);
    }

    #[test]
    fn copy_path_does_not_hide_but_calc_commit_does() {
        let mut state = AppState::default();
        settle(&mut state, "3*3", vec![]);

        let (_, actions) = handle(&mut state, Event::CopyFinished { text: "/a".into(), commit: false, error: None });
        assert!(actions.is_empty());
        assert_eq!(state.query, "3*3");

        let (_, actions) = handle(&mut state, Event::CopyFinished { text: "9".into(), commit: true, error: Some("locked".into()) });
        assert!(actions.is_empty());

        let (_, actions) = handle(&mut state, Event::CopyFinished { text: "9".into(), commit: true, error: None });
        assert_eq!(actions, vec![Action::CancelSearch, Action::HideWindow]);
        assert!(state.query.is_empty());
    }

    #[test]
    fn only_navigation_keys_suppress_default() {
        assert!(Event::ArrowDown.suppresses_default());
        assert!(Event::ArrowUp.suppresses_default());
        assert!(Event::Enter.suppresses_default());
        assert!(!Event::Escape.suppresses_default());
        assert!(!Event::QueryChanged("a".into()).suppresses_default());
    }
}
