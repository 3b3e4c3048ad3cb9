//! Actions representing side effects to be executed by the dispatcher.
//!
//! The event handler never performs I/O. It mutates [`AppState`] and returns a
//! `Vec<Action>` describing what the outside world should do: arm or cancel the
//! debounce timer, call the search service, open a file, write the clipboard
//! or hide the window. The [`ActionExecutor`](crate::dispatcher::ActionExecutor)
//! runs each action in isolation and reports completion back as an
//! [`Event`](super::Event).
//!
//! # Example
//!
//! ```rust
//! use flashfind::app::Action;
//!
//! let actions = vec![
//!     Action::CancelSearch,
//!     Action::ScheduleSearch { generation: 4 },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```
//!
//! [`AppState`]: super::AppState

/// Commands representing side effects to be executed outside the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Arms the debounce timer for `generation`, replacing any pending timer.
    ///
    /// When the quiet interval elapses the dispatcher emits
    /// `Event::DebounceElapsed { generation }`.
    ScheduleSearch {
        /// Generation the timer belongs to.
        generation: u64,
    },

    /// Cancels the pending debounce timer, if any.
    ///
    /// Searches already sent to the service keep running; their responses are
    /// discarded by generation.
    CancelSearch,

    /// Sends `query` to the search service.
    ///
    /// Completes with `Event::SearchCompleted` or `Event::SearchFailed`
    /// carrying the same generation.
    DispatchSearch {
        /// Generation tag echoed back in the completion event.
        generation: u64,
        /// Query text as typed.
        query: String,
    },

    /// Launches the default handler for `path`.
    ///
    /// Completes with `Event::OpenFinished`.
    OpenFile {
        /// Path of the file or folder to open.
        path: String,
    },

    /// Reveals `path` in the system file manager.
    ///
    /// Completes with `Event::RevealFinished`.
    ShowInFolder {
        /// Path of the file or folder to reveal.
        path: String,
    },

    /// Writes `text` to the system clipboard.
    ///
    /// Completes with `Event::CopyFinished`.
    CopyText {
        /// Text to copy.
        text: String,
        /// `true` when the copy commits a calculator result, in which case a
        /// successful copy hides the window and resets the query.
        commit: bool,
    },

    /// Hides the host window.
    HideWindow,
}
