//! Application layer: the search interaction state machine.
//!
//! This module holds everything the controller decides, with no I/O. Inputs
//! arrive as [`Event`]s, [`handle_event`] mutates [`AppState`] and returns the
//! [`Action`]s the dispatcher must execute.
//!
//! # Architecture
//!
//! ```text
//! Keystroke / pointer → Event → handle_event → AppState mutation → Actions
//!                                   ↑                                 ↓
//!                                   └──── timer + collaborator events ┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`context_menu`]: Viewport-clamped overlay keyed to one result
//! - [`handler`]: Event processing and state transitions
//! - [`results`]: Merged result list with loading flag
//! - [`state`]: Central state container and selection bookkeeping
//!
//! # Example
//!
//! ```rust
//! use flashfind::app::{handle_event, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (_render, actions) = handle_event(&mut state, &Event::ArrowDown)?;
//! assert!(actions.is_empty());
//! # Ok::<(), flashfind::FlashfindError>(())
//! ```

pub mod actions;
pub mod context_menu;
pub mod handler;
pub mod results;
pub mod state;

pub use actions::Action;
pub use context_menu::{ContextMenu, MenuGeometry, MenuItem, Viewport};
pub use handler::{handle_event, Event};
pub use results::ResultSet;
pub use state::{AppState, PendingSearch};
