//! Asynchronous side of the controller.
//!
//! The application layer decides; this layer does. It owns the debounce timer,
//! wraps search calls in a timeout, runs each collaborator call in its own task
//! and feeds completions back into the event loop.
//!
//! # Architecture
//!
//! ```text
//! Controller::handle(event) → handle_event → Actions → ActionExecutor
//!        ↑                                                  │
//!        └──── mpsc channel ← timer / collaborator tasks ←──┘
//! ```
//!
//! # Modules
//!
//! - [`debounce`]: Single-slot abortable timer
//! - [`executor`]: Action execution and search timeout
//! - [`controller`]: Event loop owner tying state and executor together

pub mod controller;
pub mod debounce;
pub mod executor;

pub use controller::Controller;
pub use debounce::SearchDebouncer;
pub use executor::{ActionExecutor, DispatchSettings};
