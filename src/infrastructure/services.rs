//! Contracts for the collaborators the controller talks to.
//!
//! The controller never touches the filesystem, the clipboard or the window
//! directly. It goes through these object-safe traits so the host can plug in
//! system implementations and tests can plug in recording fakes.
//!
//! Asynchronous calls return a boxed `'static` future; implementations clone
//! whatever they need before building the future so the dispatcher can spawn
//! it on the runtime.

use crate::domain::{Result, SearchResult};
use futures_util::future::BoxFuture;
use std::sync::Arc;

/// File search backend.
///
/// Receives a non-empty query and returns zero or more results in its own
/// ranking order. The dispatcher never re-sorts them.
pub trait SearchService: Send + Sync {
    fn search(&self, query: String) -> BoxFuture<'static, Result<Vec<SearchResult>>>;
}

/// OS integration for launching and revealing paths.
pub trait FileLauncher: Send + Sync {
    /// Opens `path` with its default handler.
    fn open_file(&self, path: String) -> BoxFuture<'static, Result<()>>;

    /// Shows `path` in the system file manager.
    fn show_in_folder(&self, path: String) -> BoxFuture<'static, Result<()>>;
}

/// System clipboard.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: String) -> BoxFuture<'static, Result<()>>;
}

/// The window hosting the search box.
///
/// `hide` must be idempotent; it may race with other hide requests.
pub trait WindowHost: Send + Sync {
    fn hide(&self) -> BoxFuture<'static, Result<()>>;
}

/// Launch-at-login registration, consulted once at process start.
pub trait Autostart {
    /// Reports whether launch-at-login is currently registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the registration cannot be inspected.
    fn is_enabled(&self) -> Result<bool>;

    /// Registers launch-at-login.
    ///
    /// # Errors
    ///
    /// Returns an error if the registration cannot be written.
    fn enable(&self) -> Result<()>;
}

/// Bundle of the runtime collaborators used by the action executor.
#[derive(Clone)]
pub struct Collaborators {
    pub search: Arc<dyn SearchService>,
    pub launcher: Arc<dyn FileLauncher>,
    pub clipboard: Arc<dyn Clipboard>,
    pub window: Arc<dyn WindowHost>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
