//! Error types for the flashfind launcher.
//!
//! This module defines the centralized error type [`FlashfindError`] and a type
//! alias [`Result`] used by collaborators, configuration loading and startup.
//! All errors are implemented using the `thiserror` crate.
//!
//! Errors never escape the interaction loop: the dispatcher converts every
//! collaborator failure into a completion event carrying the error message, and
//! the event handler degrades to a safe UI state.

use thiserror::Error;

/// The main error type for flashfind operations.
///
/// # Examples
///
/// ```
/// use flashfind::domain::FlashfindError;
///
/// fn open_missing() -> Result<(), FlashfindError> {
///     Err(FlashfindError::Launch("no handler registered".to_string()))
/// }
///
/// assert!(open_missing().is_err());
/// ```
#[derive(Debug, Error)]
pub enum FlashfindError {
    /// The search service failed to produce results.
    ///
    /// Covers transport-style failures (IPC, blocking task panics) as well as
    /// failures reported by the service itself.
    #[error("Search error: {0}")]
    Search(String),

    /// The search service did not answer within the configured timeout.
    #[error("Search timed out after {0} ms")]
    Timeout(u64),

    /// Opening a file or revealing it in the file manager failed.
    #[error("Launch error: {0}")]
    Launch(String),

    /// Writing to the system clipboard failed.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// The host window could not be hidden.
    #[error("Window error: {0}")]
    Window(String),

    /// Querying or registering launch-at-login failed.
    #[error("Autostart error: {0}")]
    Autostart(String),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Automatically converts from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for flashfind operations.
pub type Result<T> = std::result::Result<T, FlashfindError>;
