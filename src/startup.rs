//! Once-per-process startup routine.
//!
//! Launch-at-login is registered the first time the launcher runs. The routine
//! is invoked once by the host before the event loop starts; its failures are
//! logged and reported as an [`AutostartOutcome`], never retried and never
//! surfaced to the user.

use crate::domain::{FlashfindError, Result};
use crate::infrastructure::Autostart;
use std::path::{Path, PathBuf};

/// Result of [`ensure_autostart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutostartOutcome {
    /// Launch-at-login was already registered; nothing was written.
    AlreadyEnabled,
    /// Launch-at-login was registered by this call.
    Enabled,
    /// Inspecting or registering failed with the given message.
    Failed(String),
}

/// Registers launch-at-login unless it is already registered.
///
/// # Example
///
/// ```rust
/// use flashfind::infrastructure::Autostart;
/// use flashfind::startup::{ensure_autostart, AutostartOutcome};
///
/// struct Enabled;
///
/// impl Autostart for Enabled {
///     fn is_enabled(&self) -> flashfind::Result<bool> { Ok(true) }
///     fn enable(&self) -> flashfind::Result<()> { unreachable!() }
/// }
///
/// assert_eq!(ensure_autostart(&Enabled), AutostartOutcome::AlreadyEnabled);
/// ```
pub fn ensure_autostart(autostart: &dyn Autostart) -> AutostartOutcome {
    let _span = tracing::debug_span!("ensure_autostart").entered();

    let outcome = match autostart.is_enabled() {
        Ok(true) => AutostartOutcome::AlreadyEnabled,
        Ok(false) => match autostart.enable() {
            Ok(()) => AutostartOutcome::Enabled,
            Err(e) => AutostartOutcome::Failed(e.to_string()),
        },
        Err(e) => AutostartOutcome::Failed(e.to_string()),
    };

    match &outcome {
        AutostartOutcome::Failed(error) => tracing::warn!(error = %error, "autostart registration failed"),
        AutostartOutcome::Enabled => tracing::info!("autostart enabled"),
        AutostartOutcome::AlreadyEnabled => tracing::debug!("autostart already enabled"),
    }
    outcome
}

/// XDG autostart entry (`~/.config/autostart/flashfind.desktop`).
#[derive(Debug, Clone)]
pub struct DesktopEntryAutostart {
    path: PathBuf,
    exec: String,
}

impl DesktopEntryAutostart {
    /// Creates an entry at `path` launching `exec`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, exec: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            exec: exec.into(),
        }
    }

    /// Entry in the current user's autostart directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform has no config directory.
    pub fn for_current_user(exec: impl Into<String>) -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| FlashfindError::Autostart("no config directory".to_string()))?;
        Ok(Self::new(dir.join("autostart").join("flashfind.desktop"), exec))
    }

    /// Location of the entry file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn contents(&self) -> String {
        format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name=flashfind\n\
             Comment=Quick file launcher\n\
             Exec={}\n\
             Terminal=true\n\
             X-GNOME-Autostart-enabled=true\n",
            self.exec
        )
    }
}

impl Autostart for DesktopEntryAutostart {
    fn is_enabled(&self) -> Result<bool> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(!contents
                .lines()
                .map(str::trim)
                .any(|line| line == "Hidden=true" || line == "X-GNOME-Autostart-enabled=false")),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(FlashfindError::Autostart(format!("{}: {e}", self.path.display()))),
        }
    }

    fn enable(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, self.contents())?;
        tracing::debug!(path = %self.path.display(), "autostart entry written");
        Ok(())
    }
}
