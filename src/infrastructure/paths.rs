//! Path utilities for per-user storage locations.
//!
//! This module resolves where flashfind keeps its logs, traces and
//! configuration, and expands `~` in user-supplied search roots. Locations
//! follow the platform conventions reported by the `dirs` crate.

use std::path::PathBuf;

/// Application directory name under the platform data and config roots.
pub const APP_DIR: &str = "flashfind";

/// Returns the data directory for logs and trace exports.
///
/// Resolves to `<data_dir>/flashfind`, typically `~/.local/share/flashfind` on
/// Linux. Falls back to the system temporary directory when the platform
/// reports no data directory.
///
/// # Examples
///
/// ```
/// use flashfind::infrastructure::data_dir;
///
/// assert!(data_dir().ends_with("flashfind"));
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

/// Returns the directory holding `config.toml`, if the platform has one.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Returns the default configuration file location.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde prefix, and all paths when no home directory is
/// known, are returned unchanged.
///
/// # Examples
///
/// ```
/// use flashfind::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// assert_ne!(expand_tilde("~/projects"), PathBuf::from("~/projects"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") || p.starts_with("~\\") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/docs"), home.join("docs"));
    }

    #[test]
    fn other_paths_are_untouched() {
        assert_eq!(expand_tilde("/tmp/x"), PathBuf::from("/tmp/x"));
        assert_eq!(expand_tilde("relative/~"), PathBuf::from("relative/~"));
        assert_eq!(expand_tilde("~user"), PathBuf::from("~user"));
    }

    #[test]
    fn config_file_lives_in_app_dir() {
        if let Some(file) = default_config_file() {
            assert!(file.ends_with("flashfind/config.toml"));
        }
    }
}
