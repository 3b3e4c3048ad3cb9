//! flashfind: the interactive front-end of a keyboard-driven quick-launcher.
//!
//! A single search box that, on every keystroke, produces a ranked list of
//! matching files plus an optional inline arithmetic result, and lets the user
//! open, reveal or copy results without touching the mouse.
//!
//! - Debounced, race-free search dispatch with a generation counter
//! - Inline calculator answers merged at the top of the list
//! - Keyboard and pointer selection with a viewport-clamped context menu
//! - Side effects isolated behind collaborator traits

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal host (main.rs)                            │  ← CLI, raw mode, event loop
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Dispatcher (dispatcher/)                           │  ← Debounce, timeout,
//! │  - Controller owns state and the event channel      │    effect tasks
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Pure state machine
//! │  - handle_event(state, event) → (render, actions)   │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌─────────────────┐   ┌───────────────┐
//! │ UI (ui/)      │   │ Infrastructure  │   │ Domain        │
//! │ - View model  │   │ - Service traits│   │ - SearchResult│
//! │ - ANSI frames │   │ - OS launcher   │   │ - Calculator  │
//! │ - Formatting  │   │ - Clipboard     │   │ - Errors      │
//! └───────────────┘   └─────────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← File-based tracing
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Event/action state machine
//! - [`dispatcher`]: Timer, search dispatch and effect execution
//! - [`domain`]: `SearchResult`, calculator, errors
//! - [`infrastructure`]: Collaborator contracts and system implementations
//! - [`startup`]: Once-per-process autostart routine
//! - [`ui`]: View model and rendering
//! - [`observability`]: Tracing subscriber with file export
//!
//! # Configuration
//!
//! Read from `~/.config/flashfind/config.toml` (or `--config PATH`), with
//! every key optional:
//!
//! ```toml
//! debounce_ms = 150
//! search_timeout_ms = 3000
//! max_results = 50
//! search_roots = ["~/Documents", "~/Downloads"]
//! scan_depth = 4
//! trace_level = "debug"
//! autostart = false
//! ```
//!
//! # Example
//!
//! ```rust
//! use flashfind::app::Viewport;
//! use flashfind::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default(), Viewport { width: 800, height: 600 });
//!
//! let (_, actions) = handle_event(&mut state, &Event::QueryChanged("5*6".into()))?;
//! let generation = state.generation;
//! assert_eq!(actions, vec![Action::ScheduleSearch { generation }]);
//!
//! let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed { generation })?;
//! assert!(matches!(&actions[..], [Action::DispatchSearch { .. }]));
//!
//! handle_event(&mut state, &Event::SearchCompleted { generation, results: vec![] })?;
//! assert_eq!(state.results.get(0).map(|r| r.name.as_str()), Some("= 30"));
//! # Ok::<(), flashfind::FlashfindError>(())
//! ```

pub mod app;
pub mod dispatcher;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod startup;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{FlashfindError, Result, SearchResult};

use app::{MenuGeometry, Viewport};
use dispatcher::DispatchSettings;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Runtime configuration.
///
/// Every field has a default, so a partial TOML file or an empty override map
/// is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quiet interval between the last keystroke and search dispatch. Default: 150
    pub debounce_ms: u64,

    /// Client-side bound on one search call; expiry counts as a failure. Default: 3000
    pub search_timeout_ms: u64,

    /// Maximum results returned by the scan service. Default: 50
    pub max_results: usize,

    /// Directories walked by the scan service; `~` is expanded. Default: `["~"]`
    pub search_roots: Vec<String>,

    /// Maximum directory depth below each root. Default: 4
    pub scan_depth: usize,

    /// Context menu width estimate in host units.
    ///
    /// Unset means the host's own default (200 for pixel hosts).
    pub menu_width: Option<u32>,

    /// Context menu height estimate in host units.
    pub menu_height: Option<u32>,

    /// Tracing filter directive (`trace`, `debug`, `info`, ...). Default: `"info"`
    pub trace_level: Option<String>,

    /// Register launch-at-login on startup. Default: `true`
    pub autostart: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            search_timeout_ms: 3000,
            max_results: 50,
            search_roots: vec!["~".to_string()],
            scan_depth: 4,
            menu_width: None,
            menu_height: None,
            trace_level: None,
            autostart: true,
        }
    }
}

impl Config {
    /// Builds a configuration from `key=value` pairs on top of the defaults.
    ///
    /// See [`apply_overrides`](Self::apply_overrides) for parsing rules.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use flashfind::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("search_roots".to_string(), "~/Documents, ~/Code".to_string());
    /// map.insert("debounce_ms".to_string(), "200".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.search_roots, vec!["~/Documents", "~/Code"]);
    /// assert_eq!(config.debounce_ms, 200);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut config = Self::default();
        config.apply_overrides(map);
        config
    }

    /// Applies `key=value` overrides.
    ///
    /// # Parsing Rules
    ///
    /// - Numeric keys keep their current value when the text does not parse
    /// - `search_roots`: comma-separated, empty entries dropped; ignored if none remain
    /// - `autostart`: `true`/`false`
    /// - `trace_level`: taken verbatim
    /// - Unknown keys are logged and ignored
    pub fn apply_overrides(&mut self, map: &BTreeMap<String, String>) {
        for (key, value) in map {
            let value = value.trim();
            match key.as_str() {
                "debounce_ms" => parse_into(&mut self.debounce_ms, key, value),
                "search_timeout_ms" => parse_into(&mut self.search_timeout_ms, key, value),
                "max_results" => parse_into(&mut self.max_results, key, value),
                "scan_depth" => parse_into(&mut self.scan_depth, key, value),
                "autostart" => parse_into(&mut self.autostart, key, value),
                "menu_width" => self.menu_width = value.parse().ok().or(self.menu_width),
                "menu_height" => self.menu_height = value.parse().ok().or(self.menu_height),
                "trace_level" => self.trace_level = Some(value.to_string()),
                "search_roots" => {
                    let roots: Vec<String> = value
                        .split(',')
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(String::from)
                        .collect();
                    if !roots.is_empty() {
                        self.search_roots = roots;
                    }
                }
                other => tracing::debug!(key = other, "ignoring unknown config key"),
            }
        }
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`FlashfindError::Config`] on malformed TOML or mistyped values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| FlashfindError::Config(e.to_string()))
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a config error if it
    /// does not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Loads `explicit` if given, else the default config file if it exists,
    /// else the defaults.
    ///
    /// # Errors
    ///
    /// Fails if `explicit` is missing or either file does not parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match infrastructure::default_config_file() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Timer settings for the dispatcher.
    #[must_use]
    pub const fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            search_timeout: Duration::from_millis(self.search_timeout_ms),
        }
    }

    /// Menu size estimate, falling back to `fallback` per unset dimension.
    #[must_use]
    pub fn menu_geometry_or(&self, fallback: MenuGeometry) -> MenuGeometry {
        MenuGeometry {
            width: self.menu_width.unwrap_or(fallback.width),
            height: self.menu_height.unwrap_or(fallback.height),
        }
    }
}

fn parse_into<T: std::str::FromStr>(slot: &mut T, key: &str, value: &str) {
    match value.parse() {
        Ok(parsed) => *slot = parsed,
        Err(_) => tracing::debug!(key, value, "invalid config value, keeping previous"),
    }
}

/// Creates the initial application state for `config`.
///
/// The menu estimate defaults to 200 × 150 host units unless configured.
#[must_use]
pub fn initialize(config: &Config, viewport: Viewport) -> AppState {
    tracing::debug!(
        debounce_ms = config.debounce_ms,
        search_timeout_ms = config.search_timeout_ms,
        "initializing flashfind"
    );
    AppState::new(config.menu_geometry_or(MenuGeometry::default()), viewport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.search_timeout_ms, 3000);
        assert_eq!(config.max_results, 50);
        assert_eq!(config.search_roots, vec!["~"]);
        assert!(config.autostart);
        assert_eq!(config.menu_geometry_or(MenuGeometry::default()), MenuGeometry { width: 200, height: 150 });
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("debounce_ms = 80\nsearch_roots = [\"/srv\"]\nmenu_width = 30\n").unwrap();
        assert_eq!(config.debounce_ms, 80);
        assert_eq!(config.search_roots, vec!["/srv"]);
        assert_eq!(config.search_timeout_ms, 3000);
        assert_eq!(
            config.menu_geometry_or(MenuGeometry { width: 20, height: 3 }),
            MenuGeometry { width: 30, height: 3 }
        );
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(matches!(Config::from_toml_str("debounce_ms = \"soon\""), Err(FlashfindError::Config(_))));
    }

    #[test]
    fn overrides_fall_back_per_key() {
        let map: BTreeMap<String, String> = [
            ("debounce_ms", "abc"),
            ("max_results", "10"),
            ("autostart", "false"),
            ("search_roots", " , "),
            ("unknown", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_map(&map);
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.max_results, 10);
        assert!(!config.autostart);
        assert_eq!(config.search_roots, vec!["~"]);
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "autostart = false\ntrace_level = \"debug\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(!config.autostart);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));

        assert!(matches!(Config::load(Some(&dir.path().join("missing.toml"))), Err(FlashfindError::Io(_))));
    }

    #[test]
    fn dispatch_settings_use_milliseconds() {
        let config = Config {
            debounce_ms: 10,
            search_timeout_ms: 20,
            ..Config::default()
        };
        let settings = config.dispatch_settings();
        assert_eq!(settings.debounce, Duration::from_millis(10));
        assert_eq!(settings.search_timeout, Duration::from_millis(20));
    }
}
