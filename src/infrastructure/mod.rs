//! Infrastructure layer: collaborator contracts and their system implementations.
//!
//! The controller reaches the outside world only through the traits in
//! [`services`]. This layer also provides the implementations the terminal
//! host wires in, and resolves per-user storage locations.
//!
//! # Modules
//!
//! - [`services`]: `SearchService`, `FileLauncher`, `Clipboard`, `WindowHost`, `Autostart`
//! - [`system`]: OS default-handler launching and the `arboard` clipboard
//! - [`scan`]: Directory-walking fuzzy search used when no engine is wired in
//! - [`paths`]: Data and config directories, tilde expansion

pub mod paths;
pub mod scan;
pub mod services;
pub mod system;

pub use paths::{config_dir, data_dir, default_config_file, expand_tilde};
pub use scan::ScanSearchService;
pub use services::{Autostart, Clipboard, Collaborators, FileLauncher, SearchService, WindowHost};
pub use system::{SystemClipboard, SystemLauncher};
