//! Domain layer for the flashfind launcher.
//!
//! This module contains the core domain types and pure logic, independent of
//! any host window, terminal or async runtime.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`result`]: The [`SearchResult`] row model
//! - [`calculator`]: Restricted arithmetic evaluator producing pseudo-results
//!
//! # Examples
//!
//! ```
//! use flashfind::domain::{calculator, SearchResult};
//!
//! let calc: Option<SearchResult> = calculator::evaluate_query("5*6");
//! assert_eq!(calc.map(|r| r.name), Some("= 30".to_string()));
//! ```

pub mod calculator;
pub mod error;
pub mod result;

pub use error::{FlashfindError, Result};
pub use result::{SearchResult, CALC_EXTENSION, CALC_SCORE};
