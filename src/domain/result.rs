//! Search result domain model.
//!
//! This module defines [`SearchResult`], the single row type shown in the
//! launcher list. Results come from the search service or are synthesized by
//! the calculator as pseudo-results.

use serde::{Deserialize, Serialize};

/// Extension tag marking a calculator pseudo-result.
pub const CALC_EXTENSION: &str = "calc";

/// Score assigned to calculator pseudo-results.
///
/// Higher than any score a search service can produce, so the calculator
/// answer always ranks first.
pub const CALC_SCORE: i64 = i64::MAX;

/// A single entry in the result list.
///
/// `path` doubles as the stable display key. For calculator pseudo-results it
/// holds the computed value as text, which is what gets copied on commit.
///
/// # Examples
///
/// ```
/// use flashfind::domain::SearchResult;
///
/// let result = SearchResult::file("C:\\docs\\report.pdf", 2048, 1_700_000_000, 120);
/// assert_eq!(result.name, "report.pdf");
/// assert_eq!(result.extension, "pdf");
/// assert!(!result.is_calculation());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub path: String,
    pub name: String,
    pub extension: String,
    pub size: u64,
    pub modified: u64,
    pub score: i64,
}

impl SearchResult {
    /// Builds a file result, deriving `name` and `extension` from `path`.
    ///
    /// Both `/` and `\` are accepted as separators so Windows paths reported
    /// by a remote service resolve the same way on every host.
    #[must_use]
    pub fn file(path: impl Into<String>, size: u64, modified: u64, score: i64) -> Self {
        let path = path.into();
        let name = path
            .rsplit(['/', '\\'])
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(&path)
            .to_string();
        let extension = name
            .rsplit_once('.')
            .filter(|(stem, _)| !stem.is_empty())
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        Self {
            path,
            name,
            extension,
            size,
            modified,
            score,
        }
    }

    /// Builds a calculator pseudo-result for an already formatted value.
    #[must_use]
    pub fn calculation(value: &str) -> Self {
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
        Self {
            path: value.to_string(),
            name: format!("= {value}"),
            extension: CALC_EXTENSION.to_string(),
            size: 0,
            modified: now,
            score: CALC_SCORE,
        }
    }

    /// Returns `true` for calculator pseudo-results.
    #[must_use]
    pub fn is_calculation(&self) -> bool {
        self.extension == CALC_EXTENSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_splits_windows_and_unix_paths() {
        let win = SearchResult::file("C:\\Users\\me\\notes.TXT", 10, 0, 1);
        assert_eq!(win.name, "notes.TXT");
        assert_eq!(win.extension, "txt");

        let unix = SearchResult::file("/home/me/archive.tar.gz", 10, 0, 1);
        assert_eq!(unix.name, "archive.tar.gz");
        assert_eq!(unix.extension, "gz");
    }

    #[test]
    fn dotfiles_and_folders_have_no_extension() {
        assert_eq!(SearchResult::file("/home/me/.bashrc", 0, 0, 0).extension, "");
        assert_eq!(SearchResult::file("/home/me/projects", 0, 0, 0).extension, "");
    }

    #[test]
    fn calculation_uses_sentinel_score_and_value_as_path() {
        let calc = SearchResult::calculation("15");
        assert_eq!(calc.name, "= 15");
        assert_eq!(calc.path, "15");
        assert_eq!(calc.size, 0);
        assert_eq!(calc.score, CALC_SCORE);
        assert!(calc.is_calculation());
    }

    #[test]
    fn serializes_with_flat_field_names() {
        let result = SearchResult::file("/tmp/a.md", 1, 2, 3);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["path"], "/tmp/a.md");
        assert_eq!(json["extension"], "md");
        assert_eq!(json["modified"], 2);
    }
}
