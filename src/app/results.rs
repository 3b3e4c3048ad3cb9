//! Result set model: merged display list plus loading flag.
//!
//! The order held here is the final display order. Nothing in the controller
//! re-sorts results; the search service owns ranking and the calculator answer
//! is simply placed in front.

use crate::domain::SearchResult;

/// Ordered list of results currently on screen.
///
/// Invariant: when a calculator pseudo-result is present it sits at index 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    items: Vec<SearchResult>,

    /// `true` while a search for the current query is pending.
    pub loading: bool,
}

impl ResultSet {
    /// Combines the calculator answer with the service results.
    ///
    /// `calc` is prepended when present; otherwise the service results are
    /// returned unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flashfind::app::ResultSet;
    /// use flashfind::domain::SearchResult;
    ///
    /// let files = vec![SearchResult::file("/tmp/a.txt", 1, 0, 10)];
    /// let merged = ResultSet::merge(Some(SearchResult::calculation("2")), files);
    /// assert_eq!(merged.len(), 2);
    /// assert!(merged.get(0).unwrap().is_calculation());
    /// ```
    #[must_use]
    pub fn merge(calc: Option<SearchResult>, service_results: Vec<SearchResult>) -> Self {
        let items = match calc {
            Some(calc) => {
                let mut items = Vec::with_capacity(service_results.len() + 1);
                items.push(calc);
                items.extend(service_results);
                items
            }
            None => service_results,
        };
        Self { items, loading: false }
    }

    #[must_use]
    pub fn items(&self) -> &[SearchResult] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SearchResult> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clamps a selection index to the bounds of this set.
    ///
    /// Returns `0` for an empty set, otherwise `index` limited to `len - 1`.
    #[must_use]
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.items.len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(n: usize) -> Vec<SearchResult> {
        (0..n)
            .map(|i| SearchResult::file(format!("/data/file{i}.txt"), 0, 0, 100 - i as i64))
            .collect()
    }

    #[test]
    fn merge_without_calc_keeps_service_order() {
        let service = files(3);
        let merged = ResultSet::merge(None, service.clone());
        assert_eq!(merged.items(), service.as_slice());
        assert!(!merged.loading);
    }

    #[test]
    fn merge_places_calc_first() {
        let merged = ResultSet::merge(Some(SearchResult::calculation("30")), files(4));
        assert_eq!(merged.len(), 5);
        assert_eq!(merged.get(0).map(|r| r.name.as_str()), Some("= 30"));
        assert_eq!(merged.get(1).map(|r| r.path.as_str()), Some("/data/file0.txt"));
    }

    #[test]
    fn clamp_index_handles_empty_and_overflow() {
        assert_eq!(ResultSet::default().clamp_index(7), 0);
        let set = ResultSet::merge(None, files(3));
        assert_eq!(set.clamp_index(2), 2);
        assert_eq!(set.clamp_index(9), 2);
    }
}
