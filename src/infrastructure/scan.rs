//! Reference search service that scans directories on every query.
//!
//! [`ScanSearchService`] is what the terminal host uses when no external search
//! engine is wired in. It walks the configured roots up to a depth bound on a
//! blocking thread, scores each file name against the whitespace-separated
//! query tokens with the Skim fuzzy matcher, and returns the best matches.
//!
//! There is no index: every query re-walks the roots, so keep `depth` small on
//! large trees.

use super::paths::expand_tilde;
use super::services::SearchService;
use crate::domain::{FlashfindError, Result, SearchResult};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use futures_util::future::BoxFuture;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

/// Fuzzy file-name search over a fixed set of directory roots.
#[derive(Debug, Clone)]
pub struct ScanSearchService {
    inner: Arc<ScanConfig>,
}

#[derive(Debug)]
struct ScanConfig {
    roots: Vec<PathBuf>,
    depth: usize,
    max_results: usize,
}

impl ScanSearchService {
    /// Creates a service scanning `roots`.
    ///
    /// # Parameters
    ///
    /// * `roots` - Directories to walk; a leading `~` is expanded to the home directory
    /// * `depth` - Maximum directory depth below each root
    /// * `max_results` - Upper bound on the number of returned results
    #[must_use]
    pub fn new<S: AsRef<str>>(roots: &[S], depth: usize, max_results: usize) -> Self {
        let roots = roots.iter().map(|root| expand_tilde(root.as_ref())).collect();
        Self {
            inner: Arc::new(ScanConfig {
                roots,
                depth,
                max_results,
            }),
        }
    }
}

impl SearchService for ScanSearchService {
    fn search(&self, query: String) -> BoxFuture<'static, Result<Vec<SearchResult>>> {
        let config = Arc::clone(&self.inner);
        Box::pin(async move {
            tokio::task::spawn_blocking(move || scan(&config, &query))
                .await
                .map_err(|e| FlashfindError::Search(format!("scan task failed: {e}")))
        })
    }
}

fn scan(config: &ScanConfig, query: &str) -> Vec<SearchResult> {
    let _span = tracing::debug_span!("scan", query_len = query.len(), roots = config.roots.len()).entered();

    let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if tokens.is_empty() {
        return Vec::new();
    }
    let matcher = SkimMatcherV2::default();
    let mut results = Vec::new();

    for root in &config.roots {
        let entries = WalkDir::new(root)
            .min_depth(1)
            .max_depth(config.depth)
            .follow_links(false)
            .into_iter()
            .filter_map(std::result::Result::ok);

        for entry in entries {
            let name = entry.file_name().to_string_lossy().to_lowercase();
            let Some(score) = score_name(&matcher, &name, &tokens) else {
                continue;
            };
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            let modified = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map_or(0, |d| d.as_secs());
            let size = if metadata.is_file() { metadata.len() } else { 0 };

            results.push(SearchResult::file(
                entry.path().to_string_lossy(),
                size,
                modified,
                score,
            ));
        }
    }

    results.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.path.cmp(&b.path)));
    results.truncate(config.max_results);

    tracing::debug!(matches = results.len(), "scan finished");
    results
}

/// Sum of the per-token scores, or `None` if any token fails to match.
fn score_name(matcher: &SkimMatcherV2, name: &str, tokens: &[String]) -> Option<i64> {
    tokens
        .iter()
        .map(|token| matcher.fuzzy_match(name, token))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("docs/archive")).unwrap();
        fs::write(dir.path().join("docs/report.pdf"), b"pdf").unwrap();
        fs::write(dir.path().join("docs/archive/old-report.txt"), b"old").unwrap();
        fs::write(dir.path().join("notes.md"), b"# notes").unwrap();
        dir
    }

    #[tokio::test]
    async fn finds_matching_file_names() {
        let dir = tree();
        let service = ScanSearchService::new(&[dir.path().to_string_lossy()], 4, 50);

        let results = service.search("report".into()).await.unwrap();
        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(results.len(), 2);
        assert!(names.contains(&"report.pdf"));
        assert!(names.contains(&"old-report.txt"));
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[tokio::test]
    async fn respects_depth_and_result_limit() {
        let dir = tree();
        let root = dir.path().to_string_lossy().into_owned();

        let shallow = ScanSearchService::new(&[root.as_str()], 2, 50);
        let results = shallow.search("report".into()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "report.pdf");
        assert_eq!(results[0].size, 3);

        let limited = ScanSearchService::new(&[root.as_str()], 4, 1);
        assert_eq!(limited.search("report".into()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn every_token_must_match() {
        let dir = tree();
        let service = ScanSearchService::new(&[dir.path().to_string_lossy()], 4, 50);

        let results = service.search("old report".into()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].extension, "txt");

        assert!(service.search("zzzz".into()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_root_yields_no_results() {
        let service = ScanSearchService::new(&["/definitely/not/here"], 4, 50);
        assert!(service.search("report".into()).await.unwrap().is_empty());
    }
}
