//! Recording fakes for the collaborator traits.

#![allow(dead_code)]

use flashfind::app::{AppState, MenuGeometry, Viewport};
use flashfind::dispatcher::{Controller, DispatchSettings};
use flashfind::infrastructure::{Clipboard, Collaborators, FileLauncher, SearchService, WindowHost};
use flashfind::{FlashfindError, Result, SearchResult};
use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted answer for one query.
#[derive(Clone)]
pub enum Reply {
    Results(Vec<SearchResult>),
    Error(String),
}

#[derive(Default)]
pub struct FakeSearch {
    replies: Mutex<HashMap<String, (Duration, Reply)>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeSearch {
    pub fn reply(&self, query: &str, delay: Duration, reply: Reply) {
        self.replies.lock().unwrap().insert(query.to_string(), (delay, reply));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl SearchService for FakeSearch {
    fn search(&self, query: String) -> BoxFuture<'static, Result<Vec<SearchResult>>> {
        self.calls.lock().unwrap().push(query.clone());
        let scripted = self.replies.lock().unwrap().get(&query).cloned();
        Box::pin(async move {
            let (delay, reply) = scripted.unwrap_or((Duration::ZERO, Reply::Results(Vec::new())));
            tokio::time::sleep(delay).await;
            match reply {
                Reply::Results(results) => Ok(results),
                Reply::Error(message) => Err(FlashfindError::Search(message)),
            }
        })
    }
}

#[derive(Default)]
pub struct FakeLauncher {
    pub fail: bool,
    pub opened: Mutex<Vec<String>>,
    pub revealed: Mutex<Vec<String>>,
}

impl FileLauncher for FakeLauncher {
    fn open_file(&self, path: String) -> BoxFuture<'static, Result<()>> {
        self.opened.lock().unwrap().push(path.clone());
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                return Err(FlashfindError::Launch(format!("no handler for {path}")));
            }
            Ok(())
        })
    }

    fn show_in_folder(&self, path: String) -> BoxFuture<'static, Result<()>> {
        self.revealed.lock().unwrap().push(path);
        Box::pin(async { Ok(()) })
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    pub writes: Mutex<Vec<String>>,
}

impl Clipboard for FakeClipboard {
    fn write_text(&self, text: String) -> BoxFuture<'static, Result<()>> {
        self.writes.lock().unwrap().push(text);
        Box::pin(async { Ok(()) })
    }
}

#[derive(Default)]
pub struct FakeWindow {
    pub hides: Arc<Mutex<usize>>,
}

impl WindowHost for FakeWindow {
    fn hide(&self) -> BoxFuture<'static, Result<()>> {
        let hides = Arc::clone(&self.hides);
        Box::pin(async move {
            *hides.lock().unwrap() += 1;
            Ok(())
        })
    }
}

pub struct Harness {
    pub controller: Controller,
    pub search: Arc<FakeSearch>,
    pub launcher: Arc<FakeLauncher>,
    pub clipboard: Arc<FakeClipboard>,
    pub window: Arc<FakeWindow>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_launcher(FakeLauncher::default())
    }

    pub fn with_launcher(launcher: FakeLauncher) -> Self {
        let search = Arc::new(FakeSearch::default());
        let launcher = Arc::new(launcher);
        let clipboard = Arc::new(FakeClipboard::default());
        let window = Arc::new(FakeWindow::default());

        let collaborators = Collaborators {
            search: search.clone(),
            launcher: launcher.clone(),
            clipboard: clipboard.clone(),
            window: window.clone(),
        };
        let state = AppState::new(MenuGeometry::default(), Viewport { width: 800, height: 600 });
        let settings = DispatchSettings {
            debounce: Duration::from_millis(150),
            search_timeout: Duration::from_millis(3000),
        };

        Self {
            controller: Controller::new(state, collaborators, settings),
            search,
            launcher,
            clipboard,
            window,
        }
    }

    /// Handles internal events until the current search has settled.
    pub async fn settle(&mut self) {
        while self.controller.state().results.loading {
            self.controller.pump().await.expect("controller channel closed");
        }
    }

    /// Handles exactly one internal event.
    pub async fn pump(&mut self) {
        self.controller.pump().await.expect("controller channel closed");
    }

    /// Lets spawned effect tasks run to completion.
    pub async fn idle(&self) {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    pub fn hides(&self) -> usize {
        *self.window.hides.lock().unwrap()
    }

    pub fn names(&self) -> Vec<String> {
        self.controller
            .state()
            .results
            .items()
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }
}

pub fn file(path: &str, score: i64) -> SearchResult {
    SearchResult::file(path, 2048, 1_700_000_000, score)
}
