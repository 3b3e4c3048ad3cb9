//! Executes [`Action`]s against the collaborators.
//!
//! Every effect runs in its own spawned task, so a slow clipboard or file
//! manager never blocks the event loop and a failure in one effect cannot
//! affect another. Completions travel back to the controller as [`Event`]s on
//! the same channel the debounce timer uses.

use super::debounce::SearchDebouncer;
use crate::app::{Action, Event};
use crate::domain::FlashfindError;
use crate::infrastructure::Collaborators;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Timing knobs for the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSettings {
    /// Quiet interval between the last query change and dispatch.
    pub debounce: Duration,
    /// Upper bound on a single search service call.
    pub search_timeout: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(150),
            search_timeout: Duration::from_millis(3000),
        }
    }
}

/// Runs actions emitted by the event handler.
#[derive(Debug)]
pub struct ActionExecutor {
    collaborators: Collaborators,
    events: UnboundedSender<Event>,
    debouncer: SearchDebouncer,
    search_timeout: Duration,
    shut_down: bool,
}

impl ActionExecutor {
    /// Creates an executor reporting completions on `events`.
    #[must_use]
    pub fn new(collaborators: Collaborators, events: UnboundedSender<Event>, settings: DispatchSettings) -> Self {
        Self {
            debouncer: SearchDebouncer::new(settings.debounce, events.clone()),
            collaborators,
            events,
            search_timeout: settings.search_timeout,
            shut_down: false,
        }
    }

    /// Executes one action.
    ///
    /// Timer actions take effect immediately; collaborator calls are spawned
    /// and complete later through the event channel. Must be called from
    /// within a Tokio runtime.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn execute(&mut self, action: Action) {
        if self.shut_down {
            tracing::debug!("executor shut down, dropping action");
            return;
        }

        match action {
            Action::ScheduleSearch { generation } => self.debouncer.schedule(generation),
            Action::CancelSearch => {
                if self.debouncer.cancel() {
                    tracing::debug!("pending search timer cancelled");
                }
            }
            Action::DispatchSearch { generation, query } => self.dispatch_search(generation, query),
            Action::OpenFile { path } => {
                let call = self.collaborators.launcher.open_file(path.clone());
                self.complete(async move {
                    let error = call.await.err().map(|e| e.to_string());
                    Event::OpenFinished { path, error }
                });
            }
            Action::ShowInFolder { path } => {
                let call = self.collaborators.launcher.show_in_folder(path.clone());
                self.complete(async move {
                    let error = call.await.err().map(|e| e.to_string());
                    Event::RevealFinished { path, error }
                });
            }
            Action::CopyText { text, commit } => {
                let call = self.collaborators.clipboard.write_text(text.clone());
                self.complete(async move {
                    let error = call.await.err().map(|e| e.to_string());
                    Event::CopyFinished { text, commit, error }
                });
            }
            Action::HideWindow => {
                let call = self.collaborators.window.hide();
                tokio::spawn(async move {
                    if let Err(e) = call.await {
                        tracing::warn!(error = %e, "failed to hide window");
                    }
                });
            }
        }
    }

    /// Cancels the pending timer and drops every later action.
    ///
    /// Searches already dispatched run to completion; their events are
    /// delivered only if the receiver is still alive.
    pub fn shutdown(&mut self) {
        self.debouncer.shutdown();
        self.shut_down = true;
    }

    /// Returns `true` while a debounce timer is armed.
    #[must_use]
    pub fn has_pending_search(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn dispatch_search(&self, generation: u64, query: String) {
        tracing::debug!(generation, query = %query, "dispatching search");

        let timeout = self.search_timeout;
        let call = self.collaborators.search.search(query);
        self.complete(async move {
            match tokio::time::timeout(timeout, call).await {
                Ok(Ok(results)) => Event::SearchCompleted { generation, results },
                Ok(Err(e)) => Event::SearchFailed {
                    generation,
                    error: e.to_string(),
                },
                Err(_) => {
                    let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
                    Event::SearchFailed {
                        generation,
                        error: FlashfindError::Timeout(millis).to_string(),
                    }
                }
            }
        });
    }

    /// Spawns `effect` and forwards the event it resolves to.
    fn complete<F>(&self, effect: F)
    where
        F: std::future::Future<Output = Event> + Send + 'static,
    {
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = effect.await;
            let kind = event.kind();
            if events.send(event).is_err() {
                tracing::debug!(event = kind, "event loop gone, dropping completion");
            }
        });
    }
}
