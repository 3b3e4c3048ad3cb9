//! The single event loop owner: state, executor and event channel.

use super::executor::{ActionExecutor, DispatchSettings};
use crate::app::{handle_event, AppState, Event};
use crate::infrastructure::Collaborators;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Drives [`handle_event`] and executes the resulting actions.
///
/// Host input is fed through [`handle`](Self::handle); timer expiries and
/// collaborator completions arrive on the internal channel and are drained
/// with [`pump`](Self::pump). All state mutation happens on the caller's task.
///
/// # Example
///
/// ```rust,no_run
/// # async fn run(collaborators: flashfind::infrastructure::Collaborators) {
/// use flashfind::app::{AppState, Event};
/// use flashfind::dispatcher::{Controller, DispatchSettings};
///
/// let mut controller = Controller::new(AppState::default(), collaborators, DispatchSettings::default());
/// controller.handle(Event::QueryChanged("report".into()));
/// while controller.pump().await.is_some() {
///     if !controller.state().results.loading {
///         break;
///     }
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct Controller {
    state: AppState,
    executor: ActionExecutor,
    sender: UnboundedSender<Event>,
    receiver: UnboundedReceiver<Event>,
}

impl Controller {
    /// Creates a controller around `state`.
    #[must_use]
    pub fn new(state: AppState, collaborators: Collaborators, settings: DispatchSettings) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            state,
            executor: ActionExecutor::new(collaborators, sender.clone(), settings),
            sender,
            receiver,
        }
    }

    /// Current application state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Sender for injecting events from other tasks.
    #[must_use]
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.sender.clone()
    }

    /// Handles one event and executes its actions.
    ///
    /// Returns `true` when the view must be redrawn. Handler errors are logged
    /// and leave the loop running.
    pub fn handle(&mut self, event: Event) -> bool {
        match handle_event(&mut self.state, &event) {
            Ok((render, actions)) => {
                tracing::debug!(
                    event = event.kind(),
                    action_count = actions.len(),
                    render,
                    "event handled"
                );
                for action in actions {
                    self.executor.execute(action);
                }
                render
            }
            Err(e) => {
                tracing::warn!(event = event.kind(), error = %e, "error handling event");
                false
            }
        }
    }

    /// Waits for the next internal event.
    ///
    /// Never returns `None` while the controller is alive, since it holds a
    /// sender itself.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Waits for the next internal event and handles it.
    ///
    /// Returns the render flag, or `None` if the channel closed.
    pub async fn pump(&mut self) -> Option<bool> {
        let event = self.next_event().await?;
        Some(self.handle(event))
    }

    /// Handles every internal event that is already queued.
    ///
    /// Returns `true` if any of them requested a redraw.
    pub fn drain(&mut self) -> bool {
        let mut render = false;
        while let Ok(event) = self.receiver.try_recv() {
            render |= self.handle(event);
        }
        render
    }

    /// Returns `true` while a debounce timer is armed.
    #[must_use]
    pub fn has_pending_search(&self) -> bool {
        self.executor.has_pending_search()
    }

    /// Stops the timer and ignores all later actions.
    pub fn shutdown(&mut self) {
        tracing::debug!("controller shutting down");
        self.executor.shutdown();
    }
}
