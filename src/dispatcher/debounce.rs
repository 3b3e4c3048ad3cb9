//! Debounce timer for search dispatch.
//!
//! At most one timer is armed at a time. Arming a new one aborts the previous
//! task, so a burst of keystrokes inside the quiet interval produces a single
//! [`Event::DebounceElapsed`] for the last generation.

use crate::app::Event;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Single-slot debounce timer feeding the controller's event channel.
///
/// Must be used from within a Tokio runtime.
#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    events: UnboundedSender<Event>,
    pending: Option<JoinHandle<()>>,
    shut_down: bool,
}

impl SearchDebouncer {
    /// Creates an idle debouncer with the given quiet interval.
    #[must_use]
    pub const fn new(delay: Duration, events: UnboundedSender<Event>) -> Self {
        Self {
            delay,
            events,
            pending: None,
            shut_down: false,
        }
    }

    /// Arms the timer for `generation`, replacing any pending one.
    ///
    /// Ignored after [`shutdown`](Self::shutdown).
    pub fn schedule(&mut self, generation: u64) {
        if self.shut_down {
            tracing::debug!(generation, "debouncer shut down, not scheduling");
            return;
        }
        self.cancel();

        let delay = self.delay;
        let events = self.events.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if events.send(Event::DebounceElapsed { generation }).is_err() {
                tracing::debug!(generation, "event loop gone before debounce elapsed");
            }
        }));
    }

    /// Aborts the pending timer.
    ///
    /// Returns `true` if a timer was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    /// Returns `true` while a timer is armed and has not fired.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Cancels the pending timer and refuses all later scheduling.
    pub fn shutdown(&mut self) {
        self.cancel();
        self.shut_down = true;
    }

    /// Quiet interval between the last query change and dispatch.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    const DELAY: Duration = Duration::from_millis(150);

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_quiet_interval() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = SearchDebouncer::new(DELAY, tx);

        debouncer.schedule(1);
        assert!(debouncer.is_pending());

        tokio::time::sleep(debouncer.delay() - Duration::from_millis(1)).await;
        assert!(rx.try_recv().is_err());

        assert_eq!(rx.recv().await, Some(Event::DebounceElapsed { generation: 1 }));
        tokio::task::yield_now().await;
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_keeps_only_the_last_generation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = SearchDebouncer::new(DELAY, tx);

        for generation in 1..=5 {
            debouncer.schedule(generation);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        assert_eq!(rx.recv().await, Some(Event::DebounceElapsed { generation: 5 }));
        tokio::time::sleep(debouncer.delay() * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_shutdown_suppress_dispatch() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = SearchDebouncer::new(DELAY, tx);

        debouncer.schedule(1);
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        debouncer.shutdown();
        debouncer.schedule(2);
        assert!(!debouncer.is_pending());

        tokio::time::sleep(debouncer.delay() * 2).await;
        assert!(rx.try_recv().is_err());
    }
}
