//! The caller's execution context.
//!
//! Network work runs on runtime worker threads, but callbacks must run where
//! the caller lives. Each finished dispatch posts its callback and outcome to
//! an [`OriginHandle`]; the caller drains the matching [`OriginContext`] from
//! its own thread or task, and the callbacks run inside that drain call.
//!
//! ```text
//! Dispatch 1 ─┐
//! Dispatch 2 ─┼─► mpsc::UnboundedSender<Completion> ─► OriginContext (caller drains)
//! Dispatch N ─┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! let (mut origin, handle) = origin::channel();
//! let dispatcher = Dispatcher::builder()
//!     .base_endpoint("https://api.example.com")
//!     .origin(handle)
//!     .build()?;
//!
//! dispatcher.request_auth_token(|outcome: DispatchOutcome| println!("{}", outcome.status()));
//! origin.next().await;
//! ```

use tokio::sync::mpsc;

use crate::dispatcher::Callback;
use crate::model::DispatchOutcome;

/// A finished dispatch waiting to be delivered.
pub(crate) struct Completion {
    callback: Callback,
    outcome: DispatchOutcome,
}

impl Completion {
    fn deliver(self) {
        self.callback.invoke(self.outcome);
    }
}

/// Create a connected context/handle pair.
pub fn channel() -> (OriginContext, OriginHandle) {
    let (tx, rx) = mpsc::unbounded_channel();
    (OriginContext { rx }, OriginHandle { tx })
}

/// Sending side, held by the dispatcher. Cheaply cloneable.
#[derive(Debug, Clone)]
pub struct OriginHandle {
    tx: mpsc::UnboundedSender<Completion>,
}

impl OriginHandle {
    /// Queue a callback for delivery on the origin context.
    ///
    /// Empty callbacks are not queued. If the context is gone the completion
    /// is logged and dropped.
    pub(crate) fn post(&self, callback: Callback, outcome: DispatchOutcome) {
        if callback.is_none() {
            return;
        }
        if self.tx.send(Completion { callback, outcome }).is_err() {
            tracing::debug!("Origin context dropped, discarding completion");
        }
    }

    /// Check whether the receiving context still exists.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving side, owned and drained by the caller.
#[derive(Debug)]
pub struct OriginContext {
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl OriginContext {
    /// Run every completion that is already queued, without waiting.
    ///
    /// Returns the number of callbacks run.
    pub fn run_pending(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(completion) = self.rx.try_recv() {
            completion.deliver();
            delivered += 1;
        }
        delivered
    }

    /// Wait for the next completion and run its callback.
    ///
    /// Returns `false` once every handle is dropped and the queue is empty.
    pub async fn next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(completion) => {
                completion.deliver();
                true
            }
            None => false,
        }
    }

    /// Blocking variant of [`next`](Self::next) for plain threads.
    ///
    /// # Panics
    ///
    /// Panics if called from within an async execution context.
    pub fn blocking_next(&mut self) -> bool {
        match self.rx.blocking_recv() {
            Some(completion) => {
                completion.deliver();
                true
            }
            None => false,
        }
    }

    /// Run callbacks until every handle has been dropped.
    pub async fn run(&mut self) {
        while self.next().await {}
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_run_pending_delivers_in_queue_order() {
        let (mut origin, handle) = channel();
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));

        for status in [200u16, 404, 500] {
            let seen = seen.clone();
            handle.post(
                Callback::new(move |outcome: DispatchOutcome| {
                    seen.lock().unwrap().push(outcome.status())
                }),
                DispatchOutcome::completed(status, ""),
            );
        }

        assert_eq!(origin.run_pending(), 3);
        assert_eq!(*seen.lock().unwrap(), vec![200, 404, 500]);
        assert_eq!(origin.run_pending(), 0);
    }

    #[test]
    fn test_empty_callback_not_queued() {
        let (mut origin, handle) = channel();
        handle.post(Callback::none(), DispatchOutcome::completed(200, ""));
        drop(handle);
        assert_eq!(origin.run_pending(), 0);
    }

    #[test]
    fn test_post_after_context_dropped() {
        let (origin, handle) = channel();
        drop(origin);
        assert!(handle.is_closed());

        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        handle.post(
            Callback::new(move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            }),
            DispatchOutcome::failed("gone"),
        );
        assert_eq!(Arc::strong_count(&calls), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_next_returns_false_when_closed() {
        let (mut origin, handle) = channel();
        drop(handle);
        assert!(!origin.next().await);
    }

    #[test]
    fn test_blocking_next_from_plain_thread() {
        let (mut origin, handle) = channel();
        let worker = std::thread::spawn(move || {
            handle.post(
                Callback::new(|_| {}),
                DispatchOutcome::completed(204, ""),
            );
        });
        assert!(origin.blocking_next());
        worker.join().unwrap();
        assert!(!origin.blocking_next());
    }
}
