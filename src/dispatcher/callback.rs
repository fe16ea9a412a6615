//! Completion callbacks and the guard that fires them exactly once.

use std::fmt;

use crate::model::DispatchOutcome;
use crate::origin::OriginHandle;

type BoxedCallback = Box<dyn FnOnce(DispatchOutcome) + Send + 'static>;

/// Per-dispatch completion callback. May be empty for fire-and-forget calls.
///
/// Any `FnOnce(DispatchOutcome) + Send` closure converts into a `Callback`,
/// so the named dispatcher operations accept closures directly. Closures
/// passed that way need the argument type written out
/// (`|outcome: DispatchOutcome| ..`); [`Callback::new`] infers it.
#[derive(Default)]
pub struct Callback(Option<BoxedCallback>);

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(DispatchOutcome) + Send + 'static,
    {
        Self(Some(Box::new(f)))
    }

    /// No callback: the outcome is logged and dropped.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Move the callback out, leaving an empty one behind.
    pub(crate) fn take(&mut self) -> Callback {
        Callback(self.0.take())
    }

    pub(crate) fn invoke(self, outcome: DispatchOutcome) {
        if let Some(f) = self.0 {
            f(outcome);
        }
    }
}

impl<F> From<F> for Callback
where
    F: FnOnce(DispatchOutcome) + Send + 'static,
{
    fn from(f: F) -> Self {
        Callback::new(f)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback")
            .field(&if self.0.is_some() { "set" } else { "none" })
            .finish()
    }
}

/// Travels with a dispatch task and hands its callback to the origin context.
///
/// If the task is dropped before [`complete`](Self::complete) runs (runtime
/// shutdown, panicking transport), `Drop` delivers a failure instead.
pub(crate) struct CompletionGuard {
    callback: Callback,
    origin: OriginHandle,
}

pub(crate) const ABORTED_REASON: &str = "dispatch aborted before completion";

impl CompletionGuard {
    pub(crate) fn new(callback: Callback, origin: OriginHandle) -> Self {
        Self { callback, origin }
    }

    pub(crate) fn complete(mut self, outcome: DispatchOutcome) {
        let callback = self.callback.take();
        self.origin.post(callback, outcome);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if self.callback.is_none() {
            return;
        }
        let callback = self.callback.take();
        self.origin
            .post(callback, DispatchOutcome::failed(ABORTED_REASON));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting() -> (Callback, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let callback = Callback::new(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (callback, calls)
    }

    #[test]
    fn test_closure_converts() {
        let callback: Callback = (|_outcome: DispatchOutcome| {}).into();
        assert!(!callback.is_none());
        assert!(Callback::none().is_none());
        assert!(Callback::default().is_none());
    }

    #[test]
    fn test_guard_complete_fires_once() {
        let (mut origin, handle) = origin::channel();
        let (callback, calls) = counting();

        CompletionGuard::new(callback, handle).complete(DispatchOutcome::completed(200, "ok"));

        assert_eq!(origin.run_pending(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_drop_reports_abort() {
        let (mut origin, handle) = origin::channel();
        let seen = Arc::new(std::sync::Mutex::new(None));
        let s = seen.clone();

        drop(CompletionGuard::new(
            Callback::new(move |outcome| *s.lock().unwrap() = Some(outcome)),
            handle,
        ));

        assert_eq!(origin.run_pending(), 1);
        assert_eq!(
            seen.lock().unwrap().take(),
            Some(DispatchOutcome::failed(ABORTED_REASON))
        );
    }

    #[test]
    fn test_debug_does_not_expose_closure() {
        assert_eq!(format!("{:?}", Callback::none()), r#"Callback("none")"#);
    }
}
