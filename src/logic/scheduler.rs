//! Debounce Scheduler
//!
//! `schedule(delay, task)` runs `task` once the delay elapses and hands
//! back a cancel handle. `Debouncer` keeps one such slot: scheduling again
//! aborts whatever was still pending, so a burst collapses into the last call.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Handle to one scheduled task
#[derive(Debug)]
pub struct ScheduledHandle {
    handle: JoinHandle<()>,
}

/// Run `task` once `delay` elapses; the handle cancels it
///
/// Must be called from within a tokio runtime.
pub fn schedule<F>(delay: Duration, task: F) -> ScheduledHandle
where
    F: Future<Output = ()> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        task.await;
    });
    ScheduledHandle { handle }
}

impl ScheduledHandle {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Single-slot debouncer; cloning shares the slot
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Arc<Mutex<Option<ScheduledHandle>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Schedule `task` after the configured delay, cancelling the previous one
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = schedule(self.delay, task);
        let previous = self.pending.lock().replace(handle);
        if let Some(previous) = previous {
            previous.cancel();
        }
    }

    /// Drop any pending task without running it
    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().take() {
            previous.cancel();
        }
    }

    /// True while a scheduled task has not yet finished
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}
