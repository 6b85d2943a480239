//! Single-slot cancellable timer for deferring an action until input settles.

use std::{
    future::Future,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use tokio::task::JoinHandle;
use tracing::debug;

struct Pending {
    fired: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

/// Holds at most one pending action. Scheduling a new action cancels the
/// previous one if its delay has not elapsed yet; an action that already
/// fired is left to finish.
pub struct Debouncer {
    delay: Duration,
    slot: Mutex<Option<Pending>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Mutex::new(None),
        }
    }

    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let fired = Arc::new(AtomicBool::new(false));
        let delay = self.delay;
        let task = tokio::spawn({
            let fired = Arc::clone(&fired);
            async move {
                tokio::time::sleep(delay).await;
                fired.store(true, Ordering::SeqCst);
                action.await;
            }
        });

        let previous = self.lock_slot().replace(Pending { fired, task });
        if let Some(previous) = previous {
            Self::cancel_pending(previous);
        }
    }

    /// Cancels the pending action. Returns true if one was waiting.
    pub fn cancel(&self) -> bool {
        let previous = self.lock_slot().take();
        previous.is_some_and(Self::cancel_pending)
    }

    pub fn is_pending(&self) -> bool {
        self.lock_slot()
            .as_ref()
            .is_some_and(|pending| !pending.fired.load(Ordering::SeqCst) && !pending.task.is_finished())
    }

    /// Waits until the scheduled action has fired and completed. Returns
    /// immediately when nothing is scheduled.
    pub async fn flush(&self) {
        let pending = self.lock_slot().take();
        if let Some(pending) = pending {
            if let Err(err) = pending.task.await {
                if !err.is_cancelled() {
                    debug!(error = %err, "debounced action panicked");
                }
            }
        }
    }

    fn cancel_pending(pending: Pending) -> bool {
        if pending.fired.load(Ordering::SeqCst) {
            return false;
        }
        pending.task.abort();
        true
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Option<Pending>> {
        // The slot is only swapped, never left half-written, so a poisoned
        // guard still holds a consistent value.
        self.slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "tests/debounce_tests.rs"]
mod tests;
