//! Pending-work counter used to detect crawl completion
//!
//! The counter holds the number of tasks that have been enqueued but not yet
//! settled. Callers must issue the increments for every child a task spawns
//! before the decrement for the task itself; under that rule the counter can
//! only reach zero once no queued or in-flight task remains.

use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Pending {
    outstanding: u64,
    /// Set by the first increment so that the initial zero does not count
    armed: bool,
}

impl Pending {
    fn is_complete(&self) -> bool {
        self.armed && self.outstanding == 0
    }
}

/// Counts enqueued-but-unsettled tasks and signals when the count drains
#[derive(Debug, Clone)]
pub struct PendingCounter {
    state: Arc<watch::Sender<Pending>>,
}

impl PendingCounter {
    pub fn new() -> Self {
        let (state, _) = watch::channel(Pending::default());
        Self {
            state: Arc::new(state),
        }
    }

    /// Records `n` newly enqueued tasks
    pub fn increment(&self, n: u64) {
        self.state.send_modify(|pending| {
            pending.outstanding += n;
            pending.armed = true;
        });
    }

    /// Records `n` settled tasks
    ///
    /// Settling more tasks than were enqueued is a bookkeeping bug; it is
    /// logged and the count saturates at zero.
    pub fn decrement(&self, n: u64) {
        self.state
            .send_modify(|pending| match pending.outstanding.checked_sub(n) {
                Some(remaining) => pending.outstanding = remaining,
                None => {
                    tracing::error!(
                        outstanding = pending.outstanding,
                        requested = n,
                        "Pending counter decremented below zero"
                    );
                    pending.outstanding = 0;
                }
            });
    }

    /// Current number of unsettled tasks
    pub fn outstanding(&self) -> u64 {
        self.state.borrow().outstanding
    }

    /// Returns true once the count has returned to zero after being nonzero
    pub fn is_complete(&self) -> bool {
        self.state.borrow().is_complete()
    }

    /// Waits until the count returns to zero after having been nonzero
    ///
    /// Returns immediately if that has already happened.
    pub async fn wait_for_zero(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait
        let _ = rx.wait_for(Pending::is_complete).await;
    }
}

impl Default for PendingCounter {
    fn default() -> Self {
        Self::new()
    }
}
