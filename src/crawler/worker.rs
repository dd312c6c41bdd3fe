//! Crawl worker: pops tasks off the frontier until told to stop
//!
//! Each popped payload settles exactly once. A visited page reserves pending
//! work for every child before it pushes it, and only then releases its own
//! unit, so the counter cannot touch zero while work is still reachable.

use crate::crawler::extractor::LinkSource;
use crate::crawler::frontier::{Frontier, Popped};
use crate::crawler::visited::VisitedSet;
use crate::output::CrawlStats;
use crate::state::{PendingCounter, Task, TaskOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Pause after a failed pop before asking the store again
const POP_ERROR_DELAY: Duration = Duration::from_secs(1);

/// One member of the fixed worker pool
pub struct Worker {
    id: usize,
    frontier: Frontier,
    visited: VisitedSet,
    pending: PendingCounter,
    links: Arc<dyn LinkSource>,
    stats: Arc<CrawlStats>,
    stop: watch::Receiver<bool>,
}

impl Worker {
    pub fn new(
        id: usize,
        frontier: Frontier,
        visited: VisitedSet,
        pending: PendingCounter,
        links: Arc<dyn LinkSource>,
        stats: Arc<CrawlStats>,
        stop: watch::Receiver<bool>,
    ) -> Self {
        Self {
            id,
            frontier,
            visited,
            pending,
            links,
            stats,
            stop,
        }
    }

    /// Runs the pop/process loop until the stop broadcast arrives
    ///
    /// A closed stop channel is treated the same as a stop.
    pub async fn run(mut self) {
        tracing::debug!(worker = self.id, "Worker started");

        loop {
            let popped = tokio::select! {
                biased;
                _ = stop_requested(&mut self.stop) => break,
                popped = self.frontier.pop() => popped,
            };

            match popped {
                Ok(Some(Popped::Task(task))) => {
                    let outcome = self.process(task).await;
                    self.settle(outcome);
                }
                Ok(Some(Popped::Malformed { payload, error })) => {
                    tracing::warn!(
                        worker = self.id,
                        "Dropping malformed frontier payload {:?}: {}",
                        payload,
                        error
                    );
                    self.settle(TaskOutcome::Malformed);
                }
                Ok(None) => {}
                Err(e) => {
                    // Nothing was removed, so there is nothing to settle
                    tracing::error!(worker = self.id, "Frontier pop failed: {}", e);
                    tokio::select! {
                        biased;
                        _ = stop_requested(&mut self.stop) => break,
                        _ = tokio::time::sleep(POP_ERROR_DELAY) => {}
                    }
                }
            }
        }

        tracing::debug!(worker = self.id, "Worker stopped");
    }

    /// Handles one task and reports how it finished
    ///
    /// Children are counted into the pending counter here. The unit held by
    /// `task` itself is not released; the caller settles it.
    pub async fn process(&self, task: Task) -> TaskOutcome {
        if task.is_exhausted() {
            tracing::debug!(
                worker = self.id,
                url = %task.address,
                depth = task.depth,
                "Depth exhausted, dropping task"
            );
            return TaskOutcome::DepthExhausted;
        }

        if self.visited.check_and_mark(&task.address).await {
            tracing::debug!(worker = self.id, url = %task.address, "Already visited");
            return TaskOutcome::AlreadyVisited;
        }

        tracing::info!("[Depth {}] Crawling: {}", task.depth, task.address);

        let links = match self.links.extract(&task.address).await {
            Ok(links) => links,
            Err(e) => {
                if e.is_fetch_error() {
                    tracing::warn!(worker = self.id, "Fetch failed: {}", e);
                } else {
                    tracing::warn!(worker = self.id, "Could not extract links: {}", e);
                }
                return TaskOutcome::ExtractFailed;
            }
        };

        let mut enqueued = 0;
        let mut dropped = 0;
        for link in links {
            let child = task.child(link);
            self.pending.increment(1);
            match self.frontier.push(&child).await {
                Ok(()) => enqueued += 1,
                Err(e) => {
                    tracing::error!(
                        worker = self.id,
                        url = %child.address,
                        "Giving up on frontier push: {}",
                        e
                    );
                    self.pending.decrement(1);
                    dropped += 1;
                }
            }
        }

        TaskOutcome::Visited { enqueued, dropped }
    }

    fn settle(&self, outcome: TaskOutcome) {
        tracing::trace!(worker = self.id, "Task settled: {}", outcome);
        self.stats.record(outcome);
        self.pending.decrement(1);
    }
}

/// Resolves once stop is broadcast or the sender is gone
async fn stop_requested(stop: &mut watch::Receiver<bool>) {
    let _ = stop.wait_for(|stopped| *stopped).await;
}
