//! Frontier queue: serialized tasks waiting for a worker
//!
//! This module handles:
//! - Encoding tasks onto the shared list and decoding them back off it
//! - Retrying failed pushes with exponential backoff
//! - Bounded blocking pops so workers can notice shutdown

use crate::config::{Config, PushRetryConfig};
use crate::state::Task;
use crate::storage::{Storage, StorageError, StorageResult};
use std::sync::Arc;
use std::time::Duration;

/// A payload taken off the frontier
#[derive(Debug)]
pub enum Popped {
    Task(Task),
    /// The payload was not a valid task; it still counts as settled work
    Malformed {
        payload: String,
        error: serde_json::Error,
    },
}

/// Shared frontier handle; cheap to clone
#[derive(Clone)]
pub struct Frontier {
    storage: Arc<dyn Storage>,
    retry: PushRetryConfig,
    pop_timeout: Duration,
}

impl Frontier {
    pub fn new(storage: Arc<dyn Storage>, retry: PushRetryConfig, pop_timeout: Duration) -> Self {
        Self {
            storage,
            retry,
            pop_timeout,
        }
    }

    pub fn from_config(storage: Arc<dyn Storage>, config: &Config) -> Self {
        Self::new(storage, config.push_retry.clone(), config.store.pop_timeout())
    }

    /// Appends a task, retrying with backoff until the attempt budget runs out
    ///
    /// An error return means the task was not enqueued; the caller owns the
    /// pending count that was reserved for it.
    pub async fn push(&self, task: &Task) -> StorageResult<()> {
        let payload = task
            .encode()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let mut attempt = 1;
        loop {
            match self.storage.enqueue(&payload).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.retry.max_attempts => {
                    let delay = self.retry.backoff(attempt);
                    tracing::warn!(
                        url = %task.address,
                        attempt,
                        "Frontier push failed, retrying in {:?}: {}",
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Waits up to the configured pop timeout for the next payload
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Popped))` - A payload was removed from the queue
    /// * `Ok(None)` - Nothing arrived before the timeout
    /// * `Err(StorageError)` - The store failed; nothing was removed
    pub async fn pop(&self) -> StorageResult<Option<Popped>> {
        let payload = match self.storage.dequeue(self.pop_timeout).await? {
            Some(payload) => payload,
            None => return Ok(None),
        };

        Ok(Some(match Task::decode(&payload) {
            Ok(task) => Popped::Task(task),
            Err(error) => Popped::Malformed { payload, error },
        }))
    }
}
