//! Storage module for the shared crawl state
//!
//! This module holds the two structures every worker shares:
//! - The frontier: a list of serialized tasks with a blocking pop
//! - The visited set: addresses already claimed, with atomic insert
//!
//! Both live behind the `Storage` trait so the engine does not care whether
//! they sit in Redis or in this process.

mod memory;
mod redis_store;
mod traits;

pub use memory::MemoryStorage;
pub use redis_store::{redis_url, RedisStorage};
pub use traits::{Storage, StorageError, StorageResult};

use crate::config::{StoreBackend, StoreConfig};
use std::sync::Arc;

/// Opens the storage backend selected in the configuration
///
/// # Arguments
///
/// * `config` - The store configuration
///
/// # Returns
///
/// * `Ok(Arc<dyn Storage>)` - Backend ready for use
/// * `Err(StorageError)` - Backend could not be reached
pub async fn open_storage(config: &StoreConfig) -> StorageResult<Arc<dyn Storage>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
        StoreBackend::Redis => Ok(Arc::new(RedisStorage::connect(config).await?)),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Storage doubles for exercising failure paths

    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::time::Duration;

    /// Memory storage whose operations can be made to fail on demand
    #[derive(Default)]
    pub struct FlakyStorage {
        pub inner: MemoryStorage,
        /// Number of upcoming `enqueue` calls that fail
        pub failing_enqueues: AtomicU32,
        /// When set, `mark_visited` always fails
        pub visited_down: AtomicBool,
        pub enqueue_attempts: AtomicU32,
        /// Number of upcoming `dequeue` calls that fail
        pub failing_dequeues: AtomicU32,
        pub dequeue_attempts: AtomicU32,
    }

    impl FlakyStorage {
        pub fn with_failing_enqueues(n: u32) -> Self {
            let storage = Self::default();
            storage.failing_enqueues.store(n, Ordering::SeqCst);
            storage
        }

        pub fn with_failing_dequeues(n: u32) -> Self {
            let storage = Self::default();
            storage.failing_dequeues.store(n, Ordering::SeqCst);
            storage
        }

        pub fn with_visited_down() -> Self {
            let storage = Self::default();
            storage.visited_down.store(true, Ordering::SeqCst);
            storage
        }
    }

    fn down() -> StorageError {
        StorageError::Unavailable("injected failure".to_string())
    }

    #[async_trait]
    impl Storage for FlakyStorage {
        async fn mark_visited(&self, address: &str) -> StorageResult<bool> {
            if self.visited_down.load(Ordering::SeqCst) {
                return Err(down());
            }
            self.inner.mark_visited(address).await
        }

        async fn visited_count(&self) -> StorageResult<u64> {
            if self.visited_down.load(Ordering::SeqCst) {
                return Err(down());
            }
            self.inner.visited_count().await
        }

        async fn enqueue(&self, payload: &str) -> StorageResult<()> {
            self.enqueue_attempts.fetch_add(1, Ordering::SeqCst);
            let failing = self
                .failing_enqueues
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
            if failing.is_ok() {
                return Err(down());
            }
            self.inner.enqueue(payload).await
        }

        async fn queue_len(&self) -> StorageResult<u64> {
            self.inner.queue_len().await
        }

        async fn dequeue(&self, timeout: Duration) -> StorageResult<Option<String>> {
            self.dequeue_attempts.fetch_add(1, Ordering::SeqCst);
            let failing = self
                .failing_dequeues
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
            if failing.is_ok() {
                return Err(down());
            }
            self.inner.dequeue(timeout).await
        }

        async fn clear(&self) -> StorageResult<()> {
            self.inner.clear().await
        }

        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }
}
