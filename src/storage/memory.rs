//! In-process storage implementation
//!
//! Keeps the visited set and the frontier in this process. Useful for
//! single-machine crawls and as the store behind the test suite.

use crate::storage::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

/// Mutex-guarded set and queue with a blocking pop
#[derive(Debug, Default)]
pub struct MemoryStorage {
    visited: Mutex<HashSet<String>>,
    queue: Mutex<VecDeque<String>>,
    available: Notify,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of payloads waiting in the frontier
    pub fn queued(&self) -> StorageResult<usize> {
        Ok(lock(&self.queue)?.len())
    }

    fn try_pop(&self) -> StorageResult<Option<String>> {
        let mut queue = lock(&self.queue)?;
        let popped = queue.pop_front();
        if popped.is_some() && !queue.is_empty() {
            // Pass the wakeup on so a second waiter sees the remaining items
            self.available.notify_one();
        }
        Ok(popped)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> StorageResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn mark_visited(&self, address: &str) -> StorageResult<bool> {
        Ok(lock(&self.visited)?.insert(address.to_string()))
    }

    async fn visited_count(&self) -> StorageResult<u64> {
        Ok(lock(&self.visited)?.len() as u64)
    }

    async fn enqueue(&self, payload: &str) -> StorageResult<()> {
        lock(&self.queue)?.push_back(payload.to_string());
        self.available.notify_one();
        Ok(())
    }

    async fn queue_len(&self) -> StorageResult<u64> {
        Ok(self.queued()? as u64)
    }

    async fn dequeue(&self, timeout: Duration) -> StorageResult<Option<String>> {
        let deadline = Instant::now() + timeout;
        loop {
            let notified = self.available.notified();
            if let Some(payload) = self.try_pop()? {
                return Ok(Some(payload));
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return self.try_pop();
            }
        }
    }

    async fn clear(&self) -> StorageResult<()> {
        lock(&self.queue)?.clear();
        lock(&self.visited)?.clear();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_mark_visited_once() {
        let storage = MemoryStorage::new();

        assert!(storage.mark_visited("https://example.com/").await.unwrap());
        assert!(!storage.mark_visited("https://example.com/").await.unwrap());
        assert!(storage.mark_visited("https://example.com/other").await.unwrap());
        assert_eq!(storage.visited_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_mark_visited_has_single_winner() {
        let storage = Arc::new(MemoryStorage::new());

        let mut handles = Vec::new();
        for _ in 0..50 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                storage.mark_visited("https://example.com/x").await.unwrap()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn test_enqueue_dequeue_fifo() {
        let storage = MemoryStorage::new();
        storage.enqueue("a").await.unwrap();
        storage.enqueue("b").await.unwrap();

        let timeout = Duration::from_millis(10);
        assert_eq!(storage.dequeue(timeout).await.unwrap(), Some("a".to_string()));
        assert_eq!(storage.dequeue(timeout).await.unwrap(), Some("b".to_string()));
        assert_eq!(storage.queued().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_dequeue_times_out_when_empty() {
        let storage = MemoryStorage::new();
        let popped = storage.dequeue(Duration::from_millis(20)).await.unwrap();
        assert!(popped.is_none());
    }

    #[tokio::test]
    async fn test_blocked_dequeue_wakes_on_enqueue() {
        let storage = Arc::new(MemoryStorage::new());

        let waiter = {
            let storage = storage.clone();
            tokio::spawn(async move { storage.dequeue(Duration::from_secs(5)).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        storage.enqueue("late").await.unwrap();

        let popped = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap()
            .unwrap();
        assert_eq!(popped, Some("late".to_string()));
    }

    #[tokio::test]
    async fn test_each_payload_delivered_once() {
        let storage = Arc::new(MemoryStorage::new());
        for i in 0..20 {
            storage.enqueue(&i.to_string()).await.unwrap();
        }

        let mut handles = Vec::new();
        for _ in 0..4 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                let mut got = Vec::new();
                while let Some(p) = storage.dequeue(Duration::from_millis(20)).await.unwrap() {
                    got.push(p);
                }
                got
            }));
        }

        let mut all = Vec::new();
        for handle in handles {
            all.extend(handle.await.unwrap());
        }
        all.sort_by_key(|p| p.parse::<u32>().unwrap());
        let expected: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        assert_eq!(all, expected);
    }

    #[tokio::test]
    async fn test_clear() {
        let storage = MemoryStorage::new();
        storage.mark_visited("https://example.com/").await.unwrap();
        storage.enqueue("payload").await.unwrap();

        storage.clear().await.unwrap();

        assert_eq!(storage.visited_count().await.unwrap(), 0);
        assert_eq!(storage.queued().unwrap(), 0);
    }
}
