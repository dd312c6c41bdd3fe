//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Unexpected reply from store: {0}")]
    UnexpectedReply(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// A backend provides one set (visited addresses) and one list (serialized
/// frontier tasks). Implementations must make every operation atomic on
/// their own; callers never hold a lock across calls.
#[async_trait]
pub trait Storage: Send + Sync {
    // ===== Visited Set =====

    /// Inserts an address into the visited set
    ///
    /// # Returns
    ///
    /// `true` if this call inserted the address, `false` if it was already
    /// present. At most one caller ever receives `true` for an address.
    async fn mark_visited(&self, address: &str) -> StorageResult<bool>;

    /// Number of addresses in the visited set
    async fn visited_count(&self) -> StorageResult<u64>;

    // ===== Frontier =====

    /// Appends a serialized task to the frontier list
    async fn enqueue(&self, payload: &str) -> StorageResult<()>;

    /// Number of serialized tasks waiting in the frontier list
    async fn queue_len(&self) -> StorageResult<u64>;

    /// Removes one serialized task, waiting up to `timeout` for one to arrive
    ///
    /// Returns `Ok(None)` when the wait times out.
    async fn dequeue(&self, timeout: Duration) -> StorageResult<Option<String>>;

    /// Removes both the frontier list and the visited set
    async fn clear(&self) -> StorageResult<()>;

    /// Short human-readable description used in logs and banners
    fn describe(&self) -> String;
}
