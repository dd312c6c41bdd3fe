//! Visited set: claims an address for exactly one worker

use crate::storage::{Storage, StorageResult};
use std::sync::Arc;

/// Atomic check-and-mark over the shared visited set
#[derive(Clone)]
pub struct VisitedSet {
    storage: Arc<dyn Storage>,
}

impl VisitedSet {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Marks `address` as visited and reports whether it already was
    ///
    /// Returns `false` only to the single caller that inserted the address.
    /// If the store cannot be reached the address is reported as already
    /// seen: the crawl may under-visit but will still terminate.
    pub async fn check_and_mark(&self, address: &str) -> bool {
        match self.storage.mark_visited(address).await {
            Ok(inserted) => !inserted,
            Err(e) => {
                tracing::error!(url = address, "Visited set unavailable, skipping: {}", e);
                true
            }
        }
    }

    /// Total number of addresses claimed so far
    pub async fn cardinality(&self) -> StorageResult<u64> {
        self.storage.visited_count().await
    }
}
