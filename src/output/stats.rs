//! Crawl statistics
//!
//! Workers record the outcome of every task they settle into a shared set of
//! atomic counters. The coordinator snapshots them once the crawl is done.

use crate::state::TaskOutcome;
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-outcome counters shared by all workers
#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_visited: AtomicU64,
    skipped_depth: AtomicU64,
    skipped_seen: AtomicU64,
    extract_failures: AtomicU64,
    malformed_payloads: AtomicU64,
    links_enqueued: AtomicU64,
    pushes_dropped: AtomicU64,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a settled task
    pub fn record(&self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Visited { enqueued, dropped } => {
                self.pages_visited.fetch_add(1, Ordering::Relaxed);
                self.links_enqueued
                    .fetch_add(enqueued as u64, Ordering::Relaxed);
                self.pushes_dropped
                    .fetch_add(dropped as u64, Ordering::Relaxed);
            }
            TaskOutcome::DepthExhausted => {
                self.skipped_depth.fetch_add(1, Ordering::Relaxed);
            }
            TaskOutcome::AlreadyVisited => {
                self.skipped_seen.fetch_add(1, Ordering::Relaxed);
            }
            TaskOutcome::ExtractFailed => {
                self.extract_failures.fetch_add(1, Ordering::Relaxed);
            }
            TaskOutcome::Malformed => {
                self.malformed_payloads.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            pages_visited: self.pages_visited.load(Ordering::Relaxed),
            skipped_depth: self.skipped_depth.load(Ordering::Relaxed),
            skipped_seen: self.skipped_seen.load(Ordering::Relaxed),
            extract_failures: self.extract_failures.load(Ordering::Relaxed),
            malformed_payloads: self.malformed_payloads.load(Ordering::Relaxed),
            links_enqueued: self.links_enqueued.load(Ordering::Relaxed),
            pushes_dropped: self.pushes_dropped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`CrawlStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Pages fetched and parsed, including ones that yielded no links
    pub pages_visited: u64,
    pub skipped_depth: u64,
    pub skipped_seen: u64,
    /// Pages claimed in the visited set whose fetch or parse failed
    pub extract_failures: u64,
    pub malformed_payloads: u64,
    pub links_enqueued: u64,
    pub pushes_dropped: u64,
}

impl StatsSnapshot {
    /// Every task that left the frontier
    pub fn tasks_settled(&self) -> u64 {
        self.pages_visited
            + self.skipped_depth
            + self.skipped_seen
            + self.extract_failures
            + self.malformed_payloads
    }
}

/// Prints the per-outcome breakdown to stdout
pub fn print_statistics(stats: &StatsSnapshot) {
    println!("Tasks settled: {}", stats.tasks_settled());
    println!("  Pages visited: {}", stats.pages_visited);
    println!("  Skipped (depth exhausted): {}", stats.skipped_depth);
    println!("  Skipped (already visited): {}", stats.skipped_seen);
    println!("  Fetch/parse failures: {}", stats.extract_failures);
    if stats.malformed_payloads > 0 {
        println!("  Malformed payloads: {}", stats.malformed_payloads);
    }
    println!("Links enqueued: {}", stats.links_enqueued);
    if stats.pushes_dropped > 0 {
        println!("Links dropped after push retries: {}", stats.pushes_dropped);
    }
}
