//! Output module for reporting crawl progress and results
//!
//! This module handles:
//! - Recording per-outcome statistics while workers run
//! - Printing the startup banner and the end-of-crawl summary

pub mod stats;

pub use stats::{print_statistics, CrawlStats, StatsSnapshot};

use crate::config::Config;
use std::time::Duration;

/// Result of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Wall time from seeding to the stop broadcast
    pub elapsed: Duration,

    /// Cardinality of the visited set, if the store could report it
    pub unique_pages: Option<u64>,

    /// Per-outcome counters recorded by this process's workers
    pub stats: StatsSnapshot,
}

/// Prints the startup banner
pub fn print_banner(config: &Config, seed: &str, store: &str) {
    println!("--- Sumi-Swarm Crawler ---");
    println!("Seed URL: {}", seed);
    println!("Max Depth: {}", config.crawler.max_depth);
    println!("Workers: {}", config.crawler.workers);
    println!("Store: {}", store);
    println!("--------------------------");
}

/// Prints the end-of-crawl summary
pub fn print_summary(summary: &CrawlSummary) {
    println!("\n--- Crawl Complete ---");
    println!("Duration: {:?}", summary.elapsed);
    match summary.unique_pages {
        Some(count) => println!("Unique Pages Found: {}", count),
        None => println!("Unique Pages Found: unavailable"),
    }
    println!();
    print_statistics(&summary.stats);
}
