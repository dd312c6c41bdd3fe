//! Crawler coordinator - seeds the frontier and runs the worker pool
//!
//! This module handles:
//! - Validating the configuration and seed before any work is created
//! - Seeding the frontier and spawning a fixed pool of workers
//! - Waiting for the pending counter to drain, then broadcasting stop
//! - Collecting the crawl summary

use crate::config::{validate, Config};
use crate::crawler::extractor::{LinkExtractor, LinkSource};
use crate::crawler::frontier::Frontier;
use crate::crawler::visited::VisitedSet;
use crate::crawler::worker::Worker;
use crate::output::{CrawlStats, CrawlSummary};
use crate::state::{PendingCounter, Task};
use crate::storage::{open_storage, Storage};
use crate::SwarmError;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::task::JoinSet;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    storage: Arc<dyn Storage>,
    links: Arc<dyn LinkSource>,
}

impl Coordinator {
    /// Creates a coordinator that fetches pages over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration, validated here
    /// * `storage` - Backend holding the frontier and visited set
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(SwarmError)` - Invalid configuration or HTTP client failure
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Result<Self, SwarmError> {
        validate(&config)?;
        let links = Arc::new(LinkExtractor::new(&config)?);
        Ok(Self {
            config,
            storage,
            links,
        })
    }

    /// Creates a coordinator with a caller-supplied link source
    pub fn with_link_source(
        config: Config,
        storage: Arc<dyn Storage>,
        links: Arc<dyn LinkSource>,
    ) -> Result<Self, SwarmError> {
        validate(&config)?;
        Ok(Self {
            config,
            storage,
            links,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Crawls outward from `seed` until no reachable work remains
    ///
    /// The seed is parsed before anything touches the store, so a bad seed
    /// leaves the frontier and visited set untouched. The frontier must start
    /// empty: the pending counter only knows about tasks this run pushed, so
    /// leftover entries would settle against it and end the crawl early.
    pub async fn run(&self, seed: &str) -> Result<CrawlSummary, SwarmError> {
        let seed_url = Url::parse(seed).map_err(|source| SwarmError::InvalidSeed {
            url: seed.to_string(),
            source,
        })?;

        let queued = self.storage.queue_len().await?;
        if queued > 0 {
            return Err(SwarmError::FrontierNotEmpty { queued });
        }

        let started = Instant::now();
        let pending = PendingCounter::new();
        let stats = Arc::new(CrawlStats::new());
        let frontier = Frontier::from_config(self.storage.clone(), &self.config);
        let visited = VisitedSet::new(self.storage.clone());
        let (stop_tx, stop_rx) = watch::channel(false);

        let seed_task = Task::new(seed_url.as_str(), i64::from(self.config.crawler.max_depth));
        pending.increment(1);
        if let Err(e) = frontier.push(&seed_task).await {
            pending.decrement(1);
            tracing::error!("Failed to seed frontier with {}: {}", seed_task.address, e);
            return Err(e.into());
        }
        tracing::info!(
            url = %seed_task.address,
            depth = seed_task.depth,
            workers = self.config.crawler.workers,
            "Frontier seeded"
        );

        let mut workers = JoinSet::new();
        for id in 0..self.config.crawler.workers as usize {
            let worker = Worker::new(
                id,
                frontier.clone(),
                visited.clone(),
                pending.clone(),
                self.links.clone(),
                stats.clone(),
                stop_rx.clone(),
            );
            workers.spawn(worker.run());
        }
        drop(stop_rx);

        // Workers only exit early by panicking; surface that instead of
        // waiting on a counter nobody will drain
        loop {
            tokio::select! {
                _ = pending.wait_for_zero() => break,
                Some(joined) = workers.join_next() => joined?,
            }
        }

        tracing::info!("No pending work left, stopping workers");
        // Every receiver may already be gone if the pool panicked; nothing to signal then
        let _ = stop_tx.send(true);
        while let Some(joined) = workers.join_next().await {
            joined?;
        }

        let elapsed = started.elapsed();
        let unique_pages = match visited.cardinality().await {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!("Could not read visited set size: {}", e);
                None
            }
        };

        Ok(CrawlSummary {
            elapsed,
            unique_pages,
            stats: stats.snapshot(),
        })
    }
}

/// Opens the configured store and crawls from `seed`
///
/// This is the main entry point for starting a crawl.
pub async fn run_crawl(config: Config, seed: &str) -> Result<CrawlSummary, SwarmError> {
    validate(&config)?;
    let storage = open_storage(&config.store).await?;
    tracing::info!("Using store: {}", storage.describe());
    Coordinator::new(config, storage)?.run(seed).await
}
