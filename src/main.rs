//! Sumi-Swarm main entry point
//!
//! This is the command-line interface for the Sumi-Swarm crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sumi_swarm::config::{load_config, validate, Config, StoreBackend};
use sumi_swarm::crawler::Coordinator;
use sumi_swarm::output::{print_banner, print_summary};
use sumi_swarm::storage::open_storage;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Sumi-Swarm: a depth-bounded web crawler
///
/// Sumi-Swarm crawls outward from a seed URL with a pool of workers that
/// share a work queue and a visited set. The Redis store keeps the visited
/// set across runs; the queue must be empty at start unless --fresh is given.
#[derive(Parser, Debug)]
#[command(name = "sumi-swarm")]
#[command(version)]
#[command(about = "A depth-bounded web crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(long, value_parser = parse_seed)]
    url: Url,

    /// Maximum crawl depth [default: 3]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    depth: Option<u32>,

    /// Number of concurrent workers [default: 10]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    workers: Option<u32>,

    /// Redis server address [default: localhost:6379]
    #[arg(long, value_name = "ADDR", conflicts_with = "memory")]
    redis_addr: Option<String>,

    /// Use the in-process store instead of Redis
    #[arg(long)]
    memory: bool,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Clear the queue and visited set before seeding
    #[arg(long)]
    fresh: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    let storage = open_storage(&config.store)
        .await
        .with_context(|| format!("Failed to open {} store", config.store.backend))?;

    if cli.fresh {
        tracing::info!("Clearing queue and visited set");
        storage
            .clear()
            .await
            .context("Failed to clear store before seeding")?;
    }

    print_banner(&config, cli.url.as_str(), &storage.describe());

    let coordinator = Coordinator::new(config, storage)?;
    let summary = coordinator.run(cli.url.as_str()).await?;

    print_summary(&summary);
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_swarm=info,warn"),
            1 => EnvFilter::new("sumi_swarm=debug,info"),
            2 => EnvFilter::new("sumi_swarm=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Accepts only absolute URLs that a crawl can start from
fn parse_seed(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid seed URL '{}': {}", value, e))?;
    if url.cannot_be_a_base() {
        return Err(format!("seed URL '{}' cannot have links resolved against it", value));
    }
    Ok(url)
}

/// Loads the config file, if any, and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }
    if let Some(address) = &cli.redis_addr {
        config.store.backend = StoreBackend::Redis;
        config.store.address = address.clone();
    }
    if cli.memory {
        config.store.backend = StoreBackend::Memory;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}
