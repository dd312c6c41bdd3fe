use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Main configuration structure for Sumi-Swarm
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub store: StoreConfig,
    #[serde(rename = "push-retry")]
    pub push_retry: PushRetryConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Depth budget given to the seed task
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Number of workers draining the frontier
    pub workers: u32,

    /// Hard cap on links taken from a single page
    #[serde(rename = "max-links-per-page")]
    pub max_links_per_page: usize,

    /// Timeout for a single page fetch (seconds)
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,
}

impl CrawlerConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            workers: 10,
            max_links_per_page: 10,
            fetch_timeout_secs: 10,
        }
    }
}

/// Which store backs the frontier and the visited set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Redis list and set; both survive the process
    Redis,
    /// In-process queue and set; the crawl lives and dies with this process
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redis => write!(f, "redis"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Frontier and visited-set store configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,

    /// Redis address, with or without the `redis://` scheme
    pub address: String,

    /// List key holding serialized tasks
    #[serde(rename = "queue-key")]
    pub queue_key: String,

    /// Set key holding visited addresses
    #[serde(rename = "visited-key")]
    pub visited_key: String,

    /// How long a single blocking pop waits before checking for shutdown
    #[serde(rename = "pop-timeout-secs")]
    pub pop_timeout_secs: u64,
}

impl StoreConfig {
    pub fn pop_timeout(&self) -> Duration {
        Duration::from_secs(self.pop_timeout_secs)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Redis,
            address: "localhost:6379".to_string(),
            queue_key: "jobs".to_string(),
            visited_key: "visited_urls".to_string(),
            pop_timeout_secs: 1,
        }
    }
}

/// Retry policy for frontier pushes
///
/// A child task whose push still fails after `max_attempts` is dropped and
/// its pending count released.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PushRetryConfig {
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    #[serde(rename = "initial-backoff-ms")]
    pub initial_backoff_ms: u64,

    #[serde(rename = "max-backoff-ms")]
    pub max_backoff_ms: u64,
}

impl PushRetryConfig {
    /// Delay before retry number `attempt` (1-based), doubling up to the cap
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let delay = self
            .initial_backoff_ms
            .saturating_mul(1u64 << exponent)
            .min(self.max_backoff_ms);
        Duration::from_millis(delay)
    }
}

impl Default for PushRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_ms: 100,
            max_backoff_ms: 5_000,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SumiSwarm".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
