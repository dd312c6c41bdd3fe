//! Sumi-Swarm: a depth-bounded web crawler built around a shared work queue
//!
//! Workers pull tasks from a frontier queue, claim addresses in a visited set,
//! extract outbound links and push them back as new tasks. A pending-work
//! counter detects when no more work can ever arrive.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Sumi-Swarm operations
#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid seed URL '{url}': {source}")]
    InvalidSeed {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Frontier already holds {queued} tasks from another crawl; rerun with --fresh to discard them")]
    FrontierNotEmpty { queued: u64 },

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised while turning one page into follow-up links
///
/// `Timeout`, `Http` and `Status` are fetch failures; `InvalidAddress` and
/// `Parse` mean the page could not be interpreted. The worker treats every
/// variant the same way: the task is dropped without retry.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed page address {url}: {source}")]
    InvalidAddress {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Failed to decode body of {url}: {message}")]
    Parse { url: String, message: String },
}

impl ExtractError {
    /// Returns true for network, timeout and status failures
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Http { .. } | Self::Status { .. }
        )
    }
}

/// Result type alias for Sumi-Swarm operations
pub type Result<T> = std::result::Result<T, SwarmError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Coordinator};
pub use output::CrawlSummary;
pub use state::{PendingCounter, Task};
