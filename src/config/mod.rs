//! Configuration module for Sumi-Swarm
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so an empty file (or no file at all) yields the
//! same settings as the bare command line.
//!
//! # Example
//!
//! ```no_run
//! use sumi_swarm::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("swarm.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, PushRetryConfig, StoreBackend, StoreConfig, UserAgentConfig,
};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
