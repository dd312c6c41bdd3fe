//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and HTML link extraction
//! - The frontier queue and visited set over a shared store
//! - The worker loop and overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;
mod parser;
mod visited;
mod worker;

pub use coordinator::{run_crawl, Coordinator};
pub use extractor::{LinkExtractor, LinkSource};
pub use fetcher::{build_http_client, fetch_page};
pub use frontier::{Frontier, Popped};
pub use parser::extract_links;
pub use visited::VisitedSet;
pub use worker::Worker;
