//! Link extraction: one address in, a bounded list of follow-up addresses out

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::parser::extract_links;
use crate::ExtractError;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Something that can turn a page address into the addresses it links to
#[async_trait]
pub trait LinkSource: Send + Sync {
    /// Returns the links found on `address`, already resolved to absolute form
    async fn extract(&self, address: &str) -> Result<Vec<String>, ExtractError>;
}

/// Fetches pages over HTTP and pulls anchor targets out of them
pub struct LinkExtractor {
    client: Client,
    max_links: usize,
}

impl LinkExtractor {
    /// Creates an extractor using the configured timeout, user agent and cap
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        Ok(Self::with_client(client, config.crawler.max_links_per_page))
    }

    pub fn with_client(client: Client, max_links: usize) -> Self {
        Self { client, max_links }
    }
}

#[async_trait]
impl LinkSource for LinkExtractor {
    async fn extract(&self, address: &str) -> Result<Vec<String>, ExtractError> {
        let base_url = Url::parse(address).map_err(|source| ExtractError::InvalidAddress {
            url: address.to_string(),
            source,
        })?;

        let body = fetch_page(&self.client, &base_url).await?;
        Ok(extract_links(&body, &base_url, self.max_links))
    }
}
