//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the crawler user agent and fetch timeout
//! - GET requests to fetch page content
//! - Error classification (timeout, network, status, body decoding)

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::ExtractError;
use reqwest::Client;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Crawler settings; supplies the per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sumi_swarm::config::{CrawlerConfig, UserAgentConfig};
/// use sumi_swarm::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(crawler.fetch_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body with a single GET request
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | Body text |
/// | Any other status | `ExtractError::Status` |
/// | Client timeout | `ExtractError::Timeout` |
/// | Undecodable body | `ExtractError::Parse` |
/// | Other transport failure | `ExtractError::Http` |
///
/// No retries: a failed page is simply dropped by the caller.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, ExtractError> {
    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ExtractError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| classify_error(url, e))
}

fn classify_error(url: &Url, error: reqwest::Error) -> ExtractError {
    if error.is_timeout() {
        ExtractError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_decode() {
        ExtractError::Parse {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        ExtractError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_crawler_config(timeout_secs: u64) -> CrawlerConfig {
        CrawlerConfig {
            fetch_timeout_secs: timeout_secs,
            ..CrawlerConfig::default()
        }
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("user-agent", "TestBot/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let ua = UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0".to_string(),
        };
        let client = build_http_client(&ua, &test_crawler_config(5)).unwrap();
        let url = Url::parse(&format!("{}/page", server.uri())).unwrap();

        let body = fetch_page(&client, &url).await.unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client(&UserAgentConfig::default(), &test_crawler_config(5)).unwrap();
        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();

        let err = fetch_page(&client, &url).await.unwrap_err();
        assert!(matches!(err, ExtractError::Status { status: 404, .. }));
        assert!(err.is_fetch_error());
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let client = build_http_client(&UserAgentConfig::default(), &test_crawler_config(1)).unwrap();
        let url = Url::parse(&format!("{}/slow", server.uri())).unwrap();

        let err = fetch_page(&client, &url).await.unwrap_err();
        assert!(matches!(err, ExtractError::Timeout { .. }));
    }
}
