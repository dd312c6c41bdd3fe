//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end against the in-memory store.

use std::sync::Arc;
use std::time::Duration;
use sumi_swarm::config::{Config, StoreBackend};
use sumi_swarm::crawler::Coordinator;
use sumi_swarm::output::CrawlSummary;
use sumi_swarm::storage::MemoryStorage;
use sumi_swarm::{run_crawl, SwarmError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration backed by the in-memory store
fn create_test_config(max_depth: u32, workers: u32) -> Config {
    let mut config = Config::default();
    config.crawler.max_depth = max_depth;
    config.crawler.workers = workers;
    config.store.backend = StoreBackend::Memory;
    config.store.pop_timeout_secs = 1;
    config.user_agent.crawler_name = "TestBot".to_string();
    config
}

/// Mounts an HTML page whose body holds the given anchors
async fn mount_page(server: &MockServer, page: &str, hrefs: &[&str], expected_hits: u64) {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(format!("<html><body>{}</body></html>", anchors)),
        )
        .expect(expected_hits)
        .mount(server)
        .await;
}

async fn crawl(config: Config, seed: String) -> CrawlSummary {
    tokio::time::timeout(Duration::from_secs(30), run_crawl(config, &seed))
        .await
        .expect("Crawl did not terminate")
        .expect("Crawl failed")
}

#[tokio::test]
async fn test_cycle_is_crawled_once_per_page() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/b", "/c"], 1).await;
    mount_page(&mock_server, "/b", &["/"], 1).await;
    mount_page(&mock_server, "/c", &[], 1).await;

    let summary = crawl(create_test_config(2, 4), format!("{}/", mock_server.uri())).await;

    assert_eq!(summary.unique_pages, Some(3));
    assert_eq!(summary.stats.pages_visited, 3);
    assert_eq!(summary.stats.extract_failures, 0);
    // b links back to the seed at depth 0, which is dropped before the visited check
    assert_eq!(summary.stats.skipped_depth, 1);
}

#[tokio::test]
async fn test_depth_one_fetches_only_the_seed() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/child"], 1).await;
    mount_page(&mock_server, "/child", &[], 0).await;

    let summary = crawl(create_test_config(1, 2), format!("{}/", mock_server.uri())).await;

    assert_eq!(summary.unique_pages, Some(1));
    assert_eq!(summary.stats.links_enqueued, 1);
    assert_eq!(summary.stats.skipped_depth, 1);
}

#[tokio::test]
async fn test_link_cap_limits_children() {
    let mock_server = MockServer::start().await;

    let hrefs: Vec<String> = (0..15).map(|i| format!("/p{}", i)).collect();
    let href_refs: Vec<&str> = hrefs.iter().map(String::as_str).collect();
    mount_page(&mock_server, "/", &href_refs, 1).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let summary = crawl(create_test_config(2, 5), format!("{}/", mock_server.uri())).await;

    assert_eq!(summary.stats.links_enqueued, 10);
    assert_eq!(summary.unique_pages, Some(11));
}

#[tokio::test]
async fn test_timed_out_page_is_visited_without_children() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/slow"], 1).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<html><body><a href="/hidden">hidden</a></body></html>"#)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/hidden", &[], 0).await;

    let mut config = create_test_config(3, 2);
    config.crawler.fetch_timeout_secs = 1;

    let summary = crawl(config, format!("{}/", mock_server.uri())).await;

    assert_eq!(summary.unique_pages, Some(2));
    assert_eq!(summary.stats.pages_visited, 1);
    assert_eq!(summary.stats.extract_failures, 1);
}

#[tokio::test]
async fn test_missing_seed_page_terminates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let summary = crawl(create_test_config(3, 3), format!("{}/", mock_server.uri())).await;

    assert_eq!(summary.unique_pages, Some(1));
    assert_eq!(summary.stats.extract_failures, 1);
    assert_eq!(summary.stats.links_enqueued, 0);
}

#[tokio::test]
async fn test_shared_store_across_runs_skips_visited_pages() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/b"], 1).await;
    mount_page(&mock_server, "/b", &[], 1).await;

    let storage = Arc::new(MemoryStorage::new());
    let seed = format!("{}/", mock_server.uri());

    let first = Coordinator::new(create_test_config(2, 2), storage.clone())
        .unwrap()
        .run(&seed)
        .await
        .unwrap();
    assert_eq!(first.unique_pages, Some(2));

    let second = Coordinator::new(create_test_config(2, 2), storage)
        .unwrap()
        .run(&seed)
        .await
        .unwrap();
    assert_eq!(second.stats.pages_visited, 0);
    assert_eq!(second.stats.skipped_seen, 1);
    assert_eq!(second.unique_pages, Some(2));
}

#[tokio::test]
async fn test_invalid_seed_is_rejected() {
    let result = run_crawl(create_test_config(2, 2), "::not-a-url::").await;
    assert!(matches!(result, Err(SwarmError::InvalidSeed { .. })));
}
