//! HTML parser for extracting links
//!
//! The document is walked with an explicit stack instead of recursion so that
//! deeply nested markup cannot exhaust the call stack.

use scraper::{Html, Node};
use url::Url;

/// Extracts up to `max_links` anchor targets from an HTML document
///
/// # Link Extraction Rules
///
/// - Only `<a>` elements are considered; the `href` attribute is used
/// - Each href is resolved against `base_url`: absolute hrefs pass through,
///   relative ones are joined
/// - Hrefs that fail to resolve are skipped
/// - Traversal stops as soon as `max_links` links are collected
///
/// Nodes come off the stack LIFO with children pushed in document order,
/// so later siblings are visited first. Which links survive the cap is
/// therefore a property of the walk, not a ranking.
///
/// # Example
///
/// ```no_run
/// use sumi_swarm::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let links = extract_links(html, &base_url, 10);
/// assert_eq!(links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn extract_links(html: &str, base_url: &Url, max_links: usize) -> Vec<String> {
    let mut links = Vec::new();
    if max_links == 0 {
        return links;
    }

    let document = Html::parse_document(html);
    let mut stack = Vec::with_capacity(64);
    stack.push(document.tree.root());

    while let Some(node) = stack.pop() {
        if let Node::Element(element) = node.value() {
            if element.name() == "a" {
                if let Some(href) = element.attr("href") {
                    if let Some(absolute_url) = resolve_link(href, base_url) {
                        links.push(absolute_url);
                    }
                }
            }
        }

        if links.len() >= max_links {
            break;
        }

        stack.extend(node.children());
    }

    links
}

/// Resolves a link href against the page address
///
/// Returns None if the href cannot be turned into an absolute URL.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    base_url
        .join(href.trim())
        .ok()
        .map(|absolute_url| absolute_url.to_string())
}
