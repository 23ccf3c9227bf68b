//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a content-type allowlist
//! - Email and anchor extraction from page content
//! - The breadth-first, single-site crawl loop

mod coordinator;
mod emails;
mod fetcher;
mod parser;

pub use coordinator::{CrawlLimits, CrawlOutcome, CrawlTarget, Crawler};
pub use emails::extract_emails;
pub use fetcher::{build_http_client, is_html_content_type, HttpFetcher, PageFetchResult, PageFetcher};
pub use parser::extract_anchor_hrefs;

use crate::url::downgrade_to_http;
use url::Url;

/// Picks the start URL, falling back to plain HTTP when HTTPS is unreachable
///
/// The HTTPS URL is kept when it serves content, and also when neither
/// scheme does (the crawl then simply finds nothing).
pub async fn resolve_start_url<F: PageFetcher>(fetcher: &F, start_url: &Url) -> Url {
    if fetcher.fetch(start_url.as_str()).await.is_available() {
        return start_url.clone();
    }

    if let Some(http_url) = downgrade_to_http(start_url) {
        if fetcher.fetch(http_url.as_str()).await.is_available() {
            tracing::info!("HTTPS unavailable, falling back to {}", http_url);
            return http_url;
        }
    }

    tracing::warn!("Start URL {} is unreachable", start_url);
    start_url.clone()
}
