//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with a descriptive user agent and timeout
//! - GET requests to fetch page content
//! - Content-Type allowlisting
//! - Folding every failure into `PageFetchResult::Unavailable`

use crate::config::UserAgentConfig;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::time::Duration;

/// Content types treated as crawlable HTML
const HTML_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// Maximum redirect hops followed for a single fetch
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFetchResult {
    /// A 2xx response with an HTML-like body
    Content(String),

    /// Transport error, non-2xx status, or disallowed content type
    Unavailable,
}

impl PageFetchResult {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Content(_))
    }
}

/// Something that can retrieve a page by URL
///
/// Implementations must never fail: every problem maps to
/// `PageFetchResult::Unavailable`, and each call is a single attempt.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> PageFetchResult;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use contact_harvest::config::UserAgentConfig;
/// use contact_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.timeout_secs);

    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true if a Content-Type header value names an HTML-like document
pub fn is_html_content_type(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    HTML_CONTENT_TYPES
        .iter()
        .any(|allowed| content_type.contains(allowed))
}

/// reqwest-backed page fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher whose client is configured from the user agent settings
    pub fn new(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetches a URL once
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx with text/html or application/xhtml+xml | Content |
    /// | Any other status | Unavailable |
    /// | Other Content-Type | Unavailable |
    /// | DNS / connect / TLS / timeout | Unavailable |
    /// | Body read failure | Unavailable |
    async fn fetch(&self, url: &str) -> PageFetchResult {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                if e.is_timeout() {
                    tracing::debug!("Request timeout for {}", url);
                } else if e.is_connect() {
                    tracing::debug!("Connection failed for {}: {}", url, e);
                } else {
                    tracing::debug!("Request failed for {}: {}", url, e);
                }
                return PageFetchResult::Unavailable;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("HTTP {} for {}", status.as_u16(), url);
            return PageFetchResult::Unavailable;
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !is_html_content_type(&content_type) {
            tracing::debug!("Skipping {} with Content-Type {:?}", url, content_type);
            return PageFetchResult::Unavailable;
        }

        match response.text().await {
            Ok(body) => PageFetchResult::Content(body),
            Err(e) => {
                tracing::debug!("Failed to read body of {}: {}", url, e);
                PageFetchResult::Unavailable
            }
        }
    }
}
