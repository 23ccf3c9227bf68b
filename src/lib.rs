//! Contact-Harvest: domain-scoped contact discovery
//!
//! This crate crawls a single registered domain breadth-first, collects the
//! email addresses published on its pages, infers the organization's mail
//! domain from them, and grabs the SMTP banner of the candidate mail host.

pub mod config;
pub mod crawler;
pub mod harvest;
pub mod mail;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Contact-Harvest operations
///
/// Transport failures never show up here: fetch and probe failures are
/// absorbed into `PageFetchResult::Unavailable` and `ProbeResult::unreachable()`.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid mail host template: {0}")]
    InvalidTemplate(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in input: {0:?}")]
    MissingDomain(String),
}

/// Result type alias for Contact-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlOutcome, Crawler, HttpFetcher, PageFetchResult, PageFetcher};
pub use harvest::{run_harvest, HarvestSummary};
pub use mail::{candidate_mail_host, infer_primary_domain, probe_mail_host, MailerHandoff, ProbeResult};
pub use url::{normalize_link, normalize_seed, DomainMatcher, RegisteredDomain, SeedTarget};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_error_converts_into_harvest_error() {
        let err: HarvestError = UrlError::MissingDomain("".to_string()).into();

        assert!(matches!(err, HarvestError::UrlError(UrlError::MissingDomain(_))));
        assert_eq!(err.to_string(), "URL error: Missing domain in input: \"\"");
    }
}
