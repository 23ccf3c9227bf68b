//! End-to-end harvest pipeline
//!
//! Seed normalization, crawl, mail domain inference, mail host probe and
//! mailer handoff, run one after the other for a single input domain.

use crate::config::Config;
use crate::crawler::{resolve_start_url, CrawlLimits, Crawler, HttpFetcher, PageFetcher};
use crate::mail::{candidate_mail_host, infer_primary_domain, probe_mail_host, MailerHandoff, ProbeResult};
use crate::url::{normalize_seed, DomainMatcher};
use crate::Result;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Everything a harvest produced, ready for presentation
#[derive(Debug, Clone)]
pub struct HarvestSummary {
    /// Registered domain derived from the user's input
    pub input_domain: String,

    /// URL the crawl actually started from (HTTPS, or HTTP after fallback)
    pub start_url: String,

    /// Most common domain among harvested emails
    pub derived_domain: Option<String>,

    /// Mail host that was probed
    pub mail_host: String,

    /// Port the probe connected to
    pub probe_port: u16,

    pub probe: ProbeResult,

    /// Harvested addresses, sorted
    pub emails: Vec<String>,

    /// Fetched URLs, sorted
    pub visited: Vec<String>,

    pub pages_crawled: usize,

    pub handoff: MailerHandoff,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl HarvestSummary {
    /// Wall-clock duration of the harvest in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }

    /// The domain the mail host name was built from
    pub fn probed_domain(&self) -> &str {
        self.derived_domain.as_deref().unwrap_or(&self.input_domain)
    }
}

/// Runs a full harvest for `input` over the network
///
/// # Errors
///
/// * `HarvestError::UrlError` - the input is not a usable domain or URL
/// * `HarvestError::Reqwest` - the HTTP client could not be built
///
/// Empty crawls and unreachable mail hosts are reported in the summary, not
/// as errors.
pub async fn run_harvest(input: &str, config: &Config) -> Result<HarvestSummary> {
    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let matcher = DomainMatcher::new();
    harvest_with(input, config, &fetcher, &matcher).await
}

/// Runs the pipeline against any page source
pub async fn harvest_with<F: PageFetcher>(
    input: &str,
    config: &Config,
    fetcher: &F,
    matcher: &DomainMatcher,
) -> Result<HarvestSummary> {
    let started_at = Utc::now();

    let seed = normalize_seed(input, matcher)?;
    tracing::info!("Target domain: {}", seed.domain);

    let start_url = resolve_start_url(fetcher, &seed.start_url).await;

    let crawler = Crawler::new(fetcher, matcher, CrawlLimits::from(&config.crawler));
    let outcome = crawler.crawl(start_url.as_str()).await?;
    let emails = outcome.sorted_emails();
    tracing::info!(
        "Crawled {} pages, found {} email addresses",
        outcome.pages_crawled,
        emails.len()
    );

    let derived_domain = infer_primary_domain(&emails);
    match &derived_domain {
        Some(domain) => tracing::info!("Inferred mail domain: {}", domain),
        None => tracing::info!("No mail domain inferred, using {}", seed.domain),
    }

    let probed_domain = derived_domain.as_deref().unwrap_or(&seed.domain);
    let mail_host = candidate_mail_host(&config.probe.mail_host_template, probed_domain);
    let probe = probe_mail_host(
        &mail_host,
        config.probe.port,
        Duration::from_secs(config.probe.timeout_secs),
    )
    .await;
    if probe.connected {
        tracing::info!("{}:{} answered", mail_host, config.probe.port);
    } else {
        tracing::warn!("{}:{} did not accept the connection", mail_host, config.probe.port);
    }

    let handoff = MailerHandoff::new(&emails, derived_domain.as_deref(), &mail_host, &config.mailer);

    Ok(HarvestSummary {
        input_domain: seed.domain,
        start_url: start_url.to_string(),
        derived_domain,
        mail_host,
        probe_port: config.probe.port,
        probe,
        emails,
        visited: outcome.sorted_visited(),
        pages_crawled: outcome.pages_crawled,
        handoff,
        started_at,
        finished_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::PageFetchResult;
    use crate::HarvestError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MapFetcher {
        pages: HashMap<String, String>,
    }

    impl MapFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, html)| (url.to_string(), html.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for MapFetcher {
        async fn fetch(&self, url: &str) -> PageFetchResult {
            match self.pages.get(url) {
                Some(html) => PageFetchResult::Content(html.clone()),
                None => PageFetchResult::Unavailable,
            }
        }
    }

    /// Config whose probe can never connect, so tests stay offline
    fn offline_config() -> Config {
        let mut config = Config::default();
        config.crawler.delay_ms = 0;
        config.probe.mail_host_template = "{domain}.invalid".to_string();
        config.probe.timeout_secs = 1;
        config
    }

    #[tokio::test]
    async fn test_harvest_pipeline() {
        let fetcher = MapFetcher::new(&[
            (
                "https://acme.test/",
                r#"<a href="/contact">Contact</a>
                   <a href="https://elsewhere.test/">Partner</a>
                   sales@acme.test"#,
            ),
            (
                "https://acme.test/contact",
                "info@acme.test, jobs@acme.test, someone@gmail.com",
            ),
        ]);
        let matcher = DomainMatcher::new();

        let summary = harvest_with("https://www.acme.test/welcome", &offline_config(), &fetcher, &matcher)
            .await
            .unwrap();

        assert_eq!(summary.input_domain, "acme.test");
        assert_eq!(summary.start_url, "https://acme.test/");
        assert_eq!(
            summary.emails,
            vec![
                "info@acme.test",
                "jobs@acme.test",
                "sales@acme.test",
                "someone@gmail.com"
            ]
        );
        assert_eq!(
            summary.visited,
            vec!["https://acme.test/", "https://acme.test/contact"]
        );
        assert_eq!(summary.pages_crawled, 2);
        assert_eq!(summary.derived_domain.as_deref(), Some("acme.test"));
        assert_eq!(summary.mail_host, "acme-test.invalid");
        assert_eq!(summary.probe_port, 25);
        assert!(!summary.probe.connected);
        assert_eq!(summary.handoff.recipient, "info@acme.test");
        assert_eq!(summary.handoff.sender, "helpdesk@acme.test");
        assert_eq!(summary.handoff.smtp_host, "acme-test.invalid");
        assert!(summary.finished_at >= summary.started_at);
    }

    #[tokio::test]
    async fn test_harvest_without_emails_uses_fallbacks() {
        let fetcher = MapFetcher::new(&[("http://quiet.test/", "<p>Nothing to see</p>")]);
        let matcher = DomainMatcher::new();

        let summary = harvest_with("quiet.test", &offline_config(), &fetcher, &matcher)
            .await
            .unwrap();

        assert_eq!(summary.start_url, "http://quiet.test/");
        assert!(summary.emails.is_empty());
        assert_eq!(summary.derived_domain, None);
        assert_eq!(summary.probed_domain(), "quiet.test");
        assert_eq!(summary.mail_host, "quiet-test.invalid");
        assert_eq!(summary.handoff.recipient, "postmaster@example.org");
        assert_eq!(summary.handoff.sender, "helpdesk@example.org");
    }

    #[tokio::test]
    async fn test_unreachable_site_is_not_an_error() {
        let fetcher = MapFetcher::new(&[]);
        let matcher = DomainMatcher::new();

        let summary = harvest_with("gone.test", &offline_config(), &fetcher, &matcher)
            .await
            .unwrap();

        assert_eq!(summary.start_url, "https://gone.test/");
        assert_eq!(summary.pages_crawled, 1);
        assert!(summary.emails.is_empty());
    }

    #[tokio::test]
    async fn test_bad_input_is_fatal() {
        let fetcher = MapFetcher::new(&[]);
        let matcher = DomainMatcher::new();

        let err = harvest_with("ftp://acme.test", &offline_config(), &fetcher, &matcher)
            .await
            .unwrap_err();
        assert!(matches!(err, HarvestError::UrlError(_)));

        let err = harvest_with("   ", &offline_config(), &fetcher, &matcher)
            .await
            .unwrap_err();
        assert!(matches!(err, HarvestError::UrlError(_)));
    }
}
