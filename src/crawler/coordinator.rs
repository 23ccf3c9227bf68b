//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop that ties together:
//! - The FIFO frontier of `(url, depth)` targets
//! - The visited set keyed on fragment-stripped URLs
//! - Fetching, email extraction and anchor extraction per page
//! - The same-registered-domain filter for discovered links
//! - Page and depth budgets and the politeness delay

use crate::config::CrawlerConfig;
use crate::crawler::emails::extract_emails;
use crate::crawler::fetcher::{PageFetchResult, PageFetcher};
use crate::crawler::parser::extract_anchor_hrefs;
use crate::url::{
    is_http_scheme, is_mailto, normalize_link, strip_fragment, DomainMatcher, RegisteredDomain,
};
use crate::{UrlError, UrlResult};
use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};
use url::Url;

/// A URL waiting in the frontier together with its hop count from the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    /// Fragment-stripped absolute URL
    pub url: Url,

    /// Number of links followed from the seed
    pub depth: u32,
}

/// Budgets and pacing for a single crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlLimits {
    /// Maximum fetch attempts
    pub max_pages: usize,

    /// Targets deeper than this are discarded at dequeue time
    pub max_depth: u32,

    /// Pause between successive fetches
    pub delay: Duration,
}

impl From<&CrawlerConfig> for CrawlLimits {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            max_depth: config.max_depth,
            delay: Duration::from_millis(config.delay_ms),
        }
    }
}

/// What a finished crawl hands back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlOutcome {
    /// Every distinct address found, original casing
    pub emails: HashSet<String>,

    /// Every URL that was fetched (or attempted)
    pub visited: HashSet<String>,

    /// Number of fetch attempts made
    pub pages_crawled: usize,
}

impl CrawlOutcome {
    /// Emails in lexicographic order, for presentation
    pub fn sorted_emails(&self) -> Vec<String> {
        let mut emails: Vec<String> = self.emails.iter().cloned().collect();
        emails.sort();
        emails
    }

    /// Visited URLs in lexicographic order
    pub fn sorted_visited(&self) -> Vec<String> {
        let mut visited: Vec<String> = self.visited.iter().cloned().collect();
        visited.sort();
        visited
    }
}

/// Mutable state of one crawl; owned by `Crawler::crawl` and dropped with it
struct CrawlState {
    queue: VecDeque<CrawlTarget>,
    visited: HashSet<String>,
    emails: HashSet<String>,
    pages_crawled: usize,
}

impl CrawlState {
    fn new(seed: Url) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(CrawlTarget {
            url: seed,
            depth: 0,
        });

        Self {
            queue,
            visited: HashSet::new(),
            emails: HashSet::new(),
            pages_crawled: 0,
        }
    }

    fn into_outcome(self) -> CrawlOutcome {
        CrawlOutcome {
            emails: self.emails,
            visited: self.visited,
            pages_crawled: self.pages_crawled,
        }
    }
}

/// Breadth-first, single-site crawler
///
/// Requests are issued one at a time in FIFO order. Every fetch attempt,
/// successful or not, counts against `max_pages`.
pub struct Crawler<'a, F: PageFetcher> {
    fetcher: &'a F,
    matcher: &'a DomainMatcher,
    limits: CrawlLimits,
}

impl<'a, F: PageFetcher> Crawler<'a, F> {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Page source
    /// * `matcher` - Same-site test used to keep the crawl on the seed's domain
    /// * `limits` - Page and depth budgets plus the politeness delay
    pub fn new(fetcher: &'a F, matcher: &'a DomainMatcher, limits: CrawlLimits) -> Self {
        Self {
            fetcher,
            matcher,
            limits,
        }
    }

    /// Runs the crawl loop from `start_url`
    ///
    /// This is the core crawling logic that:
    /// 1. Pops the next target from the frontier
    /// 2. Discards it if already visited or deeper than `max_depth`
    /// 3. Fetches the page and counts the attempt
    /// 4. Collects emails and same-site links from the content
    /// 5. Sleeps the politeness delay before the next fetch
    ///
    /// # Errors
    ///
    /// Only a start URL that cannot be parsed or is not http(s) is an error;
    /// it is rejected before any crawl state exists.
    pub async fn crawl(&self, start_url: &str) -> UrlResult<CrawlOutcome> {
        let seed = Url::parse(start_url)
            .map_err(|e| UrlError::Parse(format!("{}: {}", start_url, e)))?;
        if !is_http_scheme(&seed) {
            return Err(UrlError::InvalidScheme(format!(
                "start URL must be http(s), got: {}",
                seed.scheme()
            )));
        }
        let seed = strip_fragment(seed);
        let seed_site = self.matcher.registered_domain(&seed);

        tracing::info!(
            "Crawling {} (max pages {}, max depth {})",
            seed,
            self.limits.max_pages,
            self.limits.max_depth
        );

        let mut state = CrawlState::new(seed);
        let start_time = Instant::now();

        while state.pages_crawled < self.limits.max_pages {
            let Some(target) = state.queue.pop_front() else {
                tracing::debug!("Frontier is empty, crawl complete");
                break;
            };

            if state.visited.contains(target.url.as_str()) {
                continue;
            }
            if target.depth > self.limits.max_depth {
                tracing::trace!("Discarding {} at depth {}", target.url, target.depth);
                continue;
            }

            state.visited.insert(target.url.as_str().to_string());
            tracing::debug!("Fetching {} (depth {})", target.url, target.depth);

            match self.fetcher.fetch(target.url.as_str()).await {
                PageFetchResult::Content(body) => {
                    self.process_page(&mut state, &target, &body, seed_site.as_ref());
                }
                PageFetchResult::Unavailable => {
                    tracing::debug!("Unavailable: {}", target.url);
                }
            }

            state.pages_crawled += 1;

            if state.pages_crawled % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {} emails",
                    state.pages_crawled,
                    state.queue.len(),
                    state.emails.len()
                );
            }

            let more_to_do =
                !state.queue.is_empty() && state.pages_crawled < self.limits.max_pages;
            if more_to_do && !self.limits.delay.is_zero() {
                tokio::time::sleep(self.limits.delay).await;
            }
        }

        tracing::info!(
            "Crawl finished: {} pages, {} emails in {:?}",
            state.pages_crawled,
            state.emails.len(),
            start_time.elapsed()
        );

        Ok(state.into_outcome())
    }

    /// Collects emails from a fetched page and enqueues its same-site links
    fn process_page(
        &self,
        state: &mut CrawlState,
        target: &CrawlTarget,
        body: &str,
        seed_site: Option<&RegisteredDomain>,
    ) {
        let found = extract_emails(body);
        if !found.is_empty() {
            tracing::debug!("{} emails on {}", found.len(), target.url);
        }
        state.emails.extend(found);

        let Some(seed_site) = seed_site else {
            return;
        };

        for href in extract_anchor_hrefs(body) {
            if is_mailto(&href) {
                continue;
            }

            let Some(link) = normalize_link(&target.url, &href) else {
                continue;
            };

            if self.matcher.registered_domain(&link).as_ref() != Some(seed_site) {
                tracing::trace!("Off-site link skipped: {}", link);
                continue;
            }

            if state.visited.contains(link.as_str()) {
                continue;
            }

            state.queue.push_back(CrawlTarget {
                url: link,
                depth: target.depth + 1,
            });
        }
    }
}
