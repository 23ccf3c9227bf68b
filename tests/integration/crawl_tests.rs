//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the real
//! HTTP fetcher through the full crawl loop.

use contact_harvest::config::{CrawlerConfig, UserAgentConfig};
use contact_harvest::crawler::{CrawlLimits, Crawler, HttpFetcher};
use contact_harvest::url::DomainMatcher;
use std::collections::HashSet;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a crawler configuration with no politeness delay
fn create_test_limits(max_pages: usize, max_depth: u32) -> CrawlLimits {
    CrawlLimits::from(&CrawlerConfig {
        max_pages,
        max_depth,
        delay_ms: 0,
    })
}

fn create_test_fetcher() -> HttpFetcher {
    let config = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        timeout_secs: 5,
    };
    HttpFetcher::new(&config).expect("Failed to build HTTP client")
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

fn set(items: &[String]) -> HashSet<String> {
    items.iter().cloned().collect()
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let port = mock_server.address().port();

    // Same server reached through another host name is a different site
    let offsite = format!("http://localhost:{}/offsite", port);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><body>
            <a href="/about">About</a>
            <a href="{}">Partner</a>
            <a href="mailto:ceo@acme.test">Email us</a>
            </body></html>"#,
            offsite
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html(
            r#"<html><body><p>Press: press@acme.test</p><a href="/#top">Home</a></body></html>"#
                .to_string(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/offsite"))
        .respond_with(html("partner@elsewhere.test".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let matcher = DomainMatcher::new();
    let crawler = Crawler::new(&fetcher, &matcher, create_test_limits(10, 2));

    let outcome = crawler
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.pages_crawled, 2);
    assert_eq!(
        outcome.sorted_visited(),
        vec![format!("{}/", base_url), format!("{}/about", base_url)]
    );
    assert_eq!(
        outcome.sorted_emails(),
        vec!["ceo@acme.test".to_string(), "press@acme.test".to_string()]
    );

    // Mock expectations (no off-site fetch, one fetch per page) are checked on drop
}

#[tokio::test]
async fn test_unusable_pages_still_count() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<a href="/data.json">Data</a><a href="/missing">Gone</a><a href="/team">Team</a>"#
                .to_string(),
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"contact":"hidden@acme.test"}"#, "application/json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/team"))
        .respond_with(html("jane@acme.test".to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let matcher = DomainMatcher::new();
    let crawler = Crawler::new(&fetcher, &matcher, create_test_limits(10, 2));

    let outcome = crawler
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.pages_crawled, 4);
    assert_eq!(outcome.visited.len(), 4);
    assert_eq!(outcome.sorted_emails(), vec!["jane@acme.test".to_string()]);
}

#[tokio::test]
async fn test_page_budget_stops_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<a href="/one">1</a><a href="/two">2</a> root@acme.test"#.to_string(),
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/one"))
        .respond_with(html("one@acme.test".to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/two"))
        .respond_with(html("two@acme.test".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let matcher = DomainMatcher::new();
    let crawler = Crawler::new(&fetcher, &matcher, create_test_limits(2, 2));

    let outcome = crawler
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.pages_crawled, 2);
    assert_eq!(
        set(&outcome.sorted_emails()),
        set(&["root@acme.test".to_string(), "one@acme.test".to_string()])
    );
}

#[tokio::test]
async fn test_depth_limit_in_live_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/level1">down</a>"#.to_string()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/level1"))
        .respond_with(html(r#"<a href="/level2">down</a>"#.to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/level2"))
        .respond_with(html("deep@acme.test".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let matcher = DomainMatcher::new();
    let crawler = Crawler::new(&fetcher, &matcher, create_test_limits(10, 1));

    let outcome = crawler
        .crawl(&format!("{}/", base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.pages_crawled, 2);
    assert!(outcome.emails.is_empty());
}
