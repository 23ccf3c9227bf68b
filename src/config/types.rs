use serde::Deserialize;

/// Main configuration structure for Contact-Harvest
///
/// Every section is optional in the TOML file; missing keys fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub probe: ProbeConfig,
    pub mailer: MailerConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of fetch attempts per crawl
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Maximum hop count from the seed URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Politeness delay between successive fetches (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 40,
            max_depth: 2,
            delay_ms: 150,
        }
    }
}

/// User agent identification and request settings for the fetcher
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    pub fn header_value(&self) -> String {
        format!(
            "Mozilla/5.0 (compatible; {}/{}; +{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "EmailScraper".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/bot".to_string(),
            timeout_secs: 8,
        }
    }
}

/// Mail host reachability probe configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// TCP port to probe
    pub port: u16,

    /// Connect and greeting read timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Candidate mail host pattern; `{domain}` is replaced by the domain with
    /// dots turned into hyphens
    #[serde(rename = "mail-host-template")]
    pub mail_host_template: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            port: 25,
            timeout_secs: 8,
            mail_host_template: "{domain}.mail.protection.outlook.com".to_string(),
        }
    }
}

/// Values handed to the external mail-sending collaborator
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailerConfig {
    /// SMTP port the collaborator should relay through
    #[serde(rename = "smtp-port")]
    pub smtp_port: u16,

    /// Local part of the sender address
    #[serde(rename = "sender-local-part")]
    pub sender_local_part: String,

    /// Sender domain used when no mail domain could be inferred
    #[serde(rename = "fallback-sender-domain")]
    pub fallback_sender_domain: String,

    /// Recipient used when the crawl found no addresses
    #[serde(rename = "fallback-recipient")]
    pub fallback_recipient: String,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            smtp_port: 25,
            sender_local_part: "helpdesk".to_string(),
            fallback_sender_domain: "example.org".to_string(),
            fallback_recipient: "postmaster@example.org".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the markdown summary file; no report is written when unset
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}
