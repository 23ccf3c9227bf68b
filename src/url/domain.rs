use std::fmt;
use tldextract::{TldExtractor, TldOption};
use url::{Host, Url};

/// The registrable part of a host name: a domain label plus its public suffix
///
/// `shop.example.co.uk` has the registered domain `example` / `co.uk`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegisteredDomain {
    /// The label directly left of the public suffix
    pub label: String,

    /// The public suffix; empty for IP literals and single-label hosts
    pub suffix: String,
}

impl RegisteredDomain {
    pub fn new(label: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            suffix: suffix.into(),
        }
    }

    /// Returns the dotted form, e.g. `example.co.uk`
    pub fn as_domain(&self) -> String {
        if self.suffix.is_empty() {
            self.label.clone()
        } else {
            format!("{}.{}", self.label, self.suffix)
        }
    }
}

impl fmt::Display for RegisteredDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_domain())
    }
}

/// Same-site test backed by the Public Suffix List
///
/// Two URLs are the same site when their registered domains match exactly,
/// so `https://shop.example.com/x` and `https://example.com/y` match while
/// `https://a.co.uk` and `https://b.co.uk` do not.
pub struct DomainMatcher {
    extractor: TldExtractor,
}

impl DomainMatcher {
    /// Creates a matcher using the bundled public suffix snapshot (ICANN section only)
    pub fn new() -> Self {
        Self {
            extractor: TldExtractor::new(TldOption::default()),
        }
    }

    /// Extracts the registered domain of a URL's host
    ///
    /// Returns `None` for URLs without a host and for hosts that are themselves
    /// a public suffix.
    pub fn registered_domain(&self, url: &Url) -> Option<RegisteredDomain> {
        match url.host()? {
            Host::Ipv4(addr) => Some(RegisteredDomain::new(addr.to_string(), "")),
            Host::Ipv6(addr) => Some(RegisteredDomain::new(addr.to_string(), "")),
            Host::Domain(name) => self.registered_domain_of_host(name),
        }
    }

    /// Extracts the registered domain of a bare host name
    pub fn registered_domain_of_host(&self, host: &str) -> Option<RegisteredDomain> {
        let host = host.trim_end_matches('.').to_lowercase();
        if host.is_empty() {
            return None;
        }

        if !host.contains('.') {
            return Some(RegisteredDomain::new(host, ""));
        }

        match self.extractor.extract(&format!("http://{}/", host)) {
            Ok(result) => {
                let suffix = result.suffix.filter(|s| !s.is_empty());
                let label = result.domain.filter(|d| !d.is_empty());
                match (label, suffix) {
                    (Some(label), Some(suffix)) => {
                        return Some(RegisteredDomain::new(
                            label.to_lowercase(),
                            suffix.to_lowercase(),
                        ))
                    }
                    // The host is a bare public suffix such as `co.uk`
                    (None, Some(_)) => return None,
                    _ => {}
                }
            }
            Err(e) => {
                tracing::trace!("Suffix lookup failed for {}: {:?}", host, e);
            }
        }

        default_rule(&host)
    }

    /// Reports whether two URLs share the same registered domain
    pub fn same_registered_domain(&self, a: &Url, b: &Url) -> bool {
        match (self.registered_domain(a), self.registered_domain(b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Default for DomainMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// The public suffix list's implicit `*` rule: an unlisted TLD is the suffix
fn default_rule(host: &str) -> Option<RegisteredDomain> {
    let mut labels = host.rsplit('.');
    let suffix = labels.next()?;
    let label = labels.next().filter(|l| !l.is_empty())?;
    Some(RegisteredDomain::new(label, suffix))
}
