use crate::url::DomainMatcher;
use crate::{UrlError, UrlResult};
use url::{Host, Url};

/// The canonical starting point of a harvest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedTarget {
    /// Registered domain in dotted form, e.g. `example.co.uk`
    pub domain: String,

    /// HTTPS URL of the registered domain's root
    pub start_url: Url,
}

/// Returns true for schemes the crawler is allowed to fetch
pub fn is_http_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Removes the fragment (everything after `#`) from a URL
pub fn strip_fragment(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

/// Returns true for `mailto:` pseudo-links
pub fn is_mailto(href: &str) -> bool {
    href.trim()
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("mailto:"))
}

/// Resolves an anchor href found on `page_url` into a crawlable URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Skip `mailto:` links
/// 3. Resolve relative references against the page URL
/// 4. Remove the fragment
/// 5. Keep only `http` and `https` results
///
/// # Examples
///
/// ```
/// use contact_harvest::url::normalize_link;
/// use url::Url;
///
/// let page = Url::parse("https://example.com/team/").unwrap();
/// let link = normalize_link(&page, "../about#office").unwrap();
/// assert_eq!(link.as_str(), "https://example.com/about");
///
/// assert!(normalize_link(&page, "mailto:info@example.com").is_none());
/// assert!(normalize_link(&page, "javascript:void(0)").is_none());
/// ```
pub fn normalize_link(page_url: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if is_mailto(href) {
        return None;
    }

    let absolute = page_url.join(href).ok()?;
    let absolute = strip_fragment(absolute);

    if is_http_scheme(&absolute) {
        Some(absolute)
    } else {
        None
    }
}

/// Turns free-form user input into a registered domain and HTTPS start URL
///
/// Accepts bare domains (`example.com`), hosts with paths or ports
/// (`www.example.com/contact`) and full URLs. The start URL always points at
/// the root of the registered domain, so `https://shop.example.co.uk/x`
/// yields `example.co.uk` and `https://example.co.uk/`.
///
/// # Errors
///
/// * `UrlError::InvalidScheme` - the input names a scheme other than http(s)
/// * `UrlError::Parse` - the input cannot be read as a URL
/// * `UrlError::MissingDomain` - empty input, or no registrable domain
pub fn normalize_seed(input: &str, matcher: &DomainMatcher) -> UrlResult<SeedTarget> {
    let text = input.trim();
    if text.is_empty() {
        return Err(UrlError::MissingDomain(input.to_string()));
    }

    let scheme = text
        .split_once("://")
        .map(|(scheme, _)| scheme)
        .filter(|scheme| looks_like_scheme(scheme));

    let url = if let Some(scheme) = scheme {
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(UrlError::InvalidScheme(format!(
                "Only HTTP and HTTPS schemes are supported, got: {}",
                scheme
            )));
        }
        Url::parse(text).map_err(|e| UrlError::Parse(format!("{}: {}", text, e)))?
    } else {
        Url::parse(&format!("https://{}", text))
            .map_err(|e| UrlError::Parse(format!("{}: {}", text, e)))?
    };

    let registered = matcher
        .registered_domain(&url)
        .ok_or_else(|| UrlError::MissingDomain(text.to_string()))?;
    let domain = registered.as_domain();

    let host = match url.host() {
        Some(Host::Ipv6(_)) => format!("[{}]", domain),
        _ => domain.clone(),
    };
    let start_url = Url::parse(&format!("https://{}/", host))
        .map_err(|e| UrlError::Parse(format!("{}: {}", host, e)))?;

    Ok(SeedTarget { domain, start_url })
}

/// RFC 3986 scheme grammar: a letter followed by letters, digits, `+`, `-` or `.`
fn looks_like_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Swaps an `https` URL to `http`, leaving everything else untouched
pub fn downgrade_to_http(url: &Url) -> Option<Url> {
    if url.scheme() != "https" {
        return None;
    }
    let rest = url.as_str().strip_prefix("https://")?;
    Url::parse(&format!("http://{}", rest)).ok()
}
