//! Email address extraction from raw page text

use fancy_regex::Regex;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// `local@domain.tld`, not glued to a surrounding word, dot, plus or hyphen
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?<![\w.+-])[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}(?![\w.+-])")
        .expect("email pattern is valid")
});

/// Extracts every email address found in `text`
///
/// Matches keep their original casing. The extractor is stateless, so the
/// same input always produces the same set.
///
/// # Example
///
/// ```
/// use contact_harvest::crawler::extract_emails;
///
/// let emails = extract_emails("contact: a.b+tag@sub.example.co.uk!");
/// assert!(emails.contains("a.b+tag@sub.example.co.uk"));
/// assert_eq!(emails.len(), 1);
/// ```
pub fn extract_emails(text: &str) -> HashSet<String> {
    let mut emails = HashSet::new();
    if text.is_empty() {
        return emails;
    }

    for found in EMAIL_PATTERN.find_iter(text) {
        match found {
            Ok(m) => {
                emails.insert(m.as_str().to_string());
            }
            Err(e) => {
                // Backtrack limit on pathological input; keep what we have
                tracing::debug!("Email scan stopped early: {}", e);
                break;
            }
        }
    }

    emails
}
