use std::collections::HashMap;

/// Returns the most common domain part among `emails`
///
/// Domains are compared case-insensitively and returned lowercased, so
/// `Info@ACME.test` and `sales@acme.test` count toward the same `acme.test`
/// even though the addresses themselves keep their casing. On a tie the
/// domain whose first occurrence comes earliest in `emails` wins, so callers
/// wanting a stable answer pass the addresses in a stable order.
///
/// # Example
///
/// ```
/// use contact_harvest::mail::infer_primary_domain;
///
/// let emails = ["a@corp.example", "b@corp.example", "c@gmail.com"];
/// assert_eq!(infer_primary_domain(emails), Some("corp.example".to_string()));
/// ```
pub fn infer_primary_domain<I, S>(emails: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for email in emails {
        let Some((_, domain)) = email.as_ref().split_once('@') else {
            continue;
        };
        if domain.is_empty() {
            continue;
        }

        let domain = domain.to_lowercase();
        let count = counts.entry(domain.clone()).or_insert(0);
        if *count == 0 {
            first_seen.push(domain);
        }
        *count += 1;
    }

    let mut best: Option<(&String, usize)> = None;
    for domain in &first_seen {
        let count = counts[domain];
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((domain, count));
        }
    }

    best.map(|(domain, _)| domain.clone())
}
