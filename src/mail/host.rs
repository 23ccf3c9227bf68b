/// Placeholder substituted in the mail host template
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";

/// Builds the candidate mail host for `domain` from `template`
///
/// The domain's dots become hyphens before substitution, which is the naming
/// scheme of hosted mail platforms such as
/// `{domain}.mail.protection.outlook.com`.
///
/// # Example
///
/// ```
/// use contact_harvest::mail::candidate_mail_host;
///
/// assert_eq!(
///     candidate_mail_host("{domain}.mail.protection.outlook.com", "example.co.uk"),
///     "example-co-uk.mail.protection.outlook.com"
/// );
/// ```
pub fn candidate_mail_host(template: &str, domain: &str) -> String {
    let dashed = domain.trim_end_matches('.').to_lowercase().replace('.', "-");
    template.replace(DOMAIN_PLACEHOLDER, &dashed)
}
