//! Values handed to an external mail-sending collaborator

use crate::config::MailerConfig;

/// Recipient, sender and SMTP target for a follow-up message
///
/// Pure data: nothing in this crate composes or sends the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailerHandoff {
    pub recipient: String,
    pub sender: String,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl MailerHandoff {
    /// Builds the handoff from the harvest results
    ///
    /// The recipient is the lexicographically first harvested address, or the
    /// configured fallback when the crawl found none. The sender uses the
    /// inferred mail domain when there is one.
    pub fn new(
        emails: &[String],
        derived_domain: Option<&str>,
        smtp_host: &str,
        config: &MailerConfig,
    ) -> Self {
        let recipient = emails
            .iter()
            .min()
            .cloned()
            .unwrap_or_else(|| config.fallback_recipient.clone());

        let sender_domain = derived_domain
            .filter(|d| !d.is_empty())
            .unwrap_or(&config.fallback_sender_domain);

        Self {
            recipient,
            sender: format!("{}@{}", config.sender_local_part, sender_domain),
            smtp_host: smtp_host.to_string(),
            smtp_port: config.smtp_port,
        }
    }

    /// `host:port` form of the SMTP target
    pub fn smtp_target(&self) -> String {
        format!("{}:{}", self.smtp_host, self.smtp_port)
    }
}
