use crate::config::types::{Config, CrawlerConfig, MailerConfig, ProbeConfig, UserAgentConfig};
use crate::mail::DOMAIN_PLACEHOLDER;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_probe_config(&config.probe)?;
    validate_mailer_config(&config.mailer)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth and delay_ms are unsigned, zero is meaningful for both

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "user-agent timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates probe configuration
fn validate_probe_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    if config.port == 0 {
        return Err(ConfigError::Validation(
            "probe port cannot be 0".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "probe timeout_secs must be >= 1".to_string(),
        ));
    }

    if !config.mail_host_template.contains(DOMAIN_PLACEHOLDER) {
        return Err(ConfigError::InvalidTemplate(format!(
            "'{}' does not contain the {} placeholder",
            config.mail_host_template, DOMAIN_PLACEHOLDER
        )));
    }

    if config.mail_host_template.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidTemplate(format!(
            "'{}' contains whitespace",
            config.mail_host_template
        )));
    }

    Ok(())
}

/// Validates the mailer handoff defaults
fn validate_mailer_config(config: &MailerConfig) -> Result<(), ConfigError> {
    if config.smtp_port == 0 {
        return Err(ConfigError::Validation(
            "smtp_port cannot be 0".to_string(),
        ));
    }

    if config.sender_local_part.is_empty() || config.sender_local_part.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid sender_local_part: '{}'",
            config.sender_local_part
        )));
    }

    if config.fallback_sender_domain.is_empty() || !config.fallback_sender_domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid fallback_sender_domain: '{}'",
            config.fallback_sender_domain
        )));
    }

    validate_email(&config.fallback_recipient)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.summary_path {
        if path.is_empty() {
            return Err(ConfigError::Validation(
                "summary_path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "fallback_recipient cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
