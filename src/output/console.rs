//! Console summary printed at the end of a harvest

use crate::harvest::HarvestSummary;

/// Formats the console summary
pub fn format_console_summary(summary: &HarvestSummary) -> String {
    let mut out = String::new();
    let port_label = format!("Port {} Result:", summary.probe_port);

    out.push_str("=== Summary ===\n");
    out.push_str(&format!("{:<25}{}\n", "Input Domain:", summary.input_domain));
    out.push_str(&format!(
        "{:<25}{}\n",
        "Derived Email Domain:",
        summary.derived_domain.as_deref().unwrap_or("(none found)")
    ));
    out.push_str(&format!("{:<25}{}\n", "Email Server Tested:", summary.mail_host));

    match (summary.probe.connected, summary.probe.code) {
        (true, Some(code)) => {
            out.push_str(&format!("{:<25}OPEN (code={})\n", port_label, code));
            if let Some(banner) = &summary.probe.banner {
                out.push_str(&format!("{:<25}{}\n", "Banner:", banner));
            }
        }
        _ => {
            out.push_str(&format!("{:<25}UNREACHABLE or CLOSED\n", port_label));
        }
    }

    out.push_str(&format!(
        "{:<25}{} -> {} via {}\n",
        "Mailer Handoff:",
        summary.handoff.sender,
        summary.handoff.recipient,
        summary.handoff.smtp_target()
    ));
    out.push_str(&format!(
        "{:<25}{} ({} visited)\n",
        "Pages Crawled:",
        summary.pages_crawled,
        summary.visited.len()
    ));

    out.push_str("\n=== Emails Found ===\n");
    if summary.emails.is_empty() {
        out.push_str("(none)\n");
    } else {
        for email in &summary.emails {
            out.push_str(&format!("{}\n", email));
        }
    }

    out
}

/// Prints the console summary to stdout
pub fn print_summary(summary: &HarvestSummary) {
    println!("\n{}", format_console_summary(summary));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::ProbeResult;
    use crate::output::fixtures::sample_summary;

    #[test]
    fn test_open_port() {
        let text = format_console_summary(&sample_summary());

        assert!(text.contains("Input Domain:            acme.test"));
        assert!(text.contains("Derived Email Domain:    acme.test"));
        assert!(text.contains("Email Server Tested:     acme-test.mail.protection.outlook.com"));
        assert!(text.contains("Port 25 Result:          OPEN (code=220)"));
        assert!(text.contains("Banner:                  220 mx.acme.test ESMTP ready"));
        assert!(text.contains("helpdesk@acme.test -> info@acme.test via acme-test.mail.protection.outlook.com:25"));
        assert!(text.contains("info@acme.test\nsales@acme.test\n"));
    }

    #[test]
    fn test_closed_port_and_no_emails() {
        let mut summary = sample_summary();
        summary.derived_domain = None;
        summary.emails.clear();
        summary.probe = ProbeResult {
            connected: false,
            code: Some(554),
            banner: Some("554 go away".to_string()),
        };

        let text = format_console_summary(&summary);

        assert!(text.contains("Derived Email Domain:    (none found)"));
        assert!(text.contains("Port 25 Result:          UNREACHABLE or CLOSED"));
        assert!(!text.contains("Banner:"));
        assert!(text.ends_with("=== Emails Found ===\n(none)\n"));
    }

    #[test]
    fn test_full_layout() {
        let text = format_console_summary(&sample_summary());

        let expected = "\
=== Summary ===
Input Domain:            acme.test
Derived Email Domain:    acme.test
Email Server Tested:     acme-test.mail.protection.outlook.com
Port 25 Result:          OPEN (code=220)
Banner:                  220 mx.acme.test ESMTP ready
Mailer Handoff:          helpdesk@acme.test -> info@acme.test via acme-test.mail.protection.outlook.com:25
Pages Crawled:           2 (2 visited)

=== Emails Found ===
info@acme.test
sales@acme.test
";
        assert_eq!(text, expected);
    }
}
