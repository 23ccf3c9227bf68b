//! Markdown report generation
//!
//! This module renders a harvest as a human-readable markdown report:
//! run information, mail infrastructure findings, harvested addresses and
//! the pages that were visited.

use crate::harvest::HarvestSummary;
use crate::output::{OutputError, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown report for `summary` to `output_path`
///
/// # Arguments
///
/// * `summary` - The harvest results
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to create or write the file
pub fn generate_markdown_summary(summary: &HarvestSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let write_err = |source: std::io::Error| OutputError::Write {
        path: output_path.display().to_string(),
        source,
    };

    let mut file = File::create(output_path).map_err(write_err)?;
    file.write_all(markdown.as_bytes()).map_err(write_err)?;

    tracing::info!("Markdown summary written to {}", output_path.display());
    Ok(())
}

/// Formats a harvest summary as markdown
pub fn format_markdown_summary(summary: &HarvestSummary) -> String {
    let mut md = String::new();

    // Title
    md.push_str(&format!("# Contact Harvest: {}\n\n", summary.input_domain));

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Start URL**: {}\n", summary.start_url));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", summary.finished_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {} seconds\n",
        summary.duration_seconds()
    ));
    md.push_str(&format!("- **Pages Crawled**: {}\n\n", summary.pages_crawled));

    // Mail infrastructure
    md.push_str("## Mail Infrastructure\n\n");
    md.push_str("| Item | Value |\n");
    md.push_str("|------|-------|\n");
    md.push_str(&format!("| Input Domain | {} |\n", summary.input_domain));
    md.push_str(&format!(
        "| Derived Email Domain | {} |\n",
        summary.derived_domain.as_deref().unwrap_or("(none found)")
    ));
    md.push_str(&format!("| Email Server Tested | {} |\n", summary.mail_host));

    let port_result = match (summary.probe.connected, summary.probe.code) {
        (true, Some(code)) => format!("OPEN (code={})", code),
        (false, Some(code)) => format!("CLOSED (code={})", code),
        _ => "UNREACHABLE".to_string(),
    };
    md.push_str(&format!(
        "| Port {} Result | {} |\n",
        summary.probe_port, port_result
    ));
    if let Some(banner) = &summary.probe.banner {
        md.push_str(&format!("| Banner | `{}` |\n", banner.replace('|', "\\|")));
    }
    md.push('\n');

    // Mailer handoff
    md.push_str("## Mailer Handoff\n\n");
    md.push_str(&format!("- **Recipient**: {}\n", summary.handoff.recipient));
    md.push_str(&format!("- **Sender**: {}\n", summary.handoff.sender));
    md.push_str(&format!(
        "- **SMTP Target**: {}\n\n",
        summary.handoff.smtp_target()
    ));

    // Emails
    md.push_str(&format!("## Emails Found ({})\n\n", summary.emails.len()));
    if summary.emails.is_empty() {
        md.push_str("(none)\n\n");
    } else {
        for email in &summary.emails {
            md.push_str(&format!("- {}\n", email));
        }
        md.push('\n');
    }

    // Visited pages
    if !summary.visited.is_empty() {
        md.push_str(&format!("## Visited Pages ({})\n\n", summary.visited.len()));
        for url in &summary.visited {
            md.push_str(&format!("- {}\n", url));
        }
        md.push('\n');
    }

    md
}
