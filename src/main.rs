//! Contact-Harvest main entry point
//!
//! This is the command-line interface for the Contact-Harvest crawler.

use anyhow::{bail, Context, Result};
use clap::Parser;
use contact_harvest::config::{load_config_with_hash, validate, Config};
use contact_harvest::output::{generate_markdown_summary, print_summary};
use contact_harvest::run_harvest;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Contact-Harvest: domain-scoped contact discovery
///
/// Crawls one website, collects the email addresses it publishes, infers
/// the organization's mail domain and checks whether its candidate mail
/// host accepts connections.
#[derive(Parser, Debug)]
#[command(name = "contact-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Domain-scoped contact discovery", long_about = None)]
struct Cli {
    /// Domain or URL to harvest; prompted for when omitted
    #[arg(value_name = "DOMAIN")]
    domain: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the page budget
    #[arg(long)]
    max_pages: Option<usize>,

    /// Override the link depth limit
    #[arg(long)]
    max_depth: Option<u32>,

    /// Override the delay between fetches, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Write a markdown report to this path
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Validate config and show what would be harvested without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli)?;

    let domain = match &cli.domain {
        Some(domain) => domain.clone(),
        None => prompt_for_domain()?,
    };

    if cli.dry_run {
        handle_dry_run(&config, &domain);
        return Ok(());
    }

    let summary = match run_harvest(&domain, &config).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            return Err(e.into());
        }
    };

    print_summary(&summary);

    if let Some(path) = &config.output.summary_path {
        generate_markdown_summary(&summary, Path::new(path))
            .with_context(|| format!("writing summary to {}", path))?;
        println!("✓ Summary exported to: {}", path);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("contact_harvest=info,warn"),
            1 => EnvFilter::new("contact_harvest=debug,info"),
            2 => EnvFilter::new("contact_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(io::stderr)
        .init();
}

/// Loads the configuration file, or the defaults when none is given
fn load(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Applies command-line overrides and re-validates the result
fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.delay_ms = delay_ms;
    }
    if let Some(summary) = &cli.summary {
        config.output.summary_path = Some(summary.display().to_string());
    }

    validate(config).context("invalid command-line override")?;
    Ok(())
}

/// Asks for a domain on stdin
fn prompt_for_domain() -> Result<String> {
    print!("Enter a domain (e.g., example.com): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading domain from stdin")?;

    let domain = line.trim();
    if domain.is_empty() {
        bail!("no domain given");
    }
    Ok(domain.to_string())
}

/// Handles the --dry-run mode: shows the effective settings
fn handle_dry_run(config: &Config, domain: &str) {
    println!("=== Contact-Harvest Dry Run ===\n");

    println!("Target: {}", domain);

    println!("\nCrawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Delay: {}ms", config.crawler.delay_ms);

    println!("\nUser Agent:");
    println!("  Header: {}", config.user_agent.header_value());
    println!("  Timeout: {}s", config.user_agent.timeout_secs);

    println!("\nProbe:");
    println!("  Template: {}", config.probe.mail_host_template);
    println!("  Port: {}", config.probe.port);
    println!("  Timeout: {}s", config.probe.timeout_secs);

    println!("\nMailer:");
    println!("  SMTP port: {}", config.mailer.smtp_port);
    println!("  Sender local part: {}", config.mailer.sender_local_part);

    println!("\nOutput:");
    println!(
        "  Summary: {}",
        config.output.summary_path.as_deref().unwrap_or("(none)")
    );

    println!("\n✓ Configuration is valid");
}
