//! Mail infrastructure module
//!
//! Everything that happens after the crawl:
//! - Inferring the organization's mail domain from harvested addresses
//! - Naming the candidate mail host from a configurable template
//! - Grabbing the SMTP greeting banner of that host
//! - Packaging the values an external mailer would need

mod handoff;
mod host;
mod infer;
mod probe;

pub use handoff::MailerHandoff;
pub use host::{candidate_mail_host, DOMAIN_PLACEHOLDER};
pub use infer::infer_primary_domain;
pub use probe::{classify_greeting, probe_mail_host, ProbeResult};
