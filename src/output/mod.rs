//! Output module for presenting harvest results
//!
//! This module handles:
//! - Printing the console summary after a harvest
//! - Writing the markdown report

mod console;
mod markdown;

pub use console::{format_console_summary, print_summary};
pub use markdown::{format_markdown_summary, generate_markdown_summary};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
