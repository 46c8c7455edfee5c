//! CLI commands

pub mod forward;
pub mod init;
pub mod insights;
pub mod quote;
pub mod session;
pub mod shop;
pub mod tiers;

use anyhow::Result;
use colored::Colorize;

use crate::output::{json, terminal};
use crate::progress::Step;
use crate::upstream::{Envelope, UpstreamError};
use crate::OutputFormat;

/// Runs one upstream call behind a spinner and prints its envelope.
/// Returns whether the call succeeded.
pub(crate) fn fetch_and_print(
    format: OutputFormat,
    title: &str,
    fetch: impl FnOnce() -> Envelope,
) -> Result<bool> {
    let step = match format {
        OutputFormat::Terminal => Some(Step::new(format!("Fetching {}", title))),
        OutputFormat::Json => None,
    };

    let envelope = fetch();

    if let Some(step) = step {
        match (envelope.success, envelope.count) {
            (true, Some(n)) => step.finish(&format!("{} records", n)),
            (true, None) => step.finish("ok"),
            (false, _) => step.fail("see error below"),
        }
    }

    print_envelope(format, title, &envelope)?;
    Ok(envelope.success)
}

pub(crate) fn print_envelope(format: OutputFormat, title: &str, envelope: &Envelope) -> Result<()> {
    match format {
        OutputFormat::Terminal => print!("{}", terminal::format_envelope(title, envelope)),
        OutputFormat::Json => println!("{}", json::pretty(envelope)?),
    }
    Ok(())
}

/// Reports a client that could not be built (missing credentials, bad URL).
pub(crate) fn report_client_error(format: OutputFormat, err: &UpstreamError) -> Result<bool> {
    tracing::warn!(error = %err, "upstream client unavailable");
    match format {
        OutputFormat::Terminal => eprintln!("  {} {}", "Error:".red().bold(), err),
        OutputFormat::Json => println!("{}", json::pretty(&Envelope::error(err.to_string()))?),
    }
    Ok(false)
}
