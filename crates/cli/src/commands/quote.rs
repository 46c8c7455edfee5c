//! `shepherd quote`: price a plan without opening a session

use anyhow::Result;
use shepherd_core::{quote, TierKind};

use crate::output::{json, terminal};
use crate::OutputFormat;

/// Prints the monthly bill for `protections` selected protections (the
/// tier's default selection when omitted) and `swaps` swaps this period.
pub fn run(
    tier: TierKind,
    protections: Option<usize>,
    swaps: u32,
    format: OutputFormat,
) -> Result<()> {
    let tier = tier.tier();
    let count = protections.unwrap_or_else(|| tier.default_selection().len());
    let cost = quote(&tier, count, swaps)?;

    match format {
        OutputFormat::Terminal => print!("{}", terminal::format_cost(&cost)),
        OutputFormat::Json => println!("{}", json::pretty(&cost)?),
    }
    Ok(())
}
