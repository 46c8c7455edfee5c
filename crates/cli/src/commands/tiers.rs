//! `shepherd tiers` and `shepherd matrix`: the plan catalog

use anyhow::Result;
use shepherd_core::{feature_matrix, tiers};

use crate::output::{json, terminal};
use crate::OutputFormat;

pub fn run_tiers(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Terminal => print!("{}", terminal::format_tiers(&tiers())),
        OutputFormat::Json => println!("{}", json::pretty(&json::tier_catalog())?),
    }
    Ok(())
}

pub fn run_matrix(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Terminal => print!("{}", terminal::format_matrix(&feature_matrix())),
        OutputFormat::Json => println!("{}", json::pretty(&json::matrix())?),
    }
    Ok(())
}
