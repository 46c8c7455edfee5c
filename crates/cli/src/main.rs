//! Shepherd CLI - protection plans and store security for Shopify merchants

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use shepherd_cli::commands;
use shepherd_cli::observability::{init_logging, LogFormat};
use shepherd_cli::{Cli, Commands, OutputFormat};
use shepherd_core::ShepherdConfig;
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    init_logging(LogFormat::from_env(), "warn");

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("  {} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Dispatches the parsed command. `Ok(false)` means an upstream call failed
/// and was already reported.
fn run(cli: Cli) -> Result<bool> {
    if let Commands::Init { path, tier } = &cli.command {
        commands::init::run(path.as_deref(), *tier)?;
        return Ok(true);
    }

    let config = load_config(cli.config.as_deref())?;
    if !config.output.color {
        colored::control::set_override(false);
    }
    let format = cli
        .format
        .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));

    match cli.command {
        Commands::Init { .. } => {}
        Commands::Tiers => commands::tiers::run_tiers(format)?,
        Commands::Matrix => commands::tiers::run_matrix(format)?,
        Commands::Quote {
            tier,
            protections,
            swaps,
        } => commands::quote::run(tier, protections, swaps, format)?,
        Commands::Session { tier } => {
            let tier = match tier {
                Some(tier) => tier,
                None => config.session.tier()?,
            };
            commands::session::run(tier, format)?;
        }
        Commands::Shop { action } => {
            return commands::shop::run(&action, &config.upstream, format);
        }
        Commands::Insights { action } => {
            return commands::insights::run(&action, &config.upstream, format);
        }
        Commands::Forward { kind, file } => {
            return commands::forward::run(kind, &file, &config.upstream, format);
        }
    }

    Ok(true)
}

fn load_config(path: Option<&Path>) -> Result<ShepherdConfig> {
    let config = match path {
        Some(path) => ShepherdConfig::from_file(path)?,
        None => ShepherdConfig::find_and_load(&std::env::current_dir()?)?,
    };
    tracing::debug!(default_tier = %config.session.default_tier, "configuration loaded");
    Ok(config.with_process_env())
}
