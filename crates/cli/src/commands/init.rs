//! Initialize .shepherd.toml configuration

use anyhow::Result;
use colored::Colorize;
use shepherd_core::config::CONFIG_FILENAME;
use shepherd_core::{ShepherdConfig, TierKind};
use std::path::Path;

pub fn run(path: Option<&Path>, tier: Option<TierKind>) -> Result<()> {
    let target_path = path.unwrap_or_else(|| Path::new("."));
    let config_path = target_path.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "  {} {} already exists at {}",
            "Warning:".yellow().bold(),
            CONFIG_FILENAME,
            config_path.display()
        );
        return Ok(());
    }

    let mut config = ShepherdConfig::default();
    if let Some(tier) = tier {
        config.session.default_tier = tier.name().to_string();
    }
    config.save(&config_path)?;
    tracing::debug!(path = %config_path.display(), "wrote config");

    eprintln!(
        "  {} Created {} at {}",
        "\u{2713}".green(),
        CONFIG_FILENAME,
        config_path.display()
    );
    eprintln!();
    eprintln!("  Set your Shopify credentials there (or via SHOPIFY_SHOP_NAME and");
    eprintln!("  SHOPIFY_ACCESS_TOKEN), then run:");
    eprintln!("    {}", "shepherd session".bold());

    Ok(())
}
