//! `shepherd forward`: hand a Shopify webhook payload to the analytics service

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;
use shepherd_core::config::UpstreamConfig;
use std::path::Path;

use super::report_client_error;
use crate::output::json;
use crate::progress::Step;
use crate::upstream::{AnalyticsClient, Delivery};
use crate::OutputFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum WebhookKind {
    /// orders/create payload
    Order,
    /// customers/create payload
    Customer,
}

/// Reads a webhook JSON payload from `file` and forwards it. A failed
/// delivery is reported but still counts as handled, like an acknowledged
/// webhook.
pub fn run(
    kind: WebhookKind,
    file: &Path,
    config: &UpstreamConfig,
    format: OutputFormat,
) -> Result<bool> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read payload {}", file.display()))?;
    let payload: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    let client = match AnalyticsClient::from_config(config) {
        Ok(client) => client,
        Err(e) => return report_client_error(format, &e),
    };

    let label = match kind {
        WebhookKind::Order => "Forwarding order",
        WebhookKind::Customer => "Forwarding customer",
    };
    let step = matches!(format, OutputFormat::Terminal).then(|| Step::new(label));

    let delivery = match kind {
        WebhookKind::Order => client.forward_order(&payload),
        WebhookKind::Customer => client.forward_customer(&payload),
    };

    match format {
        OutputFormat::Json => println!("{}", json::pretty(&delivery)?),
        OutputFormat::Terminal => {
            if let Some(step) = &step {
                match &delivery {
                    Delivery::Delivered { .. } => step.finish("delivered"),
                    Delivery::Failed { reason } => step.fail(reason),
                }
            }
            if !delivery.is_delivered() {
                eprintln!(
                    "  {}",
                    "Webhook acknowledged; the analytics service did not receive it.".yellow()
                );
            }
        }
    }

    Ok(true)
}
