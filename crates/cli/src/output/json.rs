//! JSON output formatting

use anyhow::Result;
use serde::Serialize;
use shepherd_core::{feature_matrix, tiers, Protection, Tier, TierKind};

#[derive(Debug, Serialize)]
pub struct JsonTier {
    #[serde(flatten)]
    pub tier: Tier,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct JsonMatrixRow {
    pub protection: Protection,
    pub included_in: Vec<TierKind>,
}

pub fn tier_catalog() -> Vec<JsonTier> {
    tiers()
        .into_iter()
        .map(|tier| JsonTier {
            summary: tier.summary(),
            tier,
        })
        .collect()
}

pub fn matrix() -> Vec<JsonMatrixRow> {
    feature_matrix()
        .into_iter()
        .map(|row| JsonMatrixRow {
            protection: row.protection,
            included_in: TierKind::ALL
                .iter()
                .zip(row.included.iter())
                .filter(|(_, included)| **included)
                .map(|(kind, _)| *kind)
                .collect(),
        })
        .collect()
}

/// Pretty JSON for whole-document output.
pub fn pretty<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Single-line JSON, one event per line.
pub fn line<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}
