//! Monthly cost calculation
//!
//! Cost is always derived from (tier, number of selected protections, swaps
//! used) and never stored.

use crate::catalog::{Protection, Tier, TierKind};
use crate::entitlement::EntitlementState;
use crate::error::EntitlementError;
use crate::money::Money;
use serde::Serialize;

/// Itemised monthly bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCost {
    pub tier: TierKind,
    pub base: Money,
    pub add_on_count: u32,
    pub add_on_charge: Money,
    pub billable_swaps: u32,
    pub swap_charge: Money,
    pub total: Money,
}

/// Cost for `selected_len` active protections and `swaps_used` swaps on `tier`.
pub fn cost_for(tier: &Tier, selected_len: usize, swaps_used: u32) -> MonthlyCost {
    let add_on_count = (selected_len as u32).saturating_sub(tier.included);
    let add_on_charge = tier.add_on_price * u64::from(add_on_count);
    let billable_swaps = tier.swap_quota.excess(swaps_used);
    let swap_charge = tier.swap_price * u64::from(billable_swaps);

    MonthlyCost {
        tier: tier.kind,
        base: tier.price,
        add_on_count,
        add_on_charge,
        billable_swaps,
        swap_charge,
        total: tier.price + add_on_charge + swap_charge,
    }
}

/// Cost of the given entitlement state.
pub fn compute_cost(state: &EntitlementState) -> MonthlyCost {
    cost_for(&state.tier(), state.selected().len(), state.swaps_used())
}

/// Like [`cost_for`], but refuses selections the tier could never reach.
pub fn quote(tier: &Tier, count: usize, swaps_used: u32) -> Result<MonthlyCost, EntitlementError> {
    if count > Protection::ALL.len() {
        return Err(EntitlementError::InvalidToggle(format!(
            "only {} protections exist, asked for {}",
            Protection::ALL.len(),
            count
        )));
    }
    if !tier.max.admits(count) {
        return Err(EntitlementError::InvalidToggle(format!(
            "{} allows at most {} active protections",
            tier.name(),
            tier.max
        )));
    }
    let extra = count.saturating_sub(tier.included as usize);
    if !tier.add_on_quota.admits(extra) {
        return Err(EntitlementError::InvalidToggle(format!(
            "{} allows at most {} add-ons",
            tier.name(),
            tier.add_on_quota
        )));
    }
    Ok(cost_for(tier, count, swaps_used))
}
