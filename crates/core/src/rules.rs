//! Selection rules engine
//!
//! Classifies a requested toggle against the current entitlement state.
//! Billing classification is positional: a protection at an index below the
//! tier's `included` count is free, anything at or above it is an add-on.

use crate::catalog::{Limit, Protection};
use crate::entitlement::{EntitlementState, PendingAction};
use crate::money::Money;
use serde::Serialize;
use std::fmt;

/// Billing class of a selected protection, derived from its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Included,
    AddOn,
}

/// A change that commits immediately with no billing confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "change", content = "protection", rename_all = "snake_case")]
pub enum FreeChange {
    Add(Protection),
    Remove(Protection),
}

/// Why a toggle was refused. The state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    UnknownProtection { name: String },
    AtCapacity { max: Limit },
    AddOnsNotOffered,
    AddOnQuotaExhausted { quota: Limit },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::UnknownProtection { name } => {
                write!(f, "'{}' is not a known protection", name)
            }
            RejectReason::AtCapacity { max } => {
                write!(f, "plan allows at most {} active protections", max)
            }
            RejectReason::AddOnsNotOffered => write!(f, "plan does not offer add-ons"),
            RejectReason::AddOnQuotaExhausted { quota } => {
                write!(f, "all {} add-on slots are in use", quota)
            }
        }
    }
}

/// Outcome of evaluating a toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Reject(RejectReason),
    ApplyFree(FreeChange),
    RequiresAddOnConfirmation {
        protection: Protection,
        monthly_delta: Money,
    },
    /// `incoming` is `None` until a replacement has been chosen. `is_free`
    /// says whether a replacement would use a free swap; `monthly_delta` is
    /// what confirming right now would change on the bill, so it is the
    /// negated add-on price while no replacement is chosen.
    RequiresSwapConfirmation {
        outgoing: Protection,
        incoming: Option<Protection>,
        is_free: bool,
        monthly_delta: Money,
    },
}

impl Decision {
    pub fn is_reject(&self) -> bool {
        matches!(self, Decision::Reject(_))
    }

    pub fn needs_confirmation(&self) -> bool {
        matches!(
            self,
            Decision::RequiresAddOnConfirmation { .. } | Decision::RequiresSwapConfirmation { .. }
        )
    }
}

/// Classifies a selected protection by its position, or `None` if it is not selected.
pub fn classify(state: &EntitlementState, protection: Protection) -> Option<Classification> {
    let included = state.tier().included as usize;
    state.index_of(protection).map(|idx| {
        if idx < included {
            Classification::Included
        } else {
            Classification::AddOn
        }
    })
}

/// Decides what toggling `protection` would do. Pure: never mutates `state`.
///
/// While a swap is pending, toggling an unselected protection chooses (or
/// re-chooses) its replacement. Every other toggle is evaluated as if nothing
/// were pending.
pub fn propose_toggle(state: &EntitlementState, protection: Protection) -> Decision {
    let tier = state.tier();
    let included = tier.included as usize;
    let count = state.selected().len();

    if let Some(PendingAction::Swap { outgoing, .. }) = state.pending() {
        if !state.is_selected(protection) {
            return swap_decision(state, *outgoing, Some(protection));
        }
    }

    match state.index_of(protection) {
        Some(idx) if idx < included => Decision::ApplyFree(FreeChange::Remove(protection)),
        Some(_) => swap_decision(state, protection, None),
        None if count < included => Decision::ApplyFree(FreeChange::Add(protection)),
        None => {
            if !tier.max.permits(count) {
                return Decision::Reject(RejectReason::AtCapacity { max: tier.max });
            }
            if tier.add_on_quota.is_zero() {
                return Decision::Reject(RejectReason::AddOnsNotOffered);
            }
            if !tier.add_on_quota.permits(count - included) {
                return Decision::Reject(RejectReason::AddOnQuotaExhausted {
                    quota: tier.add_on_quota,
                });
            }
            if tier.add_on_price.is_zero() {
                Decision::ApplyFree(FreeChange::Add(protection))
            } else {
                Decision::RequiresAddOnConfirmation {
                    protection,
                    monthly_delta: tier.add_on_price,
                }
            }
        }
    }
}

/// Same as [`propose_toggle`] for a protection given by name.
pub fn propose_toggle_by_name(state: &EntitlementState, name: &str) -> Decision {
    match name.parse::<Protection>() {
        Ok(protection) => propose_toggle(state, protection),
        Err(_) => Decision::Reject(RejectReason::UnknownProtection {
            name: name.trim().to_string(),
        }),
    }
}

fn swap_decision(
    state: &EntitlementState,
    outgoing: Protection,
    incoming: Option<Protection>,
) -> Decision {
    let (is_free, monthly_delta) = swap_terms(state, incoming.is_some());
    Decision::RequiresSwapConfirmation {
        outgoing,
        incoming,
        is_free,
        monthly_delta,
    }
}

/// Whether a swap would be free at the current usage, and the bill change of
/// confirming it now.
pub(crate) fn swap_terms(state: &EntitlementState, has_replacement: bool) -> (bool, Money) {
    let tier = state.tier();
    let is_free = tier.swap_quota.permits(state.swaps_used() as usize);
    let monthly_delta = if !has_replacement {
        // Confirming without a replacement drops the add-on and uses no swap.
        -tier.add_on_price
    } else if is_free {
        Money::ZERO
    } else {
        tier.swap_price
    };
    (is_free, monthly_delta)
}
