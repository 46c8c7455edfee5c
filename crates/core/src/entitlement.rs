//! Per-session entitlement state and its toggle/confirm/cancel state machine
//!
//! ```text
//! Idle --toggle--> Pending{AddOn | Swap} --confirm--> Idle (committed)
//!                                        --cancel---> Idle (unchanged)
//! ```
//!
//! The selection is never touched while an action is pending, so cancelling
//! always leaves the pre-proposal state in place.

use crate::catalog::{Protection, Tier, TierKind};
use crate::error::EntitlementError;
use crate::money::Money;
use crate::pricing::{compute_cost, MonthlyCost};
use crate::rules::{self, Classification, Decision, FreeChange};
use serde::Serialize;

/// The one in-flight change awaiting user confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingAction {
    AddOn {
        protection: Protection,
        monthly_delta: Money,
    },
    /// Replacing the add-on in `slot`. Without an `incoming` protection a
    /// confirm simply drops the add-on.
    Swap {
        outgoing: Protection,
        slot: usize,
        incoming: Option<Protection>,
        is_free: bool,
        monthly_delta: Money,
    },
}

/// What a successful confirm changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "committed", rename_all = "snake_case")]
pub enum Committed {
    Added {
        protection: Protection,
    },
    Removed {
        protection: Protection,
    },
    Swapped {
        outgoing: Protection,
        incoming: Protection,
        slot: usize,
        free: bool,
    },
}

/// Mutable entitlement state owned by a single session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitlementState {
    tier: TierKind,
    selected: Vec<Protection>,
    swaps_used: u32,
    pending: Option<PendingAction>,
}

impl Default for EntitlementState {
    fn default() -> Self {
        Self::new(TierKind::default())
    }
}

impl EntitlementState {
    /// Fresh state on `tier`: its default bundle, no swaps, nothing pending.
    pub fn new(tier: TierKind) -> Self {
        Self {
            tier,
            selected: tier.tier().default_selection(),
            swaps_used: 0,
            pending: None,
        }
    }

    /// Builds a state with an explicit selection, validating the tier cap
    /// and rejecting duplicates.
    pub fn with_selection(
        tier: TierKind,
        selected: Vec<Protection>,
        swaps_used: u32,
    ) -> Result<Self, EntitlementError> {
        let spec = tier.tier();
        if !spec.max.admits(selected.len()) {
            return Err(EntitlementError::InvalidToggle(format!(
                "{} allows at most {} protections, got {}",
                spec.name(),
                spec.max,
                selected.len()
            )));
        }
        for (i, p) in selected.iter().enumerate() {
            if selected[..i].contains(p) {
                return Err(EntitlementError::InvalidToggle(format!(
                    "'{}' is selected more than once",
                    p
                )));
            }
        }
        Ok(Self {
            tier,
            selected,
            swaps_used,
            pending: None,
        })
    }

    pub fn tier_kind(&self) -> TierKind {
        self.tier
    }

    pub fn tier(&self) -> Tier {
        self.tier.tier()
    }

    pub fn selected(&self) -> &[Protection] {
        &self.selected
    }

    pub fn swaps_used(&self) -> u32 {
        self.swaps_used
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn is_selected(&self, protection: Protection) -> bool {
        self.selected.contains(&protection)
    }

    pub fn index_of(&self, protection: Protection) -> Option<usize> {
        self.selected.iter().position(|p| *p == protection)
    }

    pub fn classification(&self, protection: Protection) -> Option<Classification> {
        rules::classify(self, protection)
    }

    /// Number of selected protections beyond the tier's included count.
    pub fn add_on_count(&self) -> usize {
        self.selected
            .len()
            .saturating_sub(self.tier().included as usize)
    }

    pub fn cost(&self) -> MonthlyCost {
        compute_cost(self)
    }

    /// Evaluates a toggle and moves the state machine.
    ///
    /// Free changes commit at once. Billable changes replace any stale
    /// pending action. A rejected toggle changes nothing, including any
    /// action already pending.
    pub fn toggle(&mut self, protection: Protection) -> Decision {
        let decision = rules::propose_toggle(self, protection);
        match &decision {
            Decision::Reject(_) => {}
            Decision::ApplyFree(change) => {
                self.pending = None;
                match *change {
                    FreeChange::Add(p) => self.selected.push(p),
                    FreeChange::Remove(p) => self.selected.retain(|s| *s != p),
                }
            }
            Decision::RequiresAddOnConfirmation {
                protection,
                monthly_delta,
            } => {
                self.pending = Some(PendingAction::AddOn {
                    protection: *protection,
                    monthly_delta: *monthly_delta,
                });
            }
            Decision::RequiresSwapConfirmation {
                outgoing,
                incoming,
                is_free,
                monthly_delta,
            } => {
                if let Some(slot) = self.index_of(*outgoing) {
                    self.pending = Some(PendingAction::Swap {
                        outgoing: *outgoing,
                        slot,
                        incoming: *incoming,
                        is_free: *is_free,
                        monthly_delta: *monthly_delta,
                    });
                }
            }
        }
        decision
    }

    /// Toggles a protection given by name; unknown names are rejected.
    pub fn toggle_by_name(&mut self, name: &str) -> Decision {
        match name.parse::<Protection>() {
            Ok(protection) => self.toggle(protection),
            Err(_) => rules::propose_toggle_by_name(self, name),
        }
    }

    /// Commits the pending action.
    pub fn confirm(&mut self) -> Result<Committed, EntitlementError> {
        let pending = self.pending.take().ok_or_else(|| {
            EntitlementError::InvalidToggle("nothing is awaiting confirmation".to_string())
        })?;

        match pending {
            PendingAction::AddOn { protection, .. } => {
                if self.is_selected(protection) || !self.tier().max.permits(self.selected.len()) {
                    return Err(EntitlementError::InvalidToggle(format!(
                        "'{}' can no longer be added",
                        protection
                    )));
                }
                self.selected.push(protection);
                Ok(Committed::Added { protection })
            }
            PendingAction::Swap {
                outgoing,
                slot,
                incoming,
                ..
            } => {
                if self.selected.get(slot) != Some(&outgoing) {
                    return Err(EntitlementError::InvalidToggle(format!(
                        "'{}' is no longer in slot {}",
                        outgoing,
                        slot + 1
                    )));
                }
                match incoming {
                    Some(incoming) if self.is_selected(incoming) => {
                        Err(EntitlementError::InvalidToggle(format!(
                            "'{}' is already selected",
                            incoming
                        )))
                    }
                    Some(incoming) => {
                        // Usage may have changed since the swap was proposed.
                        let free = self.tier().swap_quota.permits(self.swaps_used as usize);
                        self.selected[slot] = incoming;
                        self.swaps_used += 1;
                        Ok(Committed::Swapped {
                            outgoing,
                            incoming,
                            slot,
                            free,
                        })
                    }
                    None => {
                        self.selected.remove(slot);
                        Ok(Committed::Removed {
                            protection: outgoing,
                        })
                    }
                }
            }
        }
    }

    /// Discards the pending action, returning it if there was one.
    pub fn cancel(&mut self) -> Option<PendingAction> {
        self.pending.take()
    }

    /// Moves to another tier, resetting the selection to its default bundle
    /// and the swap counter to zero. The previous selection is not kept.
    pub fn change_tier(&mut self, tier: TierKind) {
        *self = Self::new(tier);
    }

    /// Starts a new billing period: swap usage goes back to zero and a
    /// pending swap is repriced against the fresh quota.
    pub fn reset_period(&mut self) {
        self.swaps_used = 0;
        let has_replacement = match &self.pending {
            Some(PendingAction::Swap { incoming, .. }) => incoming.is_some(),
            _ => return,
        };
        let (free, delta) = rules::swap_terms(self, has_replacement);
        if let Some(PendingAction::Swap {
            is_free,
            monthly_delta,
            ..
        }) = &mut self.pending
        {
            *is_free = free;
            *monthly_delta = delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_cheapest_tier() {
        let state = EntitlementState::default();
        assert_eq!(state.tier_kind(), TierKind::PupJr);
        assert_eq!(state.selected().len(), 3);
        assert_eq!(state.swaps_used(), 0);
        assert!(state.pending().is_none());
    }

    #[test]
    fn with_selection_rejects_duplicates() {
        let err = EntitlementState::with_selection(
            TierKind::PupSr,
            vec![Protection::AiAssistant, Protection::AiAssistant],
            0,
        )
        .unwrap_err();
        assert!(matches!(err, EntitlementError::InvalidToggle(_)));
    }

    #[test]
    fn with_selection_rejects_over_max() {
        let err = EntitlementState::with_selection(
            TierKind::PupJr,
            Protection::ALL[..4].to_vec(),
            0,
        )
        .unwrap_err();
        assert!(err.to_string().contains("at most 3"));
    }

    #[test]
    fn confirm_without_pending_is_invalid() {
        let mut state = EntitlementState::new(TierKind::PupSr);
        assert!(matches!(
            state.confirm(),
            Err(EntitlementError::InvalidToggle(_))
        ));
    }

    #[test]
    fn swap_without_replacement_drops_the_add_on() {
        let mut state = EntitlementState::new(TierKind::PupSr);
        state.toggle(Protection::SslCertificate);
        state.confirm().unwrap();
        assert_eq!(state.add_on_count(), 1);

        let decision = state.toggle(Protection::SslCertificate);
        assert!(decision.needs_confirmation());
        let committed = state.confirm().unwrap();
        assert_eq!(
            committed,
            Committed::Removed {
                protection: Protection::SslCertificate
            }
        );
        assert_eq!(state.add_on_count(), 0);
        assert_eq!(state.swaps_used(), 0);
    }

    #[test]
    fn reset_period_clears_swaps() {
        let mut state =
            EntitlementState::with_selection(TierKind::PupSr, Protection::ALL[..8].to_vec(), 3)
                .unwrap();
        state.reset_period();
        assert_eq!(state.swaps_used(), 0);
        assert_eq!(state.selected().len(), 8);
    }
}
