//! Error taxonomy for the entitlement core

use thiserror::Error;

/// Errors raised by catalog lookups and entitlement state transitions.
///
/// None of these are fatal: callers reject the attempted action and keep
/// the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntitlementError {
    #[error("Unknown tier '{0}'. Run 'shepherd tiers' to list available plans.")]
    UnknownTierKind(String),

    #[error("Unknown protection '{0}'. Run 'shepherd matrix' to list protections.")]
    UnknownProtectionKind(String),

    #[error("Invalid toggle: {0}")]
    InvalidToggle(String),
}
