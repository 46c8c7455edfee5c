//! Shepherd Core - protection plan entitlements and pricing
//!
//! This crate holds the pieces of the DarkShepherd dashboard that carry rules:
//! - The tier and protection catalog
//! - Per-session entitlement state with a toggle/confirm/cancel state machine
//! - The selection rules engine that classifies each toggle
//! - The monthly cost calculator
//! - `.shepherd.toml` configuration
//!
//! Nothing here performs I/O beyond reading and writing the config file.

pub mod catalog;
pub mod config;
pub mod entitlement;
pub mod error;
pub mod money;
pub mod pricing;
pub mod rules;

pub use catalog::{
    feature_matrix, protection_by_name, tier_by_name, tiers, Limit, MatrixRow, Protection, Tier,
    TierKind,
};
pub use config::ShepherdConfig;
pub use entitlement::{Committed, EntitlementState, PendingAction};
pub use error::EntitlementError;
pub use money::Money;
pub use pricing::{compute_cost, cost_for, quote, MonthlyCost};
pub use rules::{
    classify, propose_toggle, propose_toggle_by_name, Classification, Decision, FreeChange,
    RejectReason,
};

/// Shepherd version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
