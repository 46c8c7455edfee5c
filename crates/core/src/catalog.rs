//! Static catalog of subscription tiers and protections
//!
//! The tier table is the single authoritative source for prices, inclusion
//! counts, and add-on/swap allowances. Protections carry no price of their
//! own; what a protection costs depends only on where it sits in a
//! selection.

use crate::error::EntitlementError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A cap that is either a fixed count or unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Limit {
    Bounded(u32),
    Unbounded,
}

impl Limit {
    /// Returns `true` if one more unit fits when `used` are already taken.
    pub fn permits(&self, used: usize) -> bool {
        match self {
            Limit::Bounded(n) => used < *n as usize,
            Limit::Unbounded => true,
        }
    }

    /// Returns `true` if `count` units fit under this cap.
    pub fn admits(&self, count: usize) -> bool {
        match self {
            Limit::Bounded(n) => count <= *n as usize,
            Limit::Unbounded => true,
        }
    }

    /// Units of `used` beyond the cap (always 0 when unbounded).
    pub fn excess(&self, used: u32) -> u32 {
        match self {
            Limit::Bounded(n) => used.saturating_sub(*n),
            Limit::Unbounded => 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Limit::Bounded(0))
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Bounded(n) => write!(f, "{}", n),
            Limit::Unbounded => write!(f, "unlimited"),
        }
    }
}

/// Catalog key for a subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum TierKind {
    #[default]
    #[serde(rename = "Pup JR.")]
    PupJr,
    #[serde(rename = "Pup SR.")]
    PupSr,
    #[serde(rename = "Guardian")]
    Guardian,
    #[serde(rename = "Alpha")]
    Alpha,
    #[serde(rename = "Enterprise")]
    Enterprise,
}

impl TierKind {
    /// All tiers, cheapest first.
    pub const ALL: [TierKind; 5] = [
        TierKind::PupJr,
        TierKind::PupSr,
        TierKind::Guardian,
        TierKind::Alpha,
        TierKind::Enterprise,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TierKind::PupJr => "Pup JR.",
            TierKind::PupSr => "Pup SR.",
            TierKind::Guardian => "Guardian",
            TierKind::Alpha => "Alpha",
            TierKind::Enterprise => "Enterprise",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            TierKind::PupJr => "pup-jr",
            TierKind::PupSr => "pup-sr",
            TierKind::Guardian => "guardian",
            TierKind::Alpha => "alpha",
            TierKind::Enterprise => "enterprise",
        }
    }

    /// The catalog entry for this tier.
    pub fn tier(&self) -> Tier {
        match self {
            TierKind::PupJr => Tier {
                kind: *self,
                price: Money::dollars(0),
                included: 3,
                max: Limit::Bounded(3),
                add_on_quota: Limit::Bounded(0),
                add_on_price: Money::ZERO,
                swap_quota: Limit::Bounded(0),
                swap_price: Money::ZERO,
                contact_sales: false,
            },
            TierKind::PupSr => Tier {
                kind: *self,
                price: Money::dollars(99),
                included: 6,
                max: Limit::Bounded(8),
                add_on_quota: Limit::Bounded(2),
                add_on_price: Money::dollars(10),
                swap_quota: Limit::Bounded(1),
                swap_price: Money::dollars(5),
                contact_sales: false,
            },
            TierKind::Guardian => Tier {
                kind: *self,
                price: Money::dollars(199),
                included: 9,
                max: Limit::Bounded(12),
                add_on_quota: Limit::Bounded(3),
                add_on_price: Money::dollars(10),
                swap_quota: Limit::Unbounded,
                swap_price: Money::ZERO,
                contact_sales: false,
            },
            TierKind::Alpha => Tier {
                kind: *self,
                price: Money::dollars(299),
                included: 12,
                max: Limit::Unbounded,
                add_on_quota: Limit::Unbounded,
                add_on_price: Money::ZERO,
                swap_quota: Limit::Unbounded,
                swap_price: Money::ZERO,
                contact_sales: false,
            },
            TierKind::Enterprise => Tier {
                kind: *self,
                price: Money::dollars(2500),
                included: 15,
                max: Limit::Bounded(15),
                add_on_quota: Limit::Unbounded,
                add_on_price: Money::ZERO,
                swap_quota: Limit::Unbounded,
                swap_price: Money::ZERO,
                contact_sales: true,
            },
        }
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TierKind {
    type Err = EntitlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = lookup_key(s);
        TierKind::ALL
            .into_iter()
            .find(|kind| lookup_key(kind.name()) == wanted || lookup_key(kind.slug()) == wanted)
            .ok_or_else(|| EntitlementError::UnknownTierKind(s.trim().to_string()))
    }
}

/// Immutable catalog entry describing one subscription tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub kind: TierKind,
    /// Monthly base price
    pub price: Money,
    /// Protections bundled free
    pub included: u32,
    /// Hard cap on simultaneously active protections
    pub max: Limit,
    /// Paid protections allowed beyond `included`
    pub add_on_quota: Limit,
    pub add_on_price: Money,
    /// Free swaps per billing period
    pub swap_quota: Limit,
    /// Price of each swap beyond the quota
    pub swap_price: Money,
    /// Priced through sales rather than self-serve checkout
    pub contact_sales: bool,
}

impl Tier {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The first `included` catalog protections, which is what a fresh
    /// session on this tier starts with.
    pub fn default_selection(&self) -> Vec<Protection> {
        Protection::ALL
            .iter()
            .copied()
            .take(self.included as usize)
            .collect()
    }

    /// Returns `true` if `protection` is part of this tier's default bundle.
    pub fn includes_by_default(&self, protection: Protection) -> bool {
        protection.position() < self.included as usize
    }

    /// Human-readable add-on and swap allowance, e.g.
    /// "Up to 2 add-ons ($10 each), 1 free swap/month, $5 per extra swap".
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        match self.add_on_quota {
            Limit::Bounded(0) => {}
            Limit::Bounded(n) => parts.push(format!(
                "up to {} add-on{} ({} each)",
                n,
                if n == 1 { "" } else { "s" },
                self.add_on_price
            )),
            Limit::Unbounded => parts.push("unlimited add-ons".to_string()),
        }

        match self.swap_quota {
            Limit::Bounded(0) if self.swap_price.is_zero() => {}
            Limit::Bounded(n) => parts.push(format!(
                "{} free swap{}/month, {} per extra swap",
                n,
                if n == 1 { "" } else { "s" },
                self.swap_price
            )),
            Limit::Unbounded => parts.push("unlimited swaps".to_string()),
        }

        if parts.is_empty() {
            parts.push("no add-ons or swaps".to_string());
        }
        if self.contact_sales {
            parts.push("Contact Sales".to_string());
        }

        let joined = parts.join(", ");
        let mut chars = joined.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => joined,
        }
    }
}

/// Looks up a tier by display name or slug (case-insensitive).
pub fn tier_by_name(name: &str) -> Result<Tier, EntitlementError> {
    name.parse::<TierKind>().map(|kind| kind.tier())
}

/// All tiers in catalog order.
pub fn tiers() -> Vec<Tier> {
    TierKind::ALL.iter().map(TierKind::tier).collect()
}

/// A protection from the fixed, ordered catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Protection {
    #[serde(rename = "AI Fraud Detection")]
    AiFraudDetection,
    #[serde(rename = "Real-Time Alerts")]
    RealTimeAlerts,
    #[serde(rename = "PCI Compliance")]
    PciCompliance,
    #[serde(rename = "AI Assistant")]
    AiAssistant,
    #[serde(rename = "DDoS Protection")]
    DdosProtection,
    #[serde(rename = "Malware Scanning")]
    MalwareScanning,
    #[serde(rename = "SSL Certificate")]
    SslCertificate,
    #[serde(rename = "Backup & Recovery")]
    BackupRecovery,
    #[serde(rename = "Access Control")]
    AccessControl,
    #[serde(rename = "Audit Logging")]
    AuditLogging,
    #[serde(rename = "Vulnerability Scanning")]
    VulnerabilityScanning,
    #[serde(rename = "Incident Response")]
    IncidentResponse,
}

impl Protection {
    /// Catalog order; default selections are prefixes of this list.
    pub const ALL: [Protection; 12] = [
        Protection::AiFraudDetection,
        Protection::RealTimeAlerts,
        Protection::PciCompliance,
        Protection::AiAssistant,
        Protection::DdosProtection,
        Protection::MalwareScanning,
        Protection::SslCertificate,
        Protection::BackupRecovery,
        Protection::AccessControl,
        Protection::AuditLogging,
        Protection::VulnerabilityScanning,
        Protection::IncidentResponse,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Protection::AiFraudDetection => "AI Fraud Detection",
            Protection::RealTimeAlerts => "Real-Time Alerts",
            Protection::PciCompliance => "PCI Compliance",
            Protection::AiAssistant => "AI Assistant",
            Protection::DdosProtection => "DDoS Protection",
            Protection::MalwareScanning => "Malware Scanning",
            Protection::SslCertificate => "SSL Certificate",
            Protection::BackupRecovery => "Backup & Recovery",
            Protection::AccessControl => "Access Control",
            Protection::AuditLogging => "Audit Logging",
            Protection::VulnerabilityScanning => "Vulnerability Scanning",
            Protection::IncidentResponse => "Incident Response",
        }
    }

    /// Zero-based position in the catalog.
    pub fn position(&self) -> usize {
        Protection::ALL
            .iter()
            .position(|p| p == self)
            .unwrap_or(Protection::ALL.len())
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Protection {
    type Err = EntitlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = lookup_key(s);
        Protection::ALL
            .into_iter()
            .find(|p| lookup_key(p.name()) == wanted)
            .ok_or_else(|| EntitlementError::UnknownProtectionKind(s.trim().to_string()))
    }
}

/// Looks up a protection by display name or kebab-case slug (case-insensitive).
pub fn protection_by_name(name: &str) -> Result<Protection, EntitlementError> {
    name.parse()
}

/// One row of the tier × protection matrix.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixRow {
    pub protection: Protection,
    /// Parallel to `TierKind::ALL`
    pub included: Vec<bool>,
}

/// Which protections each tier bundles by default.
pub fn feature_matrix() -> Vec<MatrixRow> {
    let tiers = tiers();
    Protection::ALL
        .iter()
        .map(|&protection| MatrixRow {
            protection,
            included: tiers
                .iter()
                .map(|t| t.includes_by_default(protection))
                .collect(),
        })
        .collect()
}

// "Pup JR.", "pup-jr" and "PUP jr" all reduce to "pupjr".
fn lookup_key(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
