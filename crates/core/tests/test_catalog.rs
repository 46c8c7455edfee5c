//! Tests for the tier and protection catalog

use shepherd_core::{
    feature_matrix, protection_by_name, tier_by_name, tiers, EntitlementError, Limit, Money,
    Protection, TierKind,
};

// --- Tier lookup ---

#[test]
fn tier_by_display_name() {
    let tier = tier_by_name("Pup SR.").unwrap();
    assert_eq!(tier.kind, TierKind::PupSr);
    assert_eq!(tier.price, Money::dollars(99));
    assert_eq!(tier.included, 6);
    assert_eq!(tier.max, Limit::Bounded(8));
}

#[test]
fn tier_by_slug_and_case() {
    assert_eq!(tier_by_name("pup-jr").unwrap().kind, TierKind::PupJr);
    assert_eq!(tier_by_name("GUARDIAN").unwrap().kind, TierKind::Guardian);
    assert_eq!(tier_by_name("  alpha ").unwrap().kind, TierKind::Alpha);
}

#[test]
fn unknown_tier_is_error() {
    let err = tier_by_name("Pup Basic").unwrap_err();
    assert_eq!(err, EntitlementError::UnknownTierKind("Pup Basic".to_string()));
    assert!(err.to_string().contains("Pup Basic"));
}

#[test]
fn tiers_are_in_price_order() {
    let all = tiers();
    assert_eq!(all.len(), TierKind::ALL.len());
    for pair in all.windows(2) {
        assert!(pair[0].price < pair[1].price, "{} before {}", pair[0].name(), pair[1].name());
    }
}

#[test]
fn bounded_max_covers_included_plus_add_ons() {
    for tier in tiers() {
        if let (Limit::Bounded(max), Limit::Bounded(addons)) = (tier.max, tier.add_on_quota) {
            assert_eq!(max, tier.included + addons, "{}", tier.name());
        }
    }
}

#[test]
fn tier_serializes_with_display_name() {
    let json = serde_json::to_string(&TierKind::PupJr).unwrap();
    assert_eq!(json, "\"Pup JR.\"");
    let back: TierKind = serde_json::from_str("\"Guardian\"").unwrap();
    assert_eq!(back, TierKind::Guardian);
}

// --- Summaries ---

#[test]
fn tier_summaries() {
    assert_eq!(TierKind::PupJr.tier().summary(), "No add-ons or swaps");
    assert_eq!(
        TierKind::PupSr.tier().summary(),
        "Up to 2 add-ons ($10 each), 1 free swap/month, $5 per extra swap"
    );
    assert_eq!(
        TierKind::Guardian.tier().summary(),
        "Up to 3 add-ons ($10 each), unlimited swaps"
    );
    assert_eq!(
        TierKind::Alpha.tier().summary(),
        "Unlimited add-ons, unlimited swaps"
    );
    assert_eq!(
        TierKind::Enterprise.tier().summary(),
        "Unlimited add-ons, unlimited swaps, Contact Sales"
    );
}

// --- Protections ---

#[test]
fn protection_lookup() {
    assert_eq!(
        protection_by_name("Backup & Recovery").unwrap(),
        Protection::BackupRecovery
    );
    assert_eq!(
        protection_by_name("backup-recovery").unwrap(),
        Protection::BackupRecovery
    );
    assert_eq!(
        protection_by_name("real-time alerts").unwrap(),
        Protection::RealTimeAlerts
    );
}

#[test]
fn unknown_protection_is_error() {
    assert!(matches!(
        protection_by_name("Quantum Shield"),
        Err(EntitlementError::UnknownProtectionKind(_))
    ));
}

#[test]
fn protection_positions_follow_catalog() {
    for (i, p) in Protection::ALL.iter().enumerate() {
        assert_eq!(p.position(), i);
    }
    assert_eq!(Protection::AccessControl.position(), 8);
}

#[test]
fn default_selection_is_catalog_prefix() {
    let guardian = TierKind::Guardian.tier().default_selection();
    assert_eq!(guardian, Protection::ALL[..9].to_vec());

    // Enterprise bundles more than the catalog holds
    let enterprise = TierKind::Enterprise.tier().default_selection();
    assert_eq!(enterprise.len(), Protection::ALL.len());
}

// --- Feature matrix ---

#[test]
fn feature_matrix_marks_default_bundles() {
    let matrix = feature_matrix();
    assert_eq!(matrix.len(), Protection::ALL.len());

    let first = &matrix[0];
    assert_eq!(first.protection, Protection::AiFraudDetection);
    assert!(first.included.iter().all(|&inc| inc));

    let fourth = &matrix[3];
    assert_eq!(fourth.included, vec![false, true, true, true, true]);

    let last = matrix.last().unwrap();
    assert_eq!(last.included, vec![false, false, false, true, true]);
}
