//! Tests for the monthly cost calculator

use shepherd_core::{
    cost_for, quote, tiers, EntitlementError, EntitlementState, Money, Protection, TierKind,
};

#[test]
fn default_state_costs_base_price() {
    for tier in tiers() {
        let state = EntitlementState::new(tier.kind);
        let cost = state.cost();
        assert_eq!(cost.total, tier.price, "{}", tier.name());
        assert_eq!(cost.add_on_charge, Money::ZERO);
        assert_eq!(cost.swap_charge, Money::ZERO);
    }
}

#[test]
fn add_ons_are_charged_per_extra_protection() {
    let sr = TierKind::PupSr.tier();
    let cost = cost_for(&sr, 8, 0);
    assert_eq!(cost.add_on_count, 2);
    assert_eq!(cost.add_on_charge, Money::dollars(20));
    assert_eq!(cost.total, Money::dollars(119));
}

#[test]
fn below_included_is_never_negative() {
    let guardian = TierKind::Guardian.tier();
    let cost = cost_for(&guardian, 4, 0);
    assert_eq!(cost.add_on_count, 0);
    assert_eq!(cost.total, Money::dollars(199));
}

#[test]
fn swaps_beyond_quota_are_billed() {
    let sr = TierKind::PupSr.tier();
    assert_eq!(cost_for(&sr, 8, 1).total, Money::dollars(119));
    let cost = cost_for(&sr, 8, 3);
    assert_eq!(cost.billable_swaps, 2);
    assert_eq!(cost.swap_charge, Money::dollars(10));
    assert_eq!(cost.total, Money::dollars(129));
}

#[test]
fn unlimited_swaps_are_never_billed() {
    let guardian = TierKind::Guardian.tier();
    let cost = cost_for(&guardian, 9, 1_000);
    assert_eq!(cost.billable_swaps, 0);
    assert_eq!(cost.total, Money::dollars(199));
}

#[test]
fn compute_cost_matches_cost_for() {
    let state = EntitlementState::with_selection(
        TierKind::PupSr,
        Protection::ALL[..7].to_vec(),
        2,
    )
    .unwrap();
    assert_eq!(state.cost(), cost_for(&state.tier(), 7, 2));
    assert_eq!(state.cost().total, Money::dollars(114));
}

#[test]
fn quote_validates_counts() {
    let jr = TierKind::PupJr.tier();
    assert!(matches!(
        quote(&jr, 4, 0),
        Err(EntitlementError::InvalidToggle(_))
    ));

    let alpha = TierKind::Alpha.tier();
    let err = quote(&alpha, 13, 0).unwrap_err();
    assert!(err.to_string().contains("only 12"));

    let sr = TierKind::PupSr.tier();
    assert_eq!(quote(&sr, 7, 0).unwrap().total, Money::dollars(109));
}

#[test]
fn cost_serializes_amounts_as_numbers() {
    let cost = cost_for(&TierKind::PupSr.tier(), 7, 0);
    let json = serde_json::to_value(&cost).unwrap();
    assert_eq!(json["tier"], "Pup SR.");
    assert_eq!(json["total"].as_f64(), Some(109.0));
    assert_eq!(json["add_on_count"], 1);
}
