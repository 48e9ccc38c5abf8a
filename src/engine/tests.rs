use super::*;
use crate::config::CalculatorConfig;
use crate::core::{ConstraintApplied, Package, PackageCombination, Tier, TierCeiling, TokenRange};

fn default_tiers() -> Vec<Tier> {
    CalculatorConfig::default().tier_table()
}

fn default_packages() -> Vec<Package> {
    CalculatorConfig::default().usd_packages
}

fn create_test_tier(name: &str, range: TokenRange, min_roi: f64, max_roi: f64) -> Tier {
    Tier {
        name: name.to_string(),
        range,
        base_bonus: 1.0,
        proportional_divisor: range.max.as_bounded().unwrap_or(1.0),
        proportional_multiplier: 5.0,
        min_roi,
        max_roi,
        is_fixed: min_roi == max_roi,
        description: None,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_classify_tier_at_boundaries() {
    let tiers = default_tiers();

    assert_eq!(classify_tier(1.0, &tiers).1, 0);
    assert_eq!(classify_tier(100_000.0, &tiers).1, 0);
    assert_eq!(classify_tier(100_001.0, &tiers).1, 1);
    assert_eq!(classify_tier(350_000.0, &tiers).1, 1);
    assert_eq!(classify_tier(1_750_000.0, &tiers).1, 3);
    assert_eq!(classify_tier(1_750_001.0, &tiers).1, 4);
}

#[test]
fn test_classify_tier_falls_back_to_last() {
    let tiers = default_tiers();

    let (tier, index) = classify_tier(0.0, &tiers);
    assert_eq!(index, 4);
    assert_eq!(tier.name, "Tier 5 (NexPartner)");

    // Fractional amount in the gap between two integer-bounded tiers
    assert_eq!(classify_tier(100_000.5, &tiers).1, 4);
}

#[test]
fn test_classify_tier_returns_first_match_on_overlap() {
    let tiers = vec![
        create_test_tier("A", TokenRange::bounded(1.0, 100.0), 1.0, 2.0),
        create_test_tier("B", TokenRange::unbounded(50.0), 3.0, 3.0),
    ];
    assert_eq!(classify_tier(75.0, &tiers).0.name, "A");
}

#[test]
fn test_compute_roi_within_bounds() {
    let result = compute_roi(5200.0, &default_tiers());

    assert_eq!(result.tier.name, "Tier 1 (NexEconomy)");
    assert_eq!(result.tier_index, 0);
    assert_close(result.base_bonus, 1.0);
    assert_close(result.proportional_bonus, 0.26);
    assert_close(result.total_bonus, 1.26);
    assert_close(result.final_roi, 1.26);
    assert_eq!(result.constraint_applied, ConstraintApplied::None);
}

#[test]
fn test_compute_roi_raised_to_minimum() {
    // Tier 2: 1 + (100001 / 350000) * 5 ≈ 2.43, inside [2.20, 2.75]
    let inside = compute_roi(100_001.0, &default_tiers());
    assert_eq!(inside.constraint_applied, ConstraintApplied::None);

    // Tier 3: 1 + (350001 / 800000) * 5 ≈ 3.19, below the 3.25 floor
    let result = compute_roi(350_001.0, &default_tiers());
    assert_eq!(result.tier_index, 2);
    assert!(result.total_bonus < 3.25);
    assert_close(result.final_roi, 3.25);
    assert_eq!(result.constraint_applied, ConstraintApplied::Min);
}

#[test]
fn test_compute_roi_capped_at_maximum() {
    // Tier 3 top: 1 + 5 = 6.00, above the 4.00 ceiling
    let result = compute_roi(800_000.0, &default_tiers());
    assert_close(result.total_bonus, 6.0);
    assert_close(result.final_roi, 4.0);
    assert_eq!(result.constraint_applied, ConstraintApplied::Max);
    assert!(result.was_clamped());
}

#[test]
fn test_compute_roi_fixed_tier_ignores_formula() {
    let result = compute_roi(2_000_000.0, &default_tiers());

    assert_eq!(result.tier_index, 4);
    assert!(result.tier.is_fixed);
    assert_close(result.base_bonus, 5.0);
    assert_eq!(result.proportional_bonus, 0.0);
    assert_close(result.total_bonus, 5.0);
    assert_close(result.final_roi, 5.0);
    assert_eq!(result.constraint_applied, ConstraintApplied::None);
}

#[test]
fn test_compute_roi_fixed_flag_wins_over_bounds() {
    let mut tier = create_test_tier("Flat", TokenRange::unbounded(1.0), 1.0, 9.0);
    tier.is_fixed = true;
    tier.base_bonus = 12.0;

    let result = compute_roi(10.0, &[tier]);
    assert_close(result.final_roi, 12.0);
    assert_eq!(result.constraint_applied, ConstraintApplied::None);
}

#[test]
fn test_tokens_to_next_tier() {
    let tiers = default_tiers();

    assert_eq!(tokens_to_next_tier(5200.0, &tiers), Some(94_801.0));
    assert_eq!(tokens_to_next_tier(100_000.0, &tiers), Some(1.0));
    assert_eq!(tokens_to_next_tier(2_000_000.0, &tiers), None);
}

#[test]
fn test_next_tier_names_the_target() {
    let next = next_tier(5200.0, &default_tiers()).unwrap();
    assert_eq!(next.index, 1);
    assert_eq!(next.tier.name, "Tier 2 (NexComfort)");
}

#[test]
fn test_tokens_to_next_tier_rejects_non_positive_distance() {
    // Second tier starts at the same minimum as the first
    let tiers = vec![
        create_test_tier("A", TokenRange::bounded(1.0, 100.0), 1.0, 2.0),
        create_test_tier("B", TokenRange::bounded(1.0, 200.0), 1.0, 2.0),
        create_test_tier("C", TokenRange::unbounded(201.0), 3.0, 3.0),
    ];
    assert_eq!(tokens_to_next_tier(50.0, &tiers), None);
}

#[test]
fn test_solve_exact_single_package() {
    let combination = solve_package_combination(5200.0, &default_packages());

    assert_eq!(combination.packages.len(), 1);
    assert_eq!(combination.packages[0].package, Package::new(100.0, 5200.0));
    assert_eq!(combination.packages[0].quantity, 1);
    assert_eq!(combination.total_usd, 100.0);
    assert_eq!(combination.total_tokens, 5200.0);
    assert_eq!(combination.overshoot(5200.0), 0.0);
}

#[test]
fn test_solve_remainder_merges_into_existing_line() {
    let combination = solve_package_combination(6000.0, &default_packages());

    assert_eq!(combination.packages.len(), 1);
    assert_eq!(combination.packages[0].package.usd_price, 100.0);
    assert_eq!(combination.packages[0].quantity, 2);
    assert_eq!(combination.total_usd, 200.0);
    assert_eq!(combination.total_tokens, 10_400.0);
    assert_eq!(combination.overshoot(6000.0), 4400.0);
}

#[test]
fn test_solve_orders_lines_by_price_descending() {
    // 3,500,000 + 650,000 + 142,000 + 5,200 x 2 (remainder 5,000 rounds up)
    let combination = solve_package_combination(4_302_200.0, &default_packages());
    let prices: Vec<f64> = combination
        .packages
        .iter()
        .map(|line| line.package.usd_price)
        .collect();

    assert_eq!(prices, vec![50_000.0, 10_000.0, 2_500.0, 100.0]);
    assert_eq!(combination.packages[3].quantity, 2);
    assert!(combination.total_tokens >= 4_302_200.0);
}

#[test]
fn test_solve_is_greedy_not_optimal() {
    // Greedy takes 6 and rounds the remaining 4 up with a 5 (11 tokens),
    // while 5 + 5 would hit the target of 10 exactly
    let packages = vec![Package::new(6.0, 6.0), Package::new(5.0, 5.0)];
    let combination = solve_package_combination(10.0, &packages);

    assert_eq!(combination.total_tokens, 11.0);
    assert_eq!(combination.unit_count(), 2);
}

#[test]
fn test_solve_non_positive_target_is_empty() {
    for target in [0.0, -10.0] {
        let combination = solve_package_combination(target, &default_packages());
        assert_eq!(combination, PackageCombination::default());
    }
}

#[test]
fn test_quote_for_tokens_prices_the_combination() {
    let config = CalculatorConfig::default();
    let quote = Quote::build(
        QuoteInput::Tokens(6000.0),
        &config.tier_table(),
        &config.usd_packages,
    )
    .unwrap();

    assert_eq!(quote.investment_usd, 200.0);
    assert_eq!(quote.overshoot(), 4400.0);

    let roi = quote.roi.as_ref().unwrap();
    let returns = quote.returns.unwrap();
    assert_close(returns.monthly_usd, 200.0 * roi.final_roi / 100.0);
    assert_close(quote.total_after_one_year(), 200.0 + returns.annual_usd);
    assert_eq!(quote.next_tier.as_ref().unwrap().tokens_needed, 94_001.0);
}

#[test]
fn test_quote_for_package_uses_package_price() {
    let config = CalculatorConfig::default();
    let quote = Quote::build(
        QuoteInput::Package(9),
        &config.tier_table(),
        &config.usd_packages,
    )
    .unwrap();

    assert_eq!(quote.tokens, 3_500_000.0);
    assert_eq!(quote.investment_usd, 50_000.0);
    assert!(quote.combination.is_none());
    assert_close(quote.roi.as_ref().unwrap().final_roi, 5.0);
    assert_close(quote.returns.unwrap().monthly_usd, 2_500.0);
    assert!(quote.next_tier.is_none());
}

#[test]
fn test_quote_rejects_unknown_package() {
    let config = CalculatorConfig::default();
    let err = Quote::build(
        QuoteInput::Package(10),
        &config.tier_table(),
        &config.usd_packages,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        crate::core::Error::PackageIndex { index: 10, len: 10 }
    ));
}

#[test]
fn test_quote_rejects_non_finite_and_huge_amounts() {
    let config = CalculatorConfig::default();
    for tokens in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN, 1e30] {
        let err = Quote::build(
            QuoteInput::Tokens(tokens),
            &config.tier_table(),
            &config.usd_packages,
        )
        .unwrap_err();
        assert!(matches!(err, crate::core::Error::InvalidAmount(_)));
    }
}

#[test]
fn test_solve_huge_target_keeps_totals_consistent() {
    let combination = solve_package_combination(MAX_TOKEN_AMOUNT, &default_packages());
    let line_tokens: f64 = combination.packages.iter().map(|line| line.tokens()).sum();
    let line_usd: f64 = combination.packages.iter().map(|line| line.usd()).sum();

    assert!(combination.total_tokens >= MAX_TOKEN_AMOUNT);
    assert_eq!(line_tokens, combination.total_tokens);
    assert_eq!(line_usd, combination.total_usd);
}

#[test]
fn test_quote_without_tiers_is_a_config_error() {
    let err = Quote::build(QuoteInput::Tokens(100.0), &[], &default_packages()).unwrap_err();
    assert!(matches!(err, crate::core::Error::Config(_)));
}

#[test]
fn test_quote_for_non_positive_tokens_is_empty() {
    let config = CalculatorConfig::default();
    let quote = Quote::build(
        QuoteInput::Tokens(0.0),
        &config.tier_table(),
        &config.usd_packages,
    )
    .unwrap();

    assert_eq!(quote.investment_usd, 0.0);
    assert!(quote.combination.is_none());
    assert!(quote.roi.is_none());
    assert!(quote.returns.is_none());
    assert_eq!(quote.total_after_one_year(), 0.0);
}

#[test]
fn test_unbounded_ceiling_round_trips_through_tier_json() {
    let tier = default_tiers().pop().unwrap();
    let json = serde_json::to_value(&tier).unwrap();
    assert!(json["range"]["max"].is_null());

    let back: Tier = serde_json::from_value(json).unwrap();
    assert_eq!(back.range.max, TierCeiling::Unbounded);
}
