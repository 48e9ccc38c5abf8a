//! Property-based tests for the ROI engine
//!
//! These tests verify invariants that should hold for all inputs:
//! - Contiguous tables classify every positive amount into the tier containing it
//! - Non-fixed tiers always clamp into their ROI bounds
//! - Fixed tiers always pay their base bonus
//! - The package solver always covers a positive target
//! - Every function is deterministic

use proptest::prelude::*;
use stakecalc::{
    classify_tier, compute_roi, project_returns, solve_package_combination, ConstraintApplied,
    Package, Tier, TokenRange,
};

/// Build a contiguous table from tier widths, topped by an unbounded tier.
fn contiguous_tiers(widths: &[u32], bounds: &[(f64, f64)]) -> Vec<Tier> {
    let mut tiers = Vec::with_capacity(widths.len() + 1);
    let mut min = 1.0;
    for (i, width) in widths.iter().enumerate() {
        let max = min + f64::from(*width) - 1.0;
        let (min_roi, max_roi) = bounds[i % bounds.len()];
        tiers.push(Tier {
            name: format!("Tier {}", i + 1),
            range: TokenRange::bounded(min, max),
            base_bonus: 1.0,
            proportional_divisor: max,
            proportional_multiplier: 5.0,
            min_roi,
            max_roi,
            is_fixed: false,
            description: None,
        });
        min = max + 1.0;
    }
    tiers.push(Tier {
        name: "Top".to_string(),
        range: TokenRange::unbounded(min),
        base_bonus: 5.0,
        proportional_divisor: 1.0,
        proportional_multiplier: 0.0,
        min_roi: 5.0,
        max_roi: 5.0,
        is_fixed: true,
        description: None,
    });
    tiers
}

fn roi_bounds() -> impl Strategy<Value = (f64, f64)> {
    (0u32..500, 0u32..500).prop_map(|(low, span)| {
        let min = f64::from(low) / 100.0;
        (min, min + f64::from(span) / 100.0)
    })
}

fn table() -> impl Strategy<Value = Vec<Tier>> {
    (
        prop::collection::vec(1u32..1_000_000, 0..6),
        prop::collection::vec(roi_bounds(), 1..4),
    )
        .prop_map(|(widths, bounds)| contiguous_tiers(&widths, &bounds))
}

fn packages() -> impl Strategy<Value = Vec<Package>> {
    prop::collection::vec(
        (1u32..50_000, 1u32..5_000_000)
            .prop_map(|(usd, tokens)| Package::new(f64::from(usd), f64::from(tokens))),
        1..12,
    )
}

proptest! {
    /// Property: exactly one tier contains a positive amount, and it is the one returned
    #[test]
    fn prop_classification_finds_unique_containing_tier(
        tiers in table(),
        tokens in 1u32..u32::MAX,
    ) {
        let tokens = f64::from(tokens);
        let (tier, index) = classify_tier(tokens, &tiers);

        prop_assert!(tier.contains(tokens));
        prop_assert_eq!(&tiers[index], tier);
        prop_assert_eq!(tiers.iter().filter(|t| t.contains(tokens)).count(), 1);
    }

    /// Property: non-fixed tiers land inside [min_roi, max_roi]
    #[test]
    fn prop_final_roi_respects_tier_bounds(
        tiers in table(),
        tokens in 1u32..u32::MAX,
    ) {
        let result = compute_roi(f64::from(tokens), &tiers);
        if !result.tier.is_fixed {
            prop_assert!(result.final_roi >= result.tier.min_roi);
            prop_assert!(result.final_roi <= result.tier.max_roi);
        }
    }

    /// Property: fixed tiers pay the base bonus unclamped, whatever the amount
    #[test]
    fn prop_fixed_tier_pays_base_bonus(
        base in 0u32..2_000,
        tokens in -1_000_000i64..1_000_000_000,
    ) {
        let base = f64::from(base) / 100.0;
        let tier = Tier {
            name: "Fixed".to_string(),
            range: TokenRange::unbounded(1.0),
            base_bonus: base,
            proportional_divisor: 1.0,
            proportional_multiplier: 0.0,
            min_roi: base,
            max_roi: base,
            is_fixed: true,
            description: None,
        };

        let result = compute_roi(tokens as f64, &[tier]);
        prop_assert_eq!(result.final_roi, base);
        prop_assert_eq!(result.constraint_applied, ConstraintApplied::None);
    }

    /// Property: any positive target is met or exceeded
    #[test]
    fn prop_solver_covers_target(
        packages in packages(),
        target in 1u32..100_000_000,
    ) {
        let target = f64::from(target);
        let combination = solve_package_combination(target, &packages);

        prop_assert!(combination.total_tokens >= target);
        let line_tokens: f64 = combination.packages.iter().map(|line| line.tokens()).sum();
        prop_assert_eq!(line_tokens, combination.total_tokens);
    }

    /// Property: solver output is sorted by price and has no repeated package
    #[test]
    fn prop_solver_lines_sorted_and_unique(
        packages in packages(),
        target in 1u32..100_000_000,
    ) {
        let combination = solve_package_combination(f64::from(target), &packages);

        for pair in combination.packages.windows(2) {
            prop_assert!(pair[0].package.usd_price >= pair[1].package.usd_price);
        }
        for (i, line) in combination.packages.iter().enumerate() {
            prop_assert!(line.quantity > 0);
            prop_assert!(!combination.packages[..i].iter().any(|l| l.package == line.package));
        }
    }

    /// Property: identical inputs give identical outputs
    #[test]
    fn prop_engine_is_deterministic(
        tiers in table(),
        packages in packages(),
        tokens in 1u32..u32::MAX,
        investment in 0u32..1_000_000,
    ) {
        let tokens = f64::from(tokens);

        let first = compute_roi(tokens, &tiers);
        let second = compute_roi(tokens, &tiers);
        prop_assert_eq!(&first, &second);

        let returns = project_returns(tokens, f64::from(investment), first.final_roi);
        prop_assert_eq!(returns, project_returns(tokens, f64::from(investment), first.final_roi));

        prop_assert_eq!(
            solve_package_combination(tokens, &packages),
            solve_package_combination(tokens, &packages)
        );
    }

    /// Property: zero tokens and zero investment project nothing at any rate
    #[test]
    fn prop_zero_inputs_project_zero(rate in -100.0f64..100.0) {
        let returns = project_returns(0.0, 0.0, rate);
        prop_assert_eq!(returns.annual_usd, 0.0);
        prop_assert_eq!(returns.monthly_usd, 0.0);
        prop_assert_eq!(returns.daily_usd, 0.0);
        prop_assert_eq!(returns.annual_tokens, 0.0);
        prop_assert_eq!(returns.monthly_tokens, 0.0);
        prop_assert_eq!(returns.daily_tokens, 0.0);
    }
}
