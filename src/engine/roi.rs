use super::tier::classify_tier;
use crate::core::{ConstraintApplied, RoiResult, Tier};

/// Compute the monthly ROI percentage for `tokens` staked.
///
/// Fixed tiers return their base bonus untouched. Other tiers add a
/// proportional term `(tokens / divisor) * multiplier` to the base bonus and
/// clamp the sum into `[min_roi, max_roi]`.
pub fn compute_roi(tokens: f64, tiers: &[Tier]) -> RoiResult {
    let (tier, tier_index) = classify_tier(tokens, tiers);

    if tier.is_fixed {
        return RoiResult {
            tier: tier.clone(),
            tier_index,
            base_bonus: tier.base_bonus,
            proportional_bonus: 0.0,
            total_bonus: tier.base_bonus,
            final_roi: tier.base_bonus,
            constraint_applied: ConstraintApplied::None,
        };
    }

    let base_bonus = tier.base_bonus;
    let proportional_bonus = (tokens / tier.proportional_divisor) * tier.proportional_multiplier;
    let total_bonus = base_bonus + proportional_bonus;
    let (final_roi, constraint_applied) = clamp_roi(total_bonus, tier.min_roi, tier.max_roi);

    RoiResult {
        tier: tier.clone(),
        tier_index,
        base_bonus,
        proportional_bonus,
        total_bonus,
        final_roi,
        constraint_applied,
    }
}

/// The lower bound wins when the bounds are inverted.
fn clamp_roi(total: f64, min_roi: f64, max_roi: f64) -> (f64, ConstraintApplied) {
    if total < min_roi {
        (min_roi, ConstraintApplied::Min)
    } else if total > max_roi {
        (max_roi, ConstraintApplied::Max)
    } else {
        (total, ConstraintApplied::None)
    }
}
