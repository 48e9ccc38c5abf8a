use crate::core::{NextTier, Tier};

/// Find the tier whose inclusive range contains `tokens`.
///
/// Falls back to the last tier when nothing matches (non-positive input or a
/// gap in the table).
///
/// # Panics
///
/// Panics if `tiers` is empty; configuration validation rejects empty tables.
pub fn classify_tier(tokens: f64, tiers: &[Tier]) -> (&Tier, usize) {
    match tiers.iter().position(|tier| tier.contains(tokens)) {
        Some(index) => (&tiers[index], index),
        None => {
            let index = tiers.len() - 1;
            log::debug!(
                "No tier contains {} tokens; falling back to '{}'",
                tokens,
                tiers[index].name
            );
            (&tiers[index], index)
        }
    }
}

/// Tokens still needed to enter the next tier, or `None` from the top tier.
pub fn tokens_to_next_tier(tokens: f64, tiers: &[Tier]) -> Option<f64> {
    next_tier(tokens, tiers).map(|next| next.tokens_needed)
}

pub fn next_tier(tokens: f64, tiers: &[Tier]) -> Option<NextTier> {
    let (_, index) = classify_tier(tokens, tiers);
    let next = tiers.get(index + 1)?;
    let tokens_needed = next.range.min - tokens;

    // Overlapping or duplicated minimums would give a non-positive distance
    (tokens_needed > 0.0).then(|| NextTier {
        tier: next.clone(),
        index: index + 1,
        tokens_needed,
    })
}
