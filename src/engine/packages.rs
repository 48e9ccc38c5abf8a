use crate::core::{Package, PackageCombination, PackageLine};
use std::cmp::Ordering;

/// Largest token amount the solver and quotes accept. Keeps every unit count
/// and running total exactly representable in an `f64`.
pub const MAX_TOKEN_AMOUNT: f64 = 1e15;

/// Finite amounts no larger than [`MAX_TOKEN_AMOUNT`].
pub fn is_solvable_amount(tokens: f64) -> bool {
    tokens.is_finite() && tokens <= MAX_TOKEN_AMOUNT
}

/// Cover `target_tokens` with whole packages, largest first.
///
/// Greedy and best-effort: the result always meets the target when at least
/// one package exists, but is not guaranteed to minimize cost or overshoot.
/// Any remainder left after the greedy pass is rounded up with the smallest
/// package that covers it. Lines come back sorted by price, most expensive
/// first.
///
/// Targets that are not finite or exceed [`MAX_TOKEN_AMOUNT`] get an empty
/// combination.
pub fn solve_package_combination(target_tokens: f64, packages: &[Package]) -> PackageCombination {
    if target_tokens <= 0.0 {
        return PackageCombination::default();
    }
    if !is_solvable_amount(target_tokens) {
        log::warn!(
            "Target of {} tokens is outside the solvable range (max {})",
            target_tokens,
            MAX_TOKEN_AMOUNT
        );
        return PackageCombination::default();
    }

    let mut combination = PackageCombination::default();
    let mut remaining = target_tokens;

    for package in sorted_by_tokens(packages, Ordering::Greater) {
        let units = whole_units(remaining, package.token_amount);
        if units > 0 {
            add_units(&mut combination, package, units);
            remaining -= units as f64 * package.token_amount;
        }

        if remaining == 0.0 {
            break;
        }
    }

    if remaining > 0.0 {
        let cover = sorted_by_tokens(packages, Ordering::Less)
            .into_iter()
            .find(|package| package.token_amount >= remaining);

        match cover {
            Some(package) => add_units(&mut combination, package, 1),
            None => log::warn!(
                "{} tokens left uncovered: no package yields that many",
                remaining
            ),
        }
    }

    combination.packages.sort_by(|a, b| {
        b.package
            .usd_price
            .partial_cmp(&a.package.usd_price)
            .unwrap_or(Ordering::Equal)
    });

    log::trace!(
        "Covered {} tokens with {} units for ${}",
        target_tokens,
        combination.unit_count(),
        combination.total_usd
    );

    combination
}

/// Whole packages of `token_amount` that fit in `remaining`, saturating at `u64::MAX`.
fn whole_units(remaining: f64, token_amount: f64) -> u64 {
    let quantity = (remaining / token_amount).floor();
    if quantity.is_nan() || quantity <= 0.0 {
        0
    } else if quantity >= u64::MAX as f64 {
        u64::MAX
    } else {
        quantity as u64
    }
}

/// Stable sort by token yield; `Ordering::Greater` puts the largest first.
fn sorted_by_tokens(packages: &[Package], direction: Ordering) -> Vec<Package> {
    let mut sorted = packages.to_vec();
    sorted.sort_by(|a, b| {
        let ascending = a
            .token_amount
            .partial_cmp(&b.token_amount)
            .unwrap_or(Ordering::Equal);
        if direction == Ordering::Greater {
            ascending.reverse()
        } else {
            ascending
        }
    });
    sorted
}

fn add_units(combination: &mut PackageCombination, package: Package, quantity: u64) {
    match combination
        .packages
        .iter_mut()
        .find(|line| line.package == package)
    {
        Some(line) => line.quantity += quantity,
        None => combination.packages.push(PackageLine { package, quantity }),
    }

    combination.total_usd += quantity as f64 * package.usd_price;
    combination.total_tokens += quantity as f64 * package.token_amount;
}
