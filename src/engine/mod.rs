//! Tiered ROI engine.
//!
//! Pure functions over a tier table and a package list: tier lookup, ROI
//! with per-tier clamping, return projection, distance to the next tier and a
//! greedy package-combination solver. Nothing here performs I/O or keeps
//! state between calls; identical inputs always produce identical outputs.

pub mod packages;
pub mod quote;
pub mod returns;
pub mod roi;
pub mod tier;

#[cfg(test)]
mod tests;

pub use packages::{is_solvable_amount, solve_package_combination, MAX_TOKEN_AMOUNT};
pub use quote::{Quote, QuoteInput};
pub use returns::{project_returns, DAYS_PER_MONTH, MONTHS_PER_YEAR};
pub use roi::compute_roi;
pub use tier::{classify_tier, next_tier, tokens_to_next_tier};
