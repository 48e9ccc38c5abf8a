pub mod errors;
pub mod results;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use errors::{Error, Result};
pub use results::{
    ConstraintApplied, NextTier, PackageCombination, PackageLine, ReturnsProjection, RoiResult,
};

/// Upper bound of a tier's token range.
///
/// Serialized as a plain number, or `null` for the open-ended top tier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum TierCeiling {
    Bounded(f64),
    Unbounded,
}

impl TierCeiling {
    pub fn admits(&self, tokens: f64) -> bool {
        match self {
            TierCeiling::Bounded(max) => tokens <= *max,
            TierCeiling::Unbounded => true,
        }
    }

    pub fn as_bounded(&self) -> Option<f64> {
        match self {
            TierCeiling::Bounded(max) => Some(*max),
            TierCeiling::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, TierCeiling::Unbounded)
    }
}

impl From<Option<f64>> for TierCeiling {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(max) if max.is_finite() => TierCeiling::Bounded(max),
            _ => TierCeiling::Unbounded,
        }
    }
}

impl From<TierCeiling> for Option<f64> {
    fn from(value: TierCeiling) -> Self {
        value.as_bounded()
    }
}

/// Inclusive token range covered by a tier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenRange {
    pub min: f64,
    pub max: TierCeiling,
}

impl TokenRange {
    pub fn new(min: f64, max: TierCeiling) -> Self {
        Self { min, max }
    }

    pub fn bounded(min: f64, max: f64) -> Self {
        Self::new(min, TierCeiling::Bounded(max))
    }

    pub fn unbounded(min: f64) -> Self {
        Self::new(min, TierCeiling::Unbounded)
    }

    pub fn contains(&self, tokens: f64) -> bool {
        tokens >= self.min && self.max.admits(tokens)
    }
}

impl fmt::Display for TokenRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            TierCeiling::Bounded(max) => write!(f, "{} - {}", self.min, max),
            TierCeiling::Unbounded => write!(f, "{} - ∞", self.min),
        }
    }
}

/// One staking bracket with its own bonus formula and ROI bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub name: String,
    pub range: TokenRange,
    pub base_bonus: f64,
    pub proportional_divisor: f64,
    pub proportional_multiplier: f64,
    pub min_roi: f64,
    pub max_roi: f64,
    /// Fixed tiers pay `base_bonus` regardless of the staked amount.
    #[serde(default)]
    pub is_fixed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Tier {
    pub fn contains(&self, tokens: f64) -> bool {
        self.range.contains(tokens)
    }
}

/// A fixed purchase unit: `usd_price` buys `token_amount` tokens.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Package {
    #[serde(rename = "usd")]
    pub usd_price: f64,
    #[serde(rename = "tokens")]
    pub token_amount: f64,
}

impl Package {
    pub fn new(usd_price: f64, token_amount: f64) -> Self {
        Self {
            usd_price,
            token_amount,
        }
    }

    /// USD paid per token.
    pub fn unit_price(&self) -> f64 {
        self.usd_price / self.token_amount
    }
}
