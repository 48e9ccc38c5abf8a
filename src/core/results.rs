use super::{Package, Tier};
use serde::{Deserialize, Serialize};

/// Which ROI bound, if any, replaced the formula result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintApplied {
    Min,
    Max,
    None,
}

impl ConstraintApplied {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintApplied::Min => "min",
            ConstraintApplied::Max => "max",
            ConstraintApplied::None => "none",
        }
    }
}

/// Full breakdown of an ROI computation. `final_roi` is a monthly rate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub tier: Tier,
    pub tier_index: usize,
    pub base_bonus: f64,
    pub proportional_bonus: f64,
    pub total_bonus: f64,
    pub final_roi: f64,
    pub constraint_applied: ConstraintApplied,
}

impl RoiResult {
    pub fn was_clamped(&self) -> bool {
        self.constraint_applied != ConstraintApplied::None
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnsProjection {
    pub annual_usd: f64,
    pub monthly_usd: f64,
    pub daily_usd: f64,
    pub annual_tokens: f64,
    pub monthly_tokens: f64,
    pub daily_tokens: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackageLine {
    pub package: Package,
    pub quantity: u64,
}

impl PackageLine {
    pub fn usd(&self) -> f64 {
        self.package.usd_price * self.quantity as f64
    }

    pub fn tokens(&self) -> f64 {
        self.package.token_amount * self.quantity as f64
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageCombination {
    pub total_usd: f64,
    pub total_tokens: f64,
    pub packages: Vec<PackageLine>,
}

impl PackageCombination {
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Tokens received beyond `target`; zero when the target is met exactly.
    pub fn overshoot(&self, target: f64) -> f64 {
        (self.total_tokens - target).max(0.0)
    }

    pub fn unit_count(&self) -> u64 {
        self.packages.iter().map(|line| line.quantity).sum()
    }
}

/// The tier after the current one and the tokens still needed to reach it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NextTier {
    pub tier: Tier,
    pub index: usize,
    pub tokens_needed: f64,
}
