use crate::core::{Package, Tier, TierCeiling, TokenRange};
use serde::{Deserialize, Serialize};

/// Root configuration: the tier table and the purchasable packages.
///
/// Accepts both the camelCase keys written by the JSON config store and
/// snake_case keys in TOML files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Tier table in the stored admin shape, ascending by `min_tokens`
    pub tiers: Vec<TierSettings>,

    /// Purchasable packages, in display order
    #[serde(alias = "usdPackages")]
    pub usd_packages: Vec<Package>,
}

impl CalculatorConfig {
    /// Convert the stored tiers into the engine's tier table.
    pub fn tier_table(&self) -> Vec<Tier> {
        self.tiers.iter().map(TierSettings::to_tier).collect()
    }

    pub fn packages(&self) -> &[Package] {
        &self.usd_packages
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
            usd_packages: default_packages(),
        }
    }
}

/// A tier as persisted by the configuration store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSettings {
    pub id: u32,
    pub name: String,
    #[serde(alias = "minTokens")]
    pub min_tokens: f64,
    /// Absent or `null` for the open-ended top tier
    #[serde(default, alias = "maxTokens", skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<f64>,
    #[serde(alias = "baseBonus")]
    pub base_bonus: f64,
    #[serde(alias = "proportionalMultiplier")]
    pub proportional_multiplier: f64,
    #[serde(alias = "minROI")]
    pub min_roi: f64,
    #[serde(alias = "maxROI")]
    pub max_roi: f64,
    /// Display color; carried through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TierSettings {
    pub fn ceiling(&self) -> TierCeiling {
        TierCeiling::from(self.max_tokens)
    }

    /// Proportional scaling runs against the tier's own ceiling and is
    /// disabled (divisor 1) for an unbounded tier.
    pub fn proportional_divisor(&self) -> f64 {
        self.ceiling().as_bounded().unwrap_or(1.0)
    }

    pub fn to_tier(&self) -> Tier {
        Tier {
            name: format!("Tier {} ({})", self.id, self.name),
            range: TokenRange::new(self.min_tokens, self.ceiling()),
            base_bonus: self.base_bonus,
            proportional_divisor: self.proportional_divisor(),
            proportional_multiplier: self.proportional_multiplier,
            min_roi: self.min_roi,
            max_roi: self.max_roi,
            is_fixed: self.min_roi == self.max_roi,
            description: self
                .description
                .as_ref()
                .filter(|text| !text.trim().is_empty())
                .cloned(),
        }
    }
}

fn tier(
    id: u32,
    name: &str,
    min_tokens: f64,
    max_tokens: Option<f64>,
    (min_roi, max_roi): (f64, f64),
    color: &str,
) -> TierSettings {
    TierSettings {
        id,
        name: name.to_string(),
        min_tokens,
        max_tokens,
        base_bonus: 1.0,
        proportional_multiplier: 5.0,
        min_roi,
        max_roi,
        color: Some(color.to_string()),
        description: None,
    }
}

pub fn default_tiers() -> Vec<TierSettings> {
    vec![
        tier(1, "NexEconomy", 1.0, Some(100_000.0), (1.00, 2.00), "#2563eb"),
        tier(2, "NexComfort", 100_001.0, Some(350_000.0), (2.20, 2.75), "#16a34a"),
        tier(3, "NexXL", 350_001.0, Some(800_000.0), (3.25, 4.00), "#9333ea"),
        tier(4, "NexLuxury", 800_001.0, Some(1_750_000.0), (4.50, 5.00), "#d97706"),
        TierSettings {
            base_bonus: 5.0,
            proportional_multiplier: 0.0,
            description: Some("More benefits - contact us for more info".to_string()),
            ..tier(5, "NexPartner", 1_750_001.0, None, (5.00, 5.00), "#d97706")
        },
    ]
}

pub fn default_packages() -> Vec<Package> {
    [
        (100.0, 5_200.0),
        (300.0, 16_000.0),
        (500.0, 28_000.0),
        (1_000.0, 56_400.0),
        (2_500.0, 142_000.0),
        (5_000.0, 288_000.0),
        (7_000.0, 426_000.0),
        (10_000.0, 650_000.0),
        (25_000.0, 1_750_000.0),
        (50_000.0, 3_500_000.0),
    ]
    .into_iter()
    .map(|(usd, tokens)| Package::new(usd, tokens))
    .collect()
}
