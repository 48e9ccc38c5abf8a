use super::{
    compute_roi, is_solvable_amount, next_tier, project_returns, solve_package_combination,
};
use crate::core::{
    Error, NextTier, Package, PackageCombination, Result, ReturnsProjection, RoiResult, Tier,
};
use serde::{Deserialize, Serialize};

/// How the calculator was asked for a quote.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum QuoteInput {
    /// A free token amount; the investment is what the packages covering it cost.
    Tokens(f64),
    /// One of the configured packages, by position.
    Package(usize),
}

/// Everything the calculator shows for a single input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub input: QuoteInput,
    pub tokens: f64,
    pub investment_usd: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combination: Option<PackageCombination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi: Option<RoiResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<ReturnsProjection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_tier: Option<NextTier>,
}

impl Quote {
    /// Fails on an unknown package index, an out-of-range token amount or an
    /// empty tier table.
    pub fn build(input: QuoteInput, tiers: &[Tier], packages: &[Package]) -> Result<Self> {
        if tiers.is_empty() {
            return Err(Error::config("no tiers configured"));
        }

        let (tokens, investment_usd, combination) = match input {
            QuoteInput::Tokens(tokens) if !is_solvable_amount(tokens) => {
                return Err(Error::InvalidAmount(tokens));
            }
            QuoteInput::Tokens(tokens) if tokens > 0.0 => {
                let combination = solve_package_combination(tokens, packages);
                (tokens, combination.total_usd, Some(combination))
            }
            QuoteInput::Tokens(tokens) => (tokens, 0.0, None),
            QuoteInput::Package(index) => {
                let package = packages.get(index).ok_or(Error::PackageIndex {
                    index,
                    len: packages.len(),
                })?;
                (package.token_amount, package.usd_price, None)
            }
        };

        if tokens <= 0.0 {
            log::debug!("Non-positive token amount {}; quote left empty", tokens);
            return Ok(Self {
                input,
                tokens,
                investment_usd,
                combination,
                roi: None,
                returns: None,
                next_tier: None,
            });
        }

        let roi = compute_roi(tokens, tiers);
        let returns = project_returns(tokens, investment_usd, roi.final_roi);
        let next_tier = next_tier(tokens, tiers);

        Ok(Self {
            input,
            tokens,
            investment_usd,
            combination,
            roi: Some(roi),
            returns: Some(returns),
            next_tier,
        })
    }

    /// Extra tokens bought beyond the requested amount in token mode.
    pub fn overshoot(&self) -> f64 {
        self.combination
            .as_ref()
            .map(|combination| combination.overshoot(self.tokens))
            .unwrap_or(0.0)
    }

    pub fn total_after_one_year(&self) -> f64 {
        self.investment_usd + self.returns.map(|r| r.annual_usd).unwrap_or(0.0)
    }
}
