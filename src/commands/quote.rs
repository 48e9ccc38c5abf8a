use super::OutputSettings;
use crate::config::CalculatorConfig;
use crate::engine::{Quote, QuoteInput};
use anyhow::{Context, Result};

pub fn run_quote(
    input: QuoteInput,
    config: &CalculatorConfig,
    output: &OutputSettings,
) -> Result<Quote> {
    let tiers = config.tier_table();
    let quote = Quote::build(input, &tiers, config.packages()).context("Failed to build quote")?;

    if let Some(roi) = &quote.roi {
        log::info!(
            "{} tokens -> {} at {:.4}% monthly (constraint: {})",
            quote.tokens,
            roi.tier.name,
            roi.final_roi,
            roi.constraint_applied.as_str()
        );
    }

    output.writer()?.write_quote(&quote)?;
    Ok(quote)
}
