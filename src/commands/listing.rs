use super::OutputSettings;
use crate::config::CalculatorConfig;
use anyhow::Result;

pub fn list_tiers(config: &CalculatorConfig, output: &OutputSettings) -> Result<()> {
    output.writer()?.write_tiers(&config.tier_table())
}

pub fn list_packages(config: &CalculatorConfig, output: &OutputSettings) -> Result<()> {
    output.writer()?.write_packages(config.packages())
}
