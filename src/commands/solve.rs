use super::OutputSettings;
use crate::config::CalculatorConfig;
use crate::core::PackageCombination;
use crate::engine::solve_package_combination;
use anyhow::Result;

pub fn run_solve(
    target: f64,
    config: &CalculatorConfig,
    output: &OutputSettings,
) -> Result<PackageCombination> {
    let combination = solve_package_combination(target, config.packages());
    log::info!(
        "{} tokens covered by {} units for ${} ({} extra tokens)",
        target,
        combination.unit_count(),
        combination.total_usd,
        combination.overshoot(target)
    );

    output.writer()?.write_combination(target, &combination)?;
    Ok(combination)
}
