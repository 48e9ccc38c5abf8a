use super::OutputSettings;
use crate::config::{
    locate_config_file, read_unvalidated, validate_config, CalculatorConfig, ConfigSource,
    ValidationIssue,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Check the configuration that would be used, reporting every issue.
///
/// Unlike normal loading, a discovered file with errors is reported rather
/// than skipped in favor of the defaults.
pub fn validate_configuration(
    explicit: Option<&Path>,
    output: &OutputSettings,
) -> Result<Vec<ValidationIssue>> {
    let (config, source) = resolve_unvalidated(explicit, std::env::current_dir())?;
    let issues = validate_config(&config);

    output.writer()?.write_validation(&source, &issues)?;

    let errors = issues.iter().filter(|issue| issue.is_error()).count();
    if errors > 0 {
        anyhow::bail!("{} configuration error(s) in {}", errors, source);
    }
    Ok(issues)
}

fn resolve_unvalidated(
    explicit: Option<&Path>,
    current_dir: std::io::Result<PathBuf>,
) -> Result<(CalculatorConfig, ConfigSource)> {
    if let Some(path) = explicit {
        let config = read_unvalidated(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
    }

    let located = match current_dir {
        Ok(dir) => locate_config_file(dir),
        Err(e) => {
            log::warn!("Failed to get current directory: {}. Checking defaults.", e);
            None
        }
    };

    match located {
        Some(path) => {
            let config = read_unvalidated(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            Ok((config, ConfigSource::Discovered(path)))
        }
        None => Ok((CalculatorConfig::default(), ConfigSource::Defaults)),
    }
}
