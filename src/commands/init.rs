use crate::config::{to_toml, CalculatorConfig};
use crate::io;
use anyhow::Result;
use std::path::Path;

const HEADER: &str = "# stakecalc configuration
#
# Tiers must be ascending and contiguous: each min_tokens is the previous
# max_tokens + 1. Leave max_tokens out on the last tier to make it unbounded.
# A tier whose min_roi equals max_roi pays base_bonus as a fixed rate.

";

pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let body = to_toml(&CalculatorConfig::default())?;
    io::write_file(path, &format!("{HEADER}{body}"))?;
    println!("Created {} configuration file", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_path;
    use tempfile::TempDir;

    #[test]
    fn test_written_file_loads_back_as_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".stakecalc.toml");

        init_config(&path, false).unwrap();
        let loaded = load_config_from_path(&path).unwrap();
        assert_eq!(loaded, CalculatorConfig::default());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".stakecalc.toml");
        std::fs::write(&path, "# mine").unwrap();

        assert!(init_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        init_config(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[[tiers]]"));
    }
}
