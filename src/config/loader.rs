use std::fmt;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::CalculatorConfig;
use super::validation::{errors_only, validate_config};
use crate::core::{Error, Result};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 2] = [".stakecalc.toml", "stakecalc.json"];

const MAX_TRAVERSAL_DEPTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// `.json` files are read as JSON, everything else as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Discovered(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit(path) => write!(f, "{} (explicit)", path.display()),
            ConfigSource::Discovered(path) => write!(f, "{} (discovered)", path.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: CalculatorConfig,
    pub source: ConfigSource,
}

pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Decode configuration text without validating it.
pub fn parse_config(contents: &str, format: ConfigFormat) -> Result<CalculatorConfig> {
    let config = match format {
        ConfigFormat::Json => serde_json::from_str(contents)?,
        ConfigFormat::Toml => toml::from_str(contents)?,
    };
    Ok(config)
}

/// Decode and reject configurations with structural errors. Warnings are logged.
pub fn parse_and_validate_config(contents: &str, format: ConfigFormat) -> Result<CalculatorConfig> {
    reject_invalid(parse_config(contents, format)?)
}

pub fn load_config_from_path(path: &Path) -> Result<CalculatorConfig> {
    reject_invalid(read_unvalidated(path)?)
}

fn reject_invalid(config: CalculatorConfig) -> Result<CalculatorConfig> {
    let errors = errors_only(validate_config(&config));
    if errors.is_empty() {
        Ok(config)
    } else {
        Err(Error::Validation(errors))
    }
}

/// Try one discovered candidate; missing files are silent, broken ones warn.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<CalculatorConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents, ConfigFormat::from_path(config_path)) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Ignoring {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a config file.
pub fn discover_config(start: PathBuf) -> Option<LoadedConfig> {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .flat_map(|dir| CONFIG_FILE_NAMES.map(|name| dir.join(name)))
        .find_map(|path| {
            try_load_config_from_path(&path).map(|config| LoadedConfig {
                config,
                source: ConfigSource::Discovered(path),
            })
        })
}

/// First existing candidate file under `start` or its ancestors, loadable or not.
pub fn locate_config_file(start: PathBuf) -> Option<PathBuf> {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .flat_map(|dir| CONFIG_FILE_NAMES.map(|name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Read and decode a file, leaving validation to the caller.
pub fn read_unvalidated(path: &Path) -> Result<CalculatorConfig> {
    let contents = read_config_file(path).map_err(|e| Error::file_system(path, e))?;
    parse_config(&contents, ConfigFormat::from_path(path))
}

/// Resolve the active configuration.
///
/// An explicit path must load cleanly. Without one, the working directory
/// and its ancestors are searched, and the built-in defaults apply when
/// nothing usable is found.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_config_from_path(path)?;
        log::debug!("Loaded config from {}", path.display());
        return Ok(LoadedConfig {
            config,
            source: ConfigSource::Explicit(path.to_path_buf()),
        });
    }

    let discovered = match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            log::warn!("Failed to get current directory: {}. Using default config.", e);
            None
        }
    };

    Ok(discovered.unwrap_or_else(|| {
        log::debug!(
            "No config found after checking {} directories. Using default config.",
            MAX_TRAVERSAL_DEPTH
        );
        LoadedConfig {
            config: CalculatorConfig::default(),
            source: ConfigSource::Defaults,
        }
    }))
}

/// Render a configuration as TOML, the format `init` writes.
pub fn to_toml(config: &CalculatorConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
