// Core configuration types
mod core;
mod loader;
pub mod validation;

pub use self::core::{default_packages, default_tiers, CalculatorConfig, TierSettings};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from_path, locate_config_file,
    parse_and_validate_config, parse_config, read_unvalidated, to_toml, ConfigFormat,
    ConfigSource, LoadedConfig, CONFIG_FILE_NAMES,
};
pub use validation::{errors_only, validate_config, Severity, ValidationIssue};
