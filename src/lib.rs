// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod engine;
pub mod io;

// Re-export commonly used types
pub use crate::core::{
    ConstraintApplied, Error, NextTier, Package, PackageCombination, PackageLine, Result,
    ReturnsProjection, RoiResult, Tier, TierCeiling, TokenRange,
};

pub use crate::engine::{
    classify_tier, compute_roi, next_tier, project_returns, solve_package_combination,
    tokens_to_next_tier, Quote, QuoteInput,
};

pub use crate::config::{load_config, CalculatorConfig, ConfigSource, LoadedConfig, TierSettings};
