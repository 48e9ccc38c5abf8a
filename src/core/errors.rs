//! Shared error types for the application

use crate::config::ValidationIssue;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for stakecalc operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration cannot drive a calculation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration decoded but breaks a structural rule
    #[error("Invalid configuration: {}", summarize(.0))]
    Validation(Vec<ValidationIssue>),

    /// Package mode asked for a package that does not exist
    #[error("Package index {index} out of range ({len} packages configured)")]
    PackageIndex { index: usize, len: usize },

    /// Token amount that is not finite or too large to quote
    #[error("Token amount {0} is outside the supported range (0 to {max})", max = crate::engine::MAX_TOKEN_AMOUNT)]
    InvalidAmount(f64),

    /// File system errors with the offending path
    #[error("Failed to access {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML decode errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// TOML encode errors
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
