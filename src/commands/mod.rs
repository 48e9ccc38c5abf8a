//! CLI command implementations for stakecalc.
//!
//! Available commands:
//! - **quote**: ROI, returns and next-tier distance for one input
//! - **solve**: package combination covering a token target
//! - **tiers** / **packages**: show the active configuration tables
//! - **init**: write the default configuration file
//! - **validate**: report structural problems in the configuration
//!
//! Every command except `init` and `validate` runs against a configuration
//! resolved once by [`crate::config::load_config`] and passed in explicitly.

pub mod init;
pub mod listing;
pub mod quote;
pub mod solve;
pub mod validate;

pub use init::init_config;
pub use listing::{list_packages, list_tiers};
pub use quote::run_quote;
pub use solve::run_solve;
pub use validate::validate_configuration;

use crate::io::{self, OutputFormat, ReportWriter};
use anyhow::Result;
use std::path::PathBuf;

/// Where and how a command reports its results.
#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub path: Option<PathBuf>,
}

impl OutputSettings {
    pub fn writer(&self) -> Result<Box<dyn ReportWriter>> {
        let destination = io::open_output(self.path.as_deref())?;
        Ok(io::create_writer(self.format, destination))
    }
}
