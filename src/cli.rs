use crate::engine::{is_solvable_amount, MAX_TOKEN_AMOUNT};
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored output (default)
    Terminal,
    /// Pretty-printed JSON
    Json,
    /// Markdown tables
    Markdown,
}

impl From<OutputFormat> for crate::io::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => crate::io::OutputFormat::Terminal,
            OutputFormat::Json => crate::io::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::OutputFormat::Markdown,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "stakecalc")]
#[command(about = "Tiered staking ROI calculator and package solver", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (TOML, or JSON by extension)
    #[arg(long, global = true, env = "STAKECALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Disable colors in terminal output
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Quote ROI and projected returns for a token amount or a package
    #[command(group(ArgGroup::new("input").required(true).args(["tokens", "package"])))]
    Quote {
        /// Token amount to stake; the investment is what covering it costs
        #[arg(allow_negative_numbers = true, value_parser = parse_token_amount)]
        tokens: Option<f64>,

        /// Quote a configured package by its position (see `packages`)
        #[arg(short, long)]
        package: Option<usize>,
    },

    /// Find the packages that cover a target token amount
    Solve {
        /// Target token amount
        #[arg(allow_negative_numbers = true, value_parser = parse_token_amount)]
        target: f64,
    },

    /// Show the tier table
    Tiers,

    /// Show the purchasable packages
    Packages,

    /// Write the default configuration to a file
    Init {
        /// Destination file
        #[arg(long, default_value = ".stakecalc.toml")]
        path: PathBuf,

        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Check the configuration for structural problems
    Validate,
}

/// Token amounts must be finite and no larger than the solver accepts.
fn parse_token_amount(value: &str) -> Result<f64, String> {
    let tokens: f64 = value
        .parse()
        .map_err(|e| format!("'{value}' is not a number: {e}"))?;
    if is_solvable_amount(tokens) {
        Ok(tokens)
    } else {
        Err(format!(
            "'{value}' is outside the supported range (at most {MAX_TOKEN_AMOUNT})"
        ))
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
