use anyhow::Result;
use stakecalc::cli::{self, Commands};
use stakecalc::commands::{self, OutputSettings};
use stakecalc::config::load_config;
use stakecalc::{CalculatorConfig, QuoteInput};
use std::path::Path;

fn main() -> Result<()> {
    let cli = cli::parse_args();
    init_logging(cli.verbosity);

    if cli.plain {
        colored::control::set_override(false);
    }

    let output = OutputSettings {
        format: cli.format.into(),
        path: cli.output,
    };
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Quote { tokens, package } => {
            let input = match (tokens, package) {
                (_, Some(index)) => QuoteInput::Package(index),
                (Some(tokens), None) => QuoteInput::Tokens(tokens),
                (None, None) => anyhow::bail!("Provide a token amount or --package"),
            };
            commands::run_quote(input, &active_config(config_path)?, &output)?;
        }
        Commands::Solve { target } => {
            commands::run_solve(target, &active_config(config_path)?, &output)?;
        }
        Commands::Tiers => commands::list_tiers(&active_config(config_path)?, &output)?,
        Commands::Packages => commands::list_packages(&active_config(config_path)?, &output)?,
        Commands::Init { path, force } => commands::init_config(&path, force)?,
        Commands::Validate => {
            commands::validate_configuration(config_path, &output)?;
        }
    }

    Ok(())
}

fn active_config(path: Option<&Path>) -> Result<CalculatorConfig> {
    let loaded = load_config(path)?;
    log::debug!("Using configuration from {}", loaded.source);
    Ok(loaded.config)
}

/// `-v` raises the default level step by step; `RUST_LOG` still wins.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
