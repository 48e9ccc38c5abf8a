pub mod formatting;
pub mod output;

pub use formatting::{format_ceiling, format_number, format_percent, format_tokens, format_usd};
pub use output::{
    create_writer, JsonWriter, MarkdownWriter, OutputFormat, ReportWriter, TerminalWriter,
};

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Open the report destination: the given file, or stdout.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}
