use super::formatting::{format_ceiling, format_percent, format_tokens, format_usd};
use crate::config::{ConfigSource, Severity, ValidationIssue};
use crate::core::{ConstraintApplied, Package, PackageCombination, Tier};
use crate::engine::{Quote, QuoteInput};
use colored::*;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// Renders calculator results in one output format.
pub trait ReportWriter {
    fn write_quote(&mut self, quote: &Quote) -> anyhow::Result<()>;
    fn write_tiers(&mut self, tiers: &[Tier]) -> anyhow::Result<()>;
    fn write_packages(&mut self, packages: &[Package]) -> anyhow::Result<()>;
    fn write_combination(
        &mut self,
        target: f64,
        combination: &PackageCombination,
    ) -> anyhow::Result<()>;
    fn write_validation(
        &mut self,
        source: &ConfigSource,
        issues: &[ValidationIssue],
    ) -> anyhow::Result<()>;
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

#[derive(Serialize)]
struct QuoteReport<'a> {
    #[serde(flatten)]
    quote: &'a Quote,
    overshoot: f64,
    total_after_one_year: f64,
}

#[derive(Serialize)]
struct CombinationReport<'a> {
    target_tokens: f64,
    overshoot: f64,
    #[serde(flatten)]
    combination: &'a PackageCombination,
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    source: String,
    valid: bool,
    issues: &'a [ValidationIssue],
}

fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(ValidationIssue::is_error)
}

fn constraint_note(constraint: ConstraintApplied) -> Option<&'static str> {
    match constraint {
        ConstraintApplied::Min => Some("raised to tier minimum"),
        ConstraintApplied::Max => Some("capped at tier maximum"),
        ConstraintApplied::None => None,
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn emit<T: Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_quote(&mut self, quote: &Quote) -> anyhow::Result<()> {
        self.emit(&QuoteReport {
            quote,
            overshoot: quote.overshoot(),
            total_after_one_year: quote.total_after_one_year(),
        })
    }

    fn write_tiers(&mut self, tiers: &[Tier]) -> anyhow::Result<()> {
        self.emit(tiers)
    }

    fn write_packages(&mut self, packages: &[Package]) -> anyhow::Result<()> {
        self.emit(packages)
    }

    fn write_combination(
        &mut self,
        target: f64,
        combination: &PackageCombination,
    ) -> anyhow::Result<()> {
        self.emit(&CombinationReport {
            target_tokens: target,
            overshoot: combination.overshoot(target),
            combination,
        })
    }

    fn write_validation(
        &mut self,
        source: &ConfigSource,
        issues: &[ValidationIssue],
    ) -> anyhow::Result<()> {
        self.emit(&ValidationReport {
            source: source.to_string(),
            valid: !has_errors(issues),
            issues,
        })
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_combination_table(&mut self, combination: &PackageCombination) -> anyhow::Result<()> {
        writeln!(self.writer, "| Package | Quantity | USD | Tokens |")?;
        writeln!(self.writer, "|---------|----------|-----|--------|")?;
        for line in &combination.packages {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                format_usd(line.package.usd_price),
                line.quantity,
                format_usd(line.usd()),
                format_tokens(line.tokens())
            )?;
        }
        writeln!(
            self.writer,
            "| **Total** | {} | {} | {} |",
            combination.unit_count(),
            format_usd(combination.total_usd),
            format_tokens(combination.total_tokens)
        )?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_quote(&mut self, quote: &Quote) -> anyhow::Result<()> {
        writeln!(self.writer, "# Staking Quote")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Tokens | {} |", format_tokens(quote.tokens))?;
        writeln!(
            self.writer,
            "| Investment | {} |",
            format_usd(quote.investment_usd)
        )?;

        if let Some(roi) = &quote.roi {
            writeln!(self.writer, "| Tier | {} |", roi.tier.name)?;
            writeln!(self.writer, "| Base bonus | {} |", format_percent(roi.base_bonus))?;
            writeln!(
                self.writer,
                "| Proportional bonus | {} |",
                format_percent(roi.proportional_bonus)
            )?;
            writeln!(
                self.writer,
                "| Monthly ROI | {} ({}) |",
                format_percent(roi.final_roi),
                roi.constraint_applied.as_str()
            )?;
        }
        if let Some(returns) = &quote.returns {
            writeln!(self.writer, "| Annual | {} |", format_usd(returns.annual_usd))?;
            writeln!(self.writer, "| Monthly | {} |", format_usd(returns.monthly_usd))?;
            writeln!(self.writer, "| Daily | {} |", format_usd(returns.daily_usd))?;
            writeln!(
                self.writer,
                "| Total after 1 year | {} |",
                format_usd(quote.total_after_one_year())
            )?;
        }
        if let Some(next) = &quote.next_tier {
            writeln!(
                self.writer,
                "| Next tier | {} in {} tokens |",
                next.tier.name,
                format_tokens(next.tokens_needed)
            )?;
        }
        writeln!(self.writer)?;

        if let Some(combination) = quote.combination.as_ref().filter(|c| !c.is_empty()) {
            writeln!(self.writer, "## Packages")?;
            writeln!(self.writer)?;
            self.write_combination_table(combination)?;
        }
        Ok(())
    }

    fn write_tiers(&mut self, tiers: &[Tier]) -> anyhow::Result<()> {
        writeln!(self.writer, "# Tiers")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Tier | Tokens | Base bonus | ROI range |")?;
        writeln!(self.writer, "|------|--------|------------|-----------|")?;
        for tier in tiers {
            let roi_range = if tier.is_fixed {
                format!("{} fixed", format_percent(tier.base_bonus))
            } else {
                format!(
                    "{} - {}",
                    format_percent(tier.min_roi),
                    format_percent(tier.max_roi)
                )
            };
            writeln!(
                self.writer,
                "| {} | {} - {} | {} | {} |",
                tier.name,
                format_tokens(tier.range.min),
                format_ceiling(tier.range.max),
                format_percent(tier.base_bonus),
                roi_range
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_packages(&mut self, packages: &[Package]) -> anyhow::Result<()> {
        writeln!(self.writer, "# Packages")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| # | USD | Tokens |")?;
        writeln!(self.writer, "|---|-----|--------|")?;
        for (i, package) in packages.iter().enumerate() {
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                i,
                format_usd(package.usd_price),
                format_tokens(package.token_amount)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_combination(
        &mut self,
        target: f64,
        combination: &PackageCombination,
    ) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "# Packages for {} tokens",
            format_tokens(target)
        )?;
        writeln!(self.writer)?;
        self.write_combination_table(combination)?;
        let overshoot = combination.overshoot(target);
        if overshoot > 0.0 {
            writeln!(self.writer, "{} extra tokens.", format_tokens(overshoot))?;
        }
        Ok(())
    }

    fn write_validation(
        &mut self,
        source: &ConfigSource,
        issues: &[ValidationIssue],
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "# Configuration: {}", source)?;
        writeln!(self.writer)?;
        if issues.is_empty() {
            writeln!(self.writer, "No issues found.")?;
        }
        for issue in issues {
            writeln!(
                self.writer,
                "- **{}** `{}`: {}",
                issue.severity, issue.field, issue.message
            )?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn heading(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", title.bold().blue())?;
        writeln!(self.writer, "{}", "─".repeat(title.chars().count()).dimmed())?;
        Ok(())
    }

    fn row(&mut self, label: &str, value: impl std::fmt::Display) -> anyhow::Result<()> {
        writeln!(self.writer, "  {:<22} {}", label, value)?;
        Ok(())
    }

    fn write_lines(&mut self, combination: &PackageCombination) -> anyhow::Result<()> {
        for line in &combination.packages {
            let quantity = if line.quantity > 1 {
                format!("{} × ", line.quantity)
            } else {
                String::new()
            };
            writeln!(
                self.writer,
                "  {}{:<12} {:>14} tokens",
                quantity,
                format_usd(line.package.usd_price),
                format_tokens(line.tokens())
            )?;
        }
        Ok(())
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_quote(&mut self, quote: &Quote) -> anyhow::Result<()> {
        self.heading("Staking Quote")?;
        if let QuoteInput::Package(index) = quote.input {
            self.row("Package", format!("#{}", index))?;
        }
        self.row("Tokens", format_tokens(quote.tokens))?;
        self.row("Investment", format_usd(quote.investment_usd))?;

        if let Some(combination) = quote.combination.as_ref().filter(|c| !c.is_empty()) {
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "{}",
                format!("Packages for {} tokens", format_tokens(quote.tokens)).bold()
            )?;
            self.write_lines(combination)?;
            let overshoot = quote.overshoot();
            if overshoot > 0.0 {
                writeln!(
                    self.writer,
                    "  Receive {} tokens ({} extra)",
                    format_tokens(combination.total_tokens),
                    format_tokens(overshoot).yellow()
                )?;
            }
        }

        let Some(roi) = &quote.roi else {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "Enter a positive token amount to see returns.".dimmed())?;
            return Ok(());
        };

        writeln!(self.writer)?;
        self.row("Tier", roi.tier.name.as_str().bold())?;
        if roi.tier.is_fixed {
            self.row("Monthly ROI", format!("{} (fixed)", format_percent(roi.final_roi)).green())?;
        } else {
            self.row("Base bonus", format_percent(roi.base_bonus))?;
            self.row(
                "Proportional bonus",
                format!(
                    "{} ({} / {} × {}%)",
                    format_percent(roi.proportional_bonus),
                    format_tokens(quote.tokens),
                    format_tokens(roi.tier.proportional_divisor),
                    roi.tier.proportional_multiplier
                ),
            )?;
            let mut monthly = format_percent(roi.final_roi).green().to_string();
            if let Some(note) = constraint_note(roi.constraint_applied) {
                monthly.push_str(&format!(" ({})", note));
            }
            self.row("Monthly ROI", monthly)?;
        }
        if let Some(description) = &roi.tier.description {
            self.row("", description.as_str().italic())?;
        }

        if let Some(next) = &quote.next_tier {
            self.row(
                "Next tier",
                format!(
                    "{}: stake {} more tokens",
                    next.tier.name,
                    format_tokens(next.tokens_needed)
                ),
            )?;
        }

        if let Some(returns) = &quote.returns {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "Projected Returns".bold())?;
            self.row("Annual", format_usd(returns.annual_usd).green())?;
            self.row("Monthly", format_usd(returns.monthly_usd).green())?;
            self.row("Daily", format_usd(returns.daily_usd).green())?;
            self.row("Initial investment", format_usd(quote.investment_usd))?;
            self.row(
                "Total after 1 year",
                format_usd(quote.total_after_one_year()).green(),
            )?;
        }
        Ok(())
    }

    fn write_tiers(&mut self, tiers: &[Tier]) -> anyhow::Result<()> {
        self.heading("Tiers")?;
        for tier in tiers {
            let roi = if tier.is_fixed {
                format!("{} fixed", format_percent(tier.base_bonus))
            } else {
                format!(
                    "{} - {}",
                    format_percent(tier.min_roi),
                    format_percent(tier.max_roi)
                )
            };
            writeln!(
                self.writer,
                "  {:<24} {:>11} - {:<11} {}",
                tier.name.as_str().bold(),
                format_tokens(tier.range.min),
                format_ceiling(tier.range.max),
                roi
            )?;
            if let Some(description) = &tier.description {
                writeln!(self.writer, "  {}", description.as_str().italic())?;
            }
        }
        Ok(())
    }

    fn write_packages(&mut self, packages: &[Package]) -> anyhow::Result<()> {
        self.heading("Packages")?;
        for (i, package) in packages.iter().enumerate() {
            writeln!(
                self.writer,
                "  {:>2}  {:<12} {:>14} tokens  {}",
                i,
                format_usd(package.usd_price),
                format_tokens(package.token_amount),
                format!("${:.4}/token", package.unit_price()).dimmed()
            )?;
        }
        Ok(())
    }

    fn write_combination(
        &mut self,
        target: f64,
        combination: &PackageCombination,
    ) -> anyhow::Result<()> {
        self.heading(&format!("Packages for {} tokens", format_tokens(target)))?;
        if combination.is_empty() {
            writeln!(self.writer, "  {}", "Nothing to buy.".dimmed())?;
            return Ok(());
        }
        self.write_lines(combination)?;
        writeln!(self.writer)?;
        self.row("Total", format_usd(combination.total_usd).bold())?;
        self.row("Tokens received", format_tokens(combination.total_tokens))?;
        let overshoot = combination.overshoot(target);
        if overshoot > 0.0 {
            self.row("Extra tokens", format_tokens(overshoot).yellow())?;
        }
        Ok(())
    }

    fn write_validation(
        &mut self,
        source: &ConfigSource,
        issues: &[ValidationIssue],
    ) -> anyhow::Result<()> {
        self.heading("Configuration")?;
        self.row("Source", source)?;
        if issues.is_empty() {
            writeln!(self.writer, "  {}", "No issues found.".green())?;
            return Ok(());
        }
        for issue in issues {
            let label = match issue.severity {
                Severity::Error => "error".red().bold(),
                Severity::Warning => "warning".yellow().bold(),
            };
            writeln!(self.writer, "  {} {}: {}", label, issue.field, issue.message)?;
        }
        Ok(())
    }
}
