//! Structural checks for a loaded configuration.
//!
//! The engine trusts its inputs: an empty tier table panics on lookup and a
//! gap or overlap silently changes which tier an amount lands in. Checks here
//! run once at load time so those cases surface as readable messages instead.

use super::core::CalculatorConfig;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Dotted path of the offending field, e.g. `tiers[2].max_tokens`
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(severity: Severity, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            field: field.into(),
            message: message.into(),
        }
    }

    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, field, message)
    }

    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, field, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.field, self.message)
    }
}

/// Run every check and collect all issues, errors and warnings alike.
pub fn validate_config(config: &CalculatorConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    issues.extend(check_tiers(config));
    issues.extend(check_packages(config));
    issues
}

/// Keep only the errors, logging any warnings on the way.
pub fn errors_only(issues: Vec<ValidationIssue>) -> Vec<ValidationIssue> {
    issues
        .into_iter()
        .filter(|issue| {
            if !issue.is_error() {
                log::warn!("{}", issue);
            }
            issue.is_error()
        })
        .collect()
}

fn check_tiers(config: &CalculatorConfig) -> Vec<ValidationIssue> {
    let tiers = &config.tiers;
    if tiers.is_empty() {
        return vec![ValidationIssue::error("tiers", "no tiers configured")];
    }

    let mut issues = Vec::new();
    let last = tiers.len() - 1;

    for (i, tier) in tiers.iter().enumerate() {
        if tier.min_roi > tier.max_roi {
            issues.push(ValidationIssue::error(
                format!("tiers[{i}].min_roi"),
                format!(
                    "minimum ROI {} exceeds maximum ROI {}",
                    tier.min_roi, tier.max_roi
                ),
            ));
        }

        match tier.max_tokens {
            None if i != last => issues.push(ValidationIssue::error(
                format!("tiers[{i}].max_tokens"),
                "only the last tier may be unbounded",
            )),
            Some(max) if max < tier.min_tokens => issues.push(ValidationIssue::error(
                format!("tiers[{i}].max_tokens"),
                format!("range [{}, {}] is empty", tier.min_tokens, max),
            )),
            _ => {}
        }
    }

    if tiers[0].min_tokens > 1.0 {
        issues.push(ValidationIssue::warning(
            "tiers[0].min_tokens",
            format!(
                "amounts below {} fall back to the last tier",
                tiers[0].min_tokens
            ),
        ));
    }

    if !tiers[last].ceiling().is_unbounded() {
        issues.push(ValidationIssue::warning(
            format!("tiers[{last}].max_tokens"),
            "top tier is bounded; larger amounts fall back to it",
        ));
    }

    for (i, pair) in tiers.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        let field = format!("tiers[{}].min_tokens", i + 1);

        if next.min_tokens <= prev.min_tokens {
            issues.push(ValidationIssue::error(
                field,
                "tiers must be ordered by ascending min_tokens",
            ));
            continue;
        }

        if let Some(prev_max) = prev.max_tokens {
            let expected = prev_max + 1.0;
            if next.min_tokens <= prev_max {
                issues.push(ValidationIssue::error(
                    field,
                    format!("overlaps previous tier ending at {prev_max}"),
                ));
            } else if next.min_tokens > expected {
                issues.push(ValidationIssue::warning(
                    field,
                    format!("gap after previous tier: expected {expected}"),
                ));
            }
        }
    }

    issues
}

fn check_packages(config: &CalculatorConfig) -> Vec<ValidationIssue> {
    let packages = &config.usd_packages;
    if packages.is_empty() {
        return vec![ValidationIssue::error(
            "usd_packages",
            "no packages configured",
        )];
    }

    let mut issues = Vec::new();
    for (i, package) in packages.iter().enumerate() {
        if !(package.usd_price > 0.0) {
            issues.push(ValidationIssue::error(
                format!("usd_packages[{i}].usd"),
                "price must be positive",
            ));
        }
        if !(package.token_amount > 0.0) {
            issues.push(ValidationIssue::error(
                format!("usd_packages[{i}].tokens"),
                "token amount must be positive",
            ));
        }
        if packages[..i].contains(package) {
            issues.push(ValidationIssue::warning(
                format!("usd_packages[{i}]"),
                "duplicate package",
            ));
        }
    }

    issues
}
