//! Number rendering shared by the output writers.

use crate::core::TierCeiling;
use num_format::{Locale, ToFormattedString};

/// Render `value` with a fixed number of decimals and `,` thousands
/// separators, e.g. `1234.5` with 2 decimals becomes `1,234.50`.
pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let mut parts = fixed.split('.');
    let integer = parts.next().unwrap_or_default();
    let grouped = integer
        .parse::<u128>()
        .map(|n| n.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| integer.to_string());

    // Rounding can turn a tiny negative into zero; don't print "-0.00"
    let sign = if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    match parts.next() {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn format_usd(value: f64) -> String {
    format!("${}", format_number(value, 2))
}

pub fn format_tokens(value: f64) -> String {
    format_number(value, 0)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn format_ceiling(ceiling: TierCeiling) -> String {
    match ceiling {
        TierCeiling::Bounded(max) => format_tokens(max),
        TierCeiling::Unbounded => "∞".to_string(),
    }
}
