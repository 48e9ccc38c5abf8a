use crate::core::ReturnsProjection;

/// Months per year used to annualize a monthly rate.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Days per month used to derive a daily figure. Not calendar accurate.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Project USD and token yield from a monthly ROI percentage.
pub fn project_returns(
    tokens: f64,
    investment_usd: f64,
    monthly_roi_percent: f64,
) -> ReturnsProjection {
    let rate = monthly_roi_percent / 100.0;

    let monthly_usd = investment_usd * rate;
    let monthly_tokens = tokens * rate;

    ReturnsProjection {
        annual_usd: monthly_usd * MONTHS_PER_YEAR,
        monthly_usd,
        daily_usd: monthly_usd / DAYS_PER_MONTH,
        annual_tokens: monthly_tokens * MONTHS_PER_YEAR,
        monthly_tokens,
        daily_tokens: monthly_tokens / DAYS_PER_MONTH,
    }
}
