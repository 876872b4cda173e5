//! Sharpe-like risk-adjusted return on daily data.
//!
//! The ratio is `(mean(r) - rf) / std(r)` with a per-day risk-free rate and no
//! annualization.

use crate::{
    errors::AnalyticsError,
    frame::{Frame, Series},
    stats::{mean, sample_std},
};

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

pub const DEFAULT_ANNUAL_RISK_FREE_RATE: f64 = 0.02;

/// 2% a year spread over the trading days of a year.
pub const DEFAULT_RISK_FREE_RATE: f64 = DEFAULT_ANNUAL_RISK_FREE_RATE / TRADING_DAYS_PER_YEAR;

/// Ratios keyed by ticker, in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SharpeRatios {
    entries: Vec<(String, f64)>,
}

impl SharpeRatios {
    pub fn get(&self, ticker: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == ticker)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, v)| (name.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ratio of a single return series, e.g. the portfolio.
pub fn sharpe_ratio(returns: &Series, risk_free_rate: f64) -> Result<f64, AnalyticsError> {
    ratio(returns.name(), returns.values(), risk_free_rate)
}

/// Ratio of every column of `returns`.
pub fn sharpe_ratios(returns: &Frame, risk_free_rate: f64) -> Result<SharpeRatios, AnalyticsError> {
    let entries = returns
        .iter_columns()
        .map(|(name, values)| Ok((name.to_string(), ratio(name, values, risk_free_rate)?)))
        .collect::<Result<_, AnalyticsError>>()?;
    Ok(SharpeRatios { entries })
}

fn ratio(name: &str, values: &[f64], risk_free_rate: f64) -> Result<f64, AnalyticsError> {
    if values.len() < 2 {
        return Err(AnalyticsError::InsufficientData {
            column: name.to_string(),
            needed: 2,
            got: values.len(),
        });
    }

    let std = sample_std(values);
    if !std.is_finite() || is_flat(values, std) {
        return Err(AnalyticsError::ZeroVolatility {
            column: name.to_string(),
        });
    }

    Ok((mean(values) - risk_free_rate) / std)
}

/// A constant series can still show a std of a few ulps of its mean, since
/// values like 0.1 are not exact in binary.
fn is_flat(values: &[f64], std: f64) -> bool {
    let first = values[0];
    if values.iter().all(|&v| v == first) {
        return true;
    }
    std <= f64::EPSILON * mean(values).abs().max(f64::MIN_POSITIVE) * 8.0
}
