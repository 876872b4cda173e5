//! Weighted portfolio returns and cumulative growth.

use tracing::warn;

use crate::{
    errors::AnalyticsError,
    frame::{Frame, Series},
};

/// Column name used for the portfolio in series and reports.
pub const PORTFOLIO_LABEL: &str = "Portfolio";

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// One weight per ticker, in the column order of the return frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights(Vec<f64>);

impl Weights {
    /// Uniform 1/N weights.
    pub fn equal(n: usize) -> Self {
        Self(vec![1.0 / n as f64; n])
    }

    /// Rejects non-finite weights. The sum is not required to be 1.
    pub fn new(weights: Vec<f64>) -> Result<Self, AnalyticsError> {
        if let Some(index) = weights.iter().position(|w| !w.is_finite()) {
            return Err(AnalyticsError::NonFiniteWeight { index });
        }
        Ok(Self(weights))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioPerformance {
    pub returns: Series,
    pub cumulative: Series,
    pub cumulative_by_ticker: Frame,
}

/// Running product of `1 + r`, starting from an implicit 1.0.
pub fn cumulative_product(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0, |acc, r| {
            *acc *= 1.0 + r;
            Some(*acc)
        })
        .collect()
}

/// Weighted sum of the ticker returns on each date.
pub fn portfolio_returns(returns: &Frame, weights: &Weights) -> Result<Vec<f64>, AnalyticsError> {
    if weights.len() != returns.width() {
        return Err(AnalyticsError::WeightCountMismatch {
            weights: weights.len(),
            columns: returns.width(),
        });
    }

    let mut out = vec![0.0; returns.len()];
    for (column, w) in returns.values().iter().zip(weights.as_slice()) {
        for (acc, r) in out.iter_mut().zip(column) {
            *acc += w * r;
        }
    }
    Ok(out)
}

/// Cumulative growth of every column of `returns`.
pub fn cumulative_frame(returns: &Frame) -> Frame {
    Frame::from_parts(
        returns.dates().to_vec(),
        returns.columns().to_vec(),
        returns
            .values()
            .iter()
            .map(|c| cumulative_product(c))
            .collect(),
    )
}

/// Portfolio and per-ticker cumulative performance.
///
/// `None` weights means an equal-weighted portfolio.
pub fn evaluate_portfolio(
    returns: &Frame,
    weights: Option<&Weights>,
) -> Result<PortfolioPerformance, AnalyticsError> {
    let equal;
    let weights = match weights {
        Some(w) => w,
        None => {
            equal = Weights::equal(returns.width());
            &equal
        }
    };

    let sum = weights.sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        warn!(sum, "portfolio weights do not sum to 1; using them as given");
    }

    let values = portfolio_returns(returns, weights)?;
    let cumulative = cumulative_product(&values);

    Ok(PortfolioPerformance {
        returns: Series::new(PORTFOLIO_LABEL, returns.dates().to_vec(), values)?,
        cumulative: Series::new(PORTFOLIO_LABEL, returns.dates().to_vec(), cumulative)?,
        cumulative_by_ticker: cumulative_frame(returns),
    })
}
