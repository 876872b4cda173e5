//! Daily percentage returns and rolling volatility.

use market_data_ingestor::PriceTable;

use crate::{errors::AnalyticsError, frame::Frame, stats::sample_std};

/// Observations per rolling volatility window unless configured otherwise.
pub const DEFAULT_VOLATILITY_WINDOW: usize = 30;

/// Percent change row over row: `p[t] / p[t-1] - 1`.
///
/// A missing price is carried forward from the ticker's last known price, so
/// a gap yields a zero return rather than an undefined one. The first row has
/// no predecessor and is dropped, as is any row still undefined for some
/// ticker (e.g. before that ticker's first trade).
///
/// A zero price makes the next return infinite (or undefined when the next
/// price is zero as well), so that date is dropped for every ticker.
pub fn daily_returns(prices: &PriceTable) -> Frame {
    let dates = prices.dates();
    let filled: Vec<Vec<f64>> = prices.columns().iter().map(|c| forward_fill(c)).collect();

    let mut kept_dates = Vec::with_capacity(dates.len().saturating_sub(1));
    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(kept_dates.capacity()); filled.len()];

    for t in 1..dates.len() {
        let row: Vec<f64> = filled.iter().map(|c| c[t] / c[t - 1] - 1.0).collect();
        if row.iter().all(|r| r.is_finite()) {
            kept_dates.push(dates[t]);
            for (column, r) in columns.iter_mut().zip(row) {
                column.push(r);
            }
        }
    }

    Frame::from_parts(kept_dates, prices.symbols().to_vec(), columns)
}

fn forward_fill(values: &[f64]) -> Vec<f64> {
    let mut last = f64::NAN;
    values
        .iter()
        .map(|&v| {
            if v.is_finite() {
                last = v;
            }
            last
        })
        .collect()
}

/// Rolling sample standard deviation of each column over `window` rows.
///
/// The output has the same rows as `returns`; the first `window - 1` rows
/// of every column are `NaN`, as is any window containing an undefined value.
pub fn volatility(returns: &Frame, window: usize) -> Result<Frame, AnalyticsError> {
    if window < 2 {
        return Err(AnalyticsError::InvalidWindow { window });
    }

    let columns = returns
        .values()
        .iter()
        .map(|column| rolling_std(column, window))
        .collect();

    Ok(Frame::from_parts(
        returns.dates().to_vec(),
        returns.columns().to_vec(),
        columns,
    ))
}

fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return f64::NAN;
            }
            let slice = &values[i + 1 - window..=i];
            if slice.iter().all(|v| v.is_finite()) {
                sample_std(slice)
            } else {
                f64::NAN
            }
        })
        .collect()
}
