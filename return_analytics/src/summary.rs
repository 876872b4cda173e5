//! Per-ticker descriptive statistics of daily returns.

use crate::{
    frame::Frame,
    stats::{mean, median, sample_std},
};

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub ticker: String,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

/// Mean, median and sample standard deviation, one row per ticker in column
/// order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Column headers in display order.
    pub const HEADERS: [&'static str; 3] = ["Mean", "Median", "Std Dev"];

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn get(&self, ticker: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.ticker == ticker)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl SummaryRow {
    /// Statistic values in the order of [`SummaryTable::HEADERS`].
    pub fn values(&self) -> [f64; 3] {
        [self.mean, self.median, self.std_dev]
    }
}

pub fn summarize(returns: &Frame) -> SummaryTable {
    let rows = returns
        .iter_columns()
        .map(|(ticker, values)| SummaryRow {
            ticker: ticker.to_string(),
            mean: mean(values),
            median: median(values),
            std_dev: sample_std(values),
        })
        .collect();
    SummaryTable { rows }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn one_row_per_column_in_order() {
        let d0 = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let dates = (0..4).map(|i| d0 + chrono::Days::new(i)).collect();
        let frame = Frame::new(
            dates,
            vec!["B".into(), "A".into()],
            vec![vec![0.01, 0.02, 0.03, 0.10], vec![-0.01, 0.0, 0.0, 0.01]],
        )
        .unwrap();

        let table = summarize(&frame);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].ticker, "B");

        let b = table.get("B").unwrap();
        assert_relative_eq!(b.mean, 0.04, epsilon = 1e-12);
        assert_relative_eq!(b.median, 0.025, epsilon = 1e-12);
        assert_relative_eq!(b.std_dev, 0.040824829046386304, epsilon = 1e-12);

        let a = table.get("A").unwrap();
        assert_relative_eq!(a.median, 0.0);
        assert_eq!(a.values()[0], a.mean);
    }

    #[test]
    fn single_observation_has_undefined_spread() {
        let d0 = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let frame = Frame::new(vec![d0], vec!["A".into()], vec![vec![0.5]]).unwrap();
        let table = summarize(&frame);
        let row = &table.rows()[0];
        assert_eq!(row.mean, 0.5);
        assert!(row.std_dev.is_nan());
    }
}
