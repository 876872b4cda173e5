//! Pairwise Pearson correlation between ticker returns.

use crate::{frame::Frame, stats::pearson};

/// Square, symmetric matrix of correlation coefficients with a unit diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Row-major coefficients; `values()[i][j]` pairs `labels()[i]` with `labels()[j]`.
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied()
    }

    pub fn by_label(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == a)?;
        let j = self.labels.iter().position(|l| l == b)?;
        self.get(i, j)
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }
}

/// Pearson correlation of every column pair.
///
/// Each pair uses the rows where both columns are defined. A pair without
/// variance correlates at 0.0.
pub fn correlation_matrix(returns: &Frame) -> CorrelationMatrix {
    let columns = returns.values();
    let n = columns.len();
    let mut values = vec![vec![0.0; n]; n];

    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let (x, y): (Vec<f64>, Vec<f64>) = columns[i]
                .iter()
                .zip(&columns[j])
                .filter(|(a, b)| a.is_finite() && b.is_finite())
                .map(|(a, b)| (*a, *b))
                .unzip();
            let r = pearson(&x, &y);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        labels: returns.columns().to_vec(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    use super::*;

    fn frame(columns: Vec<(&str, Vec<f64>)>) -> Frame {
        let d0 = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let n = columns[0].1.len();
        let dates = (0..n as u64).map(|i| d0 + chrono::Days::new(i)).collect();
        let (names, values) = columns
            .into_iter()
            .map(|(n, v)| (n.to_string(), v))
            .unzip();
        Frame::new(dates, names, values).unwrap()
    }

    #[test]
    fn symmetric_with_unit_diagonal() {
        let m = correlation_matrix(&frame(vec![
            ("A", vec![0.01, -0.02, 0.03, 0.00, 0.015]),
            ("B", vec![0.02, -0.01, 0.01, 0.01, 0.0]),
            ("C", vec![-0.01, 0.02, -0.03, 0.0, -0.015]),
        ]));

        assert_eq!(m.size(), 3);
        for i in 0..3 {
            assert_eq!(m.get(i, i), Some(1.0));
            for j in 0..3 {
                assert_eq!(m.get(i, j), m.get(j, i));
                let v = m.get(i, j).unwrap();
                assert!((-1.0..=1.0).contains(&v));
            }
        }
        assert_relative_eq!(m.by_label("A", "C").unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_column_correlates_at_zero() {
        let m = correlation_matrix(&frame(vec![
            ("A", vec![0.01, 0.02, 0.03]),
            ("FLAT", vec![0.0, 0.0, 0.0]),
        ]));
        assert_eq!(m.by_label("A", "FLAT"), Some(0.0));
        assert_eq!(m.by_label("FLAT", "FLAT"), Some(1.0));
        assert_eq!(m.get(2, 0), None);
    }
}
