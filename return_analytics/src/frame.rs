//! Date-indexed tables shared by every analytics stage.

use chrono::NaiveDate;
use market_data_ingestor::PriceTable;

use crate::errors::AnalyticsError;

/// A date-indexed table with one named `f64` column per ticker.
///
/// Values are stored column-major. Undefined cells (e.g. the head of a
/// rolling window) are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    dates: Vec<NaiveDate>,
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl Frame {
    pub fn new(
        dates: Vec<NaiveDate>,
        columns: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, AnalyticsError> {
        if columns.len() != values.len() {
            return Err(AnalyticsError::ColumnCountMismatch {
                names: columns.len(),
                columns: values.len(),
            });
        }
        for (name, column) in columns.iter().zip(&values) {
            if column.len() != dates.len() {
                return Err(AnalyticsError::ShapeMismatch {
                    column: name.clone(),
                    dates: dates.len(),
                    values: column.len(),
                });
            }
        }
        Ok(Self {
            dates,
            columns,
            values,
        })
    }

    /// Internal constructor for shapes the caller has already guaranteed.
    pub(crate) fn from_parts(
        dates: Vec<NaiveDate>,
        columns: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        debug_assert!(values.iter().all(|c| c.len() == dates.len()));
        Self {
            dates,
            columns,
            values,
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All columns, in the same order as [`Frame::columns`].
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|idx| self.values[idx].as_slice())
    }

    /// Values of every column at row `idx`.
    pub fn row(&self, idx: usize) -> Vec<f64> {
        self.values.iter().map(|c| c[idx]).collect()
    }

    /// Iterates `(column name, values)` pairs.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(Vec::as_slice))
    }

    /// Number of dated rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

impl From<&PriceTable> for Frame {
    fn from(prices: &PriceTable) -> Self {
        Frame::from_parts(
            prices.dates().to_vec(),
            prices.symbols().to_vec(),
            prices.columns().to_vec(),
        )
    }
}

/// A single named date-indexed column, e.g. the portfolio return series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl Series {
    pub fn new(
        name: impl Into<String>,
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
    ) -> Result<Self, AnalyticsError> {
        let name = name.into();
        if dates.len() != values.len() {
            return Err(AnalyticsError::ShapeMismatch {
                column: name,
                dates: dates.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            name,
            dates,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
