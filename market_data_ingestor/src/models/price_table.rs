//! Date-indexed table of adjusted closing prices, one column per symbol.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::bar::BarSeries;

#[derive(Debug, Error, PartialEq)]
pub enum PriceTableError {
    #[error("price table has no symbols")]
    NoSymbols,

    #[error("duplicate symbol in price table: {0}")]
    DuplicateSymbol(String),

    #[error("no bars returned for symbol {0}")]
    MissingSymbol(String),

    #[error("column {symbol} has {values} values for {dates} dates")]
    LengthMismatch {
        symbol: String,
        dates: usize,
        values: usize,
    },

    #[error("{symbols} symbols but {columns} price columns")]
    ColumnCountMismatch { symbols: usize, columns: usize },

    #[error("dates must be strictly increasing (violated at row {row})")]
    UnorderedDates { row: usize },
}

/// Adjusted close prices indexed by trading date.
///
/// Invariants: dates are strictly increasing and symbols are unique. A price
/// missing for one symbol on a date another symbol traded is stored as `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    symbols: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl PriceTable {
    /// Builds a table from column-major data, checking every invariant.
    pub fn new(
        dates: Vec<NaiveDate>,
        symbols: Vec<String>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self, PriceTableError> {
        if symbols.is_empty() {
            return Err(PriceTableError::NoSymbols);
        }

        let mut seen = HashSet::new();
        for symbol in &symbols {
            if !seen.insert(symbol.as_str()) {
                return Err(PriceTableError::DuplicateSymbol(symbol.clone()));
            }
        }

        if let Some(row) = dates.windows(2).position(|w| w[0] >= w[1]) {
            return Err(PriceTableError::UnorderedDates { row: row + 1 });
        }

        if columns.len() != symbols.len() {
            return Err(PriceTableError::ColumnCountMismatch {
                symbols: symbols.len(),
                columns: columns.len(),
            });
        }
        for (symbol, column) in symbols.iter().zip(&columns) {
            if column.len() != dates.len() {
                return Err(PriceTableError::LengthMismatch {
                    symbol: symbol.clone(),
                    dates: dates.len(),
                    values: column.len(),
                });
            }
        }

        Ok(Self {
            dates,
            symbols,
            columns,
        })
    }

    /// Aligns provider output onto the sorted union of all trading dates.
    ///
    /// Columns follow the order of `symbols`, not the order the provider
    /// returned them in. Every requested symbol must have at least one bar.
    pub fn from_bar_series(
        series: &[BarSeries],
        symbols: &[String],
    ) -> Result<Self, PriceTableError> {
        let mut by_symbol: BTreeMap<&str, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
        for s in series {
            let closes = by_symbol.entry(s.symbol.as_str()).or_default();
            for bar in &s.bars {
                if bar.adjusted_close.is_finite() {
                    closes.insert(bar.date, bar.adjusted_close);
                }
            }
        }

        let mut all_dates = BTreeSet::new();
        for symbol in symbols {
            match by_symbol.get(symbol.as_str()) {
                Some(closes) if !closes.is_empty() => all_dates.extend(closes.keys().copied()),
                _ => return Err(PriceTableError::MissingSymbol(symbol.clone())),
            }
        }
        let dates: Vec<NaiveDate> = all_dates.into_iter().collect();

        let columns = symbols
            .iter()
            .map(|symbol| {
                let closes = &by_symbol[symbol.as_str()];
                dates
                    .iter()
                    .map(|d| closes.get(d).copied().unwrap_or(f64::NAN))
                    .collect()
            })
            .collect();

        Self::new(dates, symbols.to_vec(), columns)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    pub fn column(&self, symbol: &str) -> Option<&[f64]> {
        self.symbols
            .iter()
            .position(|s| s == symbol)
            .map(|idx| self.columns[idx].as_slice())
    }

    /// Number of dated rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
