use thiserror::Error;

/// Errors raised by the analytics functions.
#[derive(Debug, Error, PartialEq)]
pub enum AnalyticsError {
    #[error("column {column} has {values} values for {dates} dates")]
    ShapeMismatch {
        column: String,
        dates: usize,
        values: usize,
    },

    #[error("{names} column names for {columns} columns")]
    ColumnCountMismatch { names: usize, columns: usize },

    #[error("rolling window must be at least 2, got {window}")]
    InvalidWindow { window: usize },

    #[error("{weights} weights given for {columns} tickers")]
    WeightCountMismatch { weights: usize, columns: usize },

    #[error("weight #{index} is not a finite number")]
    NonFiniteWeight { index: usize },

    #[error("{column} needs at least {needed} observations, got {got}")]
    InsufficientData {
        column: String,
        needed: usize,
        got: usize,
    },

    /// Standard deviation of returns is zero, so the Sharpe-like ratio is undefined.
    #[error("standard deviation of {column} returns is zero; ratio is undefined")]
    ZeroVolatility { column: String },
}
