//! Canonical in-memory representation of an end-of-day price bar.
//!
//! This struct is used as the standard output for all [`DataProvider`](crate::providers::DataProvider)
//! implementations, regardless of which vendor served the data.

use chrono::NaiveDate;

use crate::models::timeframe::TimeFrame;

/// A single end-of-day bar for a given trading date.
///
/// This struct is vendor-agnostic and is used throughout the data ingestion pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// The exchange-local trading date of this bar.
    pub date: NaiveDate,

    /// Opening price. Some providers omit it for halted sessions.
    pub open: Option<f64>,

    /// Highest price during the bar interval.
    pub high: Option<f64>,

    /// Lowest price during the bar interval.
    pub low: Option<f64>,

    /// Raw closing price.
    pub close: f64,

    /// Closing price adjusted for dividends and splits.
    pub adjusted_close: f64,

    /// Volume traded during the bar interval. Not all providers supply this.
    pub volume: Option<f64>,
}

/// Represents a complete set of time-series data for a single symbol.
///
/// This struct groups a vector of [`Bar`]s with their corresponding symbol
/// and [`TimeFrame`], making the data set self-describing.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "AAPL").
    pub symbol: String,
    /// The time interval for each bar in the series.
    pub timeframe: TimeFrame,
    /// The collection of bars, in the order the provider returned them.
    pub bars: Vec<Bar>,
}
