//! Yahoo Finance chart API (`/v8/finance/chart`).
//!
//! Needs no credentials. One HTTP request is issued per symbol; the response
//! carries both raw and dividend/split adjusted closes.

pub mod params;
pub mod provider;
pub mod response;

pub use params::YahooChartParams;
pub use provider::YahooProvider;
