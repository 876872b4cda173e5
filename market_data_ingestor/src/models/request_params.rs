use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    models::timeframe::TimeFrame,
    providers::{alpaca_rest::params::AlpacaBarsParams, yahoo::params::YahooChartParams},
};

/// Universal parameters for requesting end-of-day bars from any market data provider.
///
/// It is intended as the standard input for all
/// [`DataProvider`](crate::providers::DataProvider) implementations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BarsRequestParams {
    /// List of symbols to request (e.g., `["AAPL", "MSFT"]`).
    pub symbols: Vec<String>,

    /// The interval for each bar (daily by default).
    ///
    /// **Validation of allowed values is performed by each data provider
    /// implementation, according to their own API rules.**
    #[serde(default)]
    pub timeframe: TimeFrame,

    /// First trading date of the requested range (inclusive).
    pub start: NaiveDate,

    /// End of the requested range (exclusive).
    ///
    /// Providers should return bars strictly before this date.
    pub end: NaiveDate,

    /// Optional, provider-specific parameters.
    #[serde(default)]
    pub provider_specific: ProviderParams,
}

/// An enum to hold provider-specific request parameters.
///
/// This allows callers to specify detailed, per-request options for a
/// particular provider without cluttering the universal `BarsRequestParams`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ProviderParams {
    #[default]
    None,
    Alpaca(AlpacaBarsParams),
    Yahoo(YahooChartParams),
}
