//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, which serves as a unified interface
//! for fetching end-of-day bar data from any market data vendor (e.g., Yahoo Finance, Alpaca).
//!
//! Each concrete provider implementation should implement [`DataProvider`] to handle
//! vendor-specific API logic and validation.
//!
//! The trait is designed for async usage and supports dynamic dispatch (`dyn DataProvider`)
//! for runtime selection of providers.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_data_ingestor::models::{
//!     bar::BarSeries,
//!     request_params::BarsRequestParams,
//! };
//! use market_data_ingestor::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     fn name(&self) -> &'static str {
//!         "mine"
//!     }
//!
//!     async fn fetch_bars(
//!         &self,
//!         _params: BarsRequestParams,
//!     ) -> Result<Vec<BarSeries>, ProviderError> {
//!         Ok(vec![])
//!     }
//! }
//! ```
//!

pub mod alpaca_rest;
pub mod yahoo;

use std::{fmt, str::FromStr};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::{bar::BarSeries, request_params::BarsRequestParams};

/// Trait for fetching end-of-day bar data from a market data provider.
///
/// Implement this trait for each concrete data vendor.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Short provider code used in logs.
    fn name(&self) -> &'static str;

    /// Fetches bar data for the given request parameters.
    ///
    /// # Arguments
    ///
    /// * `params` - The parameters specifying symbols, timeframe, and date range.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<BarSeries>)` - A vector of bar series, one per symbol that returned data.
    /// * `Err(ProviderError)` - If the request fails.
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError>;
}

/// Selects one of the built-in providers at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Yahoo,
    Alpaca,
}

impl ProviderKind {
    /// Builds the provider, reading any credentials it needs from the environment.
    pub fn build(self) -> Result<Box<dyn DataProvider>, ProviderInitError> {
        Ok(match self {
            ProviderKind::Yahoo => Box::new(yahoo::provider::YahooProvider::new()?),
            ProviderKind::Alpaca => Box::new(alpaca_rest::provider::AlpacaProvider::new()?),
        })
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Yahoo => write!(f, "yahoo"),
            ProviderKind::Alpaca => write!(f, "alpaca"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yahoo" | "yfinance" => Ok(ProviderKind::Yahoo),
            "alpaca" => Ok(ProviderKind::Alpaca),
            other => Err(format!("unknown provider '{other}', expected 'yahoo' or 'alpaca'")),
        }
    }
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("Missing environment variable: {source}"), context(false))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"), context(false))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// API key contains invalid characters.
    #[snafu(display("Invalid API key format: {source}"), context(false))]
    InvalidApiKey {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"), context(false))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API returned a specific error message (e.g., unknown symbol).
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The provider answered but had no bars for the symbol in the range.
    #[snafu(display("No data returned for {symbol}"))]
    NoData { symbol: String },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// An internal error occurred while processing data within the provider.
    #[snafu(display("Internal provider error: {message}"))]
    Internal {
        message: String,
        backtrace: Backtrace,
    },

    /// An error during provider configuration or initialization.
    #[snafu(display("Provider initialization error: {source}"), context(false))]
    Init {
        #[snafu(backtrace)]
        source: ProviderInitError,
    },
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;

    use crate::models::{request_params::ProviderParams, timeframe::TimeFrame};

    use super::*;

    struct AlwaysEmpty;
    struct AlwaysFailing;

    #[async_trait]
    impl DataProvider for AlwaysEmpty {
        fn name(&self) -> &'static str {
            "empty"
        }

        async fn fetch_bars(&self, _params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
            Ok(vec![])
        }
    }

    #[async_trait]
    impl DataProvider for AlwaysFailing {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
            NoDataSnafu {
                symbol: params.symbols.join(","),
            }
            .fail()
        }
    }

    // The concrete provider is decided at runtime behind a `Box<dyn DataProvider>`.
    fn get_provider(name: &str) -> Box<dyn DataProvider> {
        if name == "empty" {
            Box::new(AlwaysEmpty)
        } else {
            Box::new(AlwaysFailing)
        }
    }

    fn params() -> BarsRequestParams {
        BarsRequestParams {
            symbols: vec!["AAPL".to_string()],
            timeframe: TimeFrame::day(),
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            provider_specific: ProviderParams::None,
        }
    }

    #[tokio::test]
    async fn test_dynamic_provider() {
        let provider = get_provider("empty");
        assert_eq!(provider.name(), "empty");
        assert!(provider.fetch_bars(params()).await.unwrap().is_empty());

        let provider = get_provider("failing");
        let err = provider.fetch_bars(params()).await.unwrap_err();
        assert_eq!(err.to_string(), "No data returned for AAPL");
    }

    #[test]
    fn provider_kind_parses_case_insensitively() {
        assert_eq!("Yahoo".parse::<ProviderKind>().unwrap(), ProviderKind::Yahoo);
        assert_eq!(" ALPACA ".parse::<ProviderKind>().unwrap(), ProviderKind::Alpaca);
        assert!("polygon".parse::<ProviderKind>().is_err());
        assert_eq!(ProviderKind::default().to_string(), "yahoo");
    }
}
