//! The price fetching entry point used by the analysis pipeline.

use std::collections::HashSet;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::{
    models::{
        price_table::{PriceTable, PriceTableError},
        request_params::{BarsRequestParams, ProviderParams},
        timeframe::TimeFrame,
    },
    providers::{DataProvider, ProviderError},
};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid price request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Table(#[from] PriceTableError),
}

/// What to fetch: tickers over `[start, end)` at a given interval.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRequest {
    pub symbols: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub timeframe: TimeFrame,
    /// Vendor options forwarded untouched to the provider.
    pub provider_specific: ProviderParams,
}

impl PriceRequest {
    /// A daily request.
    pub fn daily(symbols: Vec<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbols,
            start,
            end,
            timeframe: TimeFrame::day(),
            provider_specific: ProviderParams::None,
        }
    }

    pub fn with_timeframe(mut self, timeframe: TimeFrame) -> Self {
        self.timeframe = timeframe;
        self
    }

    pub fn with_provider_params(mut self, params: ProviderParams) -> Self {
        self.provider_specific = params;
        self
    }

    fn validate(&self) -> Result<(), FetchError> {
        if self.symbols.is_empty() {
            return Err(FetchError::InvalidRequest("no symbols requested".into()));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.symbols.iter().find(|s| !seen.insert(s.as_str())) {
            return Err(FetchError::InvalidRequest(format!(
                "symbol {dup} requested twice"
            )));
        }
        if self.start >= self.end {
            return Err(FetchError::InvalidRequest(format!(
                "start {} must be before end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// Retrieves adjusted closing prices for every requested symbol.
///
/// Fails if the provider fails or if any symbol comes back without data.
/// Nothing is cached and nothing is retried.
pub async fn fetch_prices(
    provider: &dyn DataProvider,
    request: &PriceRequest,
) -> Result<PriceTable, FetchError> {
    request.validate()?;

    info!(
        provider = provider.name(),
        symbols = %request.symbols.join(","),
        start = %request.start,
        end = %request.end,
        interval = %request.timeframe,
        "fetching adjusted close prices"
    );

    let params = BarsRequestParams {
        symbols: request.symbols.clone(),
        timeframe: request.timeframe,
        start: request.start,
        end: request.end,
        provider_specific: request.provider_specific.clone(),
    };
    let series = provider.fetch_bars(params).await?;
    let table = PriceTable::from_bar_series(&series, &request.symbols)?;

    info!(rows = table.len(), "price table assembled");
    Ok(table)
}
