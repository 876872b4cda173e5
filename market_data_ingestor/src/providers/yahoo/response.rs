use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::{
    models::{
        bar::{Bar, BarSeries},
        timeframe::TimeFrame,
    },
    providers::{ApiSnafu, NoDataSnafu, ProviderError},
};

#[derive(Deserialize, Debug)]
pub struct YahooResponse {
    pub chart: YahooChart,
}

#[derive(Deserialize, Debug)]
pub struct YahooChart {
    pub result: Option<Vec<YahooChartResult>>,
    pub error: Option<YahooApiError>,
}

#[derive(Deserialize, Debug)]
pub struct YahooApiError {
    pub code: String,
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct YahooChartResult {
    pub meta: YahooMeta,
    /// Absent when the range holds no trading days.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: YahooIndicators,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct YahooMeta {
    pub symbol: String,
    pub currency: Option<String>,
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Deserialize, Debug)]
pub struct YahooIndicators {
    #[serde(default)]
    pub quote: Vec<YahooQuote>,
    #[serde(default)]
    pub adjclose: Vec<YahooAdjClose>,
}

#[derive(Deserialize, Debug, Default)]
pub struct YahooQuote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

#[derive(Deserialize, Debug)]
pub struct YahooAdjClose {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

fn at(values: &[Option<f64>], idx: usize) -> Option<f64> {
    values.get(idx).copied().flatten()
}

fn trading_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp + gmtoffset, 0).map(|dt| dt.date_naive())
}

impl YahooResponse {
    /// Converts the chart payload for `symbol` into a [`BarSeries`].
    ///
    /// Rows without an adjusted close are skipped. Only when the payload has no
    /// adjusted series at all is the raw close used for both.
    pub fn into_bar_series(
        self,
        symbol: &str,
        timeframe: TimeFrame,
    ) -> Result<BarSeries, ProviderError> {
        if let Some(err) = self.chart.error {
            return ApiSnafu {
                message: format!("{symbol}: {} ({})", err.description, err.code),
            }
            .fail();
        }

        let result = self
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| NoDataSnafu { symbol }.build())?;

        let empty = YahooQuote::default();
        let quote = result.indicators.quote.first().unwrap_or(&empty);
        let adjclose = result
            .indicators
            .adjclose
            .first()
            .map(|a| a.adjclose.as_slice())
            .filter(|a| !a.is_empty());
        let gmtoffset = result.meta.gmtoffset;

        let bars: Vec<Bar> = result
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let close = at(&quote.close, i);
                let adjusted_close = match adjclose {
                    Some(adjusted) => at(adjusted, i)?,
                    None => close?,
                };
                Some(Bar {
                    date: trading_date(ts, gmtoffset)?,
                    open: at(&quote.open, i),
                    high: at(&quote.high, i),
                    low: at(&quote.low, i),
                    close: close.unwrap_or(adjusted_close),
                    adjusted_close,
                    volume: at(&quote.volume, i),
                })
            })
            .collect();

        if bars.is_empty() {
            return NoDataSnafu { symbol }.fail();
        }

        Ok(BarSeries {
            symbol: symbol.to_string(),
            timeframe,
            bars,
        })
    }
}
