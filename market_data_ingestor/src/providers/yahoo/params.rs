use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    models::{
        request_params::{BarsRequestParams, ProviderParams},
        timeframe::{TimeFrame, TimeFrameUnit},
    },
    providers::{ProviderError, ValidationSnafu},
};

/// Yahoo-specific parameters for a chart request.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct YahooChartParams {
    /// Corporate events to include, comma separated. Defaults to `div,splits`,
    /// which Yahoo needs to compute adjusted closes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<String>,
    /// Include pre/post market data. Irrelevant for daily bars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_pre_post: Option<bool>,
}

/// Maps a [`TimeFrame`] onto a Yahoo `interval` value.
pub fn interval_for(timeframe: &TimeFrame) -> Result<&'static str, ProviderError> {
    match (timeframe.unit, timeframe.amount) {
        (TimeFrameUnit::Day, 1) => Ok("1d"),
        (TimeFrameUnit::Week, 1) => Ok("1wk"),
        (TimeFrameUnit::Month, 1) => Ok("1mo"),
        (TimeFrameUnit::Month, 3) => Ok("3mo"),
        _ => ValidationSnafu {
            message: format!("Yahoo does not support a {timeframe} interval"),
        }
        .fail(),
    }
}

/// Unix seconds at midnight UTC of `date`.
fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// Builds the query string for one symbol's chart request.
pub fn construct_params(params: &BarsRequestParams) -> Result<Vec<(String, String)>, ProviderError> {
    let interval = interval_for(&params.timeframe)?;
    let specific = match &params.provider_specific {
        ProviderParams::Yahoo(p) => p.clone(),
        _ => YahooChartParams::default(),
    };

    let mut query = vec![
        ("period1".to_string(), unix_midnight(params.start).to_string()),
        ("period2".to_string(), unix_midnight(params.end).to_string()),
        ("interval".to_string(), interval.to_string()),
        (
            "events".to_string(),
            specific.events.unwrap_or_else(|| "div,splits".to_string()),
        ),
        ("includeAdjustedClose".to_string(), "true".to_string()),
    ];
    if let Some(pre_post) = specific.include_pre_post {
        query.push(("includePrePost".to_string(), pre_post.to_string()));
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BarsRequestParams {
        BarsRequestParams {
            symbols: vec!["AAPL".into()],
            timeframe: TimeFrame::day(),
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
            provider_specific: ProviderParams::None,
        }
    }

    #[test]
    fn builds_period_bounds_at_utc_midnight() {
        let query = construct_params(&request()).unwrap();
        let get = |k: &str| query.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
        assert_eq!(get("period1"), Some("1577836800"));
        assert_eq!(get("period2"), Some("1577923200"));
        assert_eq!(get("interval"), Some("1d"));
        assert_eq!(get("events"), Some("div,splits"));
        assert_eq!(get("includePrePost"), None);
    }

    #[test]
    fn rejects_unsupported_interval() {
        let mut req = request();
        req.timeframe = TimeFrame::months(6).unwrap();
        let err = construct_params(&req).unwrap_err();
        assert!(err.to_string().contains("6mo"));
    }
}
