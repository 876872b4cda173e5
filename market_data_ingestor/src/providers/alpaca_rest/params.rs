use serde::{Deserialize, Serialize};

use crate::{
    models::{
        request_params::{BarsRequestParams, ProviderParams},
        timeframe::{TimeFrame, TimeFrameUnit},
    },
    providers::{ProviderError, ValidationSnafu},
};

/// Specifies the corporate action adjustment for stock data.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    Raw,
    Split,
    Dividend,
    #[default]
    All,
}

/// Specifies the source feed for stock data.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    #[default]
    Sip,
    Iex,
    Otc,
}

/// Specifies the sort order for the bars.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

/// Alpaca-specific parameters for a bars request.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AlpacaBarsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<Adjustment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed: Option<Feed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
}

/// Page size used when the caller does not set one; Alpaca's maximum.
const DEFAULT_LIMIT: u32 = 10_000;

/// Validates the timeframe against Alpaca's rules and renders it (e.g. `1Day`).
pub fn validate_timeframe(timeframe: &TimeFrame) -> Result<String, ProviderError> {
    match timeframe.unit {
        TimeFrameUnit::Day => Ok(format!("{}Day", timeframe.amount)),
        TimeFrameUnit::Week => Ok(format!("{}Week", timeframe.amount)),
        TimeFrameUnit::Month if [1, 2, 3, 4, 6, 12].contains(&timeframe.amount) => {
            Ok(format!("{}Month", timeframe.amount))
        }
        TimeFrameUnit::Month => ValidationSnafu {
            message: format!("Alpaca does not support a {timeframe} timeframe"),
        }
        .fail(),
    }
}

fn as_query_value<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

/// Builds the query string for a bars request (without the page token).
///
/// The end date is exclusive: Alpaca stamps daily bars at midnight New York
/// time, which is after `end` at 00:00 UTC.
pub fn construct_params(params: &BarsRequestParams) -> Result<Vec<(String, String)>, ProviderError> {
    let timeframe = validate_timeframe(&params.timeframe)?;
    let specific = match &params.provider_specific {
        ProviderParams::Alpaca(p) => p.clone(),
        _ => AlpacaBarsParams::default(),
    };

    let mut query = vec![
        ("symbols".to_string(), params.symbols.join(",")),
        ("timeframe".to_string(), timeframe),
        ("start".to_string(), format!("{}T00:00:00Z", params.start)),
        ("end".to_string(), format!("{}T00:00:00Z", params.end)),
        (
            "adjustment".to_string(),
            as_query_value(&specific.adjustment.unwrap_or_default()),
        ),
        (
            "limit".to_string(),
            specific.limit.unwrap_or(DEFAULT_LIMIT).to_string(),
        ),
    ];
    if let Some(feed) = &specific.feed {
        query.push(("feed".to_string(), as_query_value(feed)));
    }
    if let Some(currency) = specific.currency {
        query.push(("currency".to_string(), currency));
    }
    if let Some(sort) = &specific.sort {
        query.push(("sort".to_string(), as_query_value(sort)));
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn request(provider_specific: ProviderParams) -> BarsRequestParams {
        BarsRequestParams {
            symbols: vec!["AAPL".into(), "MSFT".into()],
            timeframe: TimeFrame::day(),
            start: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            provider_specific,
        }
    }

    fn get<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
        query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn defaults_to_fully_adjusted_daily_bars() {
        let query = construct_params(&request(ProviderParams::None)).unwrap();
        assert_eq!(get(&query, "symbols"), Some("AAPL,MSFT"));
        assert_eq!(get(&query, "timeframe"), Some("1Day"));
        assert_eq!(get(&query, "start"), Some("2024-01-02T00:00:00Z"));
        assert_eq!(get(&query, "end"), Some("2024-02-01T00:00:00Z"));
        assert_eq!(get(&query, "adjustment"), Some("all"));
        assert_eq!(get(&query, "limit"), Some("10000"));
        assert_eq!(get(&query, "feed"), None);
    }

    #[test]
    fn provider_specific_options_are_forwarded() {
        let query = construct_params(&request(ProviderParams::Alpaca(AlpacaBarsParams {
            adjustment: Some(Adjustment::Split),
            feed: Some(Feed::Iex),
            sort: Some(Sort::Desc),
            limit: Some(5),
            ..Default::default()
        })))
        .unwrap();
        assert_eq!(get(&query, "adjustment"), Some("split"));
        assert_eq!(get(&query, "feed"), Some("iex"));
        assert_eq!(get(&query, "sort"), Some("desc"));
        assert_eq!(get(&query, "limit"), Some("5"));
    }

    #[test]
    fn month_amounts_follow_alpaca_rules() {
        assert_eq!(
            validate_timeframe(&TimeFrame::months(3).unwrap()).unwrap(),
            "3Month"
        );
        // 4 months is valid for Alpaca but not a TimeFrame we can construct,
        // so build the struct directly.
        let four = TimeFrame {
            amount: 4,
            unit: TimeFrameUnit::Month,
        };
        assert!(validate_timeframe(&four).is_ok());
        let five = TimeFrame {
            amount: 5,
            unit: TimeFrameUnit::Month,
        };
        assert!(validate_timeframe(&five).is_err());
    }
}
