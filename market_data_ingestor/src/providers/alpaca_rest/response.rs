use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::models::bar::Bar;

#[derive(Deserialize, Debug)]
pub struct AlpacaBar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: f64,
    #[serde(rename = "n")]
    pub trade_count: u64,
    #[serde(rename = "vw")]
    pub vwap: f64,
}

#[derive(Deserialize, Debug)]
pub struct AlpacaResponse {
    /// `null` when no symbol has bars in the requested page.
    #[serde(default)]
    pub bars: Option<IndexMap<String, Vec<AlpacaBar>>>,
    pub next_page_token: Option<String>,
}

impl From<AlpacaBar> for Bar {
    /// With `adjustment=all` the close is already the adjusted close.
    fn from(ab: AlpacaBar) -> Self {
        Bar {
            date: ab.timestamp.date_naive(),
            open: Some(ab.open),
            high: Some(ab.high),
            low: Some(ab.low),
            close: ab.close,
            adjusted_close: ab.close,
            volume: Some(ab.volume),
        }
    }
}
