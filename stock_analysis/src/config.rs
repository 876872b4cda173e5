//! Run configuration: defaults, TOML loading and validation.
//!
//! A config file only needs the keys it changes; everything else falls back
//! to [`AnalysisConfig::default`]. Dates are quoted ISO strings:
//!
//! ```toml
//! tickers = ["AAPL", "MSFT"]
//! start = "2021-01-01"
//! end = "2024-01-01"
//! weights = [0.6, 0.4]
//! provider = "alpaca"
//! interval = "1w"
//! render = "html"
//!
//! [alpaca]
//! feed = "iex"
//! ```

use std::{collections::HashSet, path::PathBuf};

use analysis_report::{RenderMode, export::DEFAULT_REPORT_FILE};
use anyhow::{Context, bail};
use chrono::NaiveDate;
use market_data_ingestor::{
    PriceRequest,
    models::{request_params::ProviderParams, timeframe::TimeFrame},
    providers::{
        ProviderKind, alpaca_rest::params::AlpacaBarsParams, yahoo::params::YahooChartParams,
    },
};
use return_analytics::{DEFAULT_RISK_FREE_RATE, DEFAULT_VOLATILITY_WINDOW, Weights};
use serde::{Deserialize, Serialize};
use toml::from_str;

pub const DEFAULT_TICKERS: [&str; 3] = ["AAPL", "MSFT", "GOOGL"];
pub const DEFAULT_CHART_DIR: &str = "charts";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub tickers: Vec<String>,
    /// First date requested (inclusive).
    pub start: NaiveDate,
    /// Last date requested (exclusive).
    pub end: NaiveDate,
    /// Portfolio weights in ticker order; equal weights when absent.
    pub weights: Option<Vec<f64>>,
    pub provider: ProviderKind,
    /// Bar interval, e.g. `1d`, `1w`, `1mo`.
    #[serde(with = "interval")]
    pub interval: TimeFrame,
    /// Options sent only when `provider = "alpaca"`.
    pub alpaca: AlpacaBarsParams,
    /// Options sent only when `provider = "yahoo"`.
    pub yahoo: YahooChartParams,
    pub volatility_window: usize,
    /// Daily risk-free rate.
    pub risk_free_rate: f64,
    pub output: PathBuf,
    pub render: RenderMode,
    /// Where `render = "html"` writes its files.
    pub chart_dir: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect(),
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2025, 7, 30).unwrap_or_default(),
            weights: None,
            provider: ProviderKind::default(),
            interval: TimeFrame::day(),
            alpaca: AlpacaBarsParams::default(),
            yahoo: YahooChartParams::default(),
            volatility_window: DEFAULT_VOLATILITY_WINDOW,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            output: PathBuf::from(DEFAULT_REPORT_FILE),
            render: RenderMode::default(),
            chart_dir: PathBuf::from(DEFAULT_CHART_DIR),
        }
    }
}

impl AnalysisConfig {
    /// Trims and upper-cases tickers.
    pub fn normalize(&mut self) {
        for t in &mut self.tickers {
            *t = t.trim().to_uppercase();
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tickers.is_empty() {
            bail!("at least one ticker is required");
        }
        let mut seen = HashSet::new();
        for t in &self.tickers {
            if t.is_empty() {
                bail!("ticker cannot be empty");
            }
            if !seen.insert(t.as_str()) {
                bail!("duplicate ticker: {t}");
            }
        }
        if self.start >= self.end {
            bail!("start {} must be before end {}", self.start, self.end);
        }
        if self.volatility_window < 2 {
            bail!(
                "volatility_window must be at least 2, got {}",
                self.volatility_window
            );
        }
        if !self.risk_free_rate.is_finite() {
            bail!("risk_free_rate must be a finite number");
        }
        if let Some(w) = &self.weights {
            if w.len() != self.tickers.len() {
                bail!("{} weights given for {} tickers", w.len(), self.tickers.len());
            }
            if w.iter().any(|x| !x.is_finite()) {
                bail!("weights must be finite numbers");
            }
        }
        Ok(())
    }

    pub fn price_request(&self) -> PriceRequest {
        let vendor = match self.provider {
            ProviderKind::Yahoo => ProviderParams::Yahoo(self.yahoo.clone()),
            ProviderKind::Alpaca => ProviderParams::Alpaca(self.alpaca.clone()),
        };
        PriceRequest::daily(self.tickers.clone(), self.start, self.end)
            .with_timeframe(self.interval)
            .with_provider_params(vendor)
    }

    pub fn portfolio_weights(&self) -> anyhow::Result<Option<Weights>> {
        self.weights
            .clone()
            .map(Weights::new)
            .transpose()
            .context("invalid portfolio weights")
    }
}

/// Parses a TOML config without validating it, for callers that layer more
/// settings on top first.
pub fn parse_config_str(toml_str: &str) -> anyhow::Result<AnalysisConfig> {
    from_str(toml_str).context("failed to parse config TOML")
}

pub fn parse_config_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<AnalysisConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    parse_config_str(&text)
}

/// Parses, normalizes and validates a TOML config.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<AnalysisConfig> {
    let mut cfg = parse_config_str(toml_str)?;
    cfg.normalize();
    cfg.validate().context("invalid configuration")?;
    Ok(cfg)
}

pub fn load_config_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<AnalysisConfig> {
    let mut cfg = parse_config_path(path)?;
    cfg.normalize();
    cfg.validate().context("invalid configuration")?;
    Ok(cfg)
}

/// `TimeFrame` as its compact string form (`1d`, `3mo`).
mod interval {
    use market_data_ingestor::models::timeframe::TimeFrame;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(tf: &TimeFrame, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(tf)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<TimeFrame, D::Error> {
        let s = String::deserialize(de)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use market_data_ingestor::providers::alpaca_rest::params::Feed;

    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.tickers, ["AAPL", "MSFT", "GOOGL"]);
        assert_eq!(cfg.start, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(cfg.end, NaiveDate::from_ymd_opt(2025, 7, 30).unwrap());
        assert_eq!(cfg.volatility_window, 30);
        assert_eq!(cfg.risk_free_rate, 0.02 / 252.0);
        assert_eq!(cfg.output, PathBuf::from("stock_analysis.xlsx"));
        assert_eq!(cfg.provider, ProviderKind::Yahoo);
        assert_eq!(cfg.render, RenderMode::Interactive);
        assert_eq!(cfg.interval, TimeFrame::day());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = load_config_str(
            r#"
            tickers = [" nvda ", "amd"]
            start = "2022-01-03"
            weights = [0.7, 0.3]
            render = "none"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.tickers, ["NVDA", "AMD"]);
        assert_eq!(cfg.start, NaiveDate::from_ymd_opt(2022, 1, 3).unwrap());
        assert_eq!(cfg.end, AnalysisConfig::default().end);
        assert_eq!(cfg.render, RenderMode::None);
        assert_eq!(
            cfg.portfolio_weights().unwrap().unwrap().as_slice(),
            &[0.7, 0.3]
        );
    }

    #[test]
    fn interval_and_vendor_tables_shape_the_request() {
        let cfg = load_config_str(
            r#"
            provider = "alpaca"
            interval = "1mo"

            [alpaca]
            feed = "iex"

            [yahoo]
            events = "div"
            "#,
        )
        .unwrap();
        let req = cfg.price_request();
        assert_eq!(req.timeframe, TimeFrame::months(1).unwrap());
        assert_eq!(
            req.provider_specific,
            ProviderParams::Alpaca(AlpacaBarsParams {
                feed: Some(Feed::Iex),
                ..Default::default()
            })
        );

        let mut yahoo = cfg.clone();
        yahoo.provider = ProviderKind::Yahoo;
        assert!(matches!(
            yahoo.price_request().provider_specific,
            ProviderParams::Yahoo(ref p) if p.events.as_deref() == Some("div")
        ));
    }

    #[test]
    fn bad_interval_is_a_parse_error() {
        let err = load_config_str("interval = \"5m\"").unwrap_err();
        assert!(format!("{err:#}").contains("timeframe unit"));
        assert!(load_config_str("[alpaca]\nfeeed = \"iex\"").is_err());
    }

    #[test]
    fn parse_only_skips_validation() {
        let cfg = parse_config_str("weights = [0.5, 0.5]").unwrap();
        assert_eq!(cfg.weights, Some(vec![0.5, 0.5]));
        assert!(cfg.validate().is_err());
        assert!(load_config_str("weights = [0.5, 0.5]").is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(load_config_str("tickerz = [\"AAPL\"]").is_err());
    }

    #[test]
    fn validation_failures() {
        let base = AnalysisConfig::default();

        let mut cfg = base.clone();
        cfg.tickers.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = base.clone();
        cfg.tickers.push("AAPL".into());
        assert!(cfg.validate().unwrap_err().to_string().contains("duplicate"));

        let mut cfg = base.clone();
        cfg.end = cfg.start;
        assert!(cfg.validate().is_err());

        let mut cfg = base.clone();
        cfg.volatility_window = 1;
        assert!(cfg.validate().is_err());

        let mut cfg = base.clone();
        cfg.weights = Some(vec![0.5, 0.5]);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.toml");
        std::fs::write(&path, "provider = \"alpaca\"\nvolatility_window = 20\n").unwrap();
        let cfg = load_config_path(&path).unwrap();
        assert_eq!(cfg.provider, ProviderKind::Alpaca);
        assert_eq!(cfg.volatility_window, 20);
    }
}
