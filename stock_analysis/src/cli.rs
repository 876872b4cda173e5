//! Command-line flags layered over the file configuration.

use std::path::PathBuf;

use analysis_report::RenderMode;
use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use market_data_ingestor::{models::timeframe::TimeFrame, providers::ProviderKind};

use crate::config::{AnalysisConfig, parse_config_path};

#[derive(Debug, Parser)]
#[command(version, about = "Stock return analysis and spreadsheet report")]
pub struct Cli {
    /// TOML config file; flags below override its values.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Comma-separated tickers, e.g. AAPL,MSFT,GOOGL.
    #[arg(long, value_delimiter = ',')]
    pub tickers: Option<Vec<String>>,

    /// First date (YYYY-MM-DD, inclusive).
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last date (YYYY-MM-DD, exclusive).
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Comma-separated portfolio weights in ticker order.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub weights: Option<Vec<f64>>,

    /// Data provider: yahoo or alpaca.
    #[arg(long)]
    pub provider: Option<ProviderKind>,

    /// Bar interval: 1d, 1w, 1mo, 3mo.
    #[arg(long)]
    pub interval: Option<TimeFrame>,

    /// Rolling volatility window in trading days.
    #[arg(long)]
    pub window: Option<usize>,

    /// Daily risk-free rate.
    #[arg(long, allow_negative_numbers = true)]
    pub risk_free_rate: Option<f64>,

    /// Spreadsheet path.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Chart output: interactive, html or none.
    #[arg(long)]
    pub render: Option<RenderMode>,

    /// Directory for HTML charts.
    #[arg(long, value_name = "DIR")]
    pub chart_dir: Option<PathBuf>,
}

impl Cli {
    /// Parses `--config` (or defaults), applies every flag that was given and
    /// validates the merged result once.
    pub fn into_config(self) -> anyhow::Result<AnalysisConfig> {
        let mut cfg = match &self.config {
            Some(path) => parse_config_path(path)?,
            None => AnalysisConfig::default(),
        };
        self.apply(&mut cfg);
        cfg.normalize();
        cfg.validate().context("invalid configuration")?;
        Ok(cfg)
    }

    fn apply(self, cfg: &mut AnalysisConfig) {
        if let Some(v) = self.tickers {
            cfg.tickers = v;
        }
        if let Some(v) = self.start {
            cfg.start = v;
        }
        if let Some(v) = self.end {
            cfg.end = v;
        }
        if let Some(v) = self.weights {
            cfg.weights = Some(v);
        }
        if let Some(v) = self.provider {
            cfg.provider = v;
        }
        if let Some(v) = self.interval {
            cfg.interval = v;
        }
        if let Some(v) = self.window {
            cfg.volatility_window = v;
        }
        if let Some(v) = self.risk_free_rate {
            cfg.risk_free_rate = v;
        }
        if let Some(v) = self.output {
            cfg.output = v;
        }
        if let Some(v) = self.render {
            cfg.render = v;
        }
        if let Some(v) = self.chart_dir {
            cfg.chart_dir = v;
        }
    }
}
