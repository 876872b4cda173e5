use analysis_report::NoopRenderer;
use async_trait::async_trait;
use chrono::NaiveDate;
use market_data_ingestor::{
    models::{
        bar::{Bar, BarSeries},
        request_params::BarsRequestParams,
    },
    providers::{DataProvider, ProviderError},
};
use stock_analysis::{AnalysisConfig, pipeline::run};

const PRICES: [f64; 5] = [100.0, 101.0, 99.0, 102.0, 105.0];

/// Serves the same five closes for every requested ticker, scaled per ticker.
struct FiveDayProvider;

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

#[async_trait]
impl DataProvider for FiveDayProvider {
    fn name(&self) -> &'static str {
        "five-day"
    }

    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        Ok(params
            .symbols
            .iter()
            .enumerate()
            .map(|(k, symbol)| BarSeries {
                symbol: symbol.clone(),
                timeframe: params.timeframe,
                bars: PRICES
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        // ticker k gets a small twist so the columns differ
                        let close = p * (k + 1) as f64 + if i == 3 { k as f64 } else { 0.0 };
                        Bar {
                            date: d(2 + i as u32),
                            open: None,
                            high: None,
                            low: None,
                            close,
                            adjusted_close: close,
                            volume: None,
                        }
                    })
                    .collect(),
            })
            .collect())
    }
}

struct FailingProvider;

#[async_trait]
impl DataProvider for FailingProvider {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn fetch_bars(&self, _params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        Err(ProviderError::NoData {
            symbol: "AAPL".into(),
        })
    }
}

fn config(output: std::path::PathBuf) -> AnalysisConfig {
    AnalysisConfig {
        start: d(1),
        end: d(31),
        volatility_window: 2,
        output,
        ..AnalysisConfig::default()
    }
}

#[tokio::test]
async fn runs_every_stage_and_exports() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config(tmp.path().join("stock_analysis.xlsx"));
    let renderer = NoopRenderer::new();

    let outcome = run(&cfg, &FiveDayProvider, &renderer).await.unwrap();

    assert_eq!(outcome.prices.len(), 5);
    assert_eq!(outcome.returns.len(), 4);
    let aapl = outcome.returns.column("AAPL").unwrap();
    assert!((aapl[1] - (99.0 / 101.0 - 1.0)).abs() < 1e-12);
    assert!((aapl[1] + 0.0198).abs() < 1e-4);

    let mean = aapl.iter().sum::<f64>() / 4.0;
    assert!((outcome.summary.get("AAPL").unwrap().mean - mean).abs() < 1e-12);

    assert_eq!(outcome.volatility.len(), 4);
    assert_eq!(outcome.correlation.size(), 3);
    assert_eq!(outcome.sharpe.len(), 3);
    assert!(outcome.portfolio_sharpe.is_finite());

    assert_eq!(
        renderer.rendered(),
        [
            "returns_boxplot",
            "prices",
            "volatility",
            "correlation_heatmap",
            "portfolio_vs_stocks",
            "sharpe_ratios",
        ]
    );
    assert_eq!(outcome.report_path, cfg.output);
    assert!(cfg.output.exists());
}

#[tokio::test]
async fn provider_failure_aborts_before_export() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config(tmp.path().join("never.xlsx"));
    let renderer = NoopRenderer::new();

    let err = run(&cfg, &FailingProvider, &renderer).await.unwrap_err();

    assert!(err.to_string().contains("fetch"));
    assert!(renderer.rendered().is_empty());
    assert!(!cfg.output.exists());
}

#[tokio::test]
async fn mismatched_weights_abort_before_export() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = config(tmp.path().join("never.xlsx"));
    cfg.weights = Some(vec![1.0]);
    let renderer = NoopRenderer::new();

    assert!(run(&cfg, &FiveDayProvider, &renderer).await.is_err());
    assert!(!cfg.output.exists());
}
