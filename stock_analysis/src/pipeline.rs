//! The end-to-end analysis: fetch, transform, summarize, chart, export.
//!
//! Stages run strictly in order and any failure aborts the remaining ones,
//! so a report is never written from partial results.

use std::path::PathBuf;

use analysis_report::{
    AnalysisReport, ChartRenderer, ReportSink, XlsxReportSink, charts,
};
use anyhow::Context;
use market_data_ingestor::{PriceTable, fetch_prices, providers::DataProvider};
use return_analytics::{
    CorrelationMatrix, Frame, PortfolioPerformance, SharpeRatios, SummaryTable,
    correlation_matrix, daily_returns, evaluate_portfolio, sharpe_ratio, sharpe_ratios, summarize,
    volatility,
};
use tracing::info;

use crate::{config::AnalysisConfig, console};

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub prices: PriceTable,
    pub returns: Frame,
    pub volatility: Frame,
    pub summary: SummaryTable,
    pub correlation: CorrelationMatrix,
    pub portfolio: PortfolioPerformance,
    pub sharpe: SharpeRatios,
    pub portfolio_sharpe: f64,
    pub report_path: PathBuf,
}

pub async fn run(
    config: &AnalysisConfig,
    provider: &dyn DataProvider,
    renderer: &dyn ChartRenderer,
) -> anyhow::Result<AnalysisOutcome> {
    let prices = fetch_prices(provider, &config.price_request())
        .await
        .context("failed to fetch prices")?;

    let returns = daily_returns(&prices);
    info!(rows = returns.len(), "daily returns computed");

    let vol = volatility(&returns, config.volatility_window)
        .context("failed to compute rolling volatility")?;

    let summary = summarize(&returns);
    console::print_summary(&summary);
    renderer
        .render(&charts::returns_boxplot(&returns))
        .context("failed to render returns boxplot")?;

    renderer
        .render(&charts::price_chart(&Frame::from(&prices)))
        .context("failed to render price chart")?;
    renderer
        .render(&charts::volatility_chart(&vol, config.volatility_window))
        .context("failed to render volatility chart")?;

    let correlation = correlation_matrix(&returns);
    renderer
        .render(&charts::correlation_heatmap(&correlation))
        .context("failed to render correlation heatmap")?;

    let weights = config.portfolio_weights()?;
    let portfolio = evaluate_portfolio(&returns, weights.as_ref())
        .context("failed to evaluate portfolio")?;
    renderer
        .render(&charts::portfolio_vs_stocks_chart(
            &portfolio.cumulative,
            &portfolio.cumulative_by_ticker,
        ))
        .context("failed to render portfolio chart")?;

    let sharpe = sharpe_ratios(&returns, config.risk_free_rate)
        .context("failed to compute ticker Sharpe ratios")?;
    let portfolio_sharpe = sharpe_ratio(&portfolio.returns, config.risk_free_rate)
        .context("failed to compute portfolio Sharpe ratio")?;
    console::print_sharpe(&sharpe, portfolio_sharpe);
    renderer
        .render(&charts::sharpe_bar_chart(&sharpe, portfolio_sharpe))
        .context("failed to render Sharpe ratio chart")?;

    let report = AnalysisReport {
        returns: &returns,
        summary: &summary,
        sharpe: &sharpe,
        portfolio: &portfolio,
    };
    let report_path = XlsxReportSink::new(&config.output)
        .write(&report)
        .context("failed to export report")?;
    info!(path = %report_path.display(), "analysis complete");

    Ok(AnalysisOutcome {
        prices,
        returns,
        volatility: vol,
        summary,
        correlation,
        portfolio,
        sharpe,
        portfolio_sharpe,
        report_path,
    })
}
