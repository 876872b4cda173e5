//! Spreadsheet report: six tables laid out from the analysis results.
//!
//! [`build_workbook_layout`] is pure and decides what every sheet contains;
//! a [`ReportSink`] decides how those tables are persisted.

pub mod xlsx;

use std::path::PathBuf;

use chrono::NaiveDate;
use return_analytics::{Frame, PortfolioPerformance, Series, SharpeRatios, SummaryTable};
use snafu::{Backtrace, Snafu};

pub const DEFAULT_REPORT_FILE: &str = "stock_analysis.xlsx";

pub const DATE_HEADER: &str = "Date";
pub const TICKER_HEADER: &str = "Ticker";

/// Sheet names in workbook order.
pub const SHEET_NAMES: [&str; 6] = [
    "Daily Returns",
    "Summary Stats",
    "Sharpe Ratios",
    "Portfolio Returns",
    "Cumulative Portfolio",
    "Cumulative Stocks",
];

/// Everything the report exports, borrowed from the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisReport<'a> {
    pub returns: &'a Frame,
    pub summary: &'a SummaryTable,
    pub sharpe: &'a SharpeRatios,
    pub portfolio: &'a PortfolioPerformance,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Date(NaiveDate),
    Text(String),
    /// `NaN` is written as an empty cell.
    Number(f64),
}

impl Cell {
    /// Text as it appears in the sheet; used for column sizing.
    pub fn rendered(&self) -> String {
        match self {
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.is_finite() => n.to_string(),
            Cell::Number(_) => String::new(),
        }
    }
}

/// One worksheet: a header row, then rows whose first cell is the index
/// (a date or a ticker).
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetTable {
    /// Width of each column: longest rendered value, header included, plus 2.
    pub fn column_widths(&self) -> Vec<f64> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (col, cell) in row.iter().enumerate() {
                let len = cell.rendered().chars().count();
                match widths.get_mut(col) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths.into_iter().map(|w| (w + 2) as f64).collect()
    }
}

fn frame_sheet(name: &str, frame: &Frame) -> SheetTable {
    let mut header = vec![DATE_HEADER.to_string()];
    header.extend(frame.columns().iter().cloned());

    let rows = frame
        .dates()
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let mut row = vec![Cell::Date(*date)];
            row.extend(frame.row(i).into_iter().map(Cell::Number));
            row
        })
        .collect();

    SheetTable {
        name: name.to_string(),
        header,
        rows,
    }
}

fn series_sheet(name: &str, column: &str, series: &Series) -> SheetTable {
    SheetTable {
        name: name.to_string(),
        header: vec![DATE_HEADER.to_string(), column.to_string()],
        rows: series
            .dates()
            .iter()
            .zip(series.values())
            .map(|(d, v)| vec![Cell::Date(*d), Cell::Number(*v)])
            .collect(),
    }
}

fn summary_sheet(name: &str, summary: &SummaryTable) -> SheetTable {
    let mut header = vec![TICKER_HEADER.to_string()];
    header.extend(SummaryTable::HEADERS.iter().map(|h| h.to_string()));

    let rows = summary
        .rows()
        .iter()
        .map(|r| {
            let mut row = vec![Cell::Text(r.ticker.clone())];
            row.extend(r.values().into_iter().map(Cell::Number));
            row
        })
        .collect();

    SheetTable {
        name: name.to_string(),
        header,
        rows,
    }
}

fn sharpe_sheet(name: &str, sharpe: &SharpeRatios) -> SheetTable {
    SheetTable {
        name: name.to_string(),
        header: vec![TICKER_HEADER.to_string(), "Sharpe Ratio".to_string()],
        rows: sharpe
            .iter()
            .map(|(t, v)| vec![Cell::Text(t.to_string()), Cell::Number(v)])
            .collect(),
    }
}

/// Lays the report out as six sheets in [`SHEET_NAMES`] order.
///
/// The Sharpe sheet lists tickers only; the portfolio ratio is shown in the
/// console and chart.
pub fn build_workbook_layout(report: &AnalysisReport<'_>) -> Vec<SheetTable> {
    let [daily, summary, sharpe, portfolio, cumulative, stocks] = SHEET_NAMES;
    vec![
        frame_sheet(daily, report.returns),
        summary_sheet(summary, report.summary),
        sharpe_sheet(sharpe, report.sharpe),
        series_sheet(portfolio, "Portfolio Returns", &report.portfolio.returns),
        series_sheet(cumulative, "Cumulative Portfolio", &report.portfolio.cumulative),
        frame_sheet(stocks, &report.portfolio.cumulative_by_ticker),
    ]
}

/// Errors raised while persisting a report.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// A sheet could not be populated.
    #[snafu(display("Failed to write sheet '{sheet}': {source}"))]
    Worksheet {
        sheet: String,
        source: rust_xlsxwriter::XlsxError,
        backtrace: Backtrace,
    },

    /// The finished workbook could not be saved.
    #[snafu(display("Failed to save workbook to {}: {source}", path.display()))]
    Save {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
        backtrace: Backtrace,
    },
}

/// Destination for a finished report.
pub trait ReportSink {
    /// Whatever identifies the written report, e.g. its path.
    type Output;

    fn write(&self, report: &AnalysisReport<'_>) -> Result<Self::Output, SinkError>;
}
