//! Plain-text tables for the terminal.

use prettytable::{Table, format, row};
use return_analytics::{SharpeRatios, SummaryTable};

pub fn summary_table(summary: &SummaryTable) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(row!["Ticker", "Mean", "Median", "Std Dev"]);
    for r in summary.rows() {
        table.add_row(row![
            r.ticker,
            r->format!("{:.6}", r.mean),
            r->format!("{:.6}", r.median),
            r->format!("{:.6}", r.std_dev)
        ]);
    }
    table
}

pub fn sharpe_table(ratios: &SharpeRatios) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(row!["Ticker", "Sharpe Ratio"]);
    for (ticker, ratio) in ratios.iter() {
        table.add_row(row![ticker, r->format!("{ratio:.6}")]);
    }
    table
}

pub fn print_summary(summary: &SummaryTable) {
    println!("\nSummary statistics of daily returns:");
    summary_table(summary).printstd();
}

pub fn print_sharpe(ratios: &SharpeRatios, portfolio: f64) {
    println!("\nSharpe Ratios (Individual Stocks):");
    sharpe_table(ratios).printstd();
    println!("\nSharpe Ratio (Portfolio): {portfolio:.6}");
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use return_analytics::{Frame, sharpe_ratios, summarize};

    use super::*;

    fn returns() -> Frame {
        let d0 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let dates = (0..3).map(|i| d0 + chrono::Days::new(i)).collect();
        Frame::new(
            dates,
            vec!["AAPL".into(), "MSFT".into()],
            vec![vec![0.01, 0.02, -0.01], vec![0.0, 0.01, 0.02]],
        )
        .unwrap()
    }

    #[test]
    fn summary_rows_render_with_six_decimals() {
        let text = summary_table(&summarize(&returns())).to_string();
        assert!(text.contains("AAPL"));
        assert!(text.contains("Std Dev"));
        assert!(text.contains("0.006667"));
    }

    #[test]
    fn sharpe_table_lists_every_ticker() {
        let ratios = sharpe_ratios(&returns(), 0.0).unwrap();
        let table = sharpe_table(&ratios);
        assert_eq!(table.len(), 2);
        assert!(table.to_string().contains("MSFT"));
    }
}
