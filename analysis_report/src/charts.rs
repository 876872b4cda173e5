//! Plotly figure builders for each stage of the analysis.
//!
//! Builders are pure: they only assemble a [`Plot`]. Displaying or saving the
//! figure is the job of a [`crate::render::ChartRenderer`].

use chrono::NaiveDate;
use plotly::{
    Bar, BoxPlot, HeatMap, Layout, Plot, Scatter,
    common::{Anchor, ColorScale, ColorScalePalette, DashType, Line, Marker, Mode, Title},
    layout::{Annotation, Axis, Legend},
};
use return_analytics::{CorrelationMatrix, Frame, PORTFOLIO_LABEL, Series, SharpeRatios};

/// A named figure, ready to render.
///
/// `name` is a filesystem-safe slug (e.g. `correlation_heatmap`).
pub struct Chart {
    name: &'static str,
    plot: Plot,
}

impl Chart {
    pub fn new(name: &'static str, plot: Plot) -> Self {
        Self { name, plot }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn plot(&self) -> &Plot {
        &self.plot
    }

    /// Serialized figure (traces and layout).
    pub fn to_json(&self) -> String {
        self.plot.to_json()
    }
}

fn date_labels(dates: &[NaiveDate]) -> Vec<String> {
    dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect()
}

fn line_layout(title: &str, y_label: &str) -> Layout {
    Layout::new()
        .title(Title::from(title))
        .x_axis(Axis::new().title(Title::from("Date")))
        .y_axis(Axis::new().title(Title::from(y_label)))
        .legend(Legend::new().title(Title::from("Ticker")))
}

fn line_chart(name: &'static str, frame: &Frame, title: &str, y_label: &str) -> Chart {
    let x = date_labels(frame.dates());
    let mut plot = Plot::new();
    for (ticker, values) in frame.iter_columns() {
        plot.add_trace(
            Scatter::new(x.clone(), values.to_vec())
                .name(ticker)
                .mode(Mode::Lines),
        );
    }
    plot.set_layout(line_layout(title, y_label));
    Chart::new(name, plot)
}

/// Adjusted closing prices, one line per ticker.
pub fn price_chart(prices: &Frame) -> Chart {
    line_chart(
        "prices",
        prices,
        "Stock Prices (Adjusted Close)",
        "Adjusted Closing Price",
    )
}

/// Rolling volatility, one line per ticker. Undefined head rows leave a gap.
pub fn volatility_chart(volatility: &Frame, window: usize) -> Chart {
    line_chart(
        "volatility",
        volatility,
        &format!("Stock Volatility ({window}-Day Rolling)"),
        "Volatility",
    )
}

/// Distribution of daily returns, one box per ticker.
pub fn returns_boxplot(returns: &Frame) -> Chart {
    let mut plot = Plot::new();
    for (ticker, values) in returns.iter_columns() {
        plot.add_trace(BoxPlot::new(values.to_vec()).name(ticker));
    }
    plot.set_layout(
        Layout::new()
            .title(Title::from("Boxplot of Daily Returns"))
            .y_axis(Axis::new().title(Title::from("Daily Return")))
            .show_legend(false),
    );
    Chart::new("returns_boxplot", plot)
}

/// Annotated correlation heatmap with a diverging colour scale.
///
/// Cells sit on integer coordinates so each one can carry a two-decimal
/// label; ticker names are applied as tick text.
pub fn correlation_heatmap(matrix: &CorrelationMatrix) -> Chart {
    let positions: Vec<f64> = (0..matrix.size()).map(|i| i as f64).collect();
    let labels = matrix.labels().to_vec();

    let heatmap = HeatMap::new(positions.clone(), positions.clone(), matrix.values().to_vec())
        .color_scale(ColorScale::Palette(ColorScalePalette::RdBu))
        .reverse_scale(true);

    let mut annotations = Vec::with_capacity(matrix.size() * matrix.size());
    for (i, row) in matrix.values().iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            annotations.push(
                Annotation::new()
                    .x(j as f64)
                    .y(i as f64)
                    .text(format!("{value:.2}"))
                    .show_arrow(false),
            );
        }
    }

    let ticks = |title: &str| {
        Axis::new()
            .title(Title::from(title))
            .tick_values(positions.clone())
            .tick_text(labels.clone())
    };

    let mut plot = Plot::new();
    plot.add_trace(heatmap);
    plot.set_layout(
        Layout::new()
            .title(Title::from("Correlation Heatmap of Daily Returns"))
            .x_axis(ticks("Ticker"))
            .y_axis(ticks("Ticker"))
            .annotations(annotations),
    );
    Chart::new("correlation_heatmap", plot)
}

/// Portfolio growth drawn solid over dashed per-ticker growth.
pub fn portfolio_vs_stocks_chart(portfolio: &Series, stocks: &Frame) -> Chart {
    let x = date_labels(portfolio.dates());
    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(x.clone(), portfolio.values().to_vec())
            .name(PORTFOLIO_LABEL)
            .mode(Mode::Lines)
            .line(Line::new().color("black").width(2.0)),
    );
    for (ticker, values) in stocks.iter_columns() {
        plot.add_trace(
            Scatter::new(date_labels(stocks.dates()), values.to_vec())
                .name(ticker)
                .mode(Mode::Lines)
                .line(Line::new().dash(DashType::Dash)),
        );
    }
    plot.set_layout(
        Layout::new()
            .title(Title::from("Portfolio vs Individual Stocks (Cumulative Returns)"))
            .x_axis(Axis::new().title(Title::from("Date")))
            .y_axis(Axis::new().title(Title::from("Cumulative Return"))),
    );
    Chart::new("portfolio_vs_stocks", plot)
}

/// One bar per ticker plus a final portfolio bar, each labelled with its
/// value to three decimals.
pub fn sharpe_bar_chart(ratios: &SharpeRatios, portfolio: f64) -> Chart {
    let mut labels: Vec<String> = ratios.iter().map(|(t, _)| t.to_string()).collect();
    let mut values: Vec<f64> = ratios.iter().map(|(_, v)| v).collect();
    labels.push(PORTFOLIO_LABEL.to_string());
    values.push(portfolio);

    let positions: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    let annotations = positions
        .iter()
        .zip(&values)
        .map(|(x, v)| {
            Annotation::new()
                .x(*x)
                .y(*v)
                .text(format!("{v:.3}"))
                .y_anchor(Anchor::Bottom)
                .show_arrow(false)
        })
        .collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Bar::new(positions.clone(), values)
            .name("Sharpe Ratio")
            .marker(
                Marker::new()
                    .color("skyblue")
                    .line(Line::new().color("black").width(1.0)),
            ),
    );
    plot.set_layout(
        Layout::new()
            .title(Title::from("Sharpe Ratios: Stocks vs Portfolio"))
            .x_axis(Axis::new().tick_values(positions).tick_text(labels))
            .y_axis(Axis::new().title(Title::from("Sharpe Ratio")))
            .annotations(annotations)
            .show_legend(false),
    );
    Chart::new("sharpe_ratios", plot)
}
