//! Charts and spreadsheet output for a completed return analysis.
//!
//! [`charts`] builds plotly figures from analytics results, [`render`] decides
//! where those figures go, and [`export`] lays results out as worksheet tables
//! and writes them with a [`export::ReportSink`].

pub mod charts;
pub mod export;
pub mod render;

pub use charts::Chart;
pub use export::{AnalysisReport, ReportSink, SheetTable, SinkError, xlsx::XlsxReportSink};
pub use render::{
    ChartRenderer, HtmlFileRenderer, InteractiveRenderer, NoopRenderer, RenderError, RenderMode,
};
