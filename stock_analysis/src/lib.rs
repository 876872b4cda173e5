//! Stock return analysis: fetch prices, compute statistics, chart them and
//! export a spreadsheet report.
//!
//! The `stock-analysis` binary wires [`config::AnalysisConfig`] to
//! [`pipeline::run`]; library users can call the pipeline directly with any
//! provider and renderer.

pub mod cli;
pub mod config;
pub mod console;
pub mod pipeline;

pub use config::AnalysisConfig;
pub use pipeline::{AnalysisOutcome, run};
