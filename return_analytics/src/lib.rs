//! Return, volatility, correlation, portfolio and risk-ratio statistics over
//! adjusted closing prices.
//!
//! Every function here is pure: inputs are borrowed, results are fresh values.

pub mod correlation;
pub mod errors;
pub mod frame;
pub mod portfolio;
pub mod returns;
pub mod sharpe;
pub mod stats;
pub mod summary;

pub use correlation::{CorrelationMatrix, correlation_matrix};
pub use errors::AnalyticsError;
pub use frame::{Frame, Series};
pub use portfolio::{
    PORTFOLIO_LABEL, PortfolioPerformance, Weights, cumulative_product, evaluate_portfolio,
};
pub use returns::{DEFAULT_VOLATILITY_WINDOW, daily_returns, volatility};
pub use sharpe::{
    DEFAULT_RISK_FREE_RATE, SharpeRatios, TRADING_DAYS_PER_YEAR, sharpe_ratio, sharpe_ratios,
};
pub use summary::{SummaryRow, SummaryTable, summarize};
