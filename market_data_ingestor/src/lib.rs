//! Retrieval of historical adjusted closing prices from market data vendors.
//!
//! [`fetch::fetch_prices`] is the entry point: it takes any
//! [`providers::DataProvider`] and returns a date-aligned
//! [`models::price_table::PriceTable`].

pub mod fetch;
pub mod models;
pub mod providers;

pub use fetch::{FetchError, PriceRequest, fetch_prices};
pub use models::price_table::PriceTable;
