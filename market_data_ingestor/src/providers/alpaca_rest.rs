//! Alpaca Market Data v2 REST API (`/v2/stocks/bars`).
//!
//! Requires `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY`. Bars are requested
//! with `adjustment=all`, so the returned close is already dividend and
//! split adjusted.

pub mod params;
pub mod provider;
pub mod response;

pub use params::AlpacaBarsParams;
pub use provider::AlpacaProvider;
