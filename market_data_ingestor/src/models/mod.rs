pub mod bar;
pub mod price_table;
pub mod request_params;
pub mod timeframe;
