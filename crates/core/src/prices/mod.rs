//! Prices module - close-price table and bundled historical series used to
//! build the portfolio payload.

mod historical_series;
mod price_table;

pub use historical_series::HistoricalSeries;
pub use price_table::PriceTable;
