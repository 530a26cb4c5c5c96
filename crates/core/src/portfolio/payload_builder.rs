//! Builds the published payload from a table of close prices.

use chrono::{NaiveDate, NaiveDateTime};
use log::info;

use super::portfolio_constants::{provider_symbol, NATU3_TICKER};
use super::portfolio_model::{PortfolioData, PortfolioId, PortfolioPayload, Portfolios};
use super::returns_calculator::calculate_portfolio_entry;
use crate::constants::DATE_FORMAT;
use crate::errors::{Result, ValidationError};
use crate::prices::{HistoricalSeries, PriceTable};
use crate::utils::time_utils::format_updated_at;

/// Inputs that shape a payload build besides the price table.
#[derive(Debug, Clone)]
pub struct PayloadBuildOptions {
    /// Rows after this date are dropped.
    pub contest_end: NaiveDate,
    /// Written to `updatedAt`.
    pub updated_at: NaiveDateTime,
}

/// Computes all four portfolios and assembles the payload.
///
/// The table is truncated to the contest end first, so `data.dates` and
/// every series share the same length.
pub fn build_payload(table: &PriceTable, options: &PayloadBuildOptions) -> Result<PortfolioPayload> {
    let mut table = table.clone();
    table.truncate_after(options.contest_end);

    let mut portfolios = Portfolios::default();
    for id in PortfolioId::ALL {
        *portfolios.get_mut(id) = calculate_portfolio_entry(&table, id)?;
    }

    let payload = PortfolioPayload {
        updated_at: format_updated_at(options.updated_at),
        data: PortfolioData {
            dates: table.date_strings(),
            portfolios,
        },
    };
    info!(
        "Built portfolio payload with {} dates (updated at {})",
        payload.data.dates.len(),
        payload.updated_at
    );
    Ok(payload)
}

/// Replaces provider history for NATU3 before `cutoff` with the bundled series.
pub fn apply_natu3_history(
    table: &mut PriceTable,
    history: &HistoricalSeries,
    cutoff: NaiveDate,
) -> usize {
    let symbol = provider_symbol(PortfolioId::Vai, NATU3_TICKER);
    table.splice_before(&symbol, history, cutoff)
}

/// Parses a `YYYY-MM-DD` constant such as a contest boundary.
pub fn parse_contest_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| ValidationError::DateTimeParse(e).into())
}
