use log::debug;

use super::portfolio_constants::{provider_symbol, roster};
use super::portfolio_model::{PortfolioEntry, PortfolioId, Series};
use crate::errors::{CalculatorError, Result};
use crate::prices::PriceTable;

/// Carries the last observed price forward over gaps. Leading gaps stay empty.
pub fn forward_fill(prices: &[Option<f64>]) -> Series {
    let mut last = None;
    prices
        .iter()
        .map(|price| {
            if let Some(p) = price.filter(|p| p.is_finite()) {
                last = Some(p);
            }
            last
        })
        .collect()
}

/// Return since the first row for every row of an already forward-filled
/// series.
///
/// The inception price is the first row. When it is missing or zero no
/// return can be computed and the whole series is empty.
pub fn inception_to_date(prices: &[Option<f64>]) -> Series {
    let inception = prices.first().copied().flatten().filter(|p| *p != 0.0);
    prices
        .iter()
        .map(|price| {
            let base = inception?;
            let r = (*price)? / base - 1.0;
            r.is_finite().then_some(r)
        })
        .collect()
}

/// Equal-weighted average of the asset returns available on each row.
pub fn equal_weight(asset_returns: &[Series], rows: usize) -> Series {
    (0..rows)
        .map(|row| {
            let (sum, count) = asset_returns
                .iter()
                .filter_map(|series| series.get(row).copied().flatten())
                .fold((0.0, 0usize), |(sum, count), r| (sum + r, count + 1));
            (count > 0).then(|| sum / count as f64)
        })
        .collect()
}

/// Computes prices, per-asset returns and the portfolio return for one
/// portfolio from the close-price table.
pub fn calculate_portfolio_entry(table: &PriceTable, id: PortfolioId) -> Result<PortfolioEntry> {
    if table.is_empty() {
        return Err(CalculatorError::EmptyPriceTable.into());
    }

    let mut entry = PortfolioEntry::default();
    let mut asset_returns = Vec::with_capacity(roster(id).len());

    for ticker in roster(id) {
        let symbol = provider_symbol(id, ticker);
        let column = table
            .column(&symbol)
            .ok_or_else(|| CalculatorError::MissingSymbol(symbol.clone()))?;

        let prices = forward_fill(column);
        let returns = inception_to_date(&prices);

        asset_returns.push(returns.clone());
        entry.assets.insert(ticker.to_string(), returns);
        entry.asset_prices.insert(ticker.to_string(), prices);
    }

    entry.portfolio_return = equal_weight(&asset_returns, table.len());
    debug!(
        "Calculated {} rows for portfolio {} ({} assets)",
        table.len(),
        id,
        asset_returns.len()
    );
    Ok(entry)
}
