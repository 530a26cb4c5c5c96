use super::portfolio_model::PortfolioId;

/// Yahoo suffix for B3-listed tickers.
pub const B3_SYMBOL_SUFFIX: &str = ".SA";

/// Ticker whose pre-cutoff history comes from the bundled series instead of the provider.
pub const NATU3_TICKER: &str = "NATU3";

/// Provider history for NATU3 is used from this date on.
pub const NATU3_CUTOFF_DATE: &str = "2025-07-02";

const ARI_TICKERS: [&str; 3] = ["BBAS3", "VALE3", "EQTL3"];
const JAI_TICKERS: [&str; 3] = ["ITUB4", "LREN3", "SUZB3"];
const VAI_TICKERS: [&str; 3] = ["MDIA3", "NATU3", "FLRY3"];
const IBOV_TICKERS: [&str; 1] = ["^BVSP"];

/// Tickers held by each portfolio, in display order.
pub fn roster(id: PortfolioId) -> &'static [&'static str] {
    match id {
        PortfolioId::Ari => &ARI_TICKERS,
        PortfolioId::Jai => &JAI_TICKERS,
        PortfolioId::Vai => &VAI_TICKERS,
        PortfolioId::Ibov => &IBOV_TICKERS,
    }
}

/// Market data symbol for a roster ticker.
///
/// Player tickers trade on B3 and take the `.SA` suffix; the benchmark
/// index symbol is used as is.
pub fn provider_symbol(id: PortfolioId, ticker: &str) -> String {
    if id.is_benchmark() {
        ticker.to_string()
    } else {
        format!("{}{}", ticker.to_uppercase(), B3_SYMBOL_SUFFIX)
    }
}

/// Every provider symbol across all portfolios, sorted and deduplicated.
pub fn all_provider_symbols() -> Vec<String> {
    let mut symbols: Vec<String> = PortfolioId::ALL
        .into_iter()
        .flat_map(|id| roster(id).iter().map(move |t| provider_symbol(id, t)))
        .collect();
    symbols.sort();
    symbols.dedup();
    symbols
}
