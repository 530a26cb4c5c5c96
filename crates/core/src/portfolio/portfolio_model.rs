//! Portfolio payload domain models.
//!
//! Field names follow the JSON document published by the data producer and
//! must not change: `updatedAt`, `data.dates`,
//! `data.portfolios.{Ari,Jai,Vai,IBOV}.{assets,assetPrices,portfolioReturn}`.

use std::fmt;
use std::io::Read;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// One observation per entry in `data.dates`. `None` is written as JSON `null`.
pub type Series = Vec<Option<f64>>;

/// The four tracked portfolios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PortfolioId {
    Ari,
    Jai,
    Vai,
    #[serde(rename = "IBOV")]
    Ibov,
}

impl PortfolioId {
    pub const ALL: [PortfolioId; 4] = [
        PortfolioId::Ari,
        PortfolioId::Jai,
        PortfolioId::Vai,
        PortfolioId::Ibov,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PortfolioId::Ari => "Ari",
            PortfolioId::Jai => "Jai",
            PortfolioId::Vai => "Vai",
            PortfolioId::Ibov => "IBOV",
        }
    }

    /// The benchmark index is not a player portfolio.
    pub fn is_benchmark(&self) -> bool {
        matches!(self, PortfolioId::Ibov)
    }
}

impl fmt::Display for PortfolioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-portfolio series, aligned with `data.dates`. Asset keys keep the
/// producer's roster order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    /// Inception-to-date return per asset.
    pub assets: IndexMap<String, Series>,
    /// Close price per asset.
    pub asset_prices: IndexMap<String, Series>,
    /// Equal-weighted inception-to-date return of the portfolio.
    pub portfolio_return: Series,
}

/// All four portfolios. Every identifier is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolios {
    #[serde(rename = "Ari")]
    pub ari: PortfolioEntry,
    #[serde(rename = "Jai")]
    pub jai: PortfolioEntry,
    #[serde(rename = "Vai")]
    pub vai: PortfolioEntry,
    #[serde(rename = "IBOV")]
    pub ibov: PortfolioEntry,
}

impl Portfolios {
    pub fn get(&self, id: PortfolioId) -> &PortfolioEntry {
        match id {
            PortfolioId::Ari => &self.ari,
            PortfolioId::Jai => &self.jai,
            PortfolioId::Vai => &self.vai,
            PortfolioId::Ibov => &self.ibov,
        }
    }

    pub fn get_mut(&mut self, id: PortfolioId) -> &mut PortfolioEntry {
        match id {
            PortfolioId::Ari => &mut self.ari,
            PortfolioId::Jai => &mut self.jai,
            PortfolioId::Vai => &mut self.vai,
            PortfolioId::Ibov => &mut self.ibov,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PortfolioId, &PortfolioEntry)> {
        PortfolioId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioData {
    pub dates: Vec<String>,
    pub portfolios: Portfolios,
}

/// The snapshot document displayed by the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPayload {
    pub updated_at: String,
    pub data: PortfolioData,
}

impl PortfolioPayload {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn portfolio(&self, id: PortfolioId) -> &PortfolioEntry {
        self.data.portfolios.get(id)
    }

    /// Last non-null portfolio return, if any.
    pub fn latest_return(&self, id: PortfolioId) -> Option<f64> {
        self.portfolio(id)
            .portfolio_return
            .iter()
            .rev()
            .find_map(|value| *value)
    }

    /// Player portfolios ordered by latest return, best first. Portfolios
    /// without any return sort last.
    pub fn standings(&self) -> Vec<(PortfolioId, Option<f64>)> {
        let mut rows: Vec<_> = PortfolioId::ALL
            .into_iter()
            .filter(|id| !id.is_benchmark())
            .map(|id| (id, self.latest_return(id)))
            .collect();
        rows.sort_by(|a, b| match (a.1, b.1) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        rows
    }
}
