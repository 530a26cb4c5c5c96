//! Bundled price history for a single symbol.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, warn};
use serde_json::Value;

use crate::errors::Result;
use crate::utils::time_utils::parse_date_lenient;

/// Keys checked, in order, for the price array.
const PRICE_KEYS: [&str; 4] = ["prices", "values", "closes", "series"];

/// Date-sorted close prices, one per date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalSeries {
    points: Vec<(NaiveDate, f64)>,
}

impl HistoricalSeries {
    /// Builds a series from arbitrary points. Later duplicates of a date win
    /// and non-finite prices are dropped.
    pub fn new<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let by_date: BTreeMap<NaiveDate, f64> = points
            .into_iter()
            .filter(|(_, price)| price.is_finite())
            .collect();
        Self {
            points: by_date.into_iter().collect(),
        }
    }

    /// Reads a JSON series document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let series = Self::from_json_str(&raw)?;
        debug!(
            "Loaded {} historical points from {}",
            series.len(),
            path.display()
        );
        Ok(series)
    }

    /// Parses a JSON series document. Only malformed JSON is an error; a
    /// document without a usable shape yields an empty series.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_json_value(&value))
    }

    /// Accepts `{"dates": [...], "prices": [...]}` where the price array may
    /// also be called `values`, `closes`, `series` or `data`.
    ///
    /// Arrays of different lengths are cut to the shorter one. Entries whose
    /// date or price cannot be read are skipped.
    pub fn from_json_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            warn!("Historical series document is not an object, ignoring it");
            return Self::default();
        };

        let dates = object.get("dates").and_then(Value::as_array);
        let prices = PRICE_KEYS
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_array))
            .or_else(|| object.get("data").and_then(Value::as_array));

        let (Some(dates), Some(prices)) = (dates, prices) else {
            warn!("Historical series document has no dates/prices arrays, ignoring it");
            return Self::default();
        };

        if dates.len() != prices.len() {
            debug!(
                "Historical series has {} dates but {} prices, truncating",
                dates.len(),
                prices.len()
            );
        }

        Self::new(dates.iter().zip(prices.iter()).filter_map(|(date, price)| {
            let date = date.as_str().and_then(parse_date_lenient)?;
            Some((date, parse_price(price)?))
        }))
    }

    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points strictly before `cutoff`.
    pub fn before(&self, cutoff: NaiveDate) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points
            .iter()
            .copied()
            .take_while(move |(date, _)| *date < cutoff)
    }
}

fn parse_price(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    price.is_finite().then_some(price)
}
