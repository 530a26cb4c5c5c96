//! Daily close prices keyed by date and symbol.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::debug;

use super::HistoricalSeries;
use crate::utils::time_utils::format_date;

/// A dense date × symbol grid of close prices.
///
/// Rows are unique dates in ascending order. Every column has one slot per
/// row; `None` marks a missing observation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_observations<I, S>(observations: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, S, f64)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (date, symbol, price) in observations {
            table.upsert(date, symbol.as_ref(), price);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn date_strings(&self) -> Vec<String> {
        self.dates.iter().copied().map(format_date).collect()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, symbol: &str) -> Option<&[Option<f64>]> {
        self.columns.get(symbol).map(Vec::as_slice)
    }

    pub fn get(&self, date: NaiveDate, symbol: &str) -> Option<f64> {
        let row = self.dates.binary_search(&date).ok()?;
        self.columns.get(symbol)?.get(row).copied().flatten()
    }

    /// Sets the close for `symbol` on `date`, adding the row and column when
    /// needed. Non-finite prices are stored as missing.
    pub fn upsert(&mut self, date: NaiveDate, symbol: &str, price: f64) {
        let row = self.ensure_row(date);
        let rows = self.dates.len();
        let column = self
            .columns
            .entry(symbol.to_string())
            .or_insert_with(|| vec![None; rows]);
        column[row] = price.is_finite().then_some(price);
    }

    /// Overwrites `symbol` with the points of `series` dated strictly before
    /// `cutoff`. Later dates keep their provider values. Returns the number of
    /// points written.
    pub fn splice_before(
        &mut self,
        symbol: &str,
        series: &HistoricalSeries,
        cutoff: NaiveDate,
    ) -> usize {
        let mut written = 0;
        for (date, price) in series.before(cutoff) {
            self.upsert(date, symbol, price);
            written += 1;
        }
        debug!(
            "Spliced {} historical points into {} before {}",
            written, symbol, cutoff
        );
        written
    }

    /// Drops every row dated after `end`. Returns the number of rows removed.
    pub fn truncate_after(&mut self, end: NaiveDate) -> usize {
        let keep = self.dates.partition_point(|date| *date <= end);
        let removed = self.dates.len() - keep;
        if removed > 0 {
            self.dates.truncate(keep);
            for column in self.columns.values_mut() {
                column.truncate(keep);
            }
        }
        removed
    }

    fn ensure_row(&mut self, date: NaiveDate) -> usize {
        match self.dates.binary_search(&date) {
            Ok(row) => row,
            Err(row) => {
                self.dates.insert(row, date);
                for column in self.columns.values_mut() {
                    column.insert(row, None);
                }
                row
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_upsert_keeps_rows_sorted_and_columns_aligned() {
        let mut table = PriceTable::new();
        table.upsert(d(2025, 1, 3), "VALE3.SA", 55.0);
        table.upsert(d(2025, 1, 2), "BBAS3.SA", 27.0);
        table.upsert(d(2025, 1, 3), "BBAS3.SA", 27.5);

        assert_eq!(table.dates(), &[d(2025, 1, 2), d(2025, 1, 3)]);
        assert_eq!(table.column("BBAS3.SA").unwrap(), &[Some(27.0), Some(27.5)]);
        assert_eq!(table.column("VALE3.SA").unwrap(), &[None, Some(55.0)]);
        assert_eq!(table.get(d(2025, 1, 2), "VALE3.SA"), None);
        assert_eq!(table.get(d(2025, 1, 3), "VALE3.SA"), Some(55.0));
    }

    #[test]
    fn test_non_finite_prices_are_missing() {
        let mut table = PriceTable::new();
        table.upsert(d(2025, 1, 2), "^BVSP", f64::NAN);
        assert_eq!(table.column("^BVSP").unwrap(), &[None]);
    }

    #[test]
    fn test_splice_before_only_touches_pre_cutoff_dates() {
        let mut table = PriceTable::from_observations(vec![
            (d(2025, 7, 1), "NATU3.SA", 9.0),
            (d(2025, 7, 2), "NATU3.SA", 12.0),
        ]);
        let series = HistoricalSeries::new(vec![
            (d(2025, 6, 30), 10.0),
            (d(2025, 7, 1), 10.5),
            (d(2025, 7, 2), 99.0),
        ]);

        let written = table.splice_before("NATU3.SA", &series, d(2025, 7, 2));

        assert_eq!(written, 2);
        assert_eq!(
            table.column("NATU3.SA").unwrap(),
            &[Some(10.0), Some(10.5), Some(12.0)]
        );
    }

    #[test]
    fn test_truncate_after_is_inclusive() {
        let mut table = PriceTable::from_observations(vec![
            (d(2025, 12, 12), "^BVSP", 1.0),
            (d(2025, 12, 13), "^BVSP", 2.0),
            (d(2025, 12, 15), "^BVSP", 3.0),
        ]);
        assert_eq!(table.truncate_after(d(2025, 12, 13)), 1);
        assert_eq!(table.date_strings(), vec!["2025-12-12", "2025-12-13"]);
        assert_eq!(table.column("^BVSP").unwrap().len(), 2);
        assert_eq!(table.truncate_after(d(2025, 12, 13)), 0);
    }
}
