//! Integration tests for building the published payload from close prices
//! and loading it into the state store.

use std::io::Write;

use apostinha_core::contest::CONTEST_END_DATE;
use apostinha_core::portfolio::{
    all_provider_symbols, apply_natu3_history, build_payload, parse_contest_date,
    PayloadBuildOptions, NATU3_CUTOFF_DATE,
};
use apostinha_core::prices::{HistoricalSeries, PriceTable};
use apostinha_core::{PortfolioId, PortfolioStateStore, PortfolioStateStoreTrait};
use chrono::{NaiveDate, NaiveDateTime};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn updated_at() -> NaiveDateTime {
    d(2025, 12, 15).and_hms_micro_opt(18, 5, 11, 421337).unwrap()
}

/// Every symbol closes at 10, 11, 12, ... on consecutive rows.
fn flat_table(dates: &[NaiveDate]) -> PriceTable {
    let mut table = PriceTable::new();
    for symbol in all_provider_symbols() {
        for (i, date) in dates.iter().enumerate() {
            table.upsert(*date, &symbol, 10.0 + i as f64);
        }
    }
    table
}

fn approx(actual: Option<f64>, expected: f64) -> bool {
    actual.is_some_and(|a| (a - expected).abs() < 1e-9)
}

#[test]
fn test_build_payload_computes_every_portfolio() -> anyhow::Result<()> {
    let dates = [d(2025, 1, 2), d(2025, 1, 3), d(2025, 1, 6)];
    let table = flat_table(&dates);
    let options = PayloadBuildOptions {
        contest_end: parse_contest_date(CONTEST_END_DATE)?,
        updated_at: updated_at(),
    };

    let payload = build_payload(&table, &options)?;

    assert_eq!(payload.updated_at, "2025-12-15T18:05:11.421337");
    assert_eq!(payload.data.dates, vec!["2025-01-02", "2025-01-03", "2025-01-06"]);
    for (id, entry) in payload.data.portfolios.iter() {
        assert_eq!(entry.portfolio_return.len(), 3, "portfolio {}", id);
        assert!(approx(entry.portfolio_return[0], 0.0));
        assert!(approx(entry.portfolio_return[2], 0.2));
    }

    let ari = payload.portfolio(PortfolioId::Ari);
    assert_eq!(
        ari.assets.keys().collect::<Vec<_>>(),
        vec!["BBAS3", "VALE3", "EQTL3"]
    );
    assert_eq!(
        ari.asset_prices["VALE3"],
        vec![Some(10.0), Some(11.0), Some(12.0)]
    );
    assert!(payload.portfolio(PortfolioId::Ibov).assets.contains_key("^BVSP"));
    Ok(())
}

#[test]
fn test_build_payload_stamps_six_fraction_digits() -> anyhow::Result<()> {
    let table = flat_table(&[d(2025, 1, 2)]);
    let mut options = PayloadBuildOptions {
        contest_end: d(2025, 12, 13),
        updated_at: d(2025, 12, 15).and_hms_milli_opt(18, 5, 11, 500).unwrap(),
    };
    assert_eq!(
        build_payload(&table, &options)?.updated_at,
        "2025-12-15T18:05:11.500000"
    );

    options.updated_at = d(2025, 12, 15).and_hms_opt(18, 5, 11).unwrap();
    assert_eq!(build_payload(&table, &options)?.updated_at, "2025-12-15T18:05:11");
    Ok(())
}

#[test]
fn test_build_payload_drops_rows_after_contest_end() -> anyhow::Result<()> {
    let dates = [d(2025, 12, 12), d(2025, 12, 13), d(2025, 12, 15)];
    let table = flat_table(&dates);
    let options = PayloadBuildOptions {
        contest_end: d(2025, 12, 13),
        updated_at: updated_at(),
    };

    let payload = build_payload(&table, &options)?;

    assert_eq!(payload.data.dates.len(), 2);
    assert_eq!(payload.portfolio(PortfolioId::Jai).portfolio_return.len(), 2);
    // The input table is left untouched.
    assert_eq!(table.len(), 3);
    Ok(())
}

#[test]
fn test_missing_prices_are_forward_filled_and_late_listings_excluded() -> anyhow::Result<()> {
    let dates = [d(2025, 1, 2), d(2025, 1, 3), d(2025, 1, 6)];
    let mut table = flat_table(&dates);
    // FLRY3 has no close on the first day: no inception price, no returns.
    let mut rebuilt = PriceTable::new();
    for symbol in table.symbols().map(str::to_string).collect::<Vec<_>>() {
        for (row, date) in dates.iter().enumerate() {
            let skip = (symbol == "FLRY3.SA" && row == 0) || (symbol == "MDIA3.SA" && row == 1);
            if let Some(price) = table.get(*date, &symbol).filter(|_| !skip) {
                rebuilt.upsert(*date, &symbol, price);
            }
        }
    }
    table = rebuilt;

    let payload = build_payload(
        &table,
        &PayloadBuildOptions {
            contest_end: d(2025, 12, 13),
            updated_at: updated_at(),
        },
    )?;

    let vai = payload.portfolio(PortfolioId::Vai);
    assert_eq!(vai.assets["FLRY3"], vec![None, None, None]);
    assert_eq!(vai.asset_prices["FLRY3"], vec![None, Some(11.0), Some(12.0)]);
    // MDIA3 carries the first close over the gap.
    assert_eq!(
        vai.asset_prices["MDIA3"],
        vec![Some(10.0), Some(10.0), Some(12.0)]
    );
    // Day two: MDIA3 0.0 and NATU3 0.1 are averaged; FLRY3 is skipped.
    assert!(approx(vai.portfolio_return[1], 0.05));
    Ok(())
}

#[test]
fn test_natu3_history_from_bundled_file() -> anyhow::Result<()> {
    let cutoff = parse_contest_date(NATU3_CUTOFF_DATE)?;
    let dates = [d(2025, 7, 1), d(2025, 7, 2), d(2025, 7, 3)];
    let mut table = flat_table(&dates);

    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{"dates": ["2025-06-30", "2025-07-01", "2025-07-02"], "prices": [8.0, 9.0, 50.0]}}"#
    )?;
    let history = HistoricalSeries::from_path(file.path())?;
    assert_eq!(history.len(), 3);

    let written = apply_natu3_history(&mut table, &history, cutoff);

    assert_eq!(written, 2);
    assert_eq!(table.len(), 4);
    assert_eq!(table.get(d(2025, 6, 30), "NATU3.SA"), Some(8.0));
    assert_eq!(table.get(d(2025, 7, 1), "NATU3.SA"), Some(9.0));
    assert_eq!(table.get(d(2025, 7, 2), "NATU3.SA"), Some(11.0));
    // Other symbols have no close on the spliced-in date.
    assert_eq!(table.get(d(2025, 6, 30), "BBAS3.SA"), None);
    Ok(())
}

#[test]
fn test_missing_history_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = HistoricalSeries::from_path(dir.path().join("natu3.json"));
    assert!(matches!(result, Err(apostinha_core::Error::Io(_))));
}

#[test]
fn test_built_payload_loads_into_store() -> anyhow::Result<()> {
    let table = flat_table(&[d(2025, 1, 2), d(2025, 1, 3)]);
    let payload = build_payload(
        &table,
        &PayloadBuildOptions {
            contest_end: d(2025, 12, 13),
            updated_at: updated_at(),
        },
    )?;

    let store = PortfolioStateStore::new();
    store.apply_payload_json(&payload.to_json_string()?)?;

    let loaded = store.get_portfolio().expect("payload should be set");
    assert_eq!(*loaded, payload);
    assert!(!store.is_loading());
    Ok(())
}
