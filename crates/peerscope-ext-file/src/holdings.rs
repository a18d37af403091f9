//! Holdings CSV loader.
//!
//! Expected header: `fund_name,ticker,weight` with optional
//! `exchange_code,country_derived,is_cash` columns. Missing optional columns
//! are derived from the ticker.

use crate::bloomberg::{extract_exchange_code, is_cash_ticker, parse_flag, parse_percentage};
use crate::error::FileResult;
use crate::reader::{self, present};
use peerscope_core::country::country_from_exchange;
use peerscope_core::HoldingRecord;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct HoldingRow {
    fund_name: String,
    ticker: String,
    weight: Option<String>,
    #[serde(default)]
    exchange_code: Option<String>,
    #[serde(default)]
    country_derived: Option<String>,
    #[serde(default)]
    is_cash: Option<String>,
}

/// Loads holdings from a CSV file.
pub fn load_holdings(path: impl AsRef<Path>) -> FileResult<Vec<HoldingRecord>> {
    let path = path.as_ref();
    let mut rdr = reader::open(path)?;
    let holdings = parse(&mut rdr, &path.display().to_string())?;
    debug!(path = %path.display(), rows = holdings.len(), "Loaded holdings");
    Ok(holdings)
}

/// Reads holdings CSV from any reader.
pub fn read_holdings<R: Read>(input: R) -> FileResult<Vec<HoldingRecord>> {
    parse(&mut reader::from_reader(input), "<holdings>")
}

fn parse<R: Read>(rdr: &mut csv::Reader<R>, source: &str) -> FileResult<Vec<HoldingRecord>> {
    let mut holdings = Vec::new();
    for (line, row) in reader::rows::<HoldingRow, _>(rdr, source)? {
        if row.ticker.starts_with("#N/A") {
            continue;
        }

        // Blank weights are kept as zero and dropped later by enrichment.
        let weight = match row.weight.as_deref() {
            None | Some("") => 0.0,
            Some(raw) => match parse_percentage(raw) {
                Some(w) => w,
                None => {
                    warn!(source, line, ticker = %row.ticker, weight = raw, "Skipping row with unparseable weight");
                    continue;
                }
            },
        };

        let mut record = match HoldingRecord::try_new(row.fund_name, row.ticker, weight) {
            Ok(record) => record,
            Err(e) => {
                warn!(source, line, error = %e, "Skipping invalid holding row");
                continue;
            }
        };

        let exchange_code = present(row.exchange_code)
            .or_else(|| extract_exchange_code(&record.ticker).map(str::to_string));
        let country_derived = present(row.country_derived).or_else(|| {
            exchange_code
                .as_deref()
                .and_then(country_from_exchange)
                .map(str::to_string)
        });
        let is_cash = match present(row.is_cash) {
            Some(flag) => parse_flag(&flag),
            None => is_cash_ticker(&record.ticker),
        };

        record.is_cash = is_cash;
        record.exchange_code = exchange_code;
        record.country_derived = country_derived;
        holdings.push(record);
    }
    Ok(holdings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derives_missing_columns() {
        let csv = "fund_name,ticker,weight\n\
                   Own Fund,HDFCB IN Equity,4.5\n\
                   Own Fund,USD Curncy,1.2\n";
        let rows = read_holdings(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].exchange_code.as_deref(), Some("IN"));
        assert_eq!(rows[0].country_derived.as_deref(), Some("India"));
        assert!(!rows[0].is_cash);
        assert!(rows[1].is_cash);
        assert!(rows[1].exchange_code.is_none());
    }

    #[test]
    fn test_explicit_columns_win() {
        let csv = "fund_name,ticker,weight,exchange_code,country_derived,is_cash\n\
                   F,700 HK Equity,3,HK,China,false\n\
                   F,9988 HK Equity,2,,,\n";
        let rows = read_holdings(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].country_derived.as_deref(), Some("China"));
        assert_eq!(rows[1].exchange_code.as_deref(), Some("HK"));
        assert_eq!(rows[1].country_derived.as_deref(), Some("Hong Kong"));
    }

    #[test]
    fn test_skips_rows_missing_fund_or_ticker() {
        let csv = "fund_name,ticker,weight\n\
                   ,A US Equity,1.0\n\
                   F,,2.0\n\
                   F,B US Equity,3.0\n";
        let rows = read_holdings(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticker, "B US Equity");
    }

    #[test]
    fn test_skips_bad_rows() {
        let csv = "fund_name,ticker,weight\n\
                   F,#N/A Invalid Security,1.0\n\
                   F,A US Equity,abc\n\
                   F,B US Equity,\n\
                   F,C US Equity,2.5%\n";
        let rows = read_holdings(csv.as_bytes()).unwrap();
        let tickers: Vec<&str> = rows.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["B US Equity", "C US Equity"]);
        assert_eq!(rows[0].weight, 0.0);
        assert_eq!(rows[1].weight, 2.5);
    }
}
