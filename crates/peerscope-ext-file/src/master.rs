//! Instrument master data loader.
//!
//! Expected header: `ticker,short_name,gics_industry,gics_sector,country_code,market_cap,isin,unique_id`.
//! `market_cap` takes Bloomberg strings (`21.22B`) or plain USD millions.
//! Repeated tickers are returned as-is; enrichment keeps the first.

use crate::bloomberg::parse_market_cap;
use crate::error::FileResult;
use crate::reader::{self, present};
use peerscope_core::MasterRecord;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct MasterRow {
    ticker: String,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    gics_industry: Option<String>,
    #[serde(default)]
    gics_sector: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default, alias = "market_cap_usd")]
    market_cap: Option<String>,
    #[serde(default)]
    isin: Option<String>,
    #[serde(default)]
    unique_id: Option<String>,
}

impl From<MasterRow> for MasterRecord {
    fn from(row: MasterRow) -> Self {
        Self {
            ticker: row.ticker,
            short_name: present(row.short_name),
            gics_industry: present(row.gics_industry),
            gics_sector: present(row.gics_sector),
            country_code: present(row.country_code),
            market_cap_usd: row.market_cap.as_deref().and_then(parse_market_cap),
            isin: present(row.isin),
            unique_id: present(row.unique_id),
        }
    }
}

/// Loads master data from a CSV file.
pub fn load_master(path: impl AsRef<Path>) -> FileResult<Vec<MasterRecord>> {
    let path = path.as_ref();
    let mut rdr = reader::open(path)?;
    let master = parse(&mut rdr, &path.display().to_string())?;
    debug!(path = %path.display(), rows = master.len(), "Loaded master data");
    Ok(master)
}

/// Reads master data CSV from any reader.
pub fn read_master<R: Read>(input: R) -> FileResult<Vec<MasterRecord>> {
    parse(&mut reader::from_reader(input), "<master>")
}

fn parse<R: Read>(rdr: &mut csv::Reader<R>, source: &str) -> FileResult<Vec<MasterRecord>> {
    Ok(reader::rows::<MasterRow, _>(rdr, source)?
        .into_iter()
        .filter(|(_, row)| !row.ticker.is_empty() && !row.ticker.starts_with('#'))
        .map(|(_, row)| row.into())
        .collect())
}
