//! Fund roster loader.
//!
//! Expected header: `fund_name,isin,peer_set,is_reference,has_holdings,holdings_date`.

use crate::bloomberg::parse_flag;
use crate::error::{FileError, FileResult};
use crate::reader::{self, present};
use chrono::NaiveDate;
use peerscope_core::{Fund, PeerSetId};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y%m%d"];

#[derive(Debug, Deserialize)]
struct FundRow {
    #[serde(alias = "name")]
    fund_name: String,
    #[serde(default)]
    isin: Option<String>,
    peer_set: String,
    #[serde(default)]
    is_reference: Option<String>,
    #[serde(default)]
    has_holdings: Option<String>,
    #[serde(default)]
    holdings_date: Option<String>,
}

/// Parses a date cell in one of the accepted formats.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw.trim(), fmt).ok())
}

/// Loads the fund roster from a CSV file.
pub fn load_funds(path: impl AsRef<Path>) -> FileResult<Vec<Fund>> {
    let path = path.as_ref();
    let mut rdr = reader::open(path)?;
    let funds = parse(&mut rdr, &path.display().to_string())?;
    debug!(path = %path.display(), funds = funds.len(), "Loaded fund roster");
    Ok(funds)
}

/// Reads a fund roster CSV from any reader.
pub fn read_funds<R: Read>(input: R) -> FileResult<Vec<Fund>> {
    parse(&mut reader::from_reader(input), "<funds>")
}

fn parse<R: Read>(rdr: &mut csv::Reader<R>, source: &str) -> FileResult<Vec<Fund>> {
    let mut funds = Vec::new();
    for (line, row) in reader::rows::<FundRow, _>(rdr, source)? {
        if row.fund_name.is_empty() {
            continue;
        }
        if row.peer_set.is_empty() {
            return Err(FileError::parse(source, line, "peer_set is empty"));
        }

        let holdings_date = present(row.holdings_date).and_then(|raw| {
            let date = parse_date(&raw);
            if date.is_none() {
                warn!(source, line, fund = %row.fund_name, value = %raw, "Ignoring unparseable holdings date");
            }
            date
        });

        funds.push(Fund {
            name: row.fund_name,
            isin: present(row.isin),
            peer_set: PeerSetId::new(row.peer_set),
            is_reference: row.is_reference.as_deref().is_some_and(parse_flag),
            has_holdings: row.has_holdings.as_deref().map_or(true, parse_flag),
            holdings_date,
        });
    }
    Ok(funds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_funds() {
        let csv = "fund_name,isin,peer_set,is_reference,has_holdings,holdings_date\n\
                   Own Fund,LU0000000001,Asia,true,true,2025-03-31\n\
                   Peer A,,Asia,false,,31/03/2025\n\
                   Peer B,,Asia,0,0,#N/A\n";
        let funds = read_funds(csv.as_bytes()).unwrap();
        assert_eq!(funds.len(), 3);
        assert!(funds[0].is_reference);
        assert_eq!(funds[0].isin.as_deref(), Some("LU0000000001"));
        assert_eq!(funds[0].holdings_date, NaiveDate::from_ymd_opt(2025, 3, 31));
        assert!(!funds[1].is_reference);
        assert!(funds[1].has_holdings);
        assert_eq!(funds[1].holdings_date, NaiveDate::from_ymd_opt(2025, 3, 31));
        assert!(!funds[2].has_holdings);
        assert!(funds[2].holdings_date.is_none());
    }

    #[test]
    fn test_empty_peer_set_is_an_error() {
        let csv = "fund_name,peer_set\nOwn Fund,\n";
        let err = read_funds(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, FileError::Parse { line: 2, .. }));
    }
}
