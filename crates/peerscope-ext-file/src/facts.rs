//! Temporal fact log loader.
//!
//! Expected header: `log_date,category,fund_name,item_name,percentage,date_of_data,source_url`.
//! An empty `percentage` marks a removed entry.

use crate::bloomberg::parse_percentage;
use crate::error::{FileError, FileResult};
use crate::funds::parse_date;
use crate::reader::{self, present};
use peerscope_core::{Category, TemporalFact};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct FactRow {
    log_date: String,
    category: String,
    fund_name: String,
    item_name: String,
    #[serde(default)]
    percentage: Option<String>,
    #[serde(default)]
    date_of_data: Option<String>,
    #[serde(default)]
    source_url: Option<String>,
}

/// Loads temporal facts from a CSV file.
pub fn load_facts(path: impl AsRef<Path>) -> FileResult<Vec<TemporalFact>> {
    let path = path.as_ref();
    let mut rdr = reader::open(path)?;
    let facts = parse(&mut rdr, &path.display().to_string())?;
    debug!(path = %path.display(), facts = facts.len(), "Loaded fact log");
    Ok(facts)
}

/// Reads a fact log CSV from any reader.
pub fn read_facts<R: Read>(input: R) -> FileResult<Vec<TemporalFact>> {
    parse(&mut reader::from_reader(input), "<facts>")
}

fn parse<R: Read>(rdr: &mut csv::Reader<R>, source: &str) -> FileResult<Vec<TemporalFact>> {
    let mut facts = Vec::new();
    for (line, row) in reader::rows::<FactRow, _>(rdr, source)? {
        let log_date = parse_date(&row.log_date).ok_or_else(|| {
            FileError::parse(source, line, format!("invalid log_date '{}'", row.log_date))
        })?;
        let category: Category = row
            .category
            .parse()
            .map_err(|e| FileError::parse(source, line, e))?;

        let percentage = match present(row.percentage) {
            None => None,
            Some(raw) => match parse_percentage(&raw) {
                Some(p) => Some(p),
                None => {
                    warn!(source, line, item = %row.item_name, value = %raw, "Skipping fact with unparseable percentage");
                    continue;
                }
            },
        };

        facts.push(TemporalFact {
            log_date,
            category,
            fund_name: row.fund_name,
            item_name: row.item_name,
            percentage,
            date_of_data: present(row.date_of_data).and_then(|d| parse_date(&d)),
            source_url: row.source_url.unwrap_or_default(),
        });
    }
    Ok(facts)
}
