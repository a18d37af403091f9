//! Shared CSV reading.

use crate::error::{FileError, FileResult};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

/// Opens a CSV file with a header row, trimming every field.
pub(crate) fn open(path: &Path) -> FileResult<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| FileError::io(path.display().to_string(), e))
}

/// Wraps any reader with the same settings as [`open`].
pub(crate) fn from_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// Deserializes every row, pairing each with its 1-based line number.
pub(crate) fn rows<T, R>(reader: &mut csv::Reader<R>, source: &str) -> FileResult<Vec<(u64, T)>>
where
    T: DeserializeOwned,
    R: Read,
{
    let headers = reader
        .headers()
        .map_err(|e| FileError::parse(source, 1, e))?
        .clone();
    let mut record = csv::StringRecord::new();
    let mut out = Vec::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                let line = e.position().map_or(0, csv::Position::line);
                return Err(FileError::parse(source, line, e));
            }
        }
        let line = record.position().map_or(0, csv::Position::line);
        let row = record
            .deserialize::<T>(Some(&headers))
            .map_err(|e| FileError::parse(source, line, e))?;
        out.push((line, row));
    }
    Ok(out)
}

/// Treats empty and `#`-prefixed cells as missing.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && !v.starts_with('#'))
}
