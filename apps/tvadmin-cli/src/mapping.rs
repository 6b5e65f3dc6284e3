//! Mapping file parsing.
//!
//! CSV with a header row. Columns (header names are case-insensitive):
//! - `email`: user to receive the device (required)
//! - `device`: device display name (required)
//! - `teamviewerid`: alternate device id, preferred when present (optional)
//!
//! Every row is validated before anything runs; all problems are reported
//! together with their line numbers.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tvadmin_core::{DeviceSelector, MappingEntry};

use crate::error::{CliError, CliResult};

const EMAIL: &str = "email";
const DEVICE: &str = "device";
const TEAMVIEWER_ID: &str = "teamviewerid";

/// Read and validate a mapping file.
pub fn read_mapping_file(path: &Path, delimiter: u8) -> CliResult<Vec<MappingEntry>> {
    let file = File::open(path).map_err(|e| {
        CliError::Validation(format!("cannot read mapping file {}: {e}", path.display()))
    })?;
    parse_mapping(file, delimiter)
}

/// Parse mapping rows from any reader.
pub fn parse_mapping<R: Read>(reader: R, delimiter: u8) -> CliResult<Vec<MappingEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| CliError::Validation(format!("CSV parse error: {e}")))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let (email_col, device_col) = match (column(EMAIL), column(DEVICE)) {
        (Some(email), Some(device)) => (email, device),
        (email, device) => {
            let missing: Vec<&str> = [(EMAIL, email), (DEVICE, device)]
                .iter()
                .filter(|(_, col)| col.is_none())
                .map(|(name, _)| *name)
                .collect();
            return Err(CliError::Validation(format!(
                "mapping file is missing required column(s): {}",
                missing.join(", ")
            )));
        }
    };
    let teamviewer_col = column(TEAMVIEWER_ID);

    let mut entries = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    for record in rdr.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                errors.push(format!("CSV parse error: {e}"));
                continue;
            }
        };
        let line = record.position().map_or(0, |p| p.line());
        let field = |col: usize| record.get(col).filter(|v| !v.is_empty());

        let email = field(email_col);
        let device = field(device_col);
        match (email, device) {
            (Some(email), Some(device)) => {
                let mut selector = DeviceSelector::by_name(device);
                if let Some(id) = teamviewer_col.and_then(field) {
                    selector = selector.with_teamviewer_id(id);
                }
                entries.push(MappingEntry::new(email, selector));
            }
            (None, _) => errors.push(format!("line {line}: missing email")),
            (_, None) => errors.push(format!("line {line}: missing device")),
        }
    }

    if !errors.is_empty() {
        return Err(CliError::Validation(format!(
            "invalid mapping file:\n  {}",
            errors.join("\n  ")
        )));
    }

    Ok(entries)
}

/// Accept a single ASCII character as CSV delimiter.
pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ if value == "\\t" => Ok(b'\t'),
        _ => Err(format!("delimiter must be a single ASCII character, got '{value}'")),
    }
}
