//! Snapshot loading
//!
//! Reads one delimited-text export into a [`Snapshot`]. Only `.csv` files
//! are supported; the header row names the columns and every following row
//! is one deal.

use crate::cell::parse_cell;
use crate::digest::content_digest;
use crate::errors::{csv_error, io_error, Result};
use chrono::NaiveDate;
use loantape_core::errors::LoanTapeError;
use loantape_core::{Record, Snapshot, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Load a snapshot file, labelled by its file name
///
/// The label is the leading `YYYY-MM-DD` of the file name when present,
/// otherwise the whole file name.
///
/// # Errors
///
/// `UnsupportedFormat` for non-CSV files, `Io` when the file cannot be read,
/// `InvalidSnapshot` when the content is malformed.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(LoanTapeError::UnsupportedFormat {
            path: path.display().to_string(),
        }
        .into());
    }

    let bytes = fs::read(path).map_err(|e| {
        io_error("load_snapshot", e).with_snapshot(path.display().to_string())
    })?;

    let label = snapshot_date_from_file_name(&file_name)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or(file_name);

    parse_snapshot(&label, &bytes)
}

/// Parse CSV bytes into a snapshot carrying their content digest
///
/// Header names are trimmed. Rows shorter than the header are padded with
/// empty cells.
///
/// # Errors
///
/// `InvalidSnapshot` on malformed CSV, a duplicated header name, or a row
/// with more cells than the header.
pub fn parse_snapshot(label: &str, bytes: &[u8]) -> Result<Snapshot> {
    let digest = content_digest(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(label, e))?
        .iter()
        .enumerate()
        .map(|(i, h)| header_name(i, h))
        .collect();

    let mut seen = BTreeSet::new();
    for header in &headers {
        if !seen.insert(header.as_str()) {
            return Err(LoanTapeError::DuplicateColumn {
                label: label.to_string(),
                column: header.clone(),
            }
            .into());
        }
    }

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|e| csv_error(label, e))?;
        let row_number = index + 1;
        if row.len() > headers.len() {
            return Err(LoanTapeError::RaggedRow {
                label: label.to_string(),
                row: row_number,
                expected: headers.len(),
                found: row.len(),
            }
            .into());
        }

        let mut record = Record::new();
        for (position, column) in headers.iter().enumerate() {
            let value = row
                .get(position)
                .map_or(Value::Empty, |raw| parse_cell(column, raw));
            record.insert(column.clone(), value);
        }
        records.push(record);
    }

    tracing::debug!(
        snapshot_label = label,
        row_count = records.len(),
        column_count = headers.len(),
        "parsed snapshot"
    );

    Ok(Snapshot::new(label, headers, records).with_digest(digest))
}

/// Trimmed header name; blank headers become `Unnamed: <position>`
fn header_name(position: usize, raw: &str) -> String {
    let name = raw.trim_start_matches('\u{feff}').trim();
    if name.is_empty() {
        format!("Unnamed: {}", position)
    } else {
        name.to_string()
    }
}

/// Date encoded as the leading `YYYY-MM-DD` of a file name
///
/// `2026-02-20_tape.csv` yields 2026-02-20; names without a leading date
/// yield `None`.
pub fn snapshot_date_from_file_name(file_name: &str) -> Option<NaiveDate> {
    let prefix = file_name.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_from_file_name() {
        assert_eq!(
            snapshot_date_from_file_name("2026-02-20_klaim_dealsheet.csv"),
            NaiveDate::from_ymd_opt(2026, 2, 20)
        );
        assert_eq!(
            snapshot_date_from_file_name("2026-02-20.csv"),
            NaiveDate::from_ymd_opt(2026, 2, 20)
        );
        assert_eq!(snapshot_date_from_file_name("dealsheet.csv"), None);
        assert_eq!(snapshot_date_from_file_name("2026-13-01_x.csv"), None);
        assert_eq!(snapshot_date_from_file_name("short"), None);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let snap = parse_snapshot("s", b"ID,Status,Purchase value\n1,Completed\n").unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(
            snap.records()[0].get_field("Purchase value"),
            Some(&Value::Empty)
        );
    }
}
