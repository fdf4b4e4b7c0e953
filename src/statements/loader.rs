//! CSV statement loader
//!
//! Statement exports have one row per reporting period. The first column is
//! the period-end date (its header is usually blank) and every other column
//! is a line item. Columns outside the recognized schema are skipped.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{Reader, StringRecord};
use log::{debug, info};

use super::line_item::{LineItem, StatementKind};
use super::table::StatementTable;
use crate::error::{AnalyticsError, Result};

/// Default directory holding the three statement exports
pub const DEFAULT_DATA_DIR: &str = "notebooks";

/// Load a statement from a CSV file
pub fn load_statement(kind: StatementKind, path: &Path) -> Result<StatementTable> {
    let file = File::open(path).map_err(|source| AnalyticsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = load_statement_from_reader(kind, file)?;
    info!(
        "Loaded {} statement from {}: {} periods, {} line items",
        kind,
        path.display(),
        table.len(),
        table.line_items().count()
    );
    Ok(table)
}

/// Load a statement from any reader (e.g., string buffer)
pub fn load_statement_from_reader<R: Read>(kind: StatementKind, reader: R) -> Result<StatementTable> {
    let mut csv_reader = Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let recognized = recognized_columns(kind, &headers);

    let mut rows: Vec<(NaiveDate, Vec<Option<f64>>)> = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result?;
        let raw_date = record.get(0).unwrap_or_default();
        let period = parse_period(raw_date).ok_or_else(|| AnalyticsError::InvalidDate {
            statement: kind,
            row: row_idx + 1,
            value: raw_date.to_string(),
        })?;

        let mut cells = Vec::with_capacity(recognized.len());
        for &(col, item) in &recognized {
            let raw = record.get(col).unwrap_or_default();
            let cell = parse_cell(raw).map_err(|_| AnalyticsError::InvalidNumber {
                statement: kind,
                period,
                column: item.column_name().to_string(),
                value: raw.to_string(),
            })?;
            cells.push(cell);
        }
        rows.push((period, cells));
    }

    // Exports are frequently newest-first
    rows.sort_by_key(|(period, _)| *period);
    if let Some(pair) = rows.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(AnalyticsError::DuplicatePeriod {
            statement: kind,
            period: pair[0].0,
        });
    }

    let periods: Vec<NaiveDate> = rows.iter().map(|(period, _)| *period).collect();
    let mut columns: BTreeMap<LineItem, Vec<Option<f64>>> = BTreeMap::new();
    for (i, &(_, item)) in recognized.iter().enumerate() {
        columns.insert(item, rows.iter().map(|(_, cells)| cells[i]).collect());
    }

    Ok(StatementTable::from_parts(kind, periods, columns))
}

/// Map header positions to recognized line items, skipping the date column
fn recognized_columns(kind: StatementKind, headers: &StringRecord) -> Vec<(usize, LineItem)> {
    let mut recognized = Vec::new();
    for (col, header) in headers.iter().enumerate().skip(1) {
        match kind.recognize(header) {
            Some(item) if recognized.iter().any(|&(_, seen)| seen == item) => {
                debug!("{} statement: duplicate column {:?} ignored", kind, header);
            }
            Some(item) => recognized.push((col, item)),
            None => debug!("{} statement: unrecognized column {:?} ignored", kind, header),
        }
    }
    recognized
}

/// Parse a period-end date, accepting an optional time component
fn parse_period(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Parse a numeric cell; blank and NaN cells are missing
fn parse_cell(raw: &str) -> std::result::Result<Option<f64>, std::num::ParseFloatError> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let value: f64 = raw.parse()?;
    Ok(if value.is_nan() { None } else { Some(value) })
}
