//! Error type shared by the statement loader and the ratio engine

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::statements::{LineItem, StatementKind};

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("{statement} statement row {row}: cannot parse period date {value:?}")]
    InvalidDate {
        statement: StatementKind,
        row: usize,
        value: String,
    },

    #[error("{statement} statement, {period}, column {column:?}: cannot parse {value:?} as a number")]
    InvalidNumber {
        statement: StatementKind,
        period: NaiveDate,
        column: String,
        value: String,
    },

    #[error("{statement} statement lists period {period} more than once")]
    DuplicatePeriod {
        statement: StatementKind,
        period: NaiveDate,
    },

    #[error("{statement} statement has no {item} column")]
    MissingLineItem {
        statement: StatementKind,
        item: LineItem,
    },

    #[error("{statement} periods {found:?} do not match income periods {expected:?}")]
    MisalignedPeriods {
        statement: StatementKind,
        expected: Vec<NaiveDate>,
        found: Vec<NaiveDate>,
    },

    #[error("{0} statement contains no periods")]
    EmptyStatement(StatementKind),
}
