//! Period-indexed statement table

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::line_item::{LineItem, StatementKind};
use super::loader;
use crate::error::Result;

/// One financial statement: ascending reporting periods mapped to line items
///
/// Every present column holds exactly one cell per period. A `None` cell is a
/// value the source left blank, which is distinct from a column that is not
/// reported at all (see [`StatementTable::has`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
    kind: StatementKind,
    periods: Vec<NaiveDate>,
    columns: BTreeMap<LineItem, Vec<Option<f64>>>,
}

impl StatementTable {
    /// Create a table with the given periods and no columns
    ///
    /// Periods are sorted ascending; callers building tables by hand should
    /// pass them in order so column cells line up.
    pub fn new(kind: StatementKind, mut periods: Vec<NaiveDate>) -> Self {
        periods.sort();
        Self {
            kind,
            periods,
            columns: BTreeMap::new(),
        }
    }

    /// Parse a statement export from any reader
    pub fn from_reader<R: Read>(kind: StatementKind, reader: R) -> Result<Self> {
        loader::load_statement_from_reader(kind, reader)
    }

    /// Parse a statement export from a CSV file
    pub fn load(kind: StatementKind, path: &Path) -> Result<Self> {
        loader::load_statement(kind, path)
    }

    pub(crate) fn from_parts(
        kind: StatementKind,
        periods: Vec<NaiveDate>,
        columns: BTreeMap<LineItem, Vec<Option<f64>>>,
    ) -> Self {
        debug_assert!(columns.values().all(|c| c.len() == periods.len()));
        Self { kind, periods, columns }
    }

    /// Add (or replace) a column
    ///
    /// The cells are truncated or padded with `None` to the period count.
    pub fn with_column(mut self, item: LineItem, mut values: Vec<Option<f64>>) -> Self {
        values.resize(self.periods.len(), None);
        self.columns.insert(item, values);
        self
    }

    /// Add a fully-populated column
    pub fn with_values(self, item: LineItem, values: &[f64]) -> Self {
        self.with_column(item, values.iter().copied().map(Some).collect())
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn periods(&self) -> &[NaiveDate] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Most recent reporting period
    pub fn last_period(&self) -> Option<NaiveDate> {
        self.periods.last().copied()
    }

    /// Fiscal year of the most recent reporting period
    pub fn last_fiscal_year(&self) -> Option<i32> {
        self.last_period().map(|d| d.year())
    }

    /// Whether the statement reports this line item at all
    pub fn has(&self, item: LineItem) -> bool {
        self.columns.contains_key(&item)
    }

    /// Cells of a line item, one per period
    pub fn column(&self, item: LineItem) -> Option<&[Option<f64>]> {
        self.columns.get(&item).map(Vec::as_slice)
    }

    /// Cells of a line item, or a zero-filled column when it is not reported
    pub fn column_or_zero(&self, item: LineItem) -> Vec<Option<f64>> {
        match self.column(item) {
            Some(cells) => cells.to_vec(),
            None => vec![Some(0.0); self.len()],
        }
    }

    /// Cell at a period index; `None` for a blank cell, a missing column or
    /// an index past the end
    pub fn value(&self, item: LineItem, idx: usize) -> Option<f64> {
        self.columns.get(&item)?.get(idx).copied().flatten()
    }

    /// Last non-blank value of a line item
    pub fn latest(&self, item: LineItem) -> Option<f64> {
        self.columns.get(&item)?.iter().rev().find_map(|c| *c)
    }

    /// Cells of a line item paired with their reporting periods
    pub fn series(&self, item: LineItem) -> Option<Vec<(NaiveDate, Option<f64>)>> {
        let cells = self.columns.get(&item)?;
        Some(self.periods.iter().copied().zip(cells.iter().copied()).collect())
    }

    /// Line items present in this table
    pub fn line_items(&self) -> impl Iterator<Item = LineItem> + '_ {
        self.columns.keys().copied()
    }
}
