//! Ratio table output structures

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A derived metric column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RatioKind {
    // Profitability
    GrossMargin,
    OperatingMargin,
    NetMargin,

    // Growth (period over period)
    RevenueGrowth,
    NetIncomeGrowth,

    // Liquidity and solvency
    CurrentRatio,
    DebtToEquity,
    DebtToAssets,

    // Efficiency
    Roa,
    Roe,
}

impl RatioKind {
    pub const ALL: [RatioKind; 10] = [
        RatioKind::GrossMargin,
        RatioKind::OperatingMargin,
        RatioKind::NetMargin,
        RatioKind::RevenueGrowth,
        RatioKind::NetIncomeGrowth,
        RatioKind::CurrentRatio,
        RatioKind::DebtToEquity,
        RatioKind::DebtToAssets,
        RatioKind::Roa,
        RatioKind::Roe,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RatioKind::GrossMargin => "Gross Margin",
            RatioKind::OperatingMargin => "Operating Margin",
            RatioKind::NetMargin => "Net Margin",
            RatioKind::RevenueGrowth => "Revenue Growth",
            RatioKind::NetIncomeGrowth => "Net Income Growth",
            RatioKind::CurrentRatio => "Current Ratio",
            RatioKind::DebtToEquity => "Debt to Equity",
            RatioKind::DebtToAssets => "Debt to Assets",
            RatioKind::Roa => "ROA",
            RatioKind::Roe => "ROE",
        }
    }
}

impl fmt::Display for RatioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derived ratios, one row per income statement period
///
/// A column exists only if its inputs were reported. Cells are `None` where
/// the ratio is undefined (no prior period, blank input cell); a zero
/// denominator is left as an infinite or NaN value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioTable {
    pub periods: Vec<NaiveDate>,
    pub columns: BTreeMap<RatioKind, Vec<Option<f64>>>,
}

impl RatioTable {
    pub fn new(periods: Vec<NaiveDate>) -> Self {
        Self {
            periods,
            columns: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, kind: RatioKind, values: Vec<Option<f64>>) {
        debug_assert_eq!(values.len(), self.periods.len());
        self.columns.insert(kind, values);
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn has(&self, kind: RatioKind) -> bool {
        self.columns.contains_key(&kind)
    }

    pub fn column(&self, kind: RatioKind) -> Option<&[Option<f64>]> {
        self.columns.get(&kind).map(Vec::as_slice)
    }

    pub fn value(&self, kind: RatioKind, idx: usize) -> Option<f64> {
        self.columns.get(&kind)?.get(idx).copied().flatten()
    }

    /// Cell for the most recent period
    pub fn last_value(&self, kind: RatioKind) -> Option<f64> {
        self.columns.get(&kind)?.last().copied().flatten()
    }

    /// Columns present, in display order
    pub fn kinds(&self) -> impl Iterator<Item = RatioKind> + '_ {
        self.columns.keys().copied()
    }

    /// Write the table as CSV: a `Period` column then one column per ratio
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["Period".to_string()];
        header.extend(self.kinds().map(|k| k.name().to_string()));
        csv_writer.write_record(&header)?;

        for (idx, period) in self.periods.iter().enumerate() {
            let mut record = vec![period.to_string()];
            for kind in self.kinds() {
                record.push(self.value(kind, idx).map(|v| v.to_string()).unwrap_or_default());
            }
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv_leaves_undefined_cells_blank() {
        let periods = vec![
            NaiveDate::from_ymd_opt(2023, 9, 30).unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
        ];
        let mut table = RatioTable::new(periods);
        table.insert(RatioKind::RevenueGrowth, vec![None, Some(0.5)]);
        table.insert(RatioKind::GrossMargin, vec![Some(0.25), Some(0.3)]);

        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Period,Gross Margin,Revenue Growth\n2023-09-30,0.25,\n2024-09-30,0.3,0.5\n"
        );
    }
}
