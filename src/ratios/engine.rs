//! Ratio engine: derives profitability, growth, liquidity, solvency and
//! efficiency ratios from the three statements
//!
//! Each ratio column is gated on the presence of its inputs and computed
//! independently, so one unreported line item never blocks the others.
//! Balance sheet rows are paired with income rows by position.

use log::debug;

use super::table::{RatioKind, RatioTable};
use crate::error::{AnalyticsError, Result};
use crate::statements::{FinancialStatements, LineItem, StatementKind, StatementTable};

/// What to use for a ratio numerator the statement does not report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingNumerator {
    /// Treat the line item as zero, giving a ratio of 0.0
    #[default]
    ZeroFill,
    /// Keep the ratio column but leave every cell undefined
    Undefined,
}

/// Configuration for a ratio run
#[derive(Debug, Clone, Default)]
pub struct RatioConfig {
    pub missing_numerator: MissingNumerator,
}

/// Main ratio engine
#[derive(Debug, Clone, Default)]
pub struct RatioEngine {
    config: RatioConfig,
}

impl RatioEngine {
    pub fn new(config: RatioConfig) -> Self {
        Self { config }
    }

    /// Compute the ratio table, indexed by the income statement periods
    ///
    /// Fails only when the income statement has no Total Revenue column.
    pub fn compute(&self, statements: &FinancialStatements) -> Result<RatioTable> {
        let income = &statements.income;
        let balance = &statements.balance;
        let periods = income.len();

        let revenue = income
            .column(LineItem::TotalRevenue)
            .ok_or(AnalyticsError::MissingLineItem {
                statement: StatementKind::Income,
                item: LineItem::TotalRevenue,
            })?;

        let mut table = RatioTable::new(income.periods().to_vec());

        // Profitability
        for (kind, item) in [
            (RatioKind::GrossMargin, LineItem::GrossProfit),
            (RatioKind::OperatingMargin, LineItem::OperatingIncome),
            (RatioKind::NetMargin, LineItem::NetIncome),
        ] {
            let numerator = self.numerator(income, item, periods);
            table.insert(kind, combine(&numerator, revenue, margin));
        }

        // Growth
        table.insert(RatioKind::RevenueGrowth, pct_change(revenue));
        let net_income_growth = match income.column(LineItem::NetIncome) {
            Some(net_income) => pct_change(net_income),
            None => {
                debug!("Net Income not reported; Net Income Growth is zero-filled");
                zero_growth(periods)
            }
        };
        table.insert(RatioKind::NetIncomeGrowth, net_income_growth);

        // Liquidity
        if balance.has(LineItem::CurrentLiabilities) {
            let cash = self.numerator(balance, LineItem::CashAndCashEquivalents, periods);
            let liabilities = aligned(balance, LineItem::CurrentLiabilities, periods);
            table.insert(RatioKind::CurrentRatio, combine(&cash, &liabilities, divide));
        } else {
            debug!("Current Liabilities not reported; skipping Current Ratio");
        }

        // Solvency
        if balance.has(LineItem::TotalLiabilitiesNetMinorityInterest) {
            let liabilities = aligned(balance, LineItem::TotalLiabilitiesNetMinorityInterest, periods);
            if balance.has(LineItem::StockholdersEquity) {
                let equity = aligned(balance, LineItem::StockholdersEquity, periods);
                table.insert(RatioKind::DebtToEquity, combine(&liabilities, &equity, divide));
            }
            if balance.has(LineItem::TotalAssets) {
                let assets = aligned(balance, LineItem::TotalAssets, periods);
                table.insert(RatioKind::DebtToAssets, combine(&liabilities, &assets, divide));
            }
        } else {
            debug!("Total Liabilities not reported; skipping leverage ratios");
        }

        // Efficiency
        if let Some(net_income) = income.column(LineItem::NetIncome) {
            if balance.has(LineItem::TotalAssets) {
                let assets = aligned(balance, LineItem::TotalAssets, periods);
                table.insert(RatioKind::Roa, combine(net_income, &assets, divide));
            }
            if balance.has(LineItem::StockholdersEquity) {
                let equity = aligned(balance, LineItem::StockholdersEquity, periods);
                table.insert(RatioKind::Roe, combine(net_income, &equity, divide));
            }
        } else {
            debug!("Net Income not reported; skipping ROA and ROE");
        }

        Ok(table)
    }

    /// Numerator cells, substituting per the missing-numerator policy
    fn numerator(&self, table: &StatementTable, item: LineItem, periods: usize) -> Vec<Option<f64>> {
        if table.has(item) {
            return aligned(table, item, periods);
        }
        debug!("{} not reported on the {} statement", item, table.kind());
        match self.config.missing_numerator {
            MissingNumerator::ZeroFill => vec![Some(0.0); periods],
            MissingNumerator::Undefined => vec![None; periods],
        }
    }
}

/// Compute ratios with the default configuration
pub fn compute_ratios(statements: &FinancialStatements) -> Result<RatioTable> {
    RatioEngine::default().compute(statements)
}

/// Profit line as a fraction of revenue
pub fn margin(numerator: f64, revenue: f64) -> f64 {
    numerator / revenue
}

fn divide(numerator: f64, denominator: f64) -> f64 {
    numerator / denominator
}

/// Period-over-period change `(current - previous) / previous`
///
/// The first period, and any period next to a blank cell, is undefined.
pub fn pct_change(cells: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(cells.len());
    if cells.is_empty() {
        return out;
    }
    out.push(None);
    for pair in cells.windows(2) {
        out.push(match (pair[0], pair[1]) {
            (Some(previous), Some(current)) => Some((current - previous) / previous),
            _ => None,
        });
    }
    out
}

fn zero_growth(periods: usize) -> Vec<Option<f64>> {
    (0..periods).map(|i| if i == 0 { None } else { Some(0.0) }).collect()
}

/// Cells of `item` paired by position with `periods` income rows
fn aligned(table: &StatementTable, item: LineItem, periods: usize) -> Vec<Option<f64>> {
    let mut cells = table.column(item).map(<[_]>::to_vec).unwrap_or_default();
    cells.resize(periods, None);
    cells
}

fn combine(lhs: &[Option<f64>], rhs: &[Option<f64>], op: fn(f64, f64) -> f64) -> Vec<Option<f64>> {
    lhs.iter()
        .zip(rhs)
        .map(|(a, b)| Some(op((*a)?, (*b)?)))
        .collect()
}
