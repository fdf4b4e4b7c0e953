//! Headline metrics for the latest reporting period

use serde::{Deserialize, Serialize};

use crate::ratios::{RatioKind, RatioTable};
use crate::statements::{FinancialStatements, LineItem, StatementTable};

/// Free cash flow per period
///
/// Uses the reported Free Cash Flow column when present. Otherwise derives it
/// as operating cash flow less capital expenditure, taking capex as an
/// outflow whatever its sign in the export (a missing capex column counts
/// as zero). `None` when operating cash flow is not reported either.
pub fn free_cash_flow(cashflow: &StatementTable) -> Option<Vec<Option<f64>>> {
    if let Some(reported) = cashflow.column(LineItem::FreeCashFlow) {
        return Some(reported.to_vec());
    }

    let operating = cashflow.column(LineItem::OperatingCashFlow)?;
    let capex = cashflow.column_or_zero(LineItem::CapitalExpenditure);
    Some(
        operating
            .iter()
            .zip(&capex)
            .map(|(ocf, capex)| Some((*ocf)? - (*capex)?.abs()))
            .collect(),
    )
}

/// Latest-period summary of the three statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub fiscal_year: Option<i32>,
    pub revenue: Option<f64>,

    /// Change in revenue against the prior period
    pub revenue_growth: Option<f64>,
    pub net_income: Option<f64>,
    pub net_income_growth: Option<f64>,
    pub operating_cash_flow: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub net_margin: Option<f64>,
}

impl ExecutiveSummary {
    pub fn from_statements(statements: &FinancialStatements, ratios: &RatioTable) -> Self {
        let income = &statements.income;
        let cashflow = &statements.cashflow;
        let last = income.len().checked_sub(1);
        let at = |table: &StatementTable, item: LineItem| last.and_then(|idx| table.value(item, idx));

        let revenue = at(income, LineItem::TotalRevenue);
        let previous_revenue = last
            .and_then(|idx| idx.checked_sub(1))
            .and_then(|idx| income.value(LineItem::TotalRevenue, idx));
        let revenue_growth = match (revenue, previous_revenue) {
            (Some(current), Some(previous)) => Some((current - previous) / previous),
            _ => None,
        };

        Self {
            fiscal_year: income.last_fiscal_year(),
            revenue,
            revenue_growth,
            net_income: at(income, LineItem::NetIncome),
            net_income_growth: ratios.last_value(RatioKind::NetIncomeGrowth),
            operating_cash_flow: at(cashflow, LineItem::OperatingCashFlow),
            free_cash_flow: last.and_then(|idx| free_cash_flow(cashflow)?.get(idx).copied().flatten()),
            net_margin: ratios.last_value(RatioKind::NetMargin),
        }
    }
}
