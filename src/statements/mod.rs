//! Statement schema, tables, CSV loading and load caching

mod line_item;
mod table;
pub mod cache;
pub mod loader;

pub use cache::{SourceFingerprint, StatementCache};
pub use line_item::{LineItem, StatementKind};
pub use loader::{load_statement, load_statement_from_reader, DEFAULT_DATA_DIR};
pub use table::StatementTable;

use std::path::Path;

use log::warn;

use crate::error::{AnalyticsError, Result};

/// The three annual statements of one company
#[derive(Debug, Clone)]
pub struct FinancialStatements {
    pub income: StatementTable,
    pub balance: StatementTable,
    pub cashflow: StatementTable,
}

impl FinancialStatements {
    /// Bundle three statements, requiring identical period indices
    pub fn new(income: StatementTable, balance: StatementTable, cashflow: StatementTable) -> Result<Self> {
        if income.is_empty() {
            return Err(AnalyticsError::EmptyStatement(StatementKind::Income));
        }
        for other in [&balance, &cashflow] {
            if other.periods() != income.periods() {
                return Err(AnalyticsError::MisalignedPeriods {
                    statement: other.kind(),
                    expected: income.periods().to_vec(),
                    found: other.periods().to_vec(),
                });
            }
        }
        Ok(Self { income, balance, cashflow })
    }

    /// Bundle three statements without checking their periods
    ///
    /// Ratios are then aligned by row position, so mismatched fiscal year
    /// ends silently pair the wrong periods.
    pub fn new_unchecked(income: StatementTable, balance: StatementTable, cashflow: StatementTable) -> Self {
        for other in [&balance, &cashflow] {
            if other.periods() != income.periods() {
                warn!(
                    "{} periods differ from income periods; rows will be paired by position",
                    other.kind()
                );
            }
        }
        Self { income, balance, cashflow }
    }

    /// Load the three statements from the default location (notebooks/)
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_DATA_DIR))
    }

    /// Load the three statements from a specific directory
    pub fn load_from(dir: &Path) -> Result<Self> {
        let [income, balance, cashflow] = StatementKind::ALL
            .map(|kind| load_statement(kind, &dir.join(kind.default_file_name())));
        Self::new(income?, balance?, cashflow?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fy(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 9, 30).unwrap()
    }

    #[test]
    fn test_load_default_statements() {
        let result = FinancialStatements::load_default();
        assert!(result.is_ok(), "Failed to load statements: {:?}", result.err());

        let statements = result.unwrap();
        assert_eq!(statements.income.len(), 5);
        assert_eq!(statements.income.last_fiscal_year(), Some(2024));
        assert!(statements.income.has(LineItem::TotalRevenue));
        assert!(statements.balance.has(LineItem::TotalLiabilitiesNetMinorityInterest));
        assert!(statements.cashflow.has(LineItem::OperatingCashFlow));

        // Oldest fiscal year is only partially reported
        assert_eq!(statements.income.value(LineItem::TotalRevenue, 0), None);
        assert_eq!(
            statements.income.value(LineItem::TotalRevenue, 4),
            Some(391_035_000_000.0)
        );
    }

    #[test]
    fn test_misaligned_periods_rejected() {
        let income = StatementTable::new(StatementKind::Income, vec![fy(2023), fy(2024)]);
        let balance = StatementTable::new(StatementKind::Balance, vec![fy(2022), fy(2023)]);
        let cashflow = StatementTable::new(StatementKind::CashFlow, vec![fy(2023), fy(2024)]);

        let err = FinancialStatements::new(income.clone(), balance.clone(), cashflow.clone()).unwrap_err();
        match err {
            AnalyticsError::MisalignedPeriods { statement, .. } => {
                assert_eq!(statement, StatementKind::Balance)
            }
            other => panic!("unexpected error: {other}"),
        }

        let unchecked = FinancialStatements::new_unchecked(income, balance, cashflow);
        assert_eq!(unchecked.balance.periods()[0], fy(2022));
    }

    #[test]
    fn test_empty_income_rejected() {
        let empty = |kind| StatementTable::new(kind, Vec::new());
        let err = FinancialStatements::new(
            empty(StatementKind::Income),
            empty(StatementKind::Balance),
            empty(StatementKind::CashFlow),
        )
        .unwrap_err();
        assert!(matches!(err, AnalyticsError::EmptyStatement(StatementKind::Income)));
    }
}
