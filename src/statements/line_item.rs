//! Recognized statement kinds and line items
//!
//! Column presence is checked against this closed schema rather than by
//! probing arbitrary header strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three annual financial statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatementKind {
    Income,
    Balance,
    CashFlow,
}

impl StatementKind {
    pub const ALL: [StatementKind; 3] = [
        StatementKind::Income,
        StatementKind::Balance,
        StatementKind::CashFlow,
    ];

    /// File name the statement is exported under in a data directory
    pub fn default_file_name(self) -> &'static str {
        match self {
            StatementKind::Income => "apple_income_statement.csv",
            StatementKind::Balance => "apple_balance_sheet.csv",
            StatementKind::CashFlow => "apple_cash_flow.csv",
        }
    }

    /// Line items recognized when loading this statement
    pub fn line_items(self) -> &'static [LineItem] {
        match self {
            StatementKind::Income => &[
                LineItem::TotalRevenue,
                LineItem::CostOfRevenue,
                LineItem::GrossProfit,
                LineItem::OperatingIncome,
                LineItem::NetIncome,
            ],
            StatementKind::Balance => &[
                LineItem::CashAndCashEquivalents,
                LineItem::CurrentAssets,
                LineItem::CurrentLiabilities,
                LineItem::TotalLiabilitiesNetMinorityInterest,
                LineItem::StockholdersEquity,
                LineItem::TotalAssets,
            ],
            StatementKind::CashFlow => &[
                LineItem::OperatingCashFlow,
                LineItem::CapitalExpenditure,
                LineItem::FreeCashFlow,
            ],
        }
    }

    /// Resolve a CSV header to a line item of this statement
    pub fn recognize(self, header: &str) -> Option<LineItem> {
        let header = header.trim();
        self.line_items()
            .iter()
            .copied()
            .find(|item| item.column_name() == header)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementKind::Income => "income",
            StatementKind::Balance => "balance sheet",
            StatementKind::CashFlow => "cash flow",
        };
        f.write_str(name)
    }
}

/// A named numeric line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LineItem {
    // Income statement
    TotalRevenue,
    CostOfRevenue,
    GrossProfit,
    OperatingIncome,
    NetIncome,

    // Balance sheet
    CashAndCashEquivalents,
    CurrentAssets,
    CurrentLiabilities,
    TotalLiabilitiesNetMinorityInterest,
    StockholdersEquity,
    TotalAssets,

    // Cash flow statement
    OperatingCashFlow,
    CapitalExpenditure,
    FreeCashFlow,
}

impl LineItem {
    /// Exact column header used by the statement exports
    pub fn column_name(self) -> &'static str {
        match self {
            LineItem::TotalRevenue => "Total Revenue",
            LineItem::CostOfRevenue => "Cost Of Revenue",
            LineItem::GrossProfit => "Gross Profit",
            LineItem::OperatingIncome => "Operating Income",
            LineItem::NetIncome => "Net Income",
            LineItem::CashAndCashEquivalents => "Cash And Cash Equivalents",
            LineItem::CurrentAssets => "Current Assets",
            LineItem::CurrentLiabilities => "Current Liabilities",
            LineItem::TotalLiabilitiesNetMinorityInterest => "Total Liabilities Net Minority Interest",
            LineItem::StockholdersEquity => "Stockholders Equity",
            LineItem::TotalAssets => "Total Assets",
            LineItem::OperatingCashFlow => "Operating Cash Flow",
            LineItem::CapitalExpenditure => "Capital Expenditure",
            LineItem::FreeCashFlow => "Free Cash Flow",
        }
    }

    /// Statement this line item belongs to
    pub fn statement(self) -> StatementKind {
        match self {
            LineItem::TotalRevenue
            | LineItem::CostOfRevenue
            | LineItem::GrossProfit
            | LineItem::OperatingIncome
            | LineItem::NetIncome => StatementKind::Income,
            LineItem::CashAndCashEquivalents
            | LineItem::CurrentAssets
            | LineItem::CurrentLiabilities
            | LineItem::TotalLiabilitiesNetMinorityInterest
            | LineItem::StockholdersEquity
            | LineItem::TotalAssets => StatementKind::Balance,
            LineItem::OperatingCashFlow
            | LineItem::CapitalExpenditure
            | LineItem::FreeCashFlow => StatementKind::CashFlow,
        }
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_item_listed_under_its_statement() {
        for kind in StatementKind::ALL {
            for &item in kind.line_items() {
                assert_eq!(item.statement(), kind, "{item} listed under {kind}");
            }
        }
    }

    #[test]
    fn test_recognize_is_exact_but_trims() {
        let kind = StatementKind::Balance;
        assert_eq!(
            kind.recognize(" Stockholders Equity "),
            Some(LineItem::StockholdersEquity)
        );
        assert_eq!(kind.recognize("stockholders equity"), None);

        // Income items are not recognized on the balance sheet
        assert_eq!(kind.recognize("Net Income"), None);
    }
}
